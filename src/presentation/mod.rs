// Presentation layer - HTTP surface
pub mod app_state;
pub mod handlers;
pub mod html;
pub mod router;
