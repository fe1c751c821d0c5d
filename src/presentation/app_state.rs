// Application state for HTTP handlers
use crate::application::dashboard::Dashboard;
use crate::presentation::html::PageRenderer;
use std::sync::Arc;

pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub renderer: PageRenderer,
}
