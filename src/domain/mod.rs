// Domain layer - Occupancy records and their presentation
pub mod card;
pub mod congestion;
pub mod location;
