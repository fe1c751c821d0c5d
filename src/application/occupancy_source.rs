// Source trait for occupancy data access
use crate::domain::location::LocationRecord;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("occupancy request failed: {0}")]
    Transport(String),
    #[error("occupancy provider answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("occupancy payload is not a location list: {0}")]
    Decode(String),
}

#[async_trait]
pub trait OccupancySource: Send + Sync {
    /// Fetch the full, ordered list of locations. Never served from a cache.
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, LoadError>;
}
