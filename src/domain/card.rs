// Card view model rendered once per location
use super::congestion::CongestionLevel;
use super::location::LocationRecord;
use serde::Serialize;

/// Result of the camera image existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageState {
    Unknown,
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationCard {
    pub name: String,
    pub current: u32,
    pub capacity: u32,
    pub percentage: Option<u64>,
    pub level: CongestionLevel,
    pub tone: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub bar_class: &'static str,
    pub badge_class: &'static str,
    pub warning: bool,
    pub image: ImageState,
    pub image_url: Option<String>,
}

impl LocationCard {
    /// `image_url` is only kept when the image is known to exist.
    pub fn new(record: &LocationRecord, image: ImageState, image_url: Option<String>) -> Self {
        let presentation = record.level.presentation();
        let image_url = match image {
            ImageState::Present => image_url,
            ImageState::Unknown | ImageState::Absent => None,
        };

        Self {
            name: record.location_name.clone(),
            current: record.current,
            capacity: record.capacity,
            percentage: record.percentage(),
            level: record.level,
            tone: presentation.tone,
            label: presentation.label,
            color: presentation.color,
            bar_class: presentation.bar_class,
            badge_class: presentation.badge_class,
            warning: record.level.needs_warning(),
            image,
            image_url,
        }
    }
}

/// One fetched generation of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub records: Vec<LocationRecord>,
    pub last_updated: String,
}

impl Snapshot {
    pub fn new(records: Vec<LocationRecord>, last_updated: String) -> Self {
        Self {
            records,
            last_updated,
        }
    }
}

/// What the page shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Ready(Snapshot),
    Failed { error: String, at: String },
}
