// Location occupancy record as published by the data provider
use super::congestion::{occupancy_percentage, CongestionLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationRecord {
    pub location_name: String,
    pub current: u32,
    pub capacity: u32,
    #[serde(default)]
    pub level: CongestionLevel,
    #[serde(default)]
    pub camera_id: Option<String>,
}

impl LocationRecord {
    pub fn new(location_name: &str, current: u32, capacity: u32, level: CongestionLevel) -> Self {
        Self {
            location_name: location_name.to_string(),
            current,
            capacity,
            level,
            camera_id: None,
        }
    }

    #[cfg(test)]
    pub fn with_camera(mut self, camera_id: &str) -> Self {
        self.camera_id = Some(camera_id.to_string());
        self
    }

    pub fn percentage(&self) -> Option<u64> {
        occupancy_percentage(self.current, self.capacity)
    }

    /// Blank ids count as absent.
    pub fn camera(&self) -> Option<&str> {
        self.camera_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Path of the still image for a camera: `/` + percent-encoded id + `.jpg`.
pub fn camera_image_path(camera_id: &str) -> String {
    format!("/{}.jpg", urlencoding::encode(camera_id))
}
