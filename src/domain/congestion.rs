// Congestion level domain model
use serde::{Deserialize, Serialize};

/// Occupancy severity as reported by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "Option<serde_json::Value>", rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    Unknown,
}

/// Fixed display attributes for one congestion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelPresentation {
    pub tone: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub bar_class: &'static str,
    pub badge_class: &'static str,
}

impl Default for CongestionLevel {
    fn default() -> Self {
        CongestionLevel::Unknown
    }
}

// Anything other than the three known strings (null, numbers, typos) is `Unknown`.
impl From<Option<serde_json::Value>> for CongestionLevel {
    fn from(value: Option<serde_json::Value>) -> Self {
        match value.as_ref().and_then(serde_json::Value::as_str) {
            Some("low") => CongestionLevel::Low,
            Some("medium") => CongestionLevel::Medium,
            Some("high") => CongestionLevel::High,
            _ => CongestionLevel::Unknown,
        }
    }
}

impl CongestionLevel {
    pub fn presentation(self) -> LevelPresentation {
        match self {
            CongestionLevel::Low => LevelPresentation {
                tone: "blue",
                label: "空いている",
                color: "hsl(210, 100%, 50%)",
                bar_class: "bg-blue-500",
                badge_class: "bg-green-100 text-green-800",
            },
            CongestionLevel::Medium => LevelPresentation {
                tone: "yellow",
                label: "やや混雑",
                color: "hsl(45, 100%, 50%)",
                bar_class: "bg-yellow-500",
                badge_class: "bg-yellow-100 text-yellow-800",
            },
            CongestionLevel::High => LevelPresentation {
                tone: "red",
                label: "混雑",
                color: "hsl(0, 100%, 50%)",
                bar_class: "bg-red-500",
                badge_class: "bg-red-100 text-red-800",
            },
            CongestionLevel::Unknown => LevelPresentation {
                tone: "gray",
                label: "不明",
                color: "hsl(0, 0%, 50%)",
                bar_class: "bg-gray-500",
                badge_class: "",
            },
        }
    }

    /// Only the highest level carries the "混雑しています" annotation.
    pub fn needs_warning(self) -> bool {
        self == CongestionLevel::High
    }
}

/// `round(current / capacity * 100)`, not clamped.
///
/// Returns `None` when `capacity` is zero, since the ratio is not finite.
pub fn occupancy_percentage(current: u32, capacity: u32) -> Option<u64> {
    let ratio = f64::from(current) / f64::from(capacity) * 100.0;
    if !ratio.is_finite() {
        return None;
    }
    Some(ratio.round() as u64)
}
