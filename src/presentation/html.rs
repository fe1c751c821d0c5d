// HTML page rendering with embedded minijinja templates
use crate::domain::card::LocationCard;
use crate::domain::congestion::CongestionLevel;
use minijinja::{context, Environment};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LegendEntry {
    label: &'static str,
    color: &'static str,
    range: &'static str,
}

#[derive(Debug, Serialize)]
struct MapMarker {
    label: &'static str,
    color: &'static str,
    position: &'static str,
}

// Sample facilities drawn on the map placeholder.
const MARKERS: [MapMarker; 4] = [
    MapMarker {
        label: "図書館",
        color: "#22c55e",
        position: "top: 5rem; left: 5rem",
    },
    MapMarker {
        label: "食堂",
        color: "#ef4444",
        position: "top: 8rem; right: 8rem",
    },
    MapMarker {
        label: "体育館",
        color: "#22c55e",
        position: "bottom: 8rem; left: 8rem",
    },
    MapMarker {
        label: "駐車場",
        color: "#eab308",
        position: "bottom: 5rem; right: 5rem",
    },
];

#[derive(Debug, Serialize)]
struct MapLegendEntry {
    label: &'static str,
    color: &'static str,
}

const MAP_LEGEND: [MapLegendEntry; 3] = [
    MapLegendEntry {
        label: "空いている施設",
        color: "#22c55e",
    },
    MapLegendEntry {
        label: "やや混雑している施設",
        color: "#eab308",
    },
    MapLegendEntry {
        label: "混雑している施設",
        color: "#ef4444",
    },
];

fn legend() -> Vec<LegendEntry> {
    [
        (CongestionLevel::Low, "0-50%"),
        (CongestionLevel::Medium, "51-80%"),
        (CongestionLevel::High, "81-100%"),
    ]
    .into_iter()
    .map(|(level, range)| {
        let presentation = level.presentation();
        LegendEntry {
            label: presentation.label,
            color: presentation.color,
            range,
        }
    })
    .collect()
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("dashboard.html", include_str!("templates/dashboard.html"))?;
        env.add_template("error.html", include_str!("templates/error.html"))?;
        Ok(Self { env })
    }

    pub fn dashboard(
        &self,
        cards: &[LocationCard],
        last_updated: &str,
        refresh_secs: u64,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("dashboard.html")?.render(context! {
            cards,
            last_updated,
            refresh_secs,
            legend => legend(),
            markers => MARKERS,
            map_legend => MAP_LEGEND,
        })
    }

    pub fn failure(&self, error: &str, at: &str, refresh_secs: u64) -> Result<String, minijinja::Error> {
        self.env.get_template("error.html")?.render(context! {
            error,
            at,
            refresh_secs,
        })
    }
}
