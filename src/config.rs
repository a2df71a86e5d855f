//! Application settings.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML
//! file, then `SHEET_MARKERS_*` environment variables (`__` separates
//! nested keys, e.g. `SHEET_MARKERS_MAP__ZOOM=12`).

use crate::error::Result;
use crate::models::{CategoryStyle, LatLng, StyleMap};
use crate::processors::FailurePolicy;
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MapView {
    #[validate(range(min = MIN_LATITUDE, max = MAX_LATITUDE))]
    pub center_lat: f64,

    #[validate(range(min = MIN_LONGITUDE, max = MAX_LONGITUDE))]
    pub center_lng: f64,

    #[validate(range(min = 0, max = 22))]
    pub zoom: u8,
}

impl MapView {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub spreadsheet_id: String,

    #[validate(length(min = 1))]
    pub base_url: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    pub failure_policy: FailurePolicy,

    #[validate(length(min = 1))]
    pub default_color: String,

    #[validate(nested)]
    pub map: MapView,

    #[serde(default)]
    #[validate(nested)]
    pub categories: Vec<CategoryStyle>,
}

impl AppConfig {
    /// Load settings, falling back to the built-in category list when none
    /// is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("spreadsheet_id", DEFAULT_SPREADSHEET_ID)?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("failure_policy", "continue_on_error")?
            .set_default("default_color", DEFAULT_MARKER_COLOR)?
            .set_default("map.center_lat", DEFAULT_CENTER_LAT)?
            .set_default("map.center_lng", DEFAULT_CENTER_LNG)?
            .set_default("map.zoom", i64::from(DEFAULT_ZOOM))?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        if config.categories.is_empty() {
            config.categories = CategoryStyle::defaults();
        }
        config.validate()?;

        Ok(config)
    }

    pub fn style_map(&self) -> StyleMap {
        StyleMap::new(&self.categories, &self.default_color)
    }

    /// Category names in load order.
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            failure_policy: FailurePolicy::ContinueOnError,
            default_color: DEFAULT_MARKER_COLOR.to_string(),
            map: MapView {
                center_lat: DEFAULT_CENTER_LAT,
                center_lng: DEFAULT_CENTER_LNG,
                zoom: DEFAULT_ZOOM,
            },
            categories: CategoryStyle::defaults(),
        }
    }
}
