use crate::models::LocationRecord;
use crate::utils::constants::*;
use crate::utils::html::escape_html;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct LatLng {
    #[validate(range(min = MIN_LATITUDE, max = MAX_LATITUDE))]
    pub lat: f64,

    #[validate(range(min = MIN_LONGITUDE, max = MAX_LONGITUDE))]
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    BackwardClosedArrow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub shape: MarkerShape,
    pub fill_color: String,
    pub fill_opacity: f32,
    pub stroke_color: String,
    pub stroke_weight: u8,
    pub scale: u8,
}

impl MarkerIcon {
    pub fn circle(fill_color: &str) -> Self {
        Self {
            shape: MarkerShape::Circle,
            fill_color: fill_color.to_string(),
            fill_opacity: 1.0,
            stroke_color: MARKER_STROKE_COLOR.to_string(),
            stroke_weight: MARKER_STROKE_WEIGHT,
            scale: MARKER_SCALE,
        }
    }

    /// Emphasized variant shown while the pointer rests on a marker.
    pub fn hover() -> Self {
        Self {
            scale: HOVER_MARKER_SCALE,
            ..Self::circle(HOVER_MARKER_COLOR)
        }
    }

    pub fn current_location() -> Self {
        Self {
            shape: MarkerShape::BackwardClosedArrow,
            ..Self::circle(CURRENT_LOCATION_COLOR)
        }
    }
}

/// Everything a rendering surface needs to draw one marker and wire its hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    pub id: String,
    pub category: String,
    pub position: LatLng,
    pub title: String,
    pub label: String,
    pub color: String,
    pub icon: MarkerIcon,
    pub hover_icon: MarkerIcon,
    pub popup_html: String,
}

impl MarkerDescriptor {
    /// `row_number` is the 1-based position of the source row in its sheet.
    pub fn from_location(
        location: &LocationRecord,
        category: &str,
        row_number: usize,
        color: &str,
    ) -> Self {
        Self {
            id: format!("{}#{}", category, row_number),
            category: category.to_string(),
            position: LatLng::new(location.latitude, location.longitude),
            title: location.title.clone(),
            label: format!("{} - {}", category, location.title),
            color: color.to_string(),
            icon: MarkerIcon::circle(color),
            hover_icon: MarkerIcon::hover(),
            popup_html: format!(
                "<div><h3>{}</h3>{}</div>",
                escape_html(&location.title),
                location.details_html
            ),
        }
    }
}

/// Visual aggregation surface that groups nearby markers.
pub trait ClusterCollection {
    /// Register a whole category batch at once so clustering sees all of it.
    fn add_markers(&mut self, markers: Vec<MarkerDescriptor>);
}

/// In-memory cluster collection that keeps each registered batch.
#[derive(Debug, Default)]
pub struct MarkerCollection {
    batches: Vec<Vec<MarkerDescriptor>>,
}

impl MarkerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn len(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerDescriptor> {
        self.batches.iter().flatten()
    }

    pub fn into_markers(self) -> Vec<MarkerDescriptor> {
        self.batches.into_iter().flatten().collect()
    }
}

impl ClusterCollection for MarkerCollection {
    fn add_markers(&mut self, markers: Vec<MarkerDescriptor>) {
        self.batches.push(markers);
    }
}
