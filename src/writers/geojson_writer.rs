use crate::error::{ProcessingError, Result};
use crate::models::{LatLng, MarkerDescriptor, MarkerIcon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: MarkerProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// GeoJSON order: longitude, latitude
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerProperties {
    pub id: String,
    pub category: String,
    pub title: String,
    pub label: String,
    pub color: String,
    pub icon: MarkerIcon,
    pub hover_icon: MarkerIcon,
    pub popup_html: String,
}

impl From<&MarkerDescriptor> for Feature {
    fn from(marker: &MarkerDescriptor) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: PointGeometry {
                kind: "Point".to_string(),
                coordinates: [marker.position.lng, marker.position.lat],
            },
            properties: MarkerProperties {
                id: marker.id.clone(),
                category: marker.category.clone(),
                title: marker.title.clone(),
                label: marker.label.clone(),
                color: marker.color.clone(),
                icon: marker.icon.clone(),
                hover_icon: marker.hover_icon.clone(),
                popup_html: marker.popup_html.clone(),
            },
        }
    }
}

impl From<Feature> for MarkerDescriptor {
    fn from(feature: Feature) -> Self {
        let [lng, lat] = feature.geometry.coordinates;
        let props = feature.properties;
        Self {
            id: props.id,
            category: props.category,
            position: LatLng::new(lat, lng),
            title: props.title,
            label: props.label,
            color: props.color,
            icon: props.icon,
            hover_icon: props.hover_icon,
            popup_html: props.popup_html,
        }
    }
}

pub struct GeoJsonWriter {
    pretty: bool,
}

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write markers as a FeatureCollection; an empty slice yields an empty collection
    pub fn write_markers(&self, markers: &[MarkerDescriptor], path: &Path) -> Result<()> {
        let collection = FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: markers.iter().map(Feature::from).collect(),
        };

        let mut writer = BufWriter::new(File::create(path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &collection)?;
        } else {
            serde_json::to_writer(&mut writer, &collection)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }

    pub fn read_collection(&self, path: &Path) -> Result<FeatureCollection> {
        let reader = BufReader::new(File::open(path)?);
        let collection: FeatureCollection = serde_json::from_reader(reader)?;

        if collection.kind != "FeatureCollection" {
            return Err(ProcessingError::InvalidFormat(format!(
                "Expected a FeatureCollection, found '{}'",
                collection.kind
            )));
        }

        Ok(collection)
    }

    /// Read the first `limit` markers back from a written file
    pub fn read_sample_markers(&self, path: &Path, limit: usize) -> Result<Vec<MarkerDescriptor>> {
        let collection = self.read_collection(path)?;
        Ok(collection
            .features
            .into_iter()
            .take(limit)
            .map(MarkerDescriptor::from)
            .collect())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<GeoJsonFileInfo> {
        let collection = self.read_collection(path)?;
        let file_size = std::fs::metadata(path)?.len();

        let mut categories = BTreeMap::new();
        let mut bounds: Option<Bounds> = None;
        for feature in &collection.features {
            *categories
                .entry(feature.properties.category.clone())
                .or_insert(0) += 1;

            let [lng, lat] = feature.geometry.coordinates;
            bounds = Some(match bounds {
                None => Bounds {
                    min_lat: lat,
                    max_lat: lat,
                    min_lng: lng,
                    max_lng: lng,
                },
                Some(b) => Bounds {
                    min_lat: b.min_lat.min(lat),
                    max_lat: b.max_lat.max(lat),
                    min_lng: b.min_lng.min(lng),
                    max_lng: b.max_lng.max(lng),
                },
            });
        }

        Ok(GeoJsonFileInfo {
            total_features: collection.features.len(),
            categories,
            bounds,
            file_size,
        })
    }
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

#[derive(Debug)]
pub struct GeoJsonFileInfo {
    pub total_features: usize,
    pub categories: BTreeMap<String, usize>,
    pub bounds: Option<Bounds>,
    pub file_size: u64,
}

impl GeoJsonFileInfo {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "GeoJSON File Summary:\n\
            - Total markers: {}\n\
            - Categories: {}\n\
            - File size: {:.2} KB\n",
            self.total_features,
            self.categories.len(),
            self.file_size as f64 / 1024.0
        );

        if let Some(b) = self.bounds {
            summary.push_str(&format!(
                "- Bounds: lat [{:.4}, {:.4}], lng [{:.4}, {:.4}]\n",
                b.min_lat, b.max_lat, b.min_lng, b.max_lng
            ));
        }

        for (category, count) in &self.categories {
            summary.push_str(&format!("  {}: {} markers\n", category, count));
        }

        summary
    }
}
