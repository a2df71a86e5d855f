pub mod geojson_writer;

pub use geojson_writer::{FeatureCollection, GeoJsonFileInfo, GeoJsonWriter};
