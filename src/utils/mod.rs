pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod html;
pub mod progress;

pub use constants::*;
pub use coordinates::parse_coordinate;
pub use filename::{generate_default_geojson_filename, sheet_csv_filename};
pub use html::{escape_html, new_tab_link};
pub use progress::ProgressReporter;
