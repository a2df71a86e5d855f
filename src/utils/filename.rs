use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default output filename with format: markers-{YYMMDD}.geojson
pub fn generate_default_geojson_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("markers-{:02}{:02}{:02}.geojson", year, month, day);
    PathBuf::from("output").join(filename)
}

/// File name a local sheet export is expected under: {sheet}.csv
pub fn sheet_csv_filename(sheet_name: &str) -> String {
    format!("{}.csv", sheet_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_geojson_filename() {
        let filename = generate_default_geojson_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output"));
        assert!(filename_str.ends_with(".geojson"));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("markers-"));
        // "markers-" + YYMMDD + ".geojson"
        assert_eq!(file_part.len(), "markers-".len() + 6 + ".geojson".len());
    }

    #[test]
    fn test_sheet_csv_filename() {
        assert_eq!(sheet_csv_filename("和食"), "和食.csv");
        assert_eq!(sheet_csv_filename("parking"), "parking.csv");
    }
}
