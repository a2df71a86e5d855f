use crate::error::{ProcessingError, Result};
use crate::models::RawRow;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// Reads a sheet's CSV export (header row first) into raw rows.
pub struct SheetReader {
    skip_empty_rows: bool,
}

impl SheetReader {
    pub fn new() -> Self {
        Self {
            skip_empty_rows: true,
        }
    }

    pub fn with_skip_empty_rows(skip_empty_rows: bool) -> Self {
        Self { skip_empty_rows }
    }

    /// Parse CSV text into rows keyed by the trimmed header labels
    pub fn read_rows(&self, csv_text: &str) -> Result<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(csv_text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ProcessingError::InvalidFormat(
                "CSV export has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;

            if self.skip_empty_rows && record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            rows.push(Self::to_raw_row(&headers, &record));
        }

        Ok(rows)
    }

    /// Read a CSV export saved on disk
    pub fn read_file(&self, path: &Path) -> Result<Vec<RawRow>> {
        let text = std::fs::read_to_string(path)?;
        self.read_rows(text.trim_start_matches('\u{feff}'))
    }

    fn to_raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
        // Short rows leave trailing columns absent; blank headers are ignored
        headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect()
    }
}

impl Default for SheetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_rows_with_quoted_fields() -> Result<()> {
        let csv = "\"北緯\",\"東経\",\"名称\",\"補足\"\n\
                   \"38.05\",\"138.4\",\"Shop A\",\"駐車場あり, 10台\"\n\
                   \"38.10\",\"138.5\",\"Shop B\",\"\"\n";

        let rows = SheetReader::new().read_rows(csv)?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["名称"], "Shop A");
        assert_eq!(rows[0]["補足"], "駐車場あり, 10台");
        assert_eq!(rows[1]["補足"], "");
        Ok(())
    }

    #[test]
    fn test_skips_blank_lines_and_empty_records() -> Result<()> {
        let csv = "北緯,東経,名称\n\n38.05,138.4,A\n,,\n\n38.1,138.5,B\n";

        let rows = SheetReader::new().read_rows(csv)?;
        assert_eq!(rows.len(), 2);

        let kept = SheetReader::with_skip_empty_rows(false).read_rows(csv)?;
        assert_eq!(kept.len(), 3);
        Ok(())
    }

    #[test]
    fn test_trims_headers_and_tolerates_short_rows() -> Result<()> {
        let csv = " 北緯 , 東経 ,名称,所在地\n38.05,138.4\n";

        let rows = SheetReader::new().read_rows(csv)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["北緯"], "38.05");
        assert!(!rows[0].contains_key("名称"));
        Ok(())
    }

    #[test]
    fn test_empty_body_is_invalid() {
        let err = SheetReader::new().read_rows("").unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(_)));
    }

    #[test]
    fn test_read_file_strips_bom() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "\u{feff}北緯,東経,名称\n38.05,138.4,Shop A\n")?;

        let rows = SheetReader::new().read_file(temp_file.path())?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["北緯"], "38.05");
        Ok(())
    }
}
