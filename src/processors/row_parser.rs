use crate::error::{ProcessingError, Result};
use crate::models::{LocationRecord, RawRow, RelatedLink, SheetRow};
use crate::processors::event_log::{EventLog, LogEvent};
use crate::utils::constants::{COLUMN_RELATED_INFO, MAP_LINK_TEXT};
use crate::utils::coordinates::parse_coordinate;
use crate::utils::html::{escape_html, new_tab_link};
use validator::Validate;

/// Turns sheet rows into location records.
///
/// Parsing is a pure function of the row: the parser holds no state and the
/// same row always yields the same record.
#[derive(Debug, Default, Clone, Copy)]
pub struct RowParser;

impl RowParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one raw row. `category` only feeds diagnostics.
    pub fn parse(&self, raw: &RawRow, category: &str) -> Result<LocationRecord> {
        self.parse_sheet_row(&SheetRow::from_raw(raw), category)
    }

    pub fn parse_sheet_row(&self, row: &SheetRow, category: &str) -> Result<LocationRecord> {
        let invalid = || ProcessingError::InvalidCoordinates {
            category: category.to_string(),
            latitude: row.latitude.clone(),
            longitude: row.longitude.clone(),
        };

        let latitude = row
            .latitude
            .as_deref()
            .ok_or_else(invalid)
            .and_then(|lat| parse_coordinate(lat).map_err(|_| invalid()))?;
        let longitude = row
            .longitude
            .as_deref()
            .ok_or_else(invalid)
            .and_then(|lng| parse_coordinate(lng).map_err(|_| invalid()))?;

        let record = LocationRecord::new(
            latitude,
            longitude,
            row.title().to_string(),
            build_details_html(row),
        );
        record.validate().map_err(|_| invalid())?;

        Ok(record)
    }

    /// Parse every row of a category; rejected rows become `None` and are
    /// reported to `log` without failing the batch.
    pub fn parse_all(
        &self,
        rows: &[RawRow],
        category: &str,
        log: &dyn EventLog,
    ) -> Vec<Option<LocationRecord>> {
        let rows: Vec<SheetRow> = rows.iter().map(SheetRow::from_raw).collect();
        self.parse_sheet_rows(&rows, category, log)
    }

    /// Same as [`RowParser::parse_all`] for rows already resolved into
    /// [`SheetRow`]s. Row numbers are 1-based positions in `rows`.
    pub fn parse_sheet_rows(
        &self,
        rows: &[SheetRow],
        category: &str,
        log: &dyn EventLog,
    ) -> Vec<Option<LocationRecord>> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                let row_number = index + 1;
                match self.parse_sheet_row(row, category) {
                    Ok(record) => {
                        log.record(
                            LogEvent::RowParsed,
                            &[
                                ("sheet", &category),
                                ("row", &row_number),
                                ("lat", &record.latitude),
                                ("lng", &record.longitude),
                                ("title", &record.title),
                            ],
                        );
                        Some(record)
                    }
                    Err(err) => {
                        log.record(
                            LogEvent::RowRejected,
                            &[("sheet", &category), ("row", &row_number), ("reason", &err)],
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

/// Assemble the details fragment: present attributes in display order, then
/// the related-info list, then the external map link.
pub fn build_details_html(row: &SheetRow) -> String {
    let mut html = String::from("<ul>");

    for (attribute, value) in row.present_attributes() {
        html.push_str(&format!(
            "<li><b>{}:</b> {}</li>",
            attribute.label(),
            escape_html(value)
        ));
    }

    let related = row
        .related_info
        .as_deref()
        .map(RelatedLink::parse_cell)
        .unwrap_or_default();
    if !related.is_empty() {
        html.push_str(&format!("<li><b>{}:</b><ul>", COLUMN_RELATED_INFO));
        for link in &related {
            html.push_str(&link.to_list_item());
        }
        html.push_str("</ul></li>");
    }

    if let Some(map_link) = row.map_link.as_deref() {
        html.push_str(&format!("<li>{}</li>", new_tab_link(map_link, MAP_LINK_TEXT)));
    }

    html.push_str("</ul>");
    html
}
