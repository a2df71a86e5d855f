use crate::models::{ClusterCollection, LocationRecord, MarkerDescriptor, RawRow, StyleMap};
use crate::processors::event_log::{EventLog, LogEvent};
use crate::processors::row_parser::RowParser;

/// Builds colored marker descriptors for one category at a time.
pub struct MarkerMaterializer<'a> {
    styles: &'a StyleMap,
    parser: RowParser,
    log: &'a dyn EventLog,
}

impl<'a> MarkerMaterializer<'a> {
    pub fn new(styles: &'a StyleMap, log: &'a dyn EventLog) -> Self {
        Self {
            styles,
            parser: RowParser::new(),
            log,
        }
    }

    /// Descriptors for every present record; `None` entries are skipped but
    /// still count towards row numbering.
    pub fn materialize(
        &self,
        records: &[Option<LocationRecord>],
        category: &str,
    ) -> Vec<MarkerDescriptor> {
        let color = self.styles.color_for(category);

        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let record = record.as_ref()?;
                let marker = MarkerDescriptor::from_location(record, category, index + 1, color);
                self.log.record(
                    LogEvent::MarkerCreated,
                    &[("sheet", &category), ("id", &marker.id), ("color", &color)],
                );
                Some(marker)
            })
            .collect()
    }

    /// Parse raw rows and materialize the valid ones.
    pub fn materialize_category(&self, rows: &[RawRow], category: &str) -> Vec<MarkerDescriptor> {
        let records = self.parser.parse_all(rows, category, self.log);
        self.materialize(&records, category)
    }

    /// Hand a category's markers to the cluster collection in one batch.
    /// Returns how many markers were registered.
    pub fn register<C: ClusterCollection + ?Sized>(
        &self,
        cluster: &mut C,
        category: &str,
        markers: Vec<MarkerDescriptor>,
    ) -> usize {
        let count = markers.len();
        if count == 0 {
            return 0;
        }

        cluster.add_markers(markers);
        self.log.record(
            LogEvent::MarkersRegistered,
            &[("sheet", &category), ("markers", &count)],
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryStyle, MarkerCollection};
    use crate::processors::event_log::MemoryEventLog;

    fn record(title: &str) -> LocationRecord {
        LocationRecord::new(38.05, 138.4, title.to_string(), "<ul></ul>".to_string())
    }

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_materialize_skips_missing_records() {
        let styles = StyleMap::default();
        let log = MemoryEventLog::new();
        let materializer = MarkerMaterializer::new(&styles, &log);

        let markers =
            materializer.materialize(&[Some(record("A")), None, Some(record("C"))], "和食");

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, "和食#1");
        assert_eq!(markers[1].id, "和食#3");
        assert!(markers.iter().all(|m| m.color == "#2100f1"));
        assert_eq!(log.count(LogEvent::MarkerCreated), 2);
    }

    #[test]
    fn test_unknown_category_uses_default_color() {
        let styles = StyleMap::new(&[CategoryStyle::new("和食", "#2100f1")], "black");
        let log = MemoryEventLog::new();
        let materializer = MarkerMaterializer::new(&styles, &log);

        let markers = materializer.materialize(&[Some(record("A")), Some(record("B"))], "不明");

        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.color == "black"));
        assert!(markers.iter().all(|m| m.icon.fill_color == "black"));
    }

    #[test]
    fn test_materialize_category_from_rows() {
        let styles = StyleMap::default();
        let log = MemoryEventLog::new();
        let materializer = MarkerMaterializer::new(&styles, &log);
        let rows = vec![
            raw(&[("北緯", "38.05"), ("東経", "138.4"), ("名称", "Shop A")]),
            raw(&[("北緯", "abc"), ("東経", "138.4"), ("名称", "Shop B")]),
        ];

        let markers = materializer.materialize_category(&rows, "中華");

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].label, "中華 - Shop A");
        assert_eq!(markers[0].color, "#3d00f1");
        assert_eq!(log.count(LogEvent::RowRejected), 1);
    }

    #[test]
    fn test_all_invalid_rows_yield_nothing() {
        let styles = StyleMap::default();
        let log = MemoryEventLog::new();
        let materializer = MarkerMaterializer::new(&styles, &log);
        let rows = vec![raw(&[("北緯", "x"), ("東経", "y")])];

        assert!(materializer.materialize_category(&rows, "中華").is_empty());
    }

    #[test]
    fn test_register_adds_one_batch() {
        let styles = StyleMap::default();
        let log = MemoryEventLog::new();
        let materializer = MarkerMaterializer::new(&styles, &log);
        let mut cluster = MarkerCollection::new();

        let markers = materializer.materialize(&[Some(record("A")), Some(record("B"))], "和食");
        assert_eq!(materializer.register(&mut cluster, "和食", markers), 2);
        assert_eq!(materializer.register(&mut cluster, "中華", Vec::new()), 0);

        assert_eq!(cluster.batch_count(), 1);
        assert_eq!(cluster.len(), 2);
        assert_eq!(log.count(LogEvent::MarkersRegistered), 1);
    }
}
