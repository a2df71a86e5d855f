use std::fmt::Display;
use std::sync::Mutex;
use tracing::Level;

/// Diagnostic events emitted by the loading pipeline and map session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogEvent {
    RowParsed,
    RowRejected,
    MarkerCreated,
    MarkersRegistered,
    CategoryFetched,
    CategoryFailed,
    CategorySkipped,
    PopupOpened,
    PopupClosed,
    ViewRecentered,
    LocationFailed,
}

impl LogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::RowParsed => "row_parsed",
            LogEvent::RowRejected => "row_rejected",
            LogEvent::MarkerCreated => "marker_created",
            LogEvent::MarkersRegistered => "markers_registered",
            LogEvent::CategoryFetched => "category_fetched",
            LogEvent::CategoryFailed => "category_failed",
            LogEvent::CategorySkipped => "category_skipped",
            LogEvent::PopupOpened => "popup_opened",
            LogEvent::PopupClosed => "popup_closed",
            LogEvent::ViewRecentered => "view_recentered",
            LogEvent::LocationFailed => "location_failed",
        }
    }

    pub fn level(&self) -> Level {
        match self {
            LogEvent::RowRejected | LogEvent::CategorySkipped | LogEvent::LocationFailed => {
                Level::WARN
            }
            LogEvent::CategoryFailed => Level::ERROR,
            LogEvent::CategoryFetched | LogEvent::MarkersRegistered => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}

pub type Field<'a> = (&'static str, &'a dyn Display);

/// Logging capability handed to the pipeline instead of ambient log calls.
pub trait EventLog {
    fn record(&self, event: LogEvent, fields: &[Field<'_>]);
}

fn format_fields(fields: &[Field<'_>]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Forwards events to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn record(&self, event: LogEvent, fields: &[Field<'_>]) {
        let event_name = event.name();
        let fields = format_fields(fields);
        match event.level() {
            Level::ERROR => tracing::error!(event = event_name, fields = %fields),
            Level::WARN => tracing::warn!(event = event_name, fields = %fields),
            Level::INFO => tracing::info!(event = event_name, fields = %fields),
            _ => tracing::debug!(event = event_name, fields = %fields),
        }
    }
}

/// A recorded event with its fields rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub event: LogEvent,
    pub fields: Vec<(String, String)>,
}

impl RecordedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Keeps every event in memory; used to inspect what the pipeline reported.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, event: LogEvent) -> usize {
        self.events().iter().filter(|e| e.event == event).count()
    }
}

impl EventLog for MemoryEventLog {
    fn record(&self, event: LogEvent, fields: &[Field<'_>]) {
        let fields = fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        if let Ok(mut events) = self.events.lock() {
            events.push(RecordedEvent { event, fields });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_records_fields() {
        let log = MemoryEventLog::new();
        log.record(
            LogEvent::RowRejected,
            &[("sheet", &"和食"), ("row", &3), ("lat", &"abc")],
        );
        log.record(LogEvent::RowParsed, &[("sheet", &"和食")]);

        assert_eq!(log.count(LogEvent::RowRejected), 1);
        let events = log.events();
        assert_eq!(events[0].field("row"), Some("3"));
        assert_eq!(events[0].field("lat"), Some("abc"));
        assert_eq!(events[0].field("missing"), None);
    }

    #[test]
    fn test_event_levels() {
        assert_eq!(LogEvent::CategoryFailed.level(), Level::ERROR);
        assert_eq!(LogEvent::RowRejected.level(), Level::WARN);
        assert_eq!(LogEvent::RowParsed.level(), Level::DEBUG);
        assert_eq!(format_fields(&[("a", &1), ("b", &"x")]), "a=1 b=x");
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_log_records_structured_fields() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingEventLog.record(LogEvent::RowRejected, &[("sheet", &"和食"), ("row", &2)]);
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("row_rejected"));
        assert!(output.contains("fields=sheet=和食 row=2"));
    }

    #[test]
    fn test_tracing_log_without_subscriber() {
        TracingEventLog.record(LogEvent::PopupClosed, &[]);
    }
}
