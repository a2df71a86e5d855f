pub mod category_loader;
pub mod event_log;
pub mod map_session;
pub mod marker_materializer;
pub mod row_parser;

pub use category_loader::{
    load_categories, CategoryLoader, CategoryOutcome, CategoryStatus, FailurePolicy, LoadReport,
    RejectedRow,
};
pub use event_log::{EventLog, LogEvent, MemoryEventLog, RecordedEvent, TracingEventLog};
pub use map_session::{MapSession, MapSurface, Popup, PopupAnchor};
pub use marker_materializer::MarkerMaterializer;
pub use row_parser::{build_details_html, RowParser};
