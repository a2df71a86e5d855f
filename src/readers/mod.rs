pub mod sheet_client;
pub mod sheet_reader;
pub mod sheet_source;

pub use sheet_client::SheetClient;
pub use sheet_reader::SheetReader;
pub use sheet_source::{DirectorySource, SheetSource};
