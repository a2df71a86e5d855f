use crate::error::Result;
use crate::utils::filename::sheet_csv_filename;
use std::path::{Path, PathBuf};

/// Somewhere the CSV export of a named sheet can be fetched from.
#[allow(async_fn_in_trait)]
pub trait SheetSource {
    async fn fetch_csv(&self, sheet_name: &str) -> Result<String>;

    /// Human-readable location of a sheet, for reports.
    fn describe(&self, sheet_name: &str) -> String;
}

/// Reads `{dir}/{sheet}.csv` files, e.g. exports saved for offline use.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn sheet_path(&self, sheet_name: &str) -> PathBuf {
        self.dir.join(sheet_csv_filename(sheet_name))
    }
}

impl SheetSource for DirectorySource {
    async fn fetch_csv(&self, sheet_name: &str) -> Result<String> {
        let bytes = tokio::fs::read(self.sheet_path(sheet_name)).await?;
        let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
        Ok(text.into_owned())
    }

    fn describe(&self, sheet_name: &str) -> String {
        self.sheet_path(sheet_name).display().to_string()
    }
}
