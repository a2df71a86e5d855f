use crate::error::{ProcessingError, Result};
use crate::models::{ClusterCollection, Notice, RawRow, SheetRow, StyleMap};
use crate::processors::event_log::{EventLog, LogEvent};
use crate::processors::marker_materializer::MarkerMaterializer;
use crate::processors::row_parser::RowParser;
use crate::readers::{SheetReader, SheetSource};
use crate::utils::progress::ProgressReporter;
use serde::{Deserialize, Serialize};

/// What happens to the remaining categories after one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    ContinueOnError,
    AbortRemaining,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryStatus {
    Loaded,
    FetchFailed(String),
    ParseFailed(String),
    NoValidRows,
    Skipped,
}

impl CategoryStatus {
    /// Status for a category whose sheet could not be fetched or read.
    pub fn from_error(err: &ProcessingError) -> Self {
        if err.is_fetch_failure() {
            CategoryStatus::FetchFailed(err.to_string())
        } else {
            CategoryStatus::ParseFailed(err.to_string())
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CategoryStatus::FetchFailed(_)
                | CategoryStatus::ParseFailed(_)
                | CategoryStatus::NoValidRows
        )
    }
}

/// A row dropped because its coordinates did not parse.
///
/// `row_number` is the 1-based index among the sheet's non-blank data rows
/// (the header and blank lines are not counted), matching marker ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub row_number: usize,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub category: String,
    pub source: String,
    pub rows_read: usize,
    pub markers: usize,
    pub rejected_rows: Vec<RejectedRow>,
    pub status: CategoryStatus,
}

impl CategoryOutcome {
    fn empty(category: &str, source: String, status: CategoryStatus) -> Self {
        Self {
            category: category.to_string(),
            source,
            rows_read: 0,
            markers: 0,
            rejected_rows: Vec::new(),
            status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub outcomes: Vec<CategoryOutcome>,
    pub notices: Vec<Notice>,
}

impl LoadReport {
    pub fn total_markers(&self) -> usize {
        self.outcomes.iter().map(|o| o.markers).sum()
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes.iter().map(|o| o.rows_read).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.outcomes.iter().map(|o| o.rejected_rows.len()).sum()
    }

    pub fn failed_categories(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_failure())
            .map(|o| o.category.as_str())
            .collect()
    }

    pub fn outcome(&self, category: &str) -> Option<&CategoryOutcome> {
        self.outcomes.iter().find(|o| o.category == category)
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Marker Load Report ===\n");
        summary.push_str(&format!("Categories: {}\n", self.outcomes.len()));
        summary.push_str(&format!("Rows Read: {}\n", self.total_rows()));
        summary.push_str(&format!("Markers: {}\n", self.total_markers()));
        summary.push_str(&format!("Rejected Rows: {}\n", self.total_rejected()));

        summary.push_str("\nPer Category:\n");
        for outcome in &self.outcomes {
            let status = match &outcome.status {
                CategoryStatus::Loaded => "ok".to_string(),
                CategoryStatus::FetchFailed(reason) => format!("fetch failed: {}", reason),
                CategoryStatus::ParseFailed(reason) => format!("parse failed: {}", reason),
                CategoryStatus::NoValidRows => "no valid rows".to_string(),
                CategoryStatus::Skipped => "skipped".to_string(),
            };
            summary.push_str(&format!(
                "  {}: {} markers from {} rows ({} rejected) [{}]\n",
                outcome.category,
                outcome.markers,
                outcome.rows_read,
                outcome.rejected_rows.len(),
                status
            ));
        }

        if !self.notices.is_empty() {
            summary.push_str(&format!("\nNotices: {}\n", self.notices.len()));
            for notice in &self.notices {
                summary.push_str(&format!("  ⚠️  {}\n", notice));
            }
        }

        summary
    }
}

/// Loads categories one after another and feeds their markers to a cluster
/// collection.
pub struct CategoryLoader<'a, S: SheetSource> {
    source: &'a S,
    styles: &'a StyleMap,
    reader: SheetReader,
    parser: RowParser,
    policy: FailurePolicy,
    log: &'a dyn EventLog,
    progress: Option<&'a ProgressReporter>,
}

impl<'a, S: SheetSource> CategoryLoader<'a, S> {
    pub fn new(source: &'a S, styles: &'a StyleMap, log: &'a dyn EventLog) -> Self {
        Self {
            source,
            styles,
            reader: SheetReader::new(),
            parser: RowParser::new(),
            policy: FailurePolicy::default(),
            log,
            progress: None,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Process `categories` in order. Failures become notices; nothing here
    /// aborts the caller.
    pub async fn load_all<C: ClusterCollection + ?Sized>(
        &self,
        categories: &[String],
        cluster: &mut C,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        let mut aborted = false;

        for (index, category) in categories.iter().enumerate() {
            if aborted {
                self.log
                    .record(LogEvent::CategorySkipped, &[("sheet", category)]);
                report.outcomes.push(CategoryOutcome::empty(
                    category,
                    self.source.describe(category),
                    CategoryStatus::Skipped,
                ));
                continue;
            }

            if let Some(progress) = self.progress {
                progress.start_category(category, index + 1, categories.len());
            }

            let outcome = self.load_category(category, cluster).await;

            if outcome.status.is_failure() {
                let notice = Notice::load_failed(category);
                self.log.record(
                    LogEvent::CategoryFailed,
                    &[("sheet", category), ("status", &format!("{:?}", outcome.status))],
                );
                if let Some(progress) = self.progress {
                    progress.println(&notice.message);
                }
                report.notices.push(notice);
                aborted = self.policy == FailurePolicy::AbortRemaining;
            }

            report.outcomes.push(outcome);
        }

        report
    }

    async fn fetch_rows(&self, category: &str) -> Result<Vec<RawRow>> {
        let csv_text = self.source.fetch_csv(category).await?;
        self.reader.read_rows(&csv_text)
    }

    async fn load_category<C: ClusterCollection + ?Sized>(
        &self,
        category: &str,
        cluster: &mut C,
    ) -> CategoryOutcome {
        let source = self.source.describe(category);

        let rows = match self.fetch_rows(category).await {
            Ok(rows) => rows,
            Err(err) => {
                return CategoryOutcome::empty(category, source, CategoryStatus::from_error(&err))
            }
        };
        self.log.record(
            LogEvent::CategoryFetched,
            &[("sheet", &category), ("rows", &rows.len())],
        );

        let sheet_rows: Vec<SheetRow> = rows.iter().map(SheetRow::from_raw).collect();
        let records = self.parser.parse_sheet_rows(&sheet_rows, category, self.log);
        let rejected_rows = records
            .iter()
            .zip(sheet_rows)
            .enumerate()
            .filter(|(_, (record, _))| record.is_none())
            .map(|(index, (_, row))| RejectedRow {
                row_number: index + 1,
                latitude: row.latitude,
                longitude: row.longitude,
            })
            .collect();

        let materializer = MarkerMaterializer::new(self.styles, self.log);
        let markers = materializer.materialize(&records, category);
        let registered = materializer.register(cluster, category, markers);

        CategoryOutcome {
            category: category.to_string(),
            source,
            rows_read: rows.len(),
            markers: registered,
            rejected_rows,
            status: if registered == 0 {
                CategoryStatus::NoValidRows
            } else {
                CategoryStatus::Loaded
            },
        }
    }
}

/// Load categories and return the report; convenience for callers that do
/// not keep the loader around.
pub async fn load_categories<S: SheetSource, C: ClusterCollection + ?Sized>(
    source: &S,
    styles: &StyleMap,
    categories: &[String],
    policy: FailurePolicy,
    log: &dyn EventLog,
    cluster: &mut C,
) -> LoadReport {
    let loader = CategoryLoader::new(source, styles, log).with_policy(policy);
    loader.load_all(categories, cluster).await
}
