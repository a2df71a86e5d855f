//! HTTP source for published-spreadsheet CSV exports.

use crate::error::{ProcessingError, Result};
use crate::readers::sheet_source::SheetSource;
use crate::utils::constants::CSV_EXPORT_FORMAT;
use reqwest::{Client, Url};
use std::time::Duration;

/// Fetches one sheet at a time from `{base}/spreadsheets/d/{id}/gviz/tq`.
///
/// No request timeout is applied unless one is configured; the transport's
/// own defaults decide when a stalled request gives up.
pub struct SheetClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
}

impl SheetClient {
    /// # Errors
    ///
    /// Returns [`ProcessingError::Config`] for an unparsable `base_url` and
    /// [`ProcessingError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, spreadsheet_id: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ProcessingError::Config(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }

    /// Export URL for a sheet; the sheet name is percent-encoded.
    pub fn sheet_url(&self, sheet_name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/spreadsheets/d/{}/gviz/tq", self.spreadsheet_id));
        url.query_pairs_mut()
            .clear()
            .append_pair("sheet", sheet_name)
            .append_pair("tqx", CSV_EXPORT_FORMAT);
        url
    }
}

impl SheetSource for SheetClient {
    async fn fetch_csv(&self, sheet_name: &str) -> Result<String> {
        let url = self.sheet_url(sheet_name);
        tracing::debug!(sheet = sheet_name, url = %url, "fetching sheet export");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
        if had_errors {
            tracing::warn!(sheet = sheet_name, "sheet export contained invalid UTF-8");
        }

        Ok(text.into_owned())
    }

    fn describe(&self, sheet_name: &str) -> String {
        self.sheet_url(sheet_name).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_url_encodes_sheet_name() {
        let client = SheetClient::new("https://docs.google.com", "abc123", None).unwrap();
        let url = client.sheet_url("和食");

        assert_eq!(url.path(), "/spreadsheets/d/abc123/gviz/tq");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("sheet".to_string(), "和食".to_string()),
                ("tqx".to_string(), "out:csv".to_string()),
            ]
        );
        assert!(!url.as_str().contains("和食"));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = SheetClient::new("not a url", "abc123", None);
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
