use crate::utils::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::utils::html::{escape_html, new_tab_link};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LocationRecord {
    #[validate(range(min = MIN_LATITUDE, max = MAX_LATITUDE))]
    pub latitude: f64,

    #[validate(range(min = MIN_LONGITUDE, max = MAX_LONGITUDE))]
    pub longitude: f64,

    pub title: String,

    pub details_html: String,
}

impl LocationRecord {
    pub fn new(latitude: f64, longitude: f64, title: String, details_html: String) -> Self {
        Self {
            latitude,
            longitude,
            title,
            details_html,
        }
    }
}

/// One whitespace-separated token of the related-info cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedLink {
    Url(String),
    Text(String),
}

impl RelatedLink {
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        if Url::parse(token).is_ok() {
            RelatedLink::Url(token.to_string())
        } else {
            RelatedLink::Text(token.to_string())
        }
    }

    /// Split a cell on whitespace runs, keeping token order.
    pub fn parse_cell(cell: &str) -> Vec<Self> {
        cell.split_whitespace().map(Self::classify).collect()
    }

    pub fn to_list_item(&self) -> String {
        match self {
            RelatedLink::Url(url) => format!("<li>{}</li>", new_tab_link(url, url)),
            RelatedLink::Text(text) => format!("<li>{}</li>", escape_html(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        let record = LocationRecord::new(38.05, 138.4, "Shop A".to_string(), String::new());
        assert!(record.validate().is_ok());

        let out_of_range = LocationRecord::new(91.0, 138.4, "Shop A".to_string(), String::new());
        assert!(out_of_range.validate().is_err());

        let bad_lng = LocationRecord::new(38.05, 181.0, "Shop A".to_string(), String::new());
        assert!(bad_lng.validate().is_err());
    }

    #[test]
    fn test_location_bounds_are_inclusive() {
        let corner = LocationRecord::new(MAX_LATITUDE, MIN_LONGITUDE, String::new(), String::new());
        assert!(corner.validate().is_ok());

        let past_corner =
            LocationRecord::new(MIN_LATITUDE - 0.001, MAX_LONGITUDE, String::new(), String::new());
        assert!(past_corner.validate().is_err());
    }

    #[test]
    fn test_related_link_classification() {
        assert_eq!(
            RelatedLink::classify("https://a.example"),
            RelatedLink::Url("https://a.example".to_string())
        );
        assert_eq!(
            RelatedLink::classify("note"),
            RelatedLink::Text("note".to_string())
        );
        assert_eq!(
            RelatedLink::classify("www.example.com"),
            RelatedLink::Text("www.example.com".to_string())
        );
    }

    #[test]
    fn test_parse_cell_keeps_order() {
        let links = RelatedLink::parse_cell("https://a.example  note\ttext\nhttps://b.example/x");
        assert_eq!(
            links,
            vec![
                RelatedLink::Url("https://a.example".to_string()),
                RelatedLink::Text("note".to_string()),
                RelatedLink::Text("text".to_string()),
                RelatedLink::Url("https://b.example/x".to_string()),
            ]
        );
        assert!(RelatedLink::parse_cell("   ").is_empty());
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            RelatedLink::Url("https://a.example".to_string()).to_list_item(),
            "<li><a href=\"https://a.example\" target=\"_blank\">https://a.example</a></li>"
        );
        assert_eq!(
            RelatedLink::Text("<note>".to_string()).to_list_item(),
            "<li>&lt;note&gt;</li>"
        );
    }
}
