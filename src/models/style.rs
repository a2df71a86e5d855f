use crate::utils::constants::{DEFAULT_CATEGORIES, DEFAULT_MARKER_COLOR};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryStyle {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub color: String,
}

impl CategoryStyle {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| Self::new(name, color))
            .collect()
    }
}

/// Read-only category to color lookup.
#[derive(Debug, Clone)]
pub struct StyleMap {
    colors: HashMap<String, String>,
    default_color: String,
}

impl StyleMap {
    pub fn new(styles: &[CategoryStyle], default_color: &str) -> Self {
        let colors = styles
            .iter()
            .map(|style| (style.name.clone(), style.color.clone()))
            .collect();

        Self {
            colors,
            default_color: default_color.to_string(),
        }
    }

    /// Configured color, or the default color for unknown categories.
    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(self.default_color.as_str())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new(&CategoryStyle::defaults(), DEFAULT_MARKER_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_colors() {
        let styles = StyleMap::default();
        assert_eq!(styles.color_for("和食"), "#2100f1");
        assert_eq!(styles.color_for("販売"), "#f100a7");
        assert!(styles.contains("公共トイレ"));
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let styles = StyleMap::new(&[CategoryStyle::new("A", "#111111")], "black");
        assert_eq!(styles.color_for("B"), "black");
        assert!(!styles.contains("B"));
        assert_eq!(styles.default_color(), "black");
    }

    #[test]
    fn test_style_validation() {
        assert!(CategoryStyle::new("和食", "#2100f1").validate().is_ok());
        assert!(CategoryStyle::new("", "#2100f1").validate().is_err());
        assert!(CategoryStyle::new("和食", "").validate().is_err());
    }
}
