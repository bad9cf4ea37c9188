use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// CSS color of the marker icon.
    pub color: String,
}

impl MarkerStyle {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

/// Marker icon color per place category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbology {
    pub categories: BTreeMap<String, MarkerStyle>,
    pub fallback: MarkerStyle,
}

impl Symbology {
    pub fn style_for(&self, category: &str) -> &MarkerStyle {
        self.categories.get(category).unwrap_or(&self.fallback)
    }
}

impl Default for Symbology {
    fn default() -> Self {
        let categories = [
            ("academic", "#1e88e5"),
            ("administration", "#8e24aa"),
            ("hostel", "#43a047"),
            ("facility", "#fb8c00"),
            ("lecture", "#e53935"),
        ]
        .into_iter()
        .map(|(k, c)| (k.to_string(), MarkerStyle::new(c)))
        .collect();

        Self {
            categories,
            fallback: MarkerStyle::new("#546e7a"),
        }
    }
}
