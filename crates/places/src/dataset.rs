use serde::{Deserialize, Serialize};

/// Identifies one static dataset, e.g. `"main"` or `"obioakpa"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetSelector(pub String);

impl DatasetSelector {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatasetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a dataset lives and how it is presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub id: DatasetSelector,
    /// Human readable name, e.g. "Main Campus (Ikot Akpaden)".
    pub label: String,
    pub url: String,
}

impl DatasetSource {
    pub fn new(id: &str, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: DatasetSelector::new(id),
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Looks up `id` among `sources`.
pub fn find_source<'a>(sources: &'a [DatasetSource], id: &str) -> Option<&'a DatasetSource> {
    sources.iter().find(|s| s.id.as_str() == id)
}
