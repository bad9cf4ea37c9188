use foundation::geo::LatLng;
use layers::symbology::Symbology;
use places::dataset::{DatasetSource, find_source};
use serde::{Deserialize, Serialize};

/// Highest zoom the OpenStreetMap tile servers provide.
pub const MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Leaflet URL template.
    pub url: String,
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial map center.
    pub center: LatLng,
    pub zoom: u8,
    /// Zoom used when jumping to a place or to the user's position.
    pub focus_zoom: u8,
    pub tiles: TileConfig,
    pub datasets: Vec<DatasetSource>,
    pub default_dataset: String,
    pub geolocation: GeolocationOptions,
    pub symbology: Symbology,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(4.970411, 7.756878),
            zoom: 16,
            focus_zoom: 18,
            tiles: TileConfig::default(),
            datasets: vec![
                DatasetSource::new("main", "Main Campus (Ikot Akpaden)", "data/locations.json"),
                DatasetSource::new(
                    "obioakpa",
                    "Obio Akpa Campus",
                    "data/locations_obioakpa.json",
                ),
            ],
            default_dataset: "main".to_string(),
            geolocation: GeolocationOptions::default(),
            symbology: Symbology::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    NoDatasets,
    UnknownDefaultDataset(String),
    InvalidCenter,
    InvalidZoom(u8),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid viewer config: {msg}"),
            ConfigError::NoDatasets => write!(f, "viewer config lists no datasets"),
            ConfigError::UnknownDefaultDataset(id) => {
                write!(f, "default dataset `{id}` is not among the configured datasets")
            }
            ConfigError::InvalidCenter => write!(f, "map center is not a valid coordinate"),
            ConfigError::InvalidZoom(z) => write!(f, "zoom {z} is above the maximum of {MAX_ZOOM}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ViewerConfig {
    /// Parses a JSON config; omitted fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.datasets.is_empty() {
            return Err(ConfigError::NoDatasets);
        }
        if find_source(&self.datasets, &self.default_dataset).is_none() {
            return Err(ConfigError::UnknownDefaultDataset(
                self.default_dataset.clone(),
            ));
        }
        if !self.center.is_valid() {
            return Err(ConfigError::InvalidCenter);
        }
        for zoom in [self.zoom, self.focus_zoom] {
            if zoom > MAX_ZOOM {
                return Err(ConfigError::InvalidZoom(zoom));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ViewerConfig};
    use foundation::geo::LatLng;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.geolocation.timeout_ms, 10_000);
        assert!(config.geolocation.high_accuracy);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(r#"{"zoom": 15, "default_dataset": "obioakpa"}"#)
            .unwrap();
        assert_eq!(config.zoom, 15);
        assert_eq!(config.focus_zoom, 18);
        assert_eq!(config.center, LatLng::new(4.970411, 7.756878));
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.default_dataset, "obioakpa");
    }

    #[test]
    fn custom_datasets_and_symbology() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "datasets": [{"id": "city", "label": "City Campus", "url": "city.json"}],
                "default_dataset": "city",
                "symbology": {"categories": {"lab": {"color": "teal"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.datasets[0].id.as_str(), "city");
        assert_eq!(config.symbology.style_for("lab").color, "teal");
        assert_eq!(config.symbology.style_for("hostel"), &config.symbology.fallback);
    }

    #[test]
    fn rejects_inconsistent_configs() {
        assert_eq!(
            ViewerConfig::from_json_str(r#"{"default_dataset": "moon"}"#),
            Err(ConfigError::UnknownDefaultDataset("moon".to_string()))
        );
        assert_eq!(
            ViewerConfig::from_json_str(r#"{"datasets": []}"#),
            Err(ConfigError::NoDatasets)
        );
        assert_eq!(
            ViewerConfig::from_json_str(r#"{"focus_zoom": 25}"#),
            Err(ConfigError::InvalidZoom(25))
        );
        assert_eq!(
            ViewerConfig::from_json_str(r#"{"center": {"lat": 120.0, "lng": 0.0}}"#),
            Err(ConfigError::InvalidCenter)
        );
        assert!(matches!(
            ViewerConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
