//! Replay configuration: the gesture set plus the devices feeding it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use weave_core::{ConfigError, RegionConfig, View};

use crate::error::{ReplayError, ReplayResult};

/// A surface contributing pointer events, and how it views the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub id: String,
    #[serde(default)]
    pub view: View,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(flatten)]
    pub region: RegionConfig,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl ReplayConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"{
        "gestures": [{ "type": "pan" }, { "type": "tap", "num_inputs": 2 }],
        "devices": [
            { "id": "table" },
            { "id": "wall", "view": { "scale": 2.0, "offset": { "x": 100.0, "y": 0.0 } } }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let config = ReplayConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.region.gestures.len(), 2);
        assert_eq!(config.devices.len(), 2);
        assert_eq!(config.devices[0].id, "table");
        assert_eq!(config.devices[0].view, View::default());

        let wall = &config.devices[1].view;
        assert_eq!(wall.scale, 2.0);
        assert_eq!(wall.offset.x, 100.0);
    }

    #[test]
    fn test_empty_document_is_valid() {
        let config = ReplayConfig::from_json("{}").unwrap();
        assert!(config.region.gestures.is_empty());
        assert!(config.devices.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        let config = ReplayConfig::load(file.path()).unwrap();
        assert_eq!(config.devices[1].id, "wall");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReplayConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"gestures\": [{ \"type\": \"wave\" }] }").unwrap();
        let err = ReplayConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ReplayError::Config(ConfigError::Parse(_))));
    }
}
