//! Run configuration file support
//!
//! A TOML file can carry the same settings as the command line, so a
//! recurring batch can be captured in one place:
//!
//! ```toml
//! data_path = "/data/screening"
//! output_path = "channels"
//! manifest = "plate1.csv"
//! output_format = "tif"
//! channel = "ALL"
//! slice = 1
//! ```
//!
//! Explicit command-line options always win over file values.

use std::fs;

use crate::czi::errors::{CziError, CziResult};

/// Settings read from a configuration file
///
/// Every field is optional; unset fields fall back to the command-line
/// value or its default.
#[derive(Debug, Default, Clone)]
pub struct RunConfig {
    /// Root directory the manifest folders are relative to
    pub data_path: Option<String>,
    /// Directory the exported images are written into
    pub output_path: Option<String>,
    /// Path of the manifest CSV
    pub manifest: Option<String>,
    /// Output format name (tif or png)
    pub output_format: Option<String>,
    /// Channel-name filter
    pub channel: Option<String>,
    /// Slice number, 0 for the whole stack
    pub slice: Option<u32>,
    /// Whether an existing output directory may be reused
    pub overwrite: Option<bool>,
}

impl RunConfig {
    /// Parse a configuration from a TOML string
    pub fn from_str(content: &str) -> CziResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(CziError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut config = RunConfig::default();

        config.data_path = Self::get_string(&toml_value, "data_path");
        config.output_path = Self::get_string(&toml_value, "output_path");
        config.manifest = Self::get_string(&toml_value, "manifest");
        config.output_format = Self::get_string(&toml_value, "output_format");
        config.channel = Self::get_string(&toml_value, "channel");

        config.slice = toml_value.get("slice")
            .and_then(|v| v.as_integer())
            .map(|v| v as u32);
        config.overwrite = toml_value.get("overwrite")
            .and_then(|v| v.as_bool());

        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &str) -> CziResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(CziError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    /// Helper to read an optional string field
    fn get_string(toml_value: &toml::Value, key: &str) -> Option<String> {
        toml_value.get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let config = RunConfig::from_str(r#"
data_path = "/data"
output_path = "out"
manifest = "plate1.csv"
output_format = "png"
channel = "DAPI"
slice = 0
overwrite = true
"#).unwrap();

        assert_eq!(config.data_path.as_deref(), Some("/data"));
        assert_eq!(config.output_format.as_deref(), Some("png"));
        assert_eq!(config.slice, Some(0));
        assert_eq!(config.overwrite, Some(true));
    }

    #[test]
    fn missing_fields_stay_unset() {
        let config = RunConfig::from_str("manifest = \"m.csv\"").unwrap();
        assert_eq!(config.manifest.as_deref(), Some("m.csv"));
        assert!(config.data_path.is_none());
        assert!(config.slice.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(RunConfig::from_str("manifest = [").is_err());
    }
}
