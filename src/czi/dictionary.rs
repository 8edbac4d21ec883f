//! CZI code dictionary
//!
//! This module provides display names for the numeric codes that appear in
//! sub-block directory entries, loaded from an embedded TOML table.

use std::collections::HashMap;
use std::fs;

use lazy_static::lazy_static;

use crate::czi::errors::{CziError, CziResult};

lazy_static! {
    // Parse the TOML file at startup
    static ref CZI_DEFINITIONS: CziDefinitions = {
        let content = include_str!("../../czi_dictionary.toml");
        CziDefinitions::from_str(content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse CZI code dictionary: {}", e);
                CziDefinitions::default()
            })
    };
}

/// Container for CZI code definitions
#[derive(Debug, Default)]
pub struct CziDefinitions {
    // Maps pixel type codes to names
    pub pixel_type_names: HashMap<u32, String>,
    // Maps compression codes to names
    pub compression_names: HashMap<u32, String>,
    // Maps dimension ids to axis descriptions
    pub dimension_names: HashMap<String, String>,
}

impl CziDefinitions {
    /// Parse CZI definitions from a TOML string
    pub fn from_str(content: &str) -> CziResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(CziError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = CziDefinitions::default();

        Self::parse_code_table(&toml_value, "pixel_type_codes", &mut defs.pixel_type_names);
        Self::parse_code_table(&toml_value, "compression_codes", &mut defs.compression_names);

        // Dimension ids are single letters, not numeric codes
        if let Some(table) = toml_value.get("dimension_ids").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let Some(name) = v.as_str() {
                    defs.dimension_names.insert(k.clone(), name.to_string());
                }
            }
        }

        Ok(defs)
    }

    /// Helper to parse numeric code tables from TOML
    fn parse_code_table(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<u32, String>) {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(code), Some(name)) = (k.parse::<u32>(), v.as_str()) {
                    target.insert(code, name.to_string());
                }
            }
        }
    }

    /// Load CZI definitions from a TOML file
    pub fn from_file(path: &str) -> CziResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(CziError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    /// Get a pixel type name by code
    pub fn pixel_type_name(&self, code: u32) -> String {
        self.pixel_type_names.get(&code)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", code))
    }

    /// Get a compression name by code
    pub fn compression_name(&self, code: u32) -> String {
        self.compression_names.get(&code)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", code))
    }

    /// Get a dimension axis description by id
    pub fn dimension_name(&self, id: char) -> String {
        self.dimension_names.get(&id.to_string())
            .cloned()
            .unwrap_or_else(|| format!("unknown axis {}", id))
    }
}

/// Access to the embedded definitions
pub fn definitions() -> &'static CziDefinitions {
    &CZI_DEFINITIONS
}
