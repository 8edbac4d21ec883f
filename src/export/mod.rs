//! Channel image export
//!
//! This module writes extracted plane stacks out as conventional raster
//! files using a strategy per output format: TIF through the in-crate
//! writer, PNG through the image crate.

mod naming;
mod strategy;
mod tiff_strategy;
mod png_strategy;

pub use naming::OutputNaming;
pub use strategy::{ExportStrategy, ExportStrategyFactory};
pub use tiff_strategy::TiffExportStrategy;
pub use png_strategy::PngExportStrategy;

use crate::czi::errors::{CziError, CziResult};

/// Output format for exported channel images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Grayscale TIFF, multi-page for stacks
    Tif,
    /// PNG, one file per focal plane
    Png,
}

impl OutputFormat {
    /// Resolve a format by name
    pub fn from_name(name: &str) -> CziResult<Self> {
        match name.to_lowercase().as_str() {
            "tif" | "tiff" => Ok(OutputFormat::Tif),
            "png" => Ok(OutputFormat::Png),
            _ => Err(CziError::GenericError(format!("Unexpected output file type: {}", name)))
        }
    }

    /// File extension used for output paths
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tif => "tif",
            OutputFormat::Png => "png",
        }
    }

    /// Display name of the format
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Tif => "TIF",
            OutputFormat::Png => "PNG",
        }
    }
}

/// Which focal planes of a 3D stack to export
///
/// Slice numbers are 1-based for the operator and in filenames; 0 selects
/// the whole stack. The selection is ignored for 2D images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceSelection {
    /// Export every focal plane
    All,
    /// Export one focal plane, 1-based
    Single(u32),
}

impl SliceSelection {
    /// Builds a selection from the CLI/config slice number
    pub fn from_number(slice: u32) -> Self {
        if slice == 0 {
            SliceSelection::All
        } else {
            SliceSelection::Single(slice)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_resolve_case_insensitively() {
        assert_eq!(OutputFormat::from_name("TIF").unwrap(), OutputFormat::Tif);
        assert_eq!(OutputFormat::from_name("tiff").unwrap(), OutputFormat::Tif);
        assert_eq!(OutputFormat::from_name("png").unwrap(), OutputFormat::Png);
        assert!(OutputFormat::from_name("jpeg").is_err());
    }

    #[test]
    fn slice_zero_means_all() {
        assert_eq!(SliceSelection::from_number(0), SliceSelection::All);
        assert_eq!(SliceSelection::from_number(3), SliceSelection::Single(3));
    }
}
