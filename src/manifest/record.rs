//! Manifest record structure

use std::path::PathBuf;

use serde::Deserialize;

use crate::utils::string_utils;

/// One row of the channel manifest
///
/// The CSV header names map directly onto the fields:
///
/// ```text
/// folder,image,channel_nr,channel_name
/// folder1,Image.czi,0,DAPI
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRecord {
    /// Folder of the image file, relative to the data directory
    pub folder: String,
    /// Image file name including the .czi extension
    pub image: String,
    /// Zero-based channel index inside the container
    pub channel_nr: u32,
    /// Stain name used for output file naming and tallies
    pub channel_name: String,
}

impl ChannelRecord {
    /// Image name without its extension, used as the output prefix
    pub fn prefix(&self) -> String {
        string_utils::file_prefix(&self.image)
    }

    /// Path of the image file relative to the data directory
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join(&self.image)
    }
}
