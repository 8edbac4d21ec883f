//! Output file naming
//!
//! Output names are a deterministic function of the image prefix, the
//! channel name and (for single slices) the 1-based slice number:
//! `<prefix>_<channel>.<ext>` or `<prefix>_<channel>_Z<n>.<ext>`.

use std::path::{Path, PathBuf};

/// Names the output files for one (image, channel) pair
#[derive(Debug, Clone)]
pub struct OutputNaming {
    /// Directory the files are written into
    output_dir: PathBuf,
    /// Image file name without extension
    prefix: String,
    /// Channel name from the manifest
    channel_name: String,
}

impl OutputNaming {
    /// Create a naming scheme for one export target
    pub fn new(output_dir: &Path, prefix: &str, channel_name: &str) -> Self {
        OutputNaming {
            output_dir: output_dir.to_path_buf(),
            prefix: prefix.to_string(),
            channel_name: channel_name.to_string(),
        }
    }

    /// Path for a 2D image or a whole stack in one file
    pub fn flat_path(&self, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}.{}", self.prefix, self.channel_name, extension))
    }

    /// Path for a single focal plane, 1-based slice number
    pub fn slice_path(&self, slice: u32, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}_Z{}.{}",
                                     self.prefix, self.channel_name, slice, extension))
    }

    /// The image prefix this naming belongs to
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The channel name this naming belongs to
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_naming_convention() {
        let naming = OutputNaming::new(Path::new("channels"), "Image2", "DAPI");
        assert_eq!(naming.flat_path("tif"),
                   PathBuf::from("channels/Image2_DAPI.tif"));
        assert_eq!(naming.slice_path(4, "png"),
                   PathBuf::from("channels/Image2_DAPI_Z4.png"));
    }
}
