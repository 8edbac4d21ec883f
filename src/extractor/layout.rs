//! Channel storage layout detection
//!
//! Zeiss microscopes store multiple channels in a CZI file in one of two
//! ways: each sub-block carries a C dimension entry placing it on a channel
//! axis, or the channels sit in separate blocks with no usable C axis and
//! only the metadata channel count tells them apart. The extractor has to
//! know which convention it is looking at before it can select anything.

use log::{debug, info};

use crate::czi::errors::{CziError, CziResult};
use crate::czi::types::Czi;

/// How a container stores its channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Sub-blocks carry a C dimension entry; select by C start index
    DimensionAxis,
    /// One block per channel in directory order; select by position
    Blocked,
}

/// Detects the channel storage layout of a container
///
/// The C axis wins when its distinct start indices account for every
/// channel the metadata promises. Failing that, a directory with exactly
/// one full-resolution block per metadata channel is treated as blocked
/// storage. Anything else means the metadata and the directory disagree,
/// which the caller reports and skips.
///
/// # Arguments
/// * `czi` - The opened container
pub fn detect_channel_layout(czi: &Czi) -> CziResult<ChannelLayout> {
    let size_c = czi.dimensions.size_c;
    let channel_starts = czi.channel_starts();
    let plane_blocks = czi.plane_entries().len();

    debug!("Layout detection: SizeC={}, C starts={:?}, plane blocks={}",
           size_c, channel_starts, plane_blocks);

    if channel_starts.len() as u32 == size_c {
        return Ok(ChannelLayout::DimensionAxis);
    }

    if plane_blocks as u32 == size_c {
        info!("Assuming channels stored in blocks");
        return Ok(ChannelLayout::Blocked);
    }

    Err(CziError::ChannelMismatch {
        expected: size_c,
        axis_channels: channel_starts.len() as u32,
        plane_blocks: plane_blocks as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::czi::directory::{DimensionEntry, DirectoryEntry};
    use crate::czi::metadata::ImageDimensions;
    use crate::czi::segment::FileHeader;

    fn dim(id: char, start: i32, size: u32) -> DimensionEntry {
        DimensionEntry {
            dimension: id,
            start,
            size,
            start_coordinate: 0.0,
            stored_size: size,
        }
    }

    fn entry(c: Option<i32>, z: i32) -> DirectoryEntry {
        let mut dims = vec![dim('X', 0, 4), dim('Y', 0, 2), dim('Z', z, 1)];
        if let Some(c) = c {
            dims.push(dim('C', c, 1));
        }

        DirectoryEntry {
            pixel_type: 0,
            file_position: 0,
            file_part: 0,
            compression: 0,
            pyramid_type: 0,
            dimension_entries: dims,
        }
    }

    fn czi_with(size_c: u32, size_z: u32, directory: Vec<DirectoryEntry>) -> Czi {
        let header = FileHeader {
            major: 1,
            minor: 0,
            primary_file_guid: [0; 16],
            file_guid: [0; 16],
            file_part: 0,
            directory_position: 0,
            metadata_position: 0,
            update_pending: 0,
            attachment_directory_position: 0,
        };

        let dimensions = ImageDimensions {
            size_x: 4,
            size_y: 2,
            size_c,
            size_z,
        };

        Czi::new(header, dimensions, directory)
    }

    #[test]
    fn c_axis_covering_all_channels_wins() {
        let czi = czi_with(2, 1, vec![entry(Some(0), 0), entry(Some(1), 0)]);
        assert_eq!(detect_channel_layout(&czi).unwrap(), ChannelLayout::DimensionAxis);
    }

    #[test]
    fn single_channel_is_a_trivial_axis() {
        let czi = czi_with(1, 1, vec![entry(None, 0)]);
        assert_eq!(detect_channel_layout(&czi).unwrap(), ChannelLayout::DimensionAxis);
    }

    #[test]
    fn block_per_channel_without_c_axis_is_blocked() {
        // Two blocks, both on C start 0, but metadata promises two channels
        let czi = czi_with(2, 1, vec![entry(None, 0), entry(None, 0)]);
        assert_eq!(detect_channel_layout(&czi).unwrap(), ChannelLayout::Blocked);
    }

    #[test]
    fn disagreement_is_a_mismatch_error() {
        let czi = czi_with(3, 1, vec![entry(Some(0), 0), entry(Some(1), 0)]);
        match detect_channel_layout(&czi) {
            Err(CziError::ChannelMismatch { expected, axis_channels, plane_blocks }) => {
                assert_eq!(expected, 3);
                assert_eq!(axis_channels, 2);
                assert_eq!(plane_blocks, 2);
            }
            other => panic!("Expected ChannelMismatch, got {:?}", other),
        }
    }
}
