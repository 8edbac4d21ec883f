//! Custom error types for CZI processing

use std::fmt;
use std::io;

/// CZI-specific error types
#[derive(Debug)]
pub enum CziError {
    /// I/O error
    IoError(io::Error),
    /// Segment id did not match what the reader expected
    InvalidSegmentId(String),
    /// Invalid file header segment
    InvalidHeader,
    /// Unsupported ZISRAW major version
    UnsupportedVersion(u32),
    /// Unsupported sub-block compression scheme
    UnsupportedCompression(u32),
    /// Unsupported pixel type for export
    UnsupportedPixelType(u32),
    /// Image dimensions missing from the metadata document
    MissingDimensions,
    /// Requested channel index is outside the available range
    ChannelUnavailable { requested: u32, available: u32 },
    /// Metadata channel count disagrees with the sub-block structure
    ChannelMismatch { expected: u32, axis_channels: u32, plane_blocks: u32 },
    /// Manifest file could not be parsed
    InvalidManifest(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CziError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CziError::IoError(e) => write!(f, "I/O error: {}", e),
            CziError::InvalidSegmentId(id) => write!(f, "Unexpected segment id: {}", id),
            CziError::InvalidHeader => write!(f, "Invalid CZI file header"),
            CziError::UnsupportedVersion(v) => write!(f, "Unsupported ZISRAW version: {}", v),
            CziError::UnsupportedCompression(c) => write!(f, "Unsupported compression scheme: {}", c),
            CziError::UnsupportedPixelType(p) => write!(f, "Unsupported pixel type: {}", p),
            CziError::MissingDimensions => write!(f, "Image dimensions not found in metadata"),
            CziError::ChannelUnavailable { requested, available } =>
                write!(f, "Channel {} requested but only {} available", requested, available),
            CziError::ChannelMismatch { expected, axis_channels, plane_blocks } =>
                write!(f, "Metadata reports {} channels but sub-blocks expose {} on the C axis ({} plane blocks)",
                       expected, axis_channels, plane_blocks),
            CziError::InvalidManifest(msg) => write!(f, "Manifest error: {}", msg),
            CziError::GenericError(msg) => write!(f, "CZI error: {}", msg),
        }
    }
}

impl std::error::Error for CziError {}

impl From<io::Error> for CziError {
    fn from(error: io::Error) -> Self {
        CziError::IoError(error)
    }
}

/// Result type for CZI operations
pub type CziResult<T> = Result<T, CziError>;

impl From<String> for CziError {
    fn from(msg: String) -> Self {
        CziError::GenericError(msg)
    }
}
