//! Compression handler trait definition

use crate::czi::errors::CziResult;

/// Strategy trait for decoding different compression schemes
///
/// CZI files are read-only input for this tool, so handlers only decode.
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> CziResult<Vec<u8>>;

    /// Get the name of this compression scheme
    fn name(&self) -> &'static str;

    /// Get the compression code
    fn code(&self) -> u32;
}
