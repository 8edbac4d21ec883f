//! Handler for uncompressed sub-block data

use crate::czi::constants::compression;
use crate::czi::errors::CziResult;
use super::handler::CompressionHandler;

/// Pass-through handler for uncompressed data (compression code 0)
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> CziResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }

    fn code(&self) -> u32 {
        compression::UNCOMPRESSED
    }
}
