//! Factory for creating compression handlers

use crate::czi::constants::compression;
use crate::czi::errors::{CziError, CziResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::zstd::{Zstd0Handler, Zstd1Handler};

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    ///
    /// JPEG and JPEG-XR payloads exist in the wild but are outside what
    /// this tool decodes; they surface as UnsupportedCompression so the
    /// batch can skip the record with a clear message.
    pub fn create_handler(compression: u32) -> CziResult<Box<dyn CompressionHandler>> {
        match compression {
            compression::UNCOMPRESSED => Ok(Box::new(UncompressedHandler)),
            compression::ZSTD0 => Ok(Box::new(Zstd0Handler)),
            compression::ZSTD1 => Ok(Box::new(Zstd1Handler::new())),
            other => Err(CziError::UnsupportedCompression(other))
        }
    }

    /// Whether a compression code can be decoded by this build
    pub fn is_supported(compression: u32) -> bool {
        Self::create_handler(compression).is_ok()
    }

    /// Get all available compression handlers
    pub fn get_available_handlers() -> Vec<Box<dyn CompressionHandler>> {
        vec![
            Box::new(UncompressedHandler),
            Box::new(Zstd0Handler),
            Box::new(Zstd1Handler::new())
        ]
    }
}
