//! Compression handling for CZI sub-blocks
//!
//! This module implements strategies for decoding the compression schemes
//! a CZI writer may have applied to sub-block pixel data.

mod handler;
mod uncompressed;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use factory::CompressionFactory;
pub use zstd::{Zstd0Handler, Zstd1Handler};
