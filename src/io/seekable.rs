//! Seekable reader trait
//!
//! Reading a CZI container means hopping between segments scattered
//! through the file, so every reader the crate works with must support
//! both reading and seeking.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
