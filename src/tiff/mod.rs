//! Minimal TIFF writing module
//!
//! Export needs nothing more than baseline grayscale TIFF: one strip per
//! page, 8 or 16 bits per sample, little-endian, one IFD per focal plane
//! for stacks. This module provides exactly that and no reader.

pub mod ifd;
pub mod builder;
pub(crate) mod constants;
mod writer;

pub use ifd::{Ifd, IfdEntry};
pub use builder::TiffBuilder;
