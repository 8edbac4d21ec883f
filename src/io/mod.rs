//! I/O utilities for file handling
//!
//! This module provides traits for the I/O operations used by the reader.

pub mod seekable;
