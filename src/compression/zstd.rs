//! Handlers for zstd-compressed sub-block data
//!
//! CZI knows two zstd variants. Zstd0 is a plain zstd stream. Zstd1
//! prefixes the stream with a small header that may declare hi/lo byte
//! packing: the writer split every 16-bit sample and stored all low bytes
//! followed by all high bytes before compressing, which the reader must
//! undo after decompression.

use log::debug;

use crate::czi::constants::compression;
use crate::czi::errors::{CziError, CziResult};
use super::handler::CompressionHandler;

/// Plain zstd stream handler (compression code 5)
pub struct Zstd0Handler;

impl CompressionHandler for Zstd0Handler {
    fn decompress(&self, data: &[u8]) -> CziResult<Vec<u8>> {
        zstd::stream::decode_all(data).map_err(CziError::IoError)
    }

    fn name(&self) -> &'static str {
        "Zstd0"
    }

    fn code(&self) -> u32 {
        compression::ZSTD0
    }
}

/// Headered zstd stream handler (compression code 6)
pub struct Zstd1Handler;

impl Zstd1Handler {
    pub fn new() -> Self {
        Zstd1Handler
    }

    /// Splits the Zstd1 header off the payload
    ///
    /// The first byte is the header size. A 1-byte header carries no
    /// options; a 3-byte header holds a chunk id (1 = hi/lo packing)
    /// and a flags byte whose lowest bit enables the packing.
    ///
    /// # Returns
    /// Whether hi/lo unpacking is required, and the zstd stream itself
    fn split_header(data: &[u8]) -> CziResult<(bool, &[u8])> {
        let Some(&header_size) = data.first() else {
            return Err(CziError::GenericError("Empty Zstd1 payload".to_string()));
        };
        let header_size = header_size as usize;

        if header_size < 1 || header_size > data.len() {
            return Err(CziError::GenericError(format!(
                "Invalid Zstd1 header size: {}", header_size)));
        }

        let mut hi_lo_packed = false;
        if header_size >= 3 && data[1] == 1 {
            hi_lo_packed = data[2] & 1 == 1;
        }

        Ok((hi_lo_packed, &data[header_size..]))
    }

    /// Re-interleaves hi/lo packed 16-bit samples
    ///
    /// The packed buffer holds all low bytes in its first half and all
    /// high bytes in its second half; output is little-endian samples.
    fn unpack_hi_lo(packed: &[u8]) -> CziResult<Vec<u8>> {
        if packed.len() % 2 != 0 {
            return Err(CziError::GenericError(format!(
                "Hi/lo packed data has odd length: {}", packed.len())));
        }

        let half = packed.len() / 2;
        let (lo, hi) = packed.split_at(half);

        let mut out = Vec::with_capacity(packed.len());
        for i in 0..half {
            out.push(lo[i]);
            out.push(hi[i]);
        }

        Ok(out)
    }
}

impl CompressionHandler for Zstd1Handler {
    fn decompress(&self, data: &[u8]) -> CziResult<Vec<u8>> {
        let (hi_lo_packed, stream) = Self::split_header(data)?;
        debug!("Zstd1 payload: {} bytes, hi/lo packed: {}", stream.len(), hi_lo_packed);

        let decoded = zstd::stream::decode_all(stream).map_err(CziError::IoError)?;

        if hi_lo_packed {
            Self::unpack_hi_lo(&decoded)
        } else {
            Ok(decoded)
        }
    }

    fn name(&self) -> &'static str {
        "Zstd1"
    }

    fn code(&self) -> u32 {
        compression::ZSTD1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zstd0_round_trips_plain_streams() {
        let raw = vec![7u8; 64];
        let compressed = zstd::stream::encode_all(&raw[..], 0).unwrap();

        let handler = Zstd0Handler;
        assert_eq!(handler.decompress(&compressed).unwrap(), raw);
    }

    #[test]
    fn zstd1_minimal_header_is_skipped() {
        let raw = vec![3u8, 1, 4, 1, 5, 9];
        let compressed = zstd::stream::encode_all(&raw[..], 0).unwrap();

        let mut payload = vec![1u8]; // header: size 1, no options
        payload.extend_from_slice(&compressed);

        let handler = Zstd1Handler::new();
        assert_eq!(handler.decompress(&payload).unwrap(), raw);
    }

    #[test]
    fn zstd1_unpacks_hi_lo_samples() {
        // Two 16-bit samples 0x0201 and 0x0403, packed as lows then highs
        let packed = vec![0x01u8, 0x03, 0x02, 0x04];
        let compressed = zstd::stream::encode_all(&packed[..], 0).unwrap();

        let mut payload = vec![3u8, 1, 1]; // header: size 3, chunk 1, packed
        payload.extend_from_slice(&compressed);

        let handler = Zstd1Handler::new();
        let out = handler.decompress(&payload).unwrap();
        assert_eq!(out, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn zstd1_rejects_empty_payload() {
        let handler = Zstd1Handler::new();
        assert!(handler.decompress(&[]).is_err());
    }
}
