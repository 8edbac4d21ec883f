//! TIFF serialization
//!
//! Writing a valid TIFF requires careful management of offsets, ordering
//! and alignment. The layout produced here is: header, all IFDs in page
//! order, then all strip data, each block aligned to a word boundary.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};

use log::debug;

use crate::czi::errors::{CziError, CziResult};
use crate::tiff::constants::{header, tags};
use crate::tiff::ifd::Ifd;

/// Align an offset to a 4-byte boundary
fn align(offset: u64) -> u64 {
    (offset + 3) & !3
}

/// Write padding bytes after a data block to stay word-aligned
fn write_padding(writer: &mut impl Write, data_len: usize) -> CziResult<()> {
    let padding = (4 - (data_len % 4)) % 4;
    if padding > 0 {
        writer.write_all(&vec![0u8; padding])?;
    }
    Ok(())
}

/// Write a complete TIFF file to disk
///
/// # Arguments
/// * `ifds` - One IFD per page, in page order
/// * `strip_data` - Strip payload per page index
/// * `output_path` - Destination file path
pub fn write(ifds: &[Ifd], strip_data: &HashMap<usize, Vec<u8>>,
             output_path: &str) -> CziResult<()> {
    if ifds.is_empty() {
        return Err(CziError::GenericError("No pages to write".to_string()));
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);

    // Plan the layout: IFDs follow the 8-byte header back to back, strip
    // data follows the last IFD
    let mut offset = 8u64;
    let mut ifd_offsets = Vec::with_capacity(ifds.len());
    for ifd in ifds {
        ifd_offsets.push(offset);
        offset += ifd.serialized_size();
    }

    let mut data_offsets = HashMap::new();
    for (index, _) in ifds.iter().enumerate() {
        if let Some(data) = strip_data.get(&index) {
            offset = align(offset);
            data_offsets.insert(index, offset);
            offset += data.len() as u64;
        }
    }

    debug!("TIFF layout: {} pages, data starts at {}",
           ifds.len(), data_offsets.get(&0).copied().unwrap_or(0));

    // Header: byte order, version, offset of the first IFD
    writer.write_all(&header::LITTLE_ENDIAN_MARKER)?;
    writer.write_all(&header::TIFF_VERSION.to_le_bytes())?;
    writer.write_all(&(ifd_offsets[0] as u32).to_le_bytes())?;

    // IFDs, each linking to the next (0 terminates the chain)
    for (index, ifd) in ifds.iter().enumerate() {
        let next_offset = ifd_offsets.get(index + 1).copied().unwrap_or(0);
        write_ifd(&mut writer, ifd, index, next_offset, &data_offsets)?;
    }

    // Strip data in page order with alignment padding
    let mut written = ifd_offsets.last().copied().unwrap_or(8)
        + ifds.last().map(|ifd| ifd.serialized_size()).unwrap_or(0);
    for (index, _) in ifds.iter().enumerate() {
        if let Some(data) = strip_data.get(&index) {
            let target = data_offsets[&index];
            while written < target {
                writer.write_all(&[0u8])?;
                written += 1;
            }
            writer.write_all(data)?;
            written += data.len() as u64;
            write_padding(&mut writer, data.len())?;
            written = align(written);
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write one IFD, patching the strip offset to its planned position
fn write_ifd(writer: &mut impl Write, ifd: &Ifd, page_index: usize,
             next_offset: u64, data_offsets: &HashMap<usize, u64>) -> CziResult<()> {
    let entries = ifd.sorted_unique_entries();

    writer.write_all(&(entries.len() as u16).to_le_bytes())?;

    for entry in &entries {
        let value = if entry.tag == tags::STRIP_OFFSETS {
            data_offsets.get(&page_index).copied().unwrap_or(0) as u32
        } else {
            entry.value
        };

        writer.write_all(&entry.tag.to_le_bytes())?;
        writer.write_all(&entry.field_type.to_le_bytes())?;
        writer.write_all(&entry.count.to_le_bytes())?;
        writer.write_all(&value.to_le_bytes())?;
    }

    writer.write_all(&(next_offset as u32).to_le_bytes())?;
    Ok(())
}
