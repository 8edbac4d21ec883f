//! Helpers for assembling synthetic CZI containers in memory
//!
//! Real instrument files are far too large to check in; these helpers
//! build byte-exact miniature containers covering the structures the
//! reader walks: file header, metadata segment, sub-block segments and
//! the sub-block directory.

use std::cmp;

/// Specification of one synthetic sub-block
pub struct SubblockSpec {
    /// Channel start index (written only when `include_c` is set)
    pub c: i32,
    /// Focal plane start index
    pub z: i32,
    /// Pixel type code
    pub pixel_type: u32,
    /// Compression code
    pub compression: u32,
    /// Pyramid type byte (0 = full resolution)
    pub pyramid_type: u8,
    /// Plane width in pixels
    pub width: u32,
    /// Plane height in pixels
    pub height: u32,
    /// Payload bytes as stored (already compressed if applicable)
    pub data: Vec<u8>,
    /// Whether the block carries a C dimension entry
    pub include_c: bool,
}

impl SubblockSpec {
    /// A full-resolution uncompressed Gray8 block
    pub fn gray8(c: i32, z: i32, width: u32, height: u32, data: Vec<u8>) -> Self {
        SubblockSpec {
            c,
            z,
            pixel_type: 0,
            compression: 0,
            pyramid_type: 0,
            width,
            height,
            data,
            include_c: true,
        }
    }

    fn dimension_count(&self) -> u32 {
        if self.include_c { 4 } else { 3 }
    }

    fn entry_size(&self) -> u64 {
        32 + 20 * self.dimension_count() as u64
    }

    fn data_offset(&self) -> u64 {
        cmp::max(256, 16 + self.entry_size())
    }

    fn segment_size(&self) -> u64 {
        // Segment header + sub-block header/entry/padding + payload
        32 + self.data_offset() + self.data.len() as u64
    }
}

pub fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn put_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Wraps a payload in a segment header with the given id
pub fn segment(id: &str, payload: &[u8]) -> Vec<u8> {
    let mut seg = Vec::with_capacity(32 + payload.len());

    let mut raw_id = [0u8; 16];
    raw_id[..id.len()].copy_from_slice(id.as_bytes());
    seg.extend_from_slice(&raw_id);

    put_u64(&mut seg, payload.len() as u64);
    put_u64(&mut seg, payload.len() as u64);
    seg.extend_from_slice(payload);
    seg
}

/// Serializes one 20-byte dimension entry
pub fn dimension_entry(id: char, start: i32, size: u32, stored_size: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(20);
    let mut raw_id = [0u8; 4];
    raw_id[0] = id as u8;
    buf.extend_from_slice(&raw_id);

    put_i32(&mut buf, start);
    put_u32(&mut buf, size);
    put_f32(&mut buf, 0.0);
    put_u32(&mut buf, stored_size);
    buf
}

/// Serializes a DV directory entry for a spec at a known file position
pub fn directory_entry_bytes(spec: &SubblockSpec, file_position: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"DV");
    put_u32(&mut buf, spec.pixel_type);
    put_u64(&mut buf, file_position);
    put_u32(&mut buf, 0); // file part
    put_u32(&mut buf, spec.compression);
    buf.push(spec.pyramid_type);
    buf.extend_from_slice(&[0u8; 5]);

    put_u32(&mut buf, spec.dimension_count());
    buf.extend_from_slice(&dimension_entry('X', 0, spec.width, spec.width));
    buf.extend_from_slice(&dimension_entry('Y', 0, spec.height, spec.height));
    if spec.include_c {
        buf.extend_from_slice(&dimension_entry('C', spec.c, 1, 1));
    }
    buf.extend_from_slice(&dimension_entry('Z', spec.z, 1, 1));
    buf
}

/// Builds the metadata XML document
pub fn metadata_xml(size_x: u32, size_y: u32, size_c: Option<u32>, size_z: Option<u32>) -> String {
    let mut sizes = format!("<SizeX>{}</SizeX><SizeY>{}</SizeY>", size_x, size_y);
    if let Some(c) = size_c {
        sizes.push_str(&format!("<SizeC>{}</SizeC>", c));
    }
    if let Some(z) = size_z {
        sizes.push_str(&format!("<SizeZ>{}</SizeZ>", z));
    }

    format!("<ImageDocument><Metadata><Information><Image>{}</Image></Information></Metadata></ImageDocument>",
            sizes)
}

/// Assembles a complete container from dimension sizes and block specs
///
/// Layout: file header, sub-block segments in spec order, metadata
/// segment, directory segment.
pub fn build_czi(size_x: u32, size_y: u32, size_c: Option<u32>, size_z: Option<u32>,
                 blocks: &[SubblockSpec]) -> Vec<u8> {
    let header_payload_size = 80u64;

    // First pass: plan segment positions
    let mut position = 32 + header_payload_size;
    let mut block_positions = Vec::with_capacity(blocks.len());
    for spec in blocks {
        block_positions.push(position);
        position += spec.segment_size();
    }

    let metadata_position = position;
    let xml = metadata_xml(size_x, size_y, size_c, size_z);
    let metadata_payload_size = 256 + xml.len() as u64;
    position += 32 + metadata_payload_size;

    let directory_position = position;

    // File header payload
    let mut header_payload = Vec::new();
    put_u32(&mut header_payload, 1); // major
    put_u32(&mut header_payload, 0); // minor
    put_u32(&mut header_payload, 0); // reserved
    put_u32(&mut header_payload, 0); // reserved
    header_payload.extend_from_slice(&[0u8; 16]); // primary file guid
    header_payload.extend_from_slice(&[0u8; 16]); // file guid
    put_u32(&mut header_payload, 0); // file part
    put_u64(&mut header_payload, directory_position);
    put_u64(&mut header_payload, metadata_position);
    put_u32(&mut header_payload, 0); // update pending
    put_u64(&mut header_payload, 0); // attachment directory
    assert_eq!(header_payload.len() as u64, header_payload_size);

    let mut file = segment("ZISRAWFILE", &header_payload);

    // Sub-block segments
    for (spec, &block_position) in blocks.iter().zip(&block_positions) {
        let mut payload = Vec::new();
        put_u32(&mut payload, 0); // metadata size
        put_u32(&mut payload, 0); // attachment size
        put_u64(&mut payload, spec.data.len() as u64);
        payload.extend_from_slice(&directory_entry_bytes(spec, block_position));

        // Pad out to the fixed data offset, then append the payload bytes
        payload.resize(spec.data_offset() as usize, 0);
        payload.extend_from_slice(&spec.data);

        assert_eq!(file.len() as u64, block_position);
        file.extend_from_slice(&segment("ZISRAWSUBBLOCK", &payload));
    }

    // Metadata segment
    let mut metadata_payload = Vec::new();
    put_u32(&mut metadata_payload, xml.len() as u32);
    put_u32(&mut metadata_payload, 0); // attachment size
    metadata_payload.resize(256, 0);
    metadata_payload.extend_from_slice(xml.as_bytes());

    assert_eq!(file.len() as u64, metadata_position);
    file.extend_from_slice(&segment("ZISRAWMETADATA", &metadata_payload));

    // Directory segment
    let mut directory_payload = Vec::new();
    put_u32(&mut directory_payload, blocks.len() as u32);
    directory_payload.resize(128, 0);
    for (spec, &block_position) in blocks.iter().zip(&block_positions) {
        directory_payload.extend_from_slice(&directory_entry_bytes(spec, block_position));
    }

    assert_eq!(file.len() as u64, directory_position);
    file.extend_from_slice(&segment("ZISRAWDIRECTORY", &directory_payload));

    file
}
