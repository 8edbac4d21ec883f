//! Tests for segment and file header parsing

use std::io::Cursor;

use crate::czi::segment::{FileHeader, SegmentHeader};
use crate::czi::errors::CziError;

use super::test_utils::{build_czi, put_u32, put_u64, segment};

#[test]
fn segment_header_reads_id_and_sizes() {
    let seg = segment("ZISRAWMETADATA", &[1, 2, 3, 4]);
    let mut cursor = Cursor::new(seg);

    let header = SegmentHeader::read(&mut cursor).unwrap();
    assert_eq!(header.id, "ZISRAWMETADATA");
    assert_eq!(header.allocated_size, 4);
    assert_eq!(header.used_size, 4);
    assert_eq!(header.payload_size(), 4);
}

#[test]
fn payload_size_falls_back_to_allocated() {
    let mut seg = Vec::new();
    let mut raw_id = [0u8; 16];
    raw_id[..7].copy_from_slice(b"DELETED");
    seg.extend_from_slice(&raw_id);
    put_u64(&mut seg, 128); // allocated
    put_u64(&mut seg, 0);   // used

    let mut cursor = Cursor::new(seg);
    let header = SegmentHeader::read(&mut cursor).unwrap();
    assert_eq!(header.payload_size(), 128);
}

#[test]
fn read_expecting_rejects_wrong_id() {
    let seg = segment("ZISRAWATTDIR", &[]);
    let mut cursor = Cursor::new(seg);

    let result = SegmentHeader::read_expecting(&mut cursor, "ZISRAWDIRECTORY");
    match result {
        Err(CziError::InvalidSegmentId(id)) => assert_eq!(id, "ZISRAWATTDIR"),
        other => panic!("Expected InvalidSegmentId, got {:?}", other),
    }
}

#[test]
fn file_header_parses_positions() {
    let data = build_czi(4, 2, Some(1), None, &[]);
    let mut cursor = Cursor::new(data);

    let header = FileHeader::read(&mut cursor).unwrap();
    assert_eq!(header.major, 1);
    assert_eq!(header.minor, 0);
    // No sub-blocks: metadata directly follows the 112-byte header segment
    assert_eq!(header.metadata_position, 112);
    assert!(header.directory_position > header.metadata_position);
}

#[test]
fn file_header_rejects_unsupported_version() {
    let mut payload = Vec::new();
    put_u32(&mut payload, 2); // unsupported major version
    put_u32(&mut payload, 0);
    payload.resize(80, 0);

    let seg = segment("ZISRAWFILE", &payload);
    let mut cursor = Cursor::new(seg);

    match FileHeader::read(&mut cursor) {
        Err(CziError::UnsupportedVersion(2)) => {}
        other => panic!("Expected UnsupportedVersion, got {:?}", other),
    }
}
