//! Tests for the container reader

use std::io::Cursor;

use crate::czi::reader::CziReader;
use crate::utils::logger::Logger;

use super::test_utils::{build_czi, SubblockSpec};

fn test_logger(dir: &tempfile::TempDir) -> Logger {
    let path = dir.path().join("reader_test.log");
    Logger::new(path.to_str().unwrap()).unwrap()
}

#[test]
fn reads_structure_of_two_channel_image() {
    let blocks = vec![
        SubblockSpec::gray8(0, 0, 4, 2, vec![0; 8]),
        SubblockSpec::gray8(1, 0, 4, 2, vec![1; 8]),
    ];
    let data = build_czi(4, 2, Some(2), None, &blocks);

    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(&dir);
    let mut reader = CziReader::new(&logger);

    let czi = reader.read(&mut Cursor::new(data)).unwrap();

    assert_eq!(czi.dimensions.size_x, 4);
    assert_eq!(czi.dimensions.size_y, 2);
    assert_eq!(czi.dimensions.size_c, 2);
    assert_eq!(czi.dimensions.size_z, 1);
    assert_eq!(czi.subblock_count(), 2);
    assert_eq!(czi.channel_starts(), vec![0, 1]);
}

#[test]
fn reads_uncompressed_subblock_payload() {
    let payload: Vec<u8> = (0..8).collect();
    let blocks = vec![SubblockSpec::gray8(0, 0, 4, 2, payload.clone())];
    let data = build_czi(4, 2, Some(1), None, &blocks);

    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(&dir);
    let mut reader = CziReader::new(&logger);

    let mut cursor = Cursor::new(data);
    let czi = reader.read(&mut cursor).unwrap();

    let entry = &czi.directory[0];
    let decoded = reader.read_subblock_data_from(&mut cursor, entry).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn reads_zstd_compressed_subblock_payload() {
    let raw: Vec<u8> = (0..8).collect();
    let compressed = zstd::stream::encode_all(&raw[..], 0).unwrap();

    let mut spec = SubblockSpec::gray8(0, 0, 4, 2, compressed);
    spec.compression = 5; // Zstd0
    let data = build_czi(4, 2, Some(1), None, &[spec]);

    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(&dir);
    let mut reader = CziReader::new(&logger);

    let mut cursor = Cursor::new(data);
    let czi = reader.read(&mut cursor).unwrap();

    let decoded = reader.read_subblock_data_from(&mut cursor, &czi.directory[0]).unwrap();
    assert_eq!(decoded, raw);
}

#[test]
fn pyramid_blocks_are_excluded_from_plane_entries() {
    let mut pyramid = SubblockSpec::gray8(0, 0, 4, 2, vec![0; 8]);
    pyramid.pyramid_type = 1;

    let blocks = vec![
        SubblockSpec::gray8(0, 0, 4, 2, vec![0; 8]),
        pyramid,
    ];
    let data = build_czi(4, 2, Some(1), None, &blocks);

    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(&dir);
    let mut reader = CziReader::new(&logger);

    let czi = reader.read(&mut Cursor::new(data)).unwrap();
    assert_eq!(czi.subblock_count(), 2);
    assert_eq!(czi.plane_entries().len(), 1);
}

#[test]
fn garbage_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let logger = test_logger(&dir);
    let mut reader = CziReader::new(&logger);

    let result = reader.read(&mut Cursor::new(vec![0u8; 64]));
    assert!(result.is_err());
}
