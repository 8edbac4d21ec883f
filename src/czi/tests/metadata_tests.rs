//! Tests for metadata dimension parsing

use crate::czi::errors::CziError;
use crate::czi::metadata::parse_dimensions;

use super::test_utils::metadata_xml;

#[test]
fn all_sizes_are_read() {
    let xml = metadata_xml(1024, 768, Some(3), Some(12));
    let dims = parse_dimensions(&xml).unwrap();

    assert_eq!(dims.size_x, 1024);
    assert_eq!(dims.size_y, 768);
    assert_eq!(dims.size_c, 3);
    assert_eq!(dims.size_z, 12);
    assert!(!dims.is_2d());
}

#[test]
fn absent_c_and_z_default_to_one() {
    let xml = metadata_xml(640, 480, None, None);
    let dims = parse_dimensions(&xml).unwrap();

    assert_eq!(dims.size_c, 1);
    assert_eq!(dims.size_z, 1);
    assert!(dims.is_2d());
}

#[test]
fn missing_spatial_sizes_are_an_error() {
    let xml = "<ImageDocument><Metadata><Information><Image>\
               <SizeC>2</SizeC></Image></Information></Metadata></ImageDocument>";

    match parse_dimensions(xml) {
        Err(CziError::MissingDimensions) => {}
        other => panic!("Expected MissingDimensions, got {:?}", other),
    }
}

#[test]
fn image_elements_outside_information_are_ignored() {
    let xml = "<ImageDocument><Metadata>\
               <DisplaySetting><Image><SizeX>9</SizeX><SizeY>9</SizeY></Image></DisplaySetting>\
               <Information><Image><SizeX>100</SizeX><SizeY>50</SizeY></Image></Information>\
               </Metadata></ImageDocument>";

    let dims = parse_dimensions(xml).unwrap();
    assert_eq!(dims.size_x, 100);
    assert_eq!(dims.size_y, 50);
}

#[test]
fn non_numeric_size_falls_back_to_default() {
    let xml = "<ImageDocument><Metadata><Information><Image>\
               <SizeX>32</SizeX><SizeY>32</SizeY><SizeC>three</SizeC>\
               </Image></Information></Metadata></ImageDocument>";

    let dims = parse_dimensions(xml).unwrap();
    assert_eq!(dims.size_c, 1);
}

#[test]
fn plane_bytes_accounts_for_pixel_size() {
    let xml = metadata_xml(10, 4, None, None);
    let dims = parse_dimensions(&xml).unwrap();

    assert_eq!(dims.plane_bytes(1), 40);
    assert_eq!(dims.plane_bytes(2), 80);
}
