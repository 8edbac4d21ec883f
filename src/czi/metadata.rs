//! CZI metadata document handling
//!
//! The metadata segment carries one XML document describing the whole file.
//! This tool only needs the dimension sizes under
//! `ImageDocument/Metadata/Information/Image`: SizeX and SizeY are
//! mandatory, SizeC and SizeZ default to 1 when the instrument wrote a
//! single-channel or 2D acquisition.

use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::czi::errors::{CziError, CziResult};

/// Dimension sizes resolved from the metadata document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Pixels per row
    pub size_x: u32,
    /// Rows per plane
    pub size_y: u32,
    /// Number of channels
    pub size_c: u32,
    /// Number of focal planes
    pub size_z: u32,
}

impl ImageDimensions {
    /// Whether the image has a single focal plane
    pub fn is_2d(&self) -> bool {
        self.size_z <= 1
    }

    /// Bytes one plane occupies at the given bytes-per-pixel
    pub fn plane_bytes(&self, bytes_per_pixel: u32) -> u64 {
        self.size_x as u64 * self.size_y as u64 * bytes_per_pixel as u64
    }
}

/// Parses the dimension sizes out of a metadata XML document
///
/// Walks the document with an event reader and records the text of the
/// Size* elements that appear directly under an `Image` element inside
/// the `Information` section. Other `Image` elements (display settings,
/// thumbnails) are ignored.
///
/// # Arguments
/// * `xml` - The metadata document as read from the metadata segment
///
/// # Returns
/// The resolved dimensions, or an error when SizeX/SizeY are absent
pub fn parse_dimensions(xml: &str) -> CziResult<ImageDimensions> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut size_x: Option<u32> = None;
    let mut size_y: Option<u32> = None;
    let mut size_c: Option<u32> = None;
    let mut size_z: Option<u32> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(t)) => {
                if !in_information_image(&path) {
                    continue;
                }

                let text = t.unescape()
                    .map_err(|e| CziError::GenericError(format!("Invalid metadata XML text: {}", e)))?;

                match path.last().map(String::as_str) {
                    Some("SizeX") => size_x = parse_size(&text, "SizeX"),
                    Some("SizeY") => size_y = parse_size(&text, "SizeY"),
                    Some("SizeC") => size_c = parse_size(&text, "SizeC"),
                    Some("SizeZ") => size_z = parse_size(&text, "SizeZ"),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(CziError::GenericError(format!("Invalid metadata XML: {}", e)));
            }
        }
    }

    let (Some(size_x), Some(size_y)) = (size_x, size_y) else {
        return Err(CziError::MissingDimensions);
    };

    let dims = ImageDimensions {
        size_x,
        size_y,
        // Absent SizeC/SizeZ means a single channel / a 2D image
        size_c: size_c.unwrap_or(1),
        size_z: size_z.unwrap_or(1),
    };

    debug!("Metadata dimensions: C={}, Z={}, Y={}, X={}",
           dims.size_c, dims.size_z, dims.size_y, dims.size_x);

    Ok(dims)
}

/// Checks that the current element sits under Information/Image
fn in_information_image(path: &[String]) -> bool {
    let len = path.len();
    len >= 2
        && path[len - 2] == "Image"
        && path.iter().any(|p| p == "Information")
}

fn parse_size(text: &str, element: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring non-numeric {} value: {}", element, text);
            None
        }
    }
}
