//! String helpers for file names and raw ASCII fields

use std::path::Path;

/// Removes trailing NUL bytes from a buffer in place
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
}

/// Decodes a fixed-width ASCII id field
///
/// Segment ids are NUL-padded to 16 bytes on disk; everything from the
/// first NUL on is padding.
pub fn ascii_id(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// File name without its extension, used as the output prefix
///
/// `Image2.czi` becomes `Image2`; a name without an extension is
/// returned unchanged.
pub fn file_prefix(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_id_stops_at_first_null() {
        assert_eq!(ascii_id(b"ZISRAWFILE\0\0\0\0\0\0"), "ZISRAWFILE");
        assert_eq!(ascii_id(b"DV"), "DV");
    }

    #[test]
    fn file_prefix_strips_extension() {
        assert_eq!(file_prefix("Image2.czi"), "Image2");
        assert_eq!(file_prefix("stack.ome.czi"), "stack.ome");
        assert_eq!(file_prefix("noext"), "noext");
    }

    #[test]
    fn trailing_nulls_are_trimmed() {
        let mut buf = vec![b'a', b'b', 0, 0];
        trim_trailing_nulls(&mut buf);
        assert_eq!(buf, b"ab");
    }
}
