//! Human-readable names for CZI codes
//!
//! Thin helpers over the embedded code dictionary, used wherever a log
//! line or analysis output should say "Gray16 (Zstd1)" instead of "1 (6)".

use crate::czi::dictionary;

/// Converts a pixel type code to its display name
pub fn pixel_type_code_to_name(code: u32) -> String {
    dictionary::definitions().pixel_type_name(code)
}

/// Converts a compression code to its display name
pub fn compression_code_to_name(code: u32) -> String {
    dictionary::definitions().compression_name(code)
}

/// Converts a dimension id to its axis description
pub fn dimension_id_to_name(id: char) -> String {
    dictionary::definitions().dimension_name(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(pixel_type_code_to_name(0), "Gray8");
        assert_eq!(pixel_type_code_to_name(1), "Gray16");
        assert_eq!(compression_code_to_name(6), "Zstd1");
        assert_eq!(dimension_id_to_name('C'), "channel");
    }

    #[test]
    fn unknown_codes_fall_back_to_numeric() {
        assert_eq!(pixel_type_code_to_name(99), "Unknown-99");
        assert_eq!(compression_code_to_name(99), "Unknown-99");
    }
}
