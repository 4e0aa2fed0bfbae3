//! Contrast-aware text color

use tracing::trace;

/// Text color used on bright accents
pub const DARK_TEXT: &str = "#0f172a";

/// Text color used on dark accents and as the fail-safe default
pub const LIGHT_TEXT: &str = "#ffffff";

/// Luminance above which the accent counts as bright
const BRIGHT_THRESHOLD: f64 = 0.6;

/// Parse `#rrggbb` (leading `#` optional) into channels
///
/// Only the first six hex digits are read, so `#rrggbbaa` also parses.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim().trim_start_matches('#');
    let channel = |i: usize| h.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Perceptual luminance in [0, 1]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Pick a readable text color for an accent background
///
/// Malformed input yields [`LIGHT_TEXT`].
pub fn contrast_text_color(hex: &str) -> &'static str {
    let color = match parse_hex_color(hex) {
        Some((r, g, b)) if luminance(r, g, b) > BRIGHT_THRESHOLD => DARK_TEXT,
        _ => LIGHT_TEXT,
    };
    trace!(%hex, %color, "contrast_text_color: called");
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_gets_dark_text() {
        assert_eq!(contrast_text_color("#FFFFFF"), DARK_TEXT);
    }

    #[test]
    fn test_black_gets_light_text() {
        assert_eq!(contrast_text_color("#000000"), LIGHT_TEXT);
    }

    #[test]
    fn test_malformed_gets_light_text() {
        for input in ["", "#", "#FFF", "zzzzzz", "#12345", "🎒🎒🎒"] {
            assert_eq!(contrast_text_color(input), LIGHT_TEXT, "input {:?}", input);
        }
    }

    #[test]
    fn test_fallback_orange_is_bright() {
        // #F09819: (0.299*240 + 0.587*152 + 0.114*25) / 255 ≈ 0.64
        assert_eq!(contrast_text_color("#F09819"), DARK_TEXT);
    }

    #[test]
    fn test_threshold_sides() {
        assert_eq!(contrast_text_color("#8c8c8c"), LIGHT_TEXT);
        assert_eq!(contrast_text_color("#a0a0a0"), DARK_TEXT);
    }

    #[test]
    fn test_parse_without_hash_and_with_alpha() {
        assert_eq!(parse_hex_color("0a0b0c"), Some((10, 11, 12)));
        assert_eq!(parse_hex_color("#0a0b0cff"), Some((10, 11, 12)));
        assert_eq!(parse_hex_color("#0a0b"), None);
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-9);
    }
}
