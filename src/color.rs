//! Hex color parsing for palette entries and persisted descriptors
//!
//! Supports `#RGB` and `#RRGGBB`. Tint targets are always opaque, so alpha
//! forms are rejected rather than silently dropped.

use image::Rgb;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGB triple.
///
/// - `#RGB` - 3-digit hex, each digit is doubled (e.g., `#F00` -> red)
/// - `#RRGGBB` - 6-digit hex
///
/// # Examples
///
/// ```
/// use pixel_incubator::color::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#FF77A8").unwrap(), image::Rgb([255, 119, 168]));
/// assert_eq!(parse_hex_color("#0f0").unwrap(), image::Rgb([0, 255, 0]));
/// assert!(parse_hex_color("FF77A8").is_err());
/// ```
pub fn parse_hex_color(s: &str) -> Result<Rgb<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let digits = hex.chars().map(parse_hex_digit).collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        [r, g, b] => Ok(Rgb([r * 17, g * 17, b * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgb([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0])),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Format an RGB triple as an uppercase `#RRGGBB` string.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}
