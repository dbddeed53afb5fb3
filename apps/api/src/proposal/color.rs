//! Colour predicates for slide repair and request validation.

/// CSS colour names accepted for caller-supplied customization.
const CSS_COLOR_NAMES: &[&str] = &[
    "red",
    "blue",
    "green",
    "yellow",
    "orange",
    "purple",
    "pink",
    "brown",
    "black",
    "white",
    "gray",
    "grey",
    "cyan",
    "magenta",
    "lime",
    "navy",
    "maroon",
    "olive",
    "teal",
    "silver",
    "gold",
    "transparent",
];

/// True iff `s` is `#` followed by exactly 3 or 6 hex digits.
pub fn is_valid_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Hex colour or one of the common CSS colour names (case-insensitive).
pub fn is_valid_color(s: &str) -> bool {
    is_valid_hex_color(s) || CSS_COLOR_NAMES.iter().any(|name| name.eq_ignore_ascii_case(s))
}
