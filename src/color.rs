/// Color constants and hex helpers shared by the store, CLI and UI.

/// Color given to a freshly added event type.
pub const DEFAULT_TYPE_COLOR: &str = "#dda0dd";
/// Grid cell color for an event whose type no longer exists.
pub const GRID_FALLBACK_COLOR: &str = "#dda0dd";
/// Legend marker color for an event whose type no longer exists.
pub const LEGEND_FALLBACK_COLOR: &str = "#000000";
pub const LIVED_COLOR: &str = "#ff4d4d";
pub const FUTURE_COLOR: &str = "#d3d3d3";

/// Types every new store starts with.
pub const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("Birthday", "#4da6ff"),
    ("Personal", "#90ee90"),
    ("International", "#ffa500"),
];

/// Accepts `#RRGGBB` or `RRGGBB` in any case and returns lowercase `#rrggbb`.
pub fn normalize_hex(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", digits.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Splits a hex color into its RGB components.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = normalize_hex(value)?;
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_hex() {
        assert_eq!(normalize_hex("FF4D4D").as_deref(), Some("#ff4d4d"));
        assert_eq!(normalize_hex(" #AbCdEf ").as_deref(), Some("#abcdef"));
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex(""), None);
    }

    #[test]
    fn splits_rgb() {
        assert_eq!(hex_to_rgb("#ff4d4d"), Some((255, 77, 77)));
        assert_eq!(hex_to_rgb("nope"), None);
    }
}
