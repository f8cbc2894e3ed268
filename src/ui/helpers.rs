use ratatui::style::Color;

use crate::color::hex_to_rgb;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    let (r, g, b) = hex_to_rgb(value)?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_long_names() {
        assert_eq!(clamp_name("abc", 5), "abc  ");
        assert_eq!(clamp_name("abcdefgh", 5), "abc..");
    }

    #[test]
    fn converts_hex() {
        assert_eq!(hex_to_color("#4da6ff"), Some(Color::Rgb(0x4d, 0xa6, 0xff)));
        assert_eq!(hex_to_color("blue"), None);
    }
}
