//! Presentation of catalogs and solved quilts.
//!
//! [`text`] draws a terminal grid with major rows and indented minor rows;
//! [`svg`] lays out rotated cross glyphs with major and minor squares offset
//! by half a cell.

use crossterm::style::Color;

pub mod svg;
pub mod text;

/// Terminal color for a display token: `#rrggbb`, or any color name
/// crossterm knows (`red`, `dark_yellow`, ...).
pub fn display_color(token: &str) -> Option<Color> {
    match token.strip_prefix('#') {
        Some(hex) if hex.len() == 6 && hex.is_ascii() => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
        }
        Some(_) => None,
        None => Color::try_from(token).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens() {
        assert_eq!(display_color("#d78700"), Some(Color::Rgb { r: 0xd7, g: 0x87, b: 0x00 }));
        assert_eq!(display_color("#FFFFFF"), Some(Color::Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(display_color("red"), Some(Color::Red));
        assert_eq!(display_color("#fff"), None);
        assert_eq!(display_color("#gg0000"), None);
        assert_eq!(display_color("plain"), None);
    }
}
