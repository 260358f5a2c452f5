//! Styling tokens and style strings
//!
//! The palette is a flat map of named color tokens (the `danube` scale plus
//! a few named colors), each declared as a `#rrggbb` hex triplet. Styles are
//! written as strings such as `"bold danube50 on danube700"` and resolve
//! through the palette into [`ratatui::style::Style`] values when rendering.

use std::collections::HashMap;

use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{de::Deserializer, Deserialize};

use crate::mode::Mode;

/// Named color tokens. Tokens shadow identically-named ANSI colors.
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Palette(pub HashMap<String, Color>);

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, String>::deserialize(deserializer)?;
        let tokens = parsed_map
            .into_iter()
            .filter_map(|(name, hex)| match parse_hex(&hex) {
                Some(color) => Some((name, color)),
                None => {
                    log::warn!("palette token {name:?} has malformed color {hex:?}");
                    None
                }
            })
            .collect();
        Ok(Palette(tokens))
    }
}

/// Raw per-mode style strings, resolved lazily through the palette.
#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize)]
pub struct Styles(pub HashMap<Mode, HashMap<String, String>>);

pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn parse_modifier(word: &str) -> Option<Modifier> {
    match word {
        "bold" => Some(Modifier::BOLD),
        "dim" => Some(Modifier::DIM),
        "italic" => Some(Modifier::ITALIC),
        "underline" => Some(Modifier::UNDERLINED),
        "slowblink" => Some(Modifier::SLOW_BLINK),
        "rapidblink" => Some(Modifier::RAPID_BLINK),
        "reversed" => Some(Modifier::REVERSED),
        "hidden" => Some(Modifier::HIDDEN),
        "crossedout" => Some(Modifier::CROSSED_OUT),
        _ => None,
    }
}

fn parse_color(word: &str, palette: &Palette) -> Option<Color> {
    if let Some(color) = palette.get(word) {
        return Some(*color);
    }
    if let Some(color) = parse_hex(word) {
        return Some(color);
    }
    match word {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" => Some(Color::Gray),
        "darkgray" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => {
            log::warn!("unknown color token {word:?}");
            None
        }
    }
}

/// Parses `"[modifiers] [fg] on [modifiers] [bg]"`. Unknown tokens are
/// skipped, so a malformed style degrades instead of failing the config.
pub fn parse_style(line: &str, palette: &Palette) -> Style {
    let lower = line.to_lowercase();
    let (fg_part, bg_part) = match lower.split_once(" on ") {
        Some((fg, bg)) => (fg, bg),
        None => (lower.as_str(), ""),
    };

    let mut style = Style::default();
    let mut modifiers = Modifier::empty();
    for word in fg_part.split_whitespace() {
        if let Some(modifier) = parse_modifier(word) {
            modifiers |= modifier;
        } else if let Some(color) = parse_color(word, palette) {
            style = style.fg(color);
        }
    }
    for word in bg_part.split_whitespace() {
        if let Some(modifier) = parse_modifier(word) {
            modifiers |= modifier;
        } else if let Some(color) = parse_color(word, palette) {
            style = style.bg(color);
        }
    }
    style.add_modifier(modifiers)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    fn danube() -> Palette {
        let mut tokens = HashMap::new();
        tokens.insert("danube400".to_owned(), Color::Rgb(0x7b, 0xb6, 0xdf));
        tokens.insert("danube950".to_owned(), Color::Rgb(0x22, 0x31, 0x49));
        tokens.insert("red".to_owned(), Color::Rgb(0x96, 0x37, 0x48));
        Palette(tokens)
    }

    #[rstest]
    #[case("#f2f7fc", Some(Color::Rgb(0xf2, 0xf7, 0xfc)))]
    #[case("#000000", Some(Color::Rgb(0, 0, 0)))]
    #[case("f2f7fc", None)]
    #[case("#f2f7f", None)]
    #[case("#f2f7fg", None)]
    fn test_parse_hex(#[case] input: &str, #[case] expected: Option<Color>) {
        assert_eq!(parse_hex(input), expected);
    }

    #[test]
    fn test_palette_token_resolves_before_ansi() {
        // "red" is a palette token here and must not fall back to ANSI red
        assert_eq!(
            parse_color("red", &danube()),
            Some(Color::Rgb(0x96, 0x37, 0x48))
        );
        assert_eq!(parse_color("red", &Palette::default()), Some(Color::Red));
    }

    #[test]
    fn test_parse_style_fg_on_bg() {
        let style = parse_style("danube400 on danube950", &danube());
        assert_eq!(style.fg, Some(Color::Rgb(0x7b, 0xb6, 0xdf)));
        assert_eq!(style.bg, Some(Color::Rgb(0x22, 0x31, 0x49)));
    }

    #[test]
    fn test_parse_style_modifiers() {
        let style = parse_style("bold underline danube400", &danube());
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(style.bg, None);
    }

    #[test]
    fn test_parse_style_skips_unknown_tokens() {
        let style = parse_style("sparkly danube400", &danube());
        assert_eq!(style.fg, Some(Color::Rgb(0x7b, 0xb6, 0xdf)));
        assert_eq!(style.add_modifier, Modifier::empty());
    }

    #[test]
    fn test_palette_deserialize_drops_malformed() {
        let palette: Palette =
            json5::from_str(r##"{"ok": "#7bb6df", "bad": "7bb6df"}"##).unwrap();
        assert_eq!(palette.get("ok"), Some(&Color::Rgb(0x7b, 0xb6, 0xdf)));
        assert_eq!(palette.get("bad"), None);
    }
}
