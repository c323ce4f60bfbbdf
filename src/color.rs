//! Stroke color → DXF color index lookup

use crate::types::ColorIndex;

/// Exact spellings recognized before falling back to channel thresholds
const NAMED: &[(&str, ColorIndex)] = &[
    ("red", ColorIndex::RED),
    ("#ff0000", ColorIndex::RED),
    ("#f00", ColorIndex::RED),
    ("rgb(255,0,0)", ColorIndex::RED),
    ("yellow", ColorIndex::YELLOW),
    ("#ffff00", ColorIndex::YELLOW),
    ("#ff0", ColorIndex::YELLOW),
    ("rgb(255,255,0)", ColorIndex::YELLOW),
    ("green", ColorIndex::GREEN),
    ("#00ff00", ColorIndex::GREEN),
    ("#0f0", ColorIndex::GREEN),
    ("rgb(0,255,0)", ColorIndex::GREEN),
    ("cyan", ColorIndex::CYAN),
    ("#00ffff", ColorIndex::CYAN),
    ("#0ff", ColorIndex::CYAN),
    ("rgb(0,255,255)", ColorIndex::CYAN),
    ("blue", ColorIndex::BLUE),
    ("#0000ff", ColorIndex::BLUE),
    ("#00f", ColorIndex::BLUE),
    ("rgb(0,0,255)", ColorIndex::BLUE),
    ("magenta", ColorIndex::MAGENTA),
    ("#ff00ff", ColorIndex::MAGENTA),
    ("#f0f", ColorIndex::MAGENTA),
    ("rgb(255,0,255)", ColorIndex::MAGENTA),
    ("white", ColorIndex::WHITE),
    ("#ffffff", ColorIndex::WHITE),
    ("#fff", ColorIndex::WHITE),
    ("rgb(255,255,255)", ColorIndex::WHITE),
    ("black", ColorIndex::WHITE),
    ("#000000", ColorIndex::WHITE),
    ("#000", ColorIndex::WHITE),
    ("rgb(0,0,0)", ColorIndex::WHITE),
];

/// Map an SVG `stroke` value to the nearest of the seven standard colors.
///
/// Unknown names (and `none`) map to 7.
pub fn color_index(stroke: &str) -> ColorIndex {
    let normalized: String = stroke
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if let Some((_, index)) = NAMED.iter().find(|(name, _)| *name == normalized) {
        return *index;
    }

    match parse_rgb(&normalized) {
        Some((r, g, b)) => nearest_primary(r, g, b),
        None => ColorIndex::WHITE,
    }
}

fn nearest_primary(r: u8, g: u8, b: u8) -> ColorIndex {
    let high = |c: u8| c > 200;
    let low = |c: u8| c < 100;
    if high(r) && low(g) && low(b) {
        ColorIndex::RED
    } else if high(r) && high(g) && low(b) {
        ColorIndex::YELLOW
    } else if low(r) && high(g) && low(b) {
        ColorIndex::GREEN
    } else if low(r) && high(g) && high(b) {
        ColorIndex::CYAN
    } else if low(r) && low(g) && high(b) {
        ColorIndex::BLUE
    } else if high(r) && low(g) && high(b) {
        ColorIndex::MAGENTA
    } else {
        ColorIndex::WHITE
    }
}

/// `#rrggbb`, `#rgb` or `rgb(r,g,b)` with whitespace already stripped
fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    if let Some(hex) = color.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let double = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some((double(0)?, double(1)?, double(2)?))
            }
            _ => None,
        };
    }

    let inner = color.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.parse::<u8>().ok());
    let rgb = (parts.next()??, parts.next()??, parts.next()??);
    parts.next().is_none().then_some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(color_index("red"), ColorIndex::RED);
        assert_eq!(color_index("  Blue "), ColorIndex::BLUE);
        assert_eq!(color_index("#F0F"), ColorIndex::MAGENTA);
        assert_eq!(color_index("black"), ColorIndex::WHITE);
    }

    #[test]
    fn hex_thresholds() {
        assert_eq!(color_index("#e01010"), ColorIndex::RED);
        assert_eq!(color_index("#10e0e0"), ColorIndex::CYAN);
        assert_eq!(color_index("#808080"), ColorIndex::WHITE);
        assert_eq!(color_index("#e1e"), ColorIndex::MAGENTA);
    }

    #[test]
    fn rgb_function_with_spaces() {
        assert_eq!(color_index("rgb(255, 0, 0)"), ColorIndex::RED);
        assert_eq!(color_index("rgb(20, 230, 30)"), ColorIndex::GREEN);
    }

    #[test]
    fn unknown_is_white() {
        assert_eq!(color_index("none"), ColorIndex::WHITE);
        assert_eq!(color_index("orange"), ColorIndex::WHITE);
        assert_eq!(color_index("#12"), ColorIndex::WHITE);
    }
}
