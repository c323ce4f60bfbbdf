//! Number and length parsing for SVG attribute values

use std::sync::LazyLock;

use regex_lite::Regex;

/// Leading decimal number, the way lenient SVG consumers read `"12.5px"`
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// A bare number with an optional absolute unit
static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)(mm|cm|in|pt)?$").unwrap());

pub const PT_PER_MM: f64 = 2.83465;
pub const PT_PER_CM: f64 = 28.3465;
pub const PT_PER_IN: f64 = 72.0;

/// Parse the longest numeric prefix of `value` after leading whitespace.
///
/// Returns None when no digits lead the string.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let m = LEADING_NUMBER.find(trimmed)?;
    m.as_str().parse::<f64>().ok()
}

/// Convert an SVG length to points (mm, cm, in, pt; bare numbers are points).
///
/// Values outside the pattern, such as `"100px"`, fall back to their leading
/// number.
pub fn to_points(value: &str) -> Option<f64> {
    let Some(caps) = LENGTH.captures(value) else {
        return parse_number(value);
    };
    let number = parse_number(caps.get(1)?.as_str())?;
    let factor = match caps.get(2).map(|m| m.as_str()) {
        Some("mm") => PT_PER_MM,
        Some("cm") => PT_PER_CM,
        Some("in") => PT_PER_IN,
        _ => 1.0,
    };
    Some(number * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number() {
        assert_eq!(parse_number(" 12.5px"), Some(12.5));
        assert_eq!(parse_number("-3e2"), Some(-300.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1.2.3"), Some(1.2));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn units_to_points() {
        assert_eq!(to_points("100"), Some(100.0));
        assert_eq!(to_points("10pt"), Some(10.0));
        assert_eq!(to_points("2in"), Some(144.0));
        assert!((to_points("10mm").unwrap() - 28.3465).abs() < 1e-9);
        assert!((to_points("1cm").unwrap() - 28.3465).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_falls_back_to_leading_number() {
        assert_eq!(to_points("100px"), Some(100.0));
        assert_eq!(to_points("50%"), Some(50.0));
        assert_eq!(to_points("auto"), None);
    }
}
