//! Strongly-typed primitives shared by the converter (zero-cost newtypes).

use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;

/// Angle in degrees (DXF group codes 50/51 are degrees)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const FULL_TURN: Angle = Angle(360.0);

    #[inline]
    pub fn degrees(val: f64) -> Angle {
        Angle(val)
    }

    #[inline]
    pub fn from_radians(rad: f64) -> Angle {
        Angle(rad.to_degrees())
    }

    /// Direction of `v` measured counter-clockwise from +X
    #[inline]
    pub fn of_vector(v: DVec2) -> Angle {
        Angle::from_radians(v.y.atan2(v.x))
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Wrap into [0, 360).
    ///
    /// Values within rounding distance of a full turn wrap to 0, so they
    /// never print as `360` with six decimals.
    pub fn normalized(self) -> Angle {
        let wrapped = self.0.rem_euclid(360.0);
        if wrapped >= 360.0 - 5e-7 {
            Angle(0.0)
        } else {
            Angle(wrapped)
        }
    }

    /// Wrap into (-180, 180]
    pub fn signed(self) -> Angle {
        let n = self.normalized().0;
        if n > 180.0 { Angle(n - 360.0) } else { Angle(n) }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// AutoCAD Color Index restricted to the seven standard colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const RED: ColorIndex = ColorIndex(1);
    pub const YELLOW: ColorIndex = ColorIndex(2);
    pub const GREEN: ColorIndex = ColorIndex(3);
    pub const CYAN: ColorIndex = ColorIndex(4);
    pub const BLUE: ColorIndex = ColorIndex(5);
    pub const MAGENTA: ColorIndex = ColorIndex(6);
    /// Drawn white on dark backgrounds and black on light ones
    pub const WHITE: ColorIndex = ColorIndex(7);

    pub const ALL: [ColorIndex; 7] = [
        Self::RED,
        Self::YELLOW,
        Self::GREEN,
        Self::CYAN,
        Self::BLUE,
        Self::MAGENTA,
        Self::WHITE,
    ];

    /// Returns None outside 1..=7
    pub fn new(index: u8) -> Option<ColorIndex> {
        (1..=7).contains(&index).then_some(ColorIndex(index))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ColorIndex {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// DXF layer an entity is placed on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    /// Layer "0", used when the element has no stroke
    #[default]
    Default,
    /// Layer "COLOR_<n>"
    Color(ColorIndex),
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Default => write!(f, "0"),
            Layer::Color(index) => write!(f, "COLOR_{}", index),
        }
    }
}

/// Layer and color every entity of one shape shares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EntityStyle {
    pub layer: Layer,
    pub color: ColorIndex,
}

impl EntityStyle {
    /// Style for an element's optional `stroke` attribute
    pub fn from_stroke(stroke: Option<&str>) -> Self {
        match stroke {
            Some(stroke) => {
                let color = crate::color::color_index(stroke);
                EntityStyle {
                    layer: Layer::Color(color),
                    color,
                }
            }
            None => EntityStyle::default(),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BBox {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_normalization() {
        assert_eq!(Angle(-90.0).normalized(), Angle(270.0));
        assert_eq!(Angle(720.0).normalized(), Angle(0.0));
        assert_eq!(Angle(-1e-12).normalized(), Angle(0.0));
        assert_eq!(Angle(270.0).signed(), Angle(-90.0));
        assert_eq!(Angle(180.0).signed(), Angle(180.0));
    }

    #[test]
    fn layer_names() {
        assert_eq!(Layer::Default.to_string(), "0");
        assert_eq!(Layer::Color(ColorIndex::BLUE).to_string(), "COLOR_5");
    }

    #[test]
    fn color_index_range() {
        assert!(ColorIndex::new(0).is_none());
        assert!(ColorIndex::new(8).is_none());
        assert_eq!(ColorIndex::new(3), Some(ColorIndex::GREEN));
    }

    #[test]
    fn stroke_selects_color_layer() {
        let style = EntityStyle::from_stroke(Some("red"));
        assert_eq!(style.layer, Layer::Color(ColorIndex::RED));
        assert_eq!(style.color, ColorIndex::RED);

        let style = EntityStyle::from_stroke(None);
        assert_eq!(style.layer, Layer::Default);
        assert_eq!(style.color, ColorIndex::WHITE);
    }
}
