//! `transform` attribute parsing and composition
//!
//! Only `scale` and `translate` take effect. `rotate` is recognized so it can
//! be reported, but drawings are converted as if it were absent.

use std::sync::LazyLock;

use glam::{DAffine2, DVec2, dvec2};
use regex_lite::Regex;

use crate::types::Angle;

static SCALE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"scale\s*\(([^)]*)\)").unwrap());
static TRANSLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"translate\s*\(([^)]*)\)").unwrap());
static ROTATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"rotate\s*\(([^)]*)\)").unwrap());

static FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z][A-Za-z0-9]*)\s*\(").unwrap());

pub(crate) static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?").unwrap());

/// How nested transforms combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    /// Matrix product `parent · child` of `T(translate)·S(scale)` affines
    #[default]
    Affine,
    /// Scales multiply, translations sum regardless of the enclosing scale
    Additive,
}

/// `rotate(angle [cx cy])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: Angle,
    pub center: Option<DVec2>,
}

/// The effective parts of one `transform` attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpec {
    pub scale: DVec2,
    pub translate: DVec2,
    /// Parsed for reporting; never applied
    pub rotate: Option<Rotation>,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformSpec {
    pub const IDENTITY: TransformSpec = TransformSpec {
        scale: DVec2::ONE,
        translate: DVec2::ZERO,
        rotate: None,
    };

    /// `T(translate) · S(scale)`
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_scale_angle_translation(self.scale, 0.0, self.translate)
    }

    /// Rotation that would change the drawing if it were applied
    pub fn effective_rotation(&self) -> Option<Rotation> {
        self.rotate
            .filter(|r| r.angle.normalized() != Angle::ZERO)
    }
}

fn arguments(re: &Regex, text: &str) -> Option<Vec<f64>> {
    let caps = re.captures(text)?;
    let args: Vec<f64> = NUMBER
        .find_iter(caps.get(1)?.as_str())
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    (!args.is_empty()).then_some(args)
}

/// Parse a `transform` attribute.
///
/// The first `scale`, `translate` and `rotate` are honored; repeats and other
/// functions are ignored.
pub fn parse_transform(text: &str) -> TransformSpec {
    let scale = match arguments(&SCALE, text).as_deref() {
        Some([s]) => DVec2::splat(*s),
        Some([sx, sy, ..]) => dvec2(*sx, *sy),
        _ => DVec2::ONE,
    };
    let translate = match arguments(&TRANSLATE, text).as_deref() {
        Some([tx]) => dvec2(*tx, 0.0),
        Some([tx, ty, ..]) => dvec2(*tx, *ty),
        _ => DVec2::ZERO,
    };
    let rotate = arguments(&ROTATE, text).map(|args| Rotation {
        angle: Angle::degrees(args[0]),
        center: match args.as_slice() {
            [_, cx, cy, ..] => Some(dvec2(*cx, *cy)),
            _ => None,
        },
    });

    TransformSpec {
        scale,
        translate,
        rotate,
    }
}

/// Transform functions in `text` that [`parse_transform`] does not read,
/// such as `matrix` or `skewX`, in order of appearance
pub fn unsupported_functions(text: &str) -> Vec<&str> {
    FUNCTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !matches!(*name, "scale" | "translate" | "rotate"))
        .collect()
}

impl Composition {
    /// Combine an accumulated `(scale, translate)` with a child's transform
    pub fn compose(self, scale: DVec2, translate: DVec2, child: &TransformSpec) -> (DVec2, DVec2) {
        match self {
            Composition::Affine => {
                let parent = DAffine2::from_scale_angle_translation(scale, 0.0, translate);
                let combined = parent * child.to_affine();
                (
                    dvec2(combined.matrix2.x_axis.x, combined.matrix2.y_axis.y),
                    combined.translation,
                )
            }
            Composition::Additive => (scale * child.scale, translate + child.translate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_functions_it_does_not_read() {
        assert_eq!(
            unsupported_functions("translate(1,2) matrix(1 0 0 1 5 5) skewX(10)"),
            ["matrix", "skewX"]
        );
        assert!(unsupported_functions("scale(2) rotate(30 5 5) translate(1)").is_empty());
        assert!(unsupported_functions("").is_empty());
    }

    #[test]
    fn scale_forms() {
        assert_eq!(parse_transform("scale(2)").scale, dvec2(2.0, 2.0));
        assert_eq!(parse_transform("scale(2,3)").scale, dvec2(2.0, 3.0));
        assert_eq!(parse_transform("scale( 2 3 )").scale, dvec2(2.0, 3.0));
        assert_eq!(parse_transform("").scale, DVec2::ONE);
    }

    #[test]
    fn translate_forms() {
        assert_eq!(parse_transform("translate(10)").translate, dvec2(10.0, 0.0));
        assert_eq!(
            parse_transform("translate(10, -5.5)").translate,
            dvec2(10.0, -5.5)
        );
        assert_eq!(parse_transform("translate(1e1 2)").translate, dvec2(10.0, 2.0));
    }

    #[test]
    fn first_occurrence_wins() {
        let spec = parse_transform("translate(1,2) scale(3) translate(100,100) scale(9)");
        assert_eq!(spec.translate, dvec2(1.0, 2.0));
        assert_eq!(spec.scale, DVec2::splat(3.0));
    }

    #[test]
    fn rotation_is_parsed_but_not_applied() {
        let spec = parse_transform("rotate(45 10 20) translate(5,5)");
        let rot = spec.rotate.unwrap();
        assert_eq!(rot.angle, Angle(45.0));
        assert_eq!(rot.center, Some(dvec2(10.0, 20.0)));
        assert!(spec.effective_rotation().is_some());

        // The affine carries no rotation term
        let affine = spec.to_affine();
        assert_eq!(affine.transform_point2(dvec2(1.0, 0.0)), dvec2(6.0, 5.0));

        assert!(parse_transform("rotate(360)").effective_rotation().is_none());
    }

    #[test]
    fn modes_agree_on_single_level() {
        let child = parse_transform("translate(10,20) scale(2)");
        for mode in [Composition::Affine, Composition::Additive] {
            let (s, t) = mode.compose(DVec2::ONE, DVec2::ZERO, &child);
            assert_eq!(s, DVec2::splat(2.0));
            assert_eq!(t, dvec2(10.0, 20.0));
        }
    }

    #[test]
    fn modes_agree_on_scale_over_scale() {
        let outer = parse_transform("scale(2)");
        let inner = parse_transform("scale(3,4)");
        for mode in [Composition::Affine, Composition::Additive] {
            let (s, t) = mode.compose(DVec2::ONE, DVec2::ZERO, &outer);
            let (s, t) = mode.compose(s, t, &inner);
            assert_eq!(s, dvec2(6.0, 8.0));
            assert_eq!(t, DVec2::ZERO);
        }
    }

    #[test]
    fn modes_differ_when_scale_encloses_translate() {
        let outer = parse_transform("scale(2)");
        let inner = parse_transform("translate(10,10)");

        let (s, t) = Composition::Affine.compose(DVec2::ONE, DVec2::ZERO, &outer);
        let (_, affine_t) = Composition::Affine.compose(s, t, &inner);
        assert_eq!(affine_t, dvec2(20.0, 20.0));

        let (s, t) = Composition::Additive.compose(DVec2::ONE, DVec2::ZERO, &outer);
        let (_, additive_t) = Composition::Additive.compose(s, t, &inner);
        assert_eq!(additive_t, dvec2(10.0, 10.0));
    }
}
