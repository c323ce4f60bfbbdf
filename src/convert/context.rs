//! Coordinate context - the accumulated transform of one element

use glam::{DVec2, dvec2};

use crate::dimensions::{Dimensions, ViewBox};
use crate::transform::{Composition, TransformSpec};

use super::ConvertOptions;

/// Maps SVG user coordinates of one element into DXF drawing space.
///
/// Built once at the root and copied into every child, so siblings never see
/// each other's transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformContext {
    /// Accumulated scale, composed multiplicatively
    pub scale: DVec2,
    /// Accumulated translation
    pub translate: DVec2,
    pub view_box: Option<ViewBox>,
    /// Flip extent when there is no viewBox
    pub max_y: f64,
    /// Physical size in points
    pub width: f64,
    pub height: f64,
    pub composition: Composition,
}

impl TransformContext {
    /// Identity context for the root `<svg>`
    pub fn root(dims: &Dimensions, options: &ConvertOptions) -> Self {
        Self {
            scale: DVec2::ONE,
            translate: DVec2::ZERO,
            view_box: dims.view_box,
            max_y: options
                .fallback_max_y
                .unwrap_or_else(|| dims.fallback_max_y()),
            width: dims.width,
            height: dims.height,
            composition: options.composition,
        }
    }

    /// Context for a child carrying `spec` as its own transform
    pub fn with_transform(&self, spec: &TransformSpec) -> Self {
        let (scale, translate) = self.composition.compose(self.scale, self.translate, spec);
        Self {
            scale,
            translate,
            ..*self
        }
    }

    /// Y reference the flip is taken against
    pub fn flip_extent(&self) -> f64 {
        match self.view_box {
            Some(vb) => vb.max_y(),
            None => self.max_y,
        }
    }

    /// Map a user-space point to DXF coordinates
    pub fn map(&self, p: DVec2) -> DVec2 {
        let mut q = p * self.scale + self.translate;
        if let Some(vb) = self.view_box {
            q += vb.origin();
        }
        dvec2(q.x, self.flip_extent() - q.y)
    }

    /// Geometric-mean scale applied to radii
    pub fn radius_scale(&self) -> f64 {
        (self.scale.x * self.scale.y).abs().sqrt()
    }

    /// True when mapping turns clockwise into counter-clockwise.
    ///
    /// The Y flip reverses orientation unless the accumulated scale reverses
    /// it once more.
    pub fn flips_orientation(&self) -> bool {
        self.scale.x * self.scale.y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::analyze_dimensions;
    use crate::transform::parse_transform;

    fn ctx(svg: &str) -> TransformContext {
        TransformContext::root(&analyze_dimensions(svg).unwrap(), &ConvertOptions::default())
    }

    #[test]
    fn flips_against_view_box() {
        let c = ctx(r#"<svg viewBox="0 0 200 100"/>"#);
        assert_eq!(c.map(dvec2(10.0, 0.0)), dvec2(10.0, 100.0));
        assert_eq!(c.map(dvec2(10.0, 100.0)), dvec2(10.0, 0.0));
    }

    #[test]
    fn flips_against_height_without_view_box() {
        let c = ctx(r#"<svg width="100" height="80"/>"#);
        assert_eq!(c.map(dvec2(0.0, 0.0)), dvec2(0.0, 80.0));
    }

    #[test]
    fn fallback_override() {
        let dims = analyze_dimensions(r#"<svg width="100" height="80"/>"#).unwrap();
        let options = ConvertOptions {
            fallback_max_y: Some(500.0),
            ..ConvertOptions::default()
        };
        let c = TransformContext::root(&dims, &options);
        assert_eq!(c.map(dvec2(0.0, 0.0)), dvec2(0.0, 500.0));
    }

    #[test]
    fn children_do_not_leak_into_siblings() {
        let root = ctx(r#"<svg width="100" height="100"/>"#);
        let a = root.with_transform(&parse_transform("scale(2)"));
        let b = root.with_transform(&parse_transform("translate(5,0)"));
        assert_eq!(a.scale, DVec2::splat(2.0));
        assert_eq!(b.scale, DVec2::ONE);
        assert_eq!(b.map(DVec2::ZERO), dvec2(5.0, 100.0));
        assert_eq!(root.map(DVec2::ZERO), dvec2(0.0, 100.0));
    }

    #[test]
    fn radius_scale_is_geometric_mean() {
        let root = ctx(r#"<svg width="100" height="100"/>"#);
        let c = root.with_transform(&parse_transform("scale(2,8)"));
        assert_eq!(c.radius_scale(), 4.0);
        assert!(c.flips_orientation());
        let mirrored = root.with_transform(&parse_transform("scale(-1,1)"));
        assert!(!mirrored.flips_orientation());
    }
}
