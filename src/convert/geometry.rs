//! Arc geometry: center solvers and elliptical sampling
//!
//! All functions here work in SVG user space (y-down). Mapping into DXF
//! space happens at the point of emission.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use super::defaults::{
    ARC_SEGMENTS, MAX_ARC_SEGMENTS, MIN_CHORD, MIN_SAMPLE_LENGTH, OVERSIZE_CHORD_DIVISOR,
    UNITS_PER_SEGMENT,
};
use crate::types::Angle;

/// Circle through two points, from `calculate_arc_center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    pub center: DVec2,
    /// Radius actually used, enlarged when the chord was too long
    pub radius: f64,
}

/// Center of the circle of radius `r` through `p1` and `p2`.
///
/// Of the two candidate centers, `large_arc == sweep` selects the one on the
/// right of the chord direction (in y-down space), otherwise the left.
/// A chord longer than the diameter enlarges the radius to `d / 1.999`.
/// Returns None for (nearly) coincident endpoints.
pub fn calculate_arc_center(
    p1: DVec2,
    p2: DVec2,
    r: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<ArcCenter> {
    let chord = p2 - p1;
    let d = chord.length();
    if d < MIN_CHORD {
        return None;
    }

    let radius = if d > 2.0 * r {
        d / OVERSIZE_CHORD_DIVISOR
    } else {
        r
    };
    let mid = (p1 + p2) / 2.0;
    let h = (radius * radius - (d / 2.0) * (d / 2.0)).max(0.0).sqrt();
    let normal = dvec2(-chord.y, chord.x) / d;

    let center = if large_arc == sweep {
        mid - normal * h
    } else {
        mid + normal * h
    };
    Some(ArcCenter { center, radius })
}

/// Center parametrization of an elliptical arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub center: DVec2,
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in radians
    pub phi: f64,
    /// Start parameter in radians
    pub theta1: f64,
    /// Signed parameter extent in radians; positive runs toward +Y
    pub dtheta: f64,
}

/// Signed angle from `u` to `v`
fn vector_angle(u: DVec2, v: DVec2) -> f64 {
    u.perp_dot(v).atan2(u.dot(v))
}

/// Endpoint to center conversion of an SVG arc, with out-of-range radii
/// scaled up until the arc fits.
///
/// Returns None for zero radii, coincident endpoints, or radii too large to
/// parametrize in floating point.
pub fn svg_arc_to_center(
    p1: DVec2,
    p2: DVec2,
    rx: f64,
    ry: f64,
    x_axis_rotation: Angle,
    large_arc: bool,
    sweep: bool,
) -> Option<EllipticalArc> {
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx == 0.0 || ry == 0.0 || p1.distance(p2) < MIN_CHORD {
        return None;
    }

    let phi = x_axis_rotation.to_radians();
    let (sin, cos) = phi.sin_cos();
    let half = (p1 - p2) / 2.0;
    let x1 = cos * half.x + sin * half.y;
    let y1 = -sin * half.x + cos * half.y;

    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if lambda > 1.0 {
        let grow = lambda.sqrt();
        rx *= grow;
        ry *= grow;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1 * y1 - ry2 * x1 * x1;
    let den = rx2 * y1 * y1 + ry2 * x1 * x1;
    if den == 0.0 {
        return None;
    }
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (num / den).max(0.0).sqrt();
    let cx1 = coef * rx * y1 / ry;
    let cy1 = -coef * ry * x1 / rx;

    let mid = (p1 + p2) / 2.0;
    let center = dvec2(cos * cx1 - sin * cy1, sin * cx1 + cos * cy1) + mid;

    let u = dvec2((x1 - cx1) / rx, (y1 - cy1) / ry);
    let v = dvec2((-x1 - cx1) / rx, (-y1 - cy1) / ry);
    let theta1 = vector_angle(DVec2::X, u);
    let mut dtheta = vector_angle(u, v) % TAU;
    if !sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if sweep && dtheta < 0.0 {
        dtheta += TAU;
    }
    if !(center.is_finite() && theta1.is_finite() && dtheta.is_finite()) {
        return None;
    }

    Some(EllipticalArc {
        center,
        rx,
        ry,
        phi,
        theta1,
        dtheta,
    })
}

/// How finely an elliptical arc is approximated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPolicy {
    pub min_segments: u32,
    /// Arc length per segment beyond the minimum; None for a fixed count
    pub units_per_segment: Option<f64>,
    /// Mapped segments at or below this length are dropped
    pub min_length: f64,
}

impl SegmentPolicy {
    /// Path `A` commands: finer for long arcs
    pub const PATH_ARC: SegmentPolicy = SegmentPolicy {
        min_segments: ARC_SEGMENTS,
        units_per_segment: Some(UNITS_PER_SEGMENT),
        min_length: MIN_SAMPLE_LENGTH,
    };

    /// Elliptical rect corners
    pub const CORNER: SegmentPolicy = SegmentPolicy {
        min_segments: ARC_SEGMENTS,
        units_per_segment: None,
        min_length: MIN_SAMPLE_LENGTH,
    };

    pub fn segment_count(&self, arc: &EllipticalArc) -> u32 {
        match self.units_per_segment {
            Some(units) => {
                let length = arc.dtheta.abs() * arc.rx.max(arc.ry);
                let wanted = (length / units).ceil();
                // Saturating float-to-int cast
                (wanted as u32).clamp(self.min_segments, MAX_ARC_SEGMENTS)
            }
            None => self.min_segments,
        }
    }
}

impl EllipticalArc {
    /// Point at parameter `t` (radians)
    pub fn point_at(&self, t: f64) -> DVec2 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let local = dvec2(self.rx * t.cos(), self.ry * t.sin());
        self.center
            + dvec2(
                cos_phi * local.x - sin_phi * local.y,
                sin_phi * local.x + cos_phi * local.y,
            )
    }

    pub fn start(&self) -> DVec2 {
        self.point_at(self.theta1)
    }

    pub fn end(&self) -> DVec2 {
        self.point_at(self.theta1 + self.dtheta)
    }

    /// Sample the arc, map each point, and return the connected segments.
    ///
    /// Segments no longer than `policy.min_length` are skipped and the next
    /// segment starts where the last kept one ended.
    pub fn segments(
        &self,
        policy: &SegmentPolicy,
        map: impl Fn(DVec2) -> DVec2,
    ) -> Vec<(DVec2, DVec2)> {
        let n = policy.segment_count(self).max(1);
        let mut out = Vec::new();
        let mut prev = map(self.start());
        for i in 1..=n {
            let t = self.theta1 + self.dtheta * f64::from(i) / f64::from(n);
            let next = map(self.point_at(t));
            if prev.distance(next) > policy.min_length {
                out.push((prev, next));
                prev = next;
            }
        }
        out
    }
}

/// Order two endpoint angles of an arc spanning at most half a turn so that
/// it runs counter-clockwise, with the end extended past the start.
pub fn ccw_minor_arc(a: Angle, b: Angle) -> (Angle, Angle) {
    let a = a.normalized();
    let b = b.normalized();
    let (start, end) = if (b - a).normalized().raw() <= 180.0 {
        (a, b)
    } else {
        (b, a)
    };
    (start, extend_past(start, end))
}

/// `end + 360` when it would otherwise precede `start`
pub fn extend_past(start: Angle, end: Angle) -> Angle {
    if end < start { end + Angle::FULL_TURN } else { end }
}

/// Signed quarter-turn sweep between two fixed corner angles
pub fn corner_sweep(start: Angle, end: Angle) -> Angle {
    (end - start).signed()
}
