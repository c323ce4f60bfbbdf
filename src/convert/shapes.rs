//! Shape elements and their conversion to DXF entities
//!
//! Each supported SVG element is its own type that knows how to read itself
//! from the XML node and emit the entities it stands for.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::context::TransformContext;
use super::defaults::{CIRCULAR_TOLERANCE, MIN_CHORD, MIN_LINE_LENGTH};
use super::dxf::DxfEntity;
use super::geometry::{
    EllipticalArc, SegmentPolicy, calculate_arc_center, ccw_minor_arc, corner_sweep, extend_past,
    svg_arc_to_center,
};
use super::path::{PathCommand, parse_path_data};
use crate::log::trace;
use crate::notice::{Notice, NoticeKind, NoticeSink};
use crate::types::{Angle, EntityStyle};
use crate::units::parse_number;

/// Conversion of one shape into DXF entities
#[enum_dispatch]
pub trait ToEntities {
    /// SVG element name, for notices
    fn tag(&self) -> &'static str;

    fn stroke(&self) -> Option<&str>;

    fn to_entities(&self, ctx: &TransformContext, sink: &mut dyn NoticeSink) -> Vec<DxfEntity>;

    fn style(&self) -> EntityStyle {
        EntityStyle::from_stroke(self.stroke())
    }
}

/// A supported drawable element
#[enum_dispatch(ToEntities)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeElement {
    Line(LineElement),
    Circle(CircleElement),
    Rect(RectElement),
    Path(PathElement),
}

impl ShapeElement {
    /// Read a shape from an element node; None for anything else
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Option<ShapeElement> {
        let num = |name: &str| node.attribute(name).and_then(parse_number);
        let stroke = node.attribute("stroke").map(str::to_string);

        let shape = match node.tag_name().name() {
            "line" => ShapeElement::Line(LineElement {
                start: dvec2(num("x1").unwrap_or(0.0), num("y1").unwrap_or(0.0)),
                end: dvec2(num("x2").unwrap_or(0.0), num("y2").unwrap_or(0.0)),
                stroke,
            }),
            "circle" => ShapeElement::Circle(CircleElement {
                center: dvec2(num("cx").unwrap_or(0.0), num("cy").unwrap_or(0.0)),
                r: num("r").unwrap_or(0.0),
                stroke,
            }),
            "rect" => ShapeElement::Rect(RectElement {
                origin: dvec2(num("x").unwrap_or(0.0), num("y").unwrap_or(0.0)),
                size: dvec2(num("width").unwrap_or(0.0), num("height").unwrap_or(0.0)),
                rx: num("rx"),
                ry: num("ry"),
                stroke,
            }),
            "path" => ShapeElement::Path(PathElement {
                d: node.attribute("d").unwrap_or_default().to_string(),
                stroke,
            }),
            _ => return None,
        };
        Some(shape)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub start: DVec2,
    pub end: DVec2,
    pub stroke: Option<String>,
}

impl ToEntities for LineElement {
    fn tag(&self) -> &'static str {
        "line"
    }

    fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    fn to_entities(&self, ctx: &TransformContext, sink: &mut dyn NoticeSink) -> Vec<DxfEntity> {
        let length = self.start.distance(self.end);
        if length <= MIN_LINE_LENGTH {
            sink.record(Notice::new(
                NoticeKind::Degenerate,
                self.tag(),
                format!("length {length} is below {MIN_LINE_LENGTH}"),
            ));
            return Vec::new();
        }
        vec![DxfEntity::line(
            ctx.map(self.start),
            ctx.map(self.end),
            self.style(),
        )]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleElement {
    pub center: DVec2,
    pub r: f64,
    pub stroke: Option<String>,
}

impl ToEntities for CircleElement {
    fn tag(&self) -> &'static str {
        "circle"
    }

    fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    fn to_entities(&self, ctx: &TransformContext, sink: &mut dyn NoticeSink) -> Vec<DxfEntity> {
        if self.r <= 0.0 {
            sink.record(Notice::new(
                NoticeKind::Degenerate,
                self.tag(),
                format!("radius {} is not positive", self.r),
            ));
            return Vec::new();
        }
        vec![DxfEntity::circle(
            ctx.map(self.center),
            self.r * ctx.radius_scale(),
            self.style(),
        )]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub origin: DVec2,
    pub size: DVec2,
    pub rx: Option<f64>,
    pub ry: Option<f64>,
    pub stroke: Option<String>,
}

/// Corner centers, in order TL, TR, BR, BL, paired with their fixed y-up angles
const CORNER_ANGLES: [(f64, f64); 4] = [(180.0, 90.0), (90.0, 0.0), (0.0, 270.0), (270.0, 180.0)];

impl RectElement {
    /// Effective corner radii: a missing radius takes the other, both are
    /// clamped to half their side.
    pub fn corner_radii(&self) -> DVec2 {
        let (rx, ry) = match (self.rx, self.ry) {
            (Some(rx), Some(ry)) => (rx, ry),
            (Some(r), None) | (None, Some(r)) => (r, r),
            (None, None) => (0.0, 0.0),
        };
        dvec2(rx.max(0.0), ry.max(0.0)).min(self.size / 2.0)
    }

    fn corner_centers(&self, radii: DVec2) -> [DVec2; 4] {
        let min = self.origin + radii;
        let max = self.origin + self.size - radii;
        [
            dvec2(min.x, min.y),
            dvec2(max.x, min.y),
            dvec2(max.x, max.y),
            dvec2(min.x, max.y),
        ]
    }

    fn square(&self, ctx: &TransformContext, style: EntityStyle) -> Vec<DxfEntity> {
        let p = self.origin;
        let q = self.origin + self.size;
        let corners = [p, dvec2(q.x, p.y), q, dvec2(p.x, q.y)];
        (0..4)
            .map(|i| DxfEntity::line(ctx.map(corners[i]), ctx.map(corners[(i + 1) % 4]), style))
            .collect()
    }

    fn rounded(&self, radii: DVec2, ctx: &TransformContext, style: EntityStyle) -> Vec<DxfEntity> {
        let p = self.origin;
        let q = self.origin + self.size;
        let mut out = Vec::new();

        let wide = self.size.x > 2.0 * radii.x;
        let tall = self.size.y > 2.0 * radii.y;
        let edges = [
            (wide, dvec2(p.x + radii.x, p.y), dvec2(q.x - radii.x, p.y)),
            (tall, dvec2(q.x, p.y + radii.y), dvec2(q.x, q.y - radii.y)),
            (wide, dvec2(q.x - radii.x, q.y), dvec2(p.x + radii.x, q.y)),
            (tall, dvec2(p.x, q.y - radii.y), dvec2(p.x, p.y + radii.y)),
        ];
        for (present, a, b) in edges {
            if present {
                out.push(DxfEntity::line(ctx.map(a), ctx.map(b), style));
            }
        }

        let circular = (radii.x - radii.y).abs() < CIRCULAR_TOLERANCE;
        for (center, (start, end)) in self.corner_centers(radii).into_iter().zip(CORNER_ANGLES) {
            let (start, end) = (Angle(start), Angle(end));
            // SVG parameters run opposite to y-up angles
            let corner = EllipticalArc {
                center,
                rx: radii.x,
                ry: radii.y,
                phi: 0.0,
                theta1: -start.to_radians(),
                dtheta: -corner_sweep(start, end).to_radians(),
            };

            if circular {
                let c = ctx.map(center);
                let (a, b) = ccw_minor_arc(
                    Angle::of_vector(ctx.map(corner.start()) - c),
                    Angle::of_vector(ctx.map(corner.end()) - c),
                );
                out.push(DxfEntity::arc(
                    c,
                    radii.x * ctx.radius_scale(),
                    a,
                    b,
                    style,
                ));
            } else {
                out.extend(
                    corner
                        .segments(&SegmentPolicy::CORNER, |pt| ctx.map(pt))
                        .into_iter()
                        .map(|(a, b)| DxfEntity::line(a, b, style)),
                );
            }
        }
        out
    }
}

impl ToEntities for RectElement {
    fn tag(&self) -> &'static str {
        "rect"
    }

    fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    fn to_entities(&self, ctx: &TransformContext, sink: &mut dyn NoticeSink) -> Vec<DxfEntity> {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            sink.record(Notice::new(
                NoticeKind::Degenerate,
                self.tag(),
                format!("size {}x{} is not positive", self.size.x, self.size.y),
            ));
            return Vec::new();
        }

        let radii = self.corner_radii();
        if radii.x > 0.0 && radii.y > 0.0 {
            self.rounded(radii, ctx, self.style())
        } else {
            self.square(ctx, self.style())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub d: String,
    pub stroke: Option<String>,
}

impl ToEntities for PathElement {
    fn tag(&self) -> &'static str {
        "path"
    }

    fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    fn to_entities(&self, ctx: &TransformContext, sink: &mut dyn NoticeSink) -> Vec<DxfEntity> {
        let data = parse_path_data(&self.d);
        if !data.skipped.is_empty() {
            let letters: String = data.skipped.iter().collect();
            sink.record(Notice::new(
                NoticeKind::Unsupported,
                self.tag(),
                format!("commands {letters:?} are not converted"),
            ));
        }

        let style = self.style();
        let mut out = Vec::new();
        let mut current = DVec2::ZERO;
        let mut start = DVec2::ZERO;

        for command in data.commands {
            match command {
                PathCommand::MoveTo(p) => {
                    current = p;
                    start = p;
                }
                PathCommand::LineTo(p) => {
                    out.extend(mapped_line(current, p, ctx, style, sink));
                    current = p;
                }
                PathCommand::ArcTo {
                    radii,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = SvgArc {
                        from: current,
                        to,
                        radii,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                    };
                    out.extend(convert_arc(&arc, ctx, style, sink));
                    current = to;
                }
                PathCommand::ClosePath => {
                    if current != start {
                        out.extend(mapped_line(current, start, ctx, style, sink));
                    }
                    current = start;
                }
            }
        }

        trace!(d = %self.d, entities = out.len(), "converted path");
        out
    }
}

/// LINE between two user-space points, if its mapped length exceeds the threshold
fn mapped_line(
    a: DVec2,
    b: DVec2,
    ctx: &TransformContext,
    style: EntityStyle,
    sink: &mut dyn NoticeSink,
) -> Option<DxfEntity> {
    let (a, b) = (ctx.map(a), ctx.map(b));
    if a.distance(b) > MIN_LINE_LENGTH {
        Some(DxfEntity::line(a, b, style))
    } else {
        sink.record(Notice::new(
            NoticeKind::Degenerate,
            "path",
            format!("segment ({}, {}) to ({}, {}) is too short", a.x, a.y, b.x, b.y),
        ));
        None
    }
}

/// One `A` command with its starting point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgArc {
    pub from: DVec2,
    pub to: DVec2,
    pub radii: DVec2,
    pub x_axis_rotation: Angle,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Convert an SVG arc into a native ARC when it is circular, otherwise into
/// line segments along the ellipse.
pub fn convert_arc(
    arc: &SvgArc,
    ctx: &TransformContext,
    style: EntityStyle,
    sink: &mut dyn NoticeSink,
) -> Vec<DxfEntity> {
    if arc.from.distance(arc.to) < MIN_CHORD {
        sink.record(Notice::new(
            NoticeKind::Degenerate,
            "path",
            "arc endpoints coincide",
        ));
        return Vec::new();
    }

    let radii = arc.radii.abs();
    if radii.x == 0.0 || radii.y == 0.0 {
        return mapped_line(arc.from, arc.to, ctx, style, sink)
            .into_iter()
            .collect();
    }

    if (radii.x - radii.y).abs() < CIRCULAR_TOLERANCE {
        match calculate_arc_center(arc.from, arc.to, radii.x, arc.large_arc, arc.sweep) {
            Some(solved) => {
                let c = ctx.map(solved.center);
                let a = Angle::of_vector(ctx.map(arc.from) - c).normalized();
                let b = Angle::of_vector(ctx.map(arc.to) - c).normalized();
                let (start, end) = if arc.sweep != ctx.flips_orientation() {
                    (a, b)
                } else {
                    (b, a)
                };
                return vec![DxfEntity::arc(
                    c,
                    solved.radius * ctx.radius_scale(),
                    start,
                    extend_past(start, end),
                    style,
                )];
            }
            None => sink.record(Notice::new(
                NoticeKind::ArcFallback,
                "path",
                "circular arc center not solvable, approximating",
            )),
        }
    }

    match svg_arc_to_center(
        arc.from,
        arc.to,
        radii.x,
        radii.y,
        arc.x_axis_rotation,
        arc.large_arc,
        arc.sweep,
    ) {
        Some(ellipse) => ellipse
            .segments(&SegmentPolicy::PATH_ARC, |p| ctx.map(p))
            .into_iter()
            .map(|(a, b)| DxfEntity::line(a, b, style))
            .collect(),
        None => {
            sink.record(Notice::new(
                NoticeKind::ArcFallback,
                "path",
                "elliptical arc has no center parametrization, using its chord",
            ));
            mapped_line(arc.from, arc.to, ctx, style, sink)
                .into_iter()
                .collect()
        }
    }
}
