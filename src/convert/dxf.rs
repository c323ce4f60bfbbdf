//! DXF R12 entities and document writer
//!
//! Output is the ASCII group-code dialect: each value is preceded by its
//! integer group code on its own line.

use std::fmt::{self, Write};

use glam::DVec2;

use crate::types::{Angle, ColorIndex, EntityStyle, Layer};

/// Geometry of one DXF entity, already in drawing (y-up) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Line {
        start: DVec2,
        end: DVec2,
    },
    Circle {
        center: DVec2,
        radius: f64,
    },
    /// Counter-clockwise from `start_angle` to `end_angle`
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DxfEntity {
    pub kind: EntityKind,
    pub style: EntityStyle,
}

impl DxfEntity {
    pub fn line(start: DVec2, end: DVec2, style: EntityStyle) -> Self {
        Self {
            kind: EntityKind::Line { start, end },
            style,
        }
    }

    pub fn circle(center: DVec2, radius: f64, style: EntityStyle) -> Self {
        Self {
            kind: EntityKind::Circle { center, radius },
            style,
        }
    }

    pub fn arc(
        center: DVec2,
        radius: f64,
        start_angle: Angle,
        end_angle: Angle,
        style: EntityStyle,
    ) -> Self {
        Self {
            kind: EntityKind::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            },
            style,
        }
    }

    /// DXF entity type name
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            EntityKind::Line { .. } => "LINE",
            EntityKind::Circle { .. } => "CIRCLE",
            EntityKind::Arc { .. } => "ARC",
        }
    }

    fn write_to(&self, out: &mut GroupWriter<'_>) -> fmt::Result {
        out.text(0, self.type_name())?;
        out.text(8, &self.style.layer.to_string())?;
        out.int(62, self.style.color.get().into())?;
        match self.kind {
            EntityKind::Line { start, end } => {
                out.point(10, start)?;
                out.point(11, end)?;
            }
            EntityKind::Circle { center, radius } => {
                out.point(10, center)?;
                out.num(40, radius)?;
            }
            EntityKind::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                out.point(10, center)?;
                out.num(40, radius)?;
                out.num(50, start_angle.raw())?;
                out.num(51, end_angle.raw())?;
            }
        }
        Ok(())
    }
}

/// Format a coordinate with at most six decimals and no trailing zeros
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{:.6}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

struct GroupWriter<'a> {
    out: &'a mut String,
}

impl GroupWriter<'_> {
    fn text(&mut self, code: u16, value: &str) -> fmt::Result {
        writeln!(self.out, "{code}")?;
        writeln!(self.out, "{value}")
    }

    fn int(&mut self, code: u16, value: i64) -> fmt::Result {
        writeln!(self.out, "{code}")?;
        writeln!(self.out, "{value}")
    }

    fn num(&mut self, code: u16, value: f64) -> fmt::Result {
        self.text(code, &fmt_num(value))
    }

    /// X, Y and a zero Z at `code`, `code + 10`, `code + 20`
    fn point(&mut self, code: u16, p: DVec2) -> fmt::Result {
        self.num(code, p.x)?;
        self.num(code + 10, p.y)?;
        self.num(code + 20, 0.0)
    }

    fn layer(&mut self, layer: Layer, color: ColorIndex) -> fmt::Result {
        self.text(0, "LAYER")?;
        self.text(2, &layer.to_string())?;
        self.int(70, 0)?;
        self.int(62, color.get().into())?;
        self.text(6, "CONTINUOUS")
    }
}

/// Converted entities, kept in their emission groups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub lines: Vec<DxfEntity>,
    pub circles: Vec<DxfEntity>,
    pub rects: Vec<DxfEntity>,
    pub paths: Vec<DxfEntity>,
}

impl Drawing {
    /// All entities in output order: lines, circles, rects, then paths
    pub fn entities(&self) -> impl Iterator<Item = &DxfEntity> {
        self.lines
            .iter()
            .chain(&self.circles)
            .chain(&self.rects)
            .chain(&self.paths)
    }

    pub fn len(&self) -> usize {
        self.lines.len() + self.circles.len() + self.rects.len() + self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the full DXF document
    pub fn to_dxf_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_document(&mut GroupWriter { out: &mut out });
        out
    }

    fn write_document(&self, w: &mut GroupWriter<'_>) -> fmt::Result {
        w.text(0, "SECTION")?;
        w.text(2, "HEADER")?;
        w.text(9, "$ACADVER")?;
        w.text(1, "AC1009")?;
        w.text(0, "ENDSEC")?;

        w.text(0, "SECTION")?;
        w.text(2, "TABLES")?;
        w.text(0, "TABLE")?;
        w.text(2, "LAYER")?;
        w.int(70, 1 + ColorIndex::ALL.len() as i64)?;
        w.layer(Layer::Default, ColorIndex::WHITE)?;
        for color in ColorIndex::ALL {
            w.layer(Layer::Color(color), color)?;
        }
        w.text(0, "ENDTAB")?;
        w.text(0, "ENDSEC")?;

        w.text(0, "SECTION")?;
        w.text(2, "ENTITIES")?;
        for entity in self.entities() {
            entity.write_to(w)?;
        }
        w.text(0, "ENDSEC")?;

        w.text(0, "EOF")
    }
}
