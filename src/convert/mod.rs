//! SVG to DXF conversion pipeline
//!
//! The document is parsed once, the root's dimensions analyzed, then every
//! drawable element is visited depth-first with its accumulated
//! [`TransformContext`]. Entities land in one of four groups so the output
//! lists all lines, then circles, rects and paths.

pub mod context;
pub mod defaults;
pub mod dxf;
pub mod geometry;
pub mod path;
pub mod shapes;

use roxmltree::Node;

use crate::dimensions::{Dimensions, parse_document};
use crate::errors::Result;
use crate::log::{debug, trace};
use crate::notice::{Notice, NoticeKind, NoticeSink};
use crate::transform::{Composition, parse_transform, unsupported_functions};

pub use context::TransformContext;
pub use dxf::{Drawing, DxfEntity, EntityKind};
pub use shapes::{ShapeElement, ToEntities};

/// Containers whose content is never drawn directly
const NON_RENDERED: &[&str] = &["defs", "symbol", "clipPath", "mask", "marker", "pattern"];

/// Knobs of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvertOptions {
    pub composition: Composition,
    /// Y-flip extent for documents without a viewBox, instead of their height
    pub fallback_max_y: Option<f64>,
}

/// Convert an SVG document into grouped DXF entities
pub fn convert(svg: &str, options: &ConvertOptions, sink: &mut dyn NoticeSink) -> Result<Drawing> {
    let doc = parse_document(svg)?;
    let root = doc.root_element();
    let dims = Dimensions::from_root(root);
    let ctx = TransformContext::root(&dims, options);

    let mut drawing = Drawing::default();
    for child in root.children().filter(Node::is_element) {
        visit(child, &ctx, &mut drawing, sink);
    }

    debug!(
        lines = drawing.lines.len(),
        circles = drawing.circles.len(),
        rects = drawing.rects.len(),
        paths = drawing.paths.len(),
        "converted document"
    );
    Ok(drawing)
}

fn visit(
    node: Node<'_, '_>,
    parent: &TransformContext,
    drawing: &mut Drawing,
    sink: &mut dyn NoticeSink,
) {
    let name = node.tag_name().name();
    if NON_RENDERED.contains(&name) {
        trace!(element = name, "skipping non-rendered container");
        return;
    }

    let ctx = match node.attribute("transform") {
        Some(text) => {
            let spec = parse_transform(text);
            for function in unsupported_functions(text) {
                sink.record(Notice::new(
                    NoticeKind::Unsupported,
                    name,
                    format!("transform function {function}() is not supported"),
                ));
            }
            if let Some(rotation) = spec.effective_rotation() {
                sink.record(Notice::new(
                    NoticeKind::Ignored,
                    name,
                    format!("rotate({}) is not applied", rotation.angle.raw()),
                ));
            }
            parent.with_transform(&spec)
        }
        None => *parent,
    };

    let Some(shape) = ShapeElement::from_node(node) else {
        for child in node.children().filter(Node::is_element) {
            visit(child, &ctx, drawing, sink);
        }
        return;
    };

    let entities = shape.to_entities(&ctx, sink);
    trace!(element = name, count = entities.len(), "converted shape");
    let group = match shape {
        ShapeElement::Line(_) => &mut drawing.lines,
        ShapeElement::Circle(_) => &mut drawing.circles,
        ShapeElement::Rect(_) => &mut drawing.rects,
        ShapeElement::Path(_) => &mut drawing.paths,
    };
    group.extend(entities);
}
