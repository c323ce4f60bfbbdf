//! Physical size and viewBox analysis of the root `<svg>` element

use glam::{DVec2, dvec2};

use crate::errors::{ConvertError, Result, SourceContext};
use crate::types::BBox;
use crate::units::{parse_number, to_points};

/// A4 portrait in points, used when the document declares no size
pub const DEFAULT_WIDTH: f64 = 595.0;
pub const DEFAULT_HEIGHT: f64 = 842.0;

/// Margin added on every side of the PDF page
pub const PDF_MARGIN: f64 = 20.0;

/// The root's `viewBox="min-x min-y width height"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a viewBox, accepting whitespace and/or commas between numbers.
    ///
    /// Returns None with fewer than four numbers or a non-positive size.
    pub fn parse(value: &str) -> Option<ViewBox> {
        let mut numbers = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(parse_number);
        let vb = ViewBox {
            x: numbers.next()??,
            y: numbers.next()??,
            width: numbers.next()??,
            height: numbers.next()??,
        };
        (vb.width > 0.0 && vb.height > 0.0).then_some(vb)
    }

    pub fn origin(&self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Largest user-space Y, the reference for the Y-axis flip
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Everything the converter needs to know about the drawing's coordinate space
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    /// Physical width in points
    pub width: f64,
    /// Physical height in points
    pub height: f64,
    /// True when `width` was declared on the root
    pub has_width: bool,
    /// True when `height` was declared on the root
    pub has_height: bool,
    pub view_box: Option<ViewBox>,
    /// Physical units per user unit along X (1 without a viewBox)
    pub scale_x: f64,
    /// Physical units per user unit along Y (1 without a viewBox)
    pub scale_y: f64,
    /// User-space coordinate range the drawing covers
    pub extent: BBox,
}

impl Dimensions {
    /// Analyze an already parsed `<svg>` element
    pub fn from_root(root: roxmltree::Node<'_, '_>) -> Dimensions {
        let width = root.attribute("width").and_then(to_points);
        let height = root.attribute("height").and_then(to_points);
        let view_box = root.attribute("viewBox").and_then(ViewBox::parse);

        let has_width = width.is_some();
        let has_height = height.is_some();
        let width = width.unwrap_or(DEFAULT_WIDTH);
        let height = height.unwrap_or(DEFAULT_HEIGHT);

        let (scale_x, scale_y, extent) = match view_box {
            Some(vb) => (
                width / vb.width,
                height / vb.height,
                BBox::new(vb.origin(), dvec2(vb.x + vb.width, vb.max_y())),
            ),
            None => (1.0, 1.0, BBox::new(DVec2::ZERO, dvec2(width, height))),
        };

        crate::log::debug!(
            width,
            height,
            scale_x,
            scale_y,
            has_view_box = view_box.is_some(),
            "analyzed svg dimensions"
        );

        Dimensions {
            width,
            height,
            has_width,
            has_height,
            view_box,
            scale_x,
            scale_y,
            extent,
        }
    }

    /// Fallback Y-flip extent used when no viewBox is present
    pub fn fallback_max_y(&self) -> f64 {
        self.extent.max.y
    }
}

/// Parse SVG text, requiring an `<svg>` root element
pub(crate) fn parse_document(svg: &str) -> Result<roxmltree::Document<'_>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(svg, options)
        .map_err(|e| ConvertError::from_xml(&e, &SourceContext::new("<input>", svg)))?;
    let name = doc.root_element().tag_name().name();
    if name != "svg" {
        return Err(ConvertError::NotSvg {
            found: name.to_string(),
        });
    }
    Ok(doc)
}

/// Analyze the root element of an SVG document
pub fn analyze_dimensions(svg: &str) -> Result<Dimensions> {
    let doc = parse_document(svg)?;
    Ok(Dimensions::from_root(doc.root_element()))
}

/// Page size for the PDF export: the drawing plus [`PDF_MARGIN`] on each side.
///
/// When either physical dimension is missing, the viewBox size stands in for
/// both; with neither, A4.
pub fn pdf_page_size(dims: &Dimensions) -> DVec2 {
    let content = if dims.view_box.is_some() && !(dims.has_width && dims.has_height) {
        dvec2(dims.extent.width(), dims.extent.height())
    } else {
        dvec2(dims.width, dims.height)
    };
    content + DVec2::splat(PDF_MARGIN * 2.0)
}
