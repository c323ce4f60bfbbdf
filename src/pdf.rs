//! PDF export, delegated to svg2pdf
//!
//! The source document is embedded as an image into a wrapper SVG whose page
//! is larger by the margin on every side, then the wrapper is rendered.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::dimensions::{Dimensions, PDF_MARGIN, parse_document, pdf_page_size};
use crate::errors::{ConvertError, Result};
use crate::log::debug;

/// Wrapper document placing `svg` at the margin offset of a padded page
fn padded_page(svg: &str, dims: &Dimensions) -> String {
    let page = pdf_page_size(dims);
    let content = page - 2.0 * PDF_MARGIN;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{pw}" height="{ph}" viewBox="0 0 {pw} {ph}">"#,
            r#"<image x="{m}" y="{m}" width="{w}" height="{h}" "#,
            r#"href="data:image/svg+xml;base64,{data}"/>"#,
            "</svg>"
        ),
        pw = page.x,
        ph = page.y,
        m = PDF_MARGIN,
        w = content.x,
        h = content.y,
        data = STANDARD.encode(svg),
    )
}

/// Render an SVG document to PDF bytes, with a margin around the drawing
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let doc = parse_document(svg)?;
    let dims = Dimensions::from_root(doc.root_element());
    let wrapper = padded_page(svg, &dims);

    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = svg2pdf::usvg::Tree::from_str(&wrapper, &opt).map_err(|e| ConvertError::Pdf {
        message: e.to_string(),
    })?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| ConvertError::Pdf {
        message: e.to_string(),
    })?;

    debug!(bytes = pdf.len(), "rendered pdf");
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::analyze_dimensions;

    #[test]
    fn wrapper_offsets_content_by_margin() {
        let svg = r#"<svg width="100" height="60"/>"#;
        let dims = analyze_dimensions(svg).unwrap();
        let wrapper = padded_page(svg, &dims);
        assert!(wrapper.contains(r#"width="140" height="100""#));
        assert!(wrapper.contains(r#"<image x="20" y="20" width="100" height="60""#));
        assert!(wrapper.contains(&STANDARD.encode(svg)));
    }

    #[test]
    fn renders_a_pdf() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <circle cx="50" cy="50" r="20" stroke="black" fill="none"/>
        </svg>"#;
        let pdf = svg_to_pdf(svg).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            svg_to_pdf("<svg"),
            Err(ConvertError::Xml { .. })
        ));
    }
}
