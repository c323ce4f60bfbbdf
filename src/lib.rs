//! Convert SVG line art into AutoCAD R12 DXF (and PDF).
//!
//! Only `line`, `circle`, `rect` (optionally rounded) and `path` with
//! absolute `M`/`L`/`A`/`Z` commands produce output. Circular arcs become
//! native ARC entities; elliptical ones are approximated with LINEs.
//!
//! ```
//! let dxf = svgdxf::svg_to_dxf(
//!     r#"<svg width="100" height="100"><line x1="0" y1="0" x2="100" y2="0" stroke="red"/></svg>"#,
//! )
//! .unwrap();
//! assert!(dxf.contains("LINE\n8\nCOLOR_1\n"));
//! ```

pub mod color;
pub mod convert;
pub mod dimensions;
pub mod errors;
pub(crate) mod log;
pub mod notice;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod transform;
pub mod types;
pub mod units;

use std::fmt;

pub use convert::{ConvertOptions, Drawing, DxfEntity, EntityKind, convert};
pub use dimensions::{Dimensions, ViewBox, analyze_dimensions, pdf_page_size};
pub use errors::{ConvertError, Result};
pub use notice::{LogSink, Notice, NoticeKind, NoticeSink};
#[cfg(feature = "pdf")]
pub use pdf::svg_to_pdf;
pub use transform::{Composition, TransformSpec, parse_transform};

/// Convert an SVG document to DXF text with default options.
///
/// Notices about skipped geometry go to the debug log.
pub fn svg_to_dxf(svg: &str) -> Result<String> {
    svg_to_dxf_with(svg, &ConvertOptions::default(), &mut LogSink)
}

/// Convert an SVG document to DXF text, reporting notices to `sink`
pub fn svg_to_dxf_with(
    svg: &str,
    options: &ConvertOptions,
    sink: &mut dyn NoticeSink,
) -> Result<String> {
    Ok(convert(svg, options, sink)?.to_dxf_string())
}

/// Kinds of file this crate produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Dxf,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dxf => "dxf",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Output file name for a document's logical name: `<name>.dxf` / `<name>.pdf`
pub fn output_file_name(logical_name: &str, format: OutputFormat) -> String {
    format!("{logical_name}.{}", format.extension())
}
