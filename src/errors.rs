//! Error types with rich diagnostics using miette
//!
//! Only document-level failures are errors. Geometry that cannot be converted
//! is skipped or approximated and reported through [`crate::notice`] instead.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based row/column position, clamped to the source.
    pub fn offset_of(&self, row: u32, col: u32) -> usize {
        let mut offset = 0;
        for (idx, line) in self.source.split_inclusive('\n').enumerate() {
            if idx + 1 == row as usize {
                let col_bytes: usize = line
                    .chars()
                    .take(col.saturating_sub(1) as usize)
                    .map(char::len_utf8)
                    .sum();
                return (offset + col_bytes).min(self.source.len());
            }
            offset += line.len();
        }
        self.source.len()
    }
}

/// Errors that abort a whole conversion
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("failed to process SVG document: {message}")]
    #[diagnostic(code(svgdxf::parse::xml))]
    Xml {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parser stopped here")]
        span: SourceSpan,
    },

    #[error("failed to process SVG document: root element is <{found}>, expected <svg>")]
    #[diagnostic(
        code(svgdxf::parse::not_svg),
        help("the document must have a single <svg> root element")
    )]
    NotSvg { found: String },

    #[cfg(feature = "pdf")]
    #[error("failed to render PDF: {message}")]
    #[diagnostic(code(svgdxf::pdf::render))]
    Pdf { message: String },
}

impl ConvertError {
    /// Build an XML error from a roxmltree failure against its source text.
    pub(crate) fn from_xml(err: &roxmltree::Error, source: &SourceContext) -> Self {
        let pos = err.pos();
        let offset = source.offset_of(pos.row, pos.col);
        ConvertError::Xml {
            message: err.to_string(),
            src: source.named_source(),
            span: SourceSpan::from(offset..offset),
        }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
