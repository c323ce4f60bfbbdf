//! Structured diagnostics for geometry that was skipped or approximated
//!
//! Conversion never fails on geometry. Instead each converter reports what it
//! dropped through a [`NoticeSink`], so callers and tests can inspect it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Zero-length segment, zero radius, coincident arc endpoints
    Degenerate,
    /// Arc center could not be solved; approximated with line segments
    ArcFallback,
    /// Path command or element feature that produces no output
    Unsupported,
    /// Attribute that was parsed but has no effect on the output
    Ignored,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoticeKind::Degenerate => "degenerate",
            NoticeKind::ArcFallback => "arc-fallback",
            NoticeKind::Unsupported => "unsupported",
            NoticeKind::Ignored => "ignored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Local name of the SVG element the notice concerns
    pub element: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, element: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            element: element.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] <{}>: {}", self.kind, self.element, self.message)
    }
}

/// Receiver for conversion notices
pub trait NoticeSink {
    fn record(&mut self, notice: Notice);
}

impl NoticeSink for Vec<Notice> {
    fn record(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Forwards notices to the log and keeps nothing.
///
/// Content that is silently lost from the drawing (ignored rotations,
/// unsupported commands) logs at warn level, the rest at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn record(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Ignored | NoticeKind::Unsupported => {
                crate::log::warn!(
                    kind = %notice.kind,
                    element = %notice.element,
                    "{}",
                    notice.message
                );
            }
            NoticeKind::Degenerate | NoticeKind::ArcFallback => {
                crate::log::debug!(
                    kind = %notice.kind,
                    element = %notice.element,
                    "{}",
                    notice.message
                );
            }
        }
    }
}
