//! Source locations and the caret-style diagnostic printer: every error
//! carries a source-location span and a one-line message, and renders
//! with the offending line re-echoed and a caret under the span's start.

use std::fmt;

/// A half-open byte-offset span within a single logical input (a command or
/// a config-file line). `start == end` is a valid, zero-width span pointing
/// at one column — used for errors like "unexpected end of declarator".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SourceSpan {
    pub start: u32,
    pub end: u32,
}

impl SourceSpan {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn point(at: u32) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single diagnostic: a severity, a span into the originating input, and
/// a one-line message. Meant to be the one diagnostic type shared across
/// every lex/parse/semantic error category a `cdecl` front-end produces;
/// this crate only ever produces the semantic-error category (no
/// tokenizer/grammar live here), but the type is shared so a grammar
/// driver's own diagnostics compose with ours.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: Severity,
    pub span: SourceSpan,
    pub message: String,
}

impl Diagnostic {
    pub fn error(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span,
            message: message.into(),
        }
    }

    pub fn warning(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            message: message.into(),
        }
    }

    /// Renders `severity: message`, followed by the offending source line
    /// with a `^` caret under the span's starting column, into `w`.
    ///
    /// `source_line` is the single line of input the span indexes into;
    /// callers (the grammar driver) are responsible for locating it from a
    /// multi-line command buffer, since this crate never holds the raw
    /// input text itself.
    pub fn render(&self, source_line: &str, w: &mut impl fmt::Write) -> fmt::Result {
        writeln!(w, "{}: {}", self.severity, self.message)?;
        writeln!(w, "{source_line}")?;
        let col = self.span.start as usize;
        let width = self.span.len().max(1) as usize;
        writeln!(w, "{}{}", " ".repeat(col), "^".repeat(width))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
