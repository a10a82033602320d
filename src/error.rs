//! `thiserror`-derived error types for this crate's public surface.

use crate::diagnostic::Diagnostic;
use thiserror::Error;

/// Everything that can go wrong calling into this crate's public API.
///
/// Malformed *user input* (a declarator that fails a semantic check)
/// surfaces as [`CdeclError::Semantic`] carrying a [`Diagnostic`].
/// [`CdeclError::Internal`] is reserved for invariant violations this
/// crate's own algorithms should never produce, since a library must not
/// abort its caller's process.
#[derive(Debug, Error)]
pub enum CdeclError {
    #[error("{0}")]
    Semantic(Diagnostic),

    #[error("typedef `{name}` already defined with a different type")]
    TypedefRedefined { name: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Diagnostic> for CdeclError {
    fn from(d: Diagnostic) -> Self {
        CdeclError::Semantic(d)
    }
}

pub type Result<T> = std::result::Result<T, CdeclError>;
