use crate::schema::diagnostic::{Diagnostic, format_diagnostics};

/// Convenience result type used across vanim.
pub type VanimResult<T> = Result<T, VanimError>;

/// Top-level error taxonomy used by document and editing APIs.
///
/// Per-frame evaluation never produces these; it degrades to defined fallback values instead.
#[derive(thiserror::Error, Debug)]
pub enum VanimError {
    /// Invalid user-provided arguments or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An editing operation could not be applied to the document.
    #[error("edit error: {0}")]
    Edit(String),

    /// The validator reported error-severity diagnostics.
    #[error("document rejected:\n{}", format_diagnostics(.0))]
    Rejected(Vec<Diagnostic>),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VanimError {
    /// Build a [`VanimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VanimError::Edit`] value.
    pub fn edit(msg: impl Into<String>) -> Self {
        Self::Edit(msg.into())
    }

    /// Build a [`VanimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Diagnostics carried by a rejected document, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Rejected(diags) => diags,
            _ => &[],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
