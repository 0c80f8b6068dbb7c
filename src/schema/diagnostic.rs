use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document would crash evaluation or produce nonsense.
    Error,
    /// Ignorable; evaluation has a defined fallback.
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

/// One validator finding. `path` is a JSONPath-like locator such as `$.nodes[2].keyframes.x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn error(path: &SchemaPath, message: impl Into<String>) -> Self {
        Self::new(path.to_string(), message, Severity::Error)
    }

    pub fn warning(path: &SchemaPath, message: impl Into<String>) -> Self {
        Self::new(path.to_string(), message, Severity::Warning)
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.severity.label(),
            self.path,
            self.message
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    Field(String),
    Index(usize),
}

/// Location inside a candidate document, rendered as `$.a[0].b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaPath {
    elems: Vec<SchemaPathElem>,
}

impl SchemaPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut elems = self.elems.clone();
        elems.push(SchemaPathElem::Field(name.into()));
        Self { elems }
    }

    pub fn index(&self, i: usize) -> Self {
        let mut elems = self.elems.clone();
        elems.push(SchemaPathElem::Index(i));
        Self { elems }
    }

    pub fn elems(&self) -> &[SchemaPathElem] {
        &self.elems
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for elem in &self.elems {
            match elem {
                SchemaPathElem::Field(name) => write!(f, ".{name}")?,
                SchemaPathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Render one `[SEVERITY] path: message` line per diagnostic, or `OK` when there are none.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "OK".to_owned();
    }
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/schema/diagnostic.rs"]
mod tests;
