use super::*;
use crate::schema::diagnostic::{Diagnostic, Severity};

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VanimError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VanimError::edit("x").to_string().contains("edit error:"));
    assert!(
        VanimError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn rejected_lists_every_diagnostic() {
    let err = VanimError::Rejected(vec![
        Diagnostic::new("$.version", "version must be 1", Severity::Error),
        Diagnostic::new("$.nodes[0].asset", "asset missing", Severity::Warning),
    ]);
    let s = err.to_string();
    assert!(s.contains("[ERROR] $.version: version must be 1"));
    assert!(s.contains("[WARNING] $.nodes[0].asset: asset missing"));
    assert_eq!(err.diagnostics().len(), 2);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VanimError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(err.diagnostics().is_empty());
}
