//! Document validation: diagnostics and the rule set that guards evaluation.

pub mod diagnostic;
pub mod validate;
