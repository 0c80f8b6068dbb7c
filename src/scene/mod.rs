//! The `.vanim` document model and its editing operations.

pub mod document;
pub mod history;
pub mod model;
pub mod project;
