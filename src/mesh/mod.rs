//! Mesh grid generation and deformation presets.

pub mod deform;
pub mod grid;
