//! Easing curves, keyframe tracks and track sampling.

pub mod ease;
pub mod keyframe;
pub mod track;
