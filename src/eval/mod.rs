//! Per-frame evaluation: visibility windows, param substitution and node resolution.

pub mod frame;
pub mod params;
pub mod time;
