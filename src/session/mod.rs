//! Clock-driven playback over a document.

pub mod playback;
