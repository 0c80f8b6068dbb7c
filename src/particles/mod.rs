//! Particle emitter simulation.

pub mod emitter;
