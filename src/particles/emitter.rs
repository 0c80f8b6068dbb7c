use serde::Serialize;

use crate::foundation::math::{Rng64, lerp};
use crate::scene::model::{EmitMode, Particle};

/// Simulation tick length in milliseconds. Lifetimes are converted to ticks with it.
pub const TICK_MS: f64 = 16.0;

/// Uniform random draws for particle emission.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for Rng64 {
    fn next_unit(&mut self) -> f64 {
        self.next_f64_01()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterState {
    /// Before the emitter's start time; nothing is live.
    #[default]
    Dormant,
    Active,
}

/// One live particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleInstance {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub alpha: f64,
    /// Ticks lived so far.
    pub age: u32,
    /// Lifetime in ticks (`lifetime / TICK_MS`).
    pub max_age: f64,
}

/// Runtime state for one particle descriptor.
///
/// The descriptor is never mutated; all simulation state lives here and is discarded by
/// [`Emitter::reset`].
#[derive(Clone, Debug)]
pub struct Emitter<R = Rng64> {
    descriptor: Particle,
    rng: R,
    state: EmitterState,
    emitted: bool,
    live: Vec<ParticleInstance>,
}

impl<R: RandomSource> Emitter<R> {
    pub fn new(descriptor: Particle, rng: R) -> Self {
        Self {
            descriptor,
            rng,
            state: EmitterState::Dormant,
            emitted: false,
            live: Vec::new(),
        }
    }

    pub fn descriptor(&self) -> &Particle {
        &self.descriptor
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.live
    }

    /// Advance the simulation to `global_time` (ms) by one tick.
    ///
    /// Returns how many particles were emitted by this call.
    pub fn update(&mut self, global_time: f64) -> usize {
        let local = global_time - self.descriptor.start_time;
        if local < 0.0 {
            if self.state == EmitterState::Active {
                tracing::debug!(id = %self.descriptor.id, "emitter rewound before start");
                self.live.clear();
                self.emitted = false;
            }
            self.state = EmitterState::Dormant;
            return 0;
        }
        self.state = EmitterState::Active;

        let count = self.descriptor.config.count as usize;
        let mut emitted = 0;
        match self.descriptor.mode {
            EmitMode::Burst => {
                if !self.emitted {
                    for _ in 0..count {
                        self.emit_one();
                    }
                    self.emitted = true;
                    emitted = count;
                }
            }
            EmitMode::Continuous => {
                let open = self.descriptor.duration.is_none_or(|d| local <= d);
                if open && self.live.len() < count {
                    self.emit_one();
                    emitted = 1;
                }
            }
        }

        self.step();
        emitted
    }

    /// Drop every live particle and return to [`EmitterState::Dormant`].
    pub fn reset(&mut self) {
        self.live.clear();
        self.emitted = false;
        self.state = EmitterState::Dormant;
    }

    fn emit_one(&mut self) {
        let cfg = &self.descriptor.config;
        let angle = cfg.direction.sample(self.rng.next_unit());
        let speed = cfg.speed.sample(self.rng.next_unit());
        let size = cfg.size.sample(self.rng.next_unit());

        self.live.push(ParticleInstance {
            x: self.descriptor.x,
            y: self.descriptor.y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            size,
            alpha: cfg.alpha.start,
            age: 0,
            max_age: cfg.lifetime / TICK_MS,
        });
    }

    fn step(&mut self) {
        let cfg = &self.descriptor.config;
        let gravity = cfg.gravity.unwrap_or(0.0);
        let alpha = cfg.alpha;

        self.live.retain_mut(|p| {
            p.age += 1;
            let age = f64::from(p.age);
            if age > p.max_age {
                return false;
            }
            p.vy += gravity;
            p.x += p.vx;
            p.y += p.vy;
            p.alpha = lerp(alpha.start, alpha.end, age / p.max_age).max(0.0);
            true
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/emitter.rs"]
mod tests;
