use serde::Serialize;

use crate::eval::frame::{EvaluatedFrame, Evaluator};
use crate::eval::params::ParamOverrides;
use crate::foundation::error::{VanimError, VanimResult};
use crate::foundation::math::{Rng64, mix64};
use crate::particles::emitter::{Emitter, ParticleInstance};
use crate::scene::model::{BlendMode, Document};

/// Playback configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackOpts {
    /// Multiplier applied to every `advance` delta.
    pub speed: f64,
    pub looping: bool,
    /// Base seed for particle emitters.
    pub seed: u64,
    pub params: ParamOverrides,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            speed: 1.0,
            looping: false,
            seed: 0,
            params: ParamOverrides::new(),
        }
    }
}

/// Live particles of one emitter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitterFrame {
    pub id: String,
    pub color: String,
    pub blend_mode: BlendMode,
    pub instances: Vec<ParticleInstance>,
}

/// Everything needed to draw the session at its current time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFrame {
    pub time: f64,
    pub nodes: EvaluatedFrame,
    pub particles: Vec<EmitterFrame>,
}

/// A playhead over one document, driving node evaluation and particle emitters.
///
/// Time is in milliseconds. The playhead stays within `[0, duration]`; an optional region
/// narrows where playback starts, stops and loops.
#[derive(Debug)]
pub struct PlaybackSession {
    doc: Document,
    opts: PlaybackOpts,
    evaluator: Evaluator,
    emitters: Vec<Emitter>,
    time: f64,
    playing: bool,
    region: Option<(f64, f64)>,
}

impl PlaybackSession {
    pub fn new(doc: Document, opts: PlaybackOpts) -> Self {
        let emitters = doc
            .particles
            .iter()
            .enumerate()
            .map(|(i, p)| Emitter::new(p.clone(), Rng64::new(mix64(opts.seed ^ i as u64))))
            .collect();
        Self {
            doc,
            opts,
            evaluator: Evaluator::new(),
            emitters,
            time: 0.0,
            playing: false,
            region: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn region(&self) -> Option<(f64, f64)> {
        self.region
    }

    pub fn effective_start(&self) -> f64 {
        self.region.map_or(0.0, |(s, _)| s)
    }

    pub fn effective_end(&self) -> f64 {
        self.region.map_or(self.doc.duration, |(_, e)| e)
    }

    /// Start playing. At the end of a non-looping range, playback restarts from its start.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        if !self.opts.looping && self.time >= self.effective_end() {
            self.rewind_to(self.effective_start());
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pause and return to the start of the range, clearing every emitter.
    pub fn stop(&mut self) {
        self.playing = false;
        self.rewind_to(self.effective_start());
    }

    /// Move the playhead to `time`, clamped to `[0, duration]`.
    pub fn seek(&mut self, time: f64) {
        self.time = time.clamp(0.0, self.doc.duration.max(0.0));
        self.tick_emitters();
    }

    /// Restrict playback to `[start, end]`, clamped to `[0, duration]`, and move the playhead
    /// to `start`.
    pub fn set_region(&mut self, start: f64, end: f64) -> VanimResult<()> {
        let duration = self.doc.duration.max(0.0);
        if !(start.is_finite() && end.is_finite()) {
            return Err(VanimError::validation(format!(
                "region bounds must be finite (got {start}..{end})"
            )));
        }
        let (start, end) = (start.clamp(0.0, duration), end.clamp(0.0, duration));
        if end <= start {
            return Err(VanimError::validation(format!(
                "region end must be after its start (got {start}..{end})"
            )));
        }
        self.region = Some((start, end));
        self.seek(start);
        Ok(())
    }

    pub fn clear_region(&mut self) {
        self.region = None;
    }

    /// Advance a playing session by `delta_ms` of wall time.
    ///
    /// Returns `true` when a non-looping session reached the end of its range and stopped.
    /// Paused sessions do not move.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        if !self.playing {
            return false;
        }
        self.time += delta_ms * self.opts.speed;

        let (start, end) = (self.effective_start(), self.effective_end());
        if self.time >= end {
            if self.opts.looping && end > start {
                self.time = start + (self.time - start) % (end - start);
                self.emitters.iter_mut().for_each(Emitter::reset);
            } else {
                self.time = end;
                self.playing = false;
                self.tick_emitters();
                tracing::debug!(time = self.time, "playback complete");
                return true;
            }
        }
        self.tick_emitters();
        false
    }

    /// Evaluate the document and snapshot every emitter at the current time.
    pub fn frame(&mut self) -> SessionFrame {
        let nodes = self
            .evaluator
            .eval_frame(&self.doc, self.time, &self.opts.params)
            .clone();
        let particles = self
            .emitters
            .iter()
            .map(|e| {
                let p = e.descriptor();
                EmitterFrame {
                    id: p.id.clone(),
                    color: p.config.color.clone(),
                    blend_mode: p.config.blend_mode.unwrap_or_default(),
                    instances: e.instances().to_vec(),
                }
            })
            .collect();
        SessionFrame {
            time: self.time,
            nodes,
            particles,
        }
    }

    fn rewind_to(&mut self, time: f64) {
        self.time = time;
        self.emitters.iter_mut().for_each(Emitter::reset);
    }

    fn tick_emitters(&mut self) {
        for e in &mut self.emitters {
            e.update(self.time);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/playback.rs"]
mod tests;
