use std::f64::consts::TAU;

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

use crate::animation::keyframe::Keyframe;
use crate::animation::track::{Axis, TrackKey};
use crate::scene::model::MeshVertex;

/// A deformation preset with its parameters.
///
/// All presets work over a `width × height` frame centred at `(width / 2, height / 2)` and
/// leave UVs untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MeshPreset {
    /// Horizontal sine wave; `phase` is in turns.
    Wave {
        amplitude: f64,
        #[serde(default = "one")]
        frequency: f64,
        #[serde(default)]
        phase: f64,
    },
    /// Push vertices near the centre outward.
    Bulge {
        strength: f64,
        /// Effect radius as a fraction of the centre-to-corner distance.
        #[serde(default = "half")]
        radius: f64,
    },
    /// Rotation about the centre growing towards the corners, up to `angle` radians.
    Twist { angle: f64 },
    /// Shift the top edge horizontally by `amount` px, fading to 0 at the bottom.
    Bend { amount: f64 },
}

fn one() -> f64 {
    1.0
}

fn half() -> f64 {
    0.5
}

impl MeshPreset {
    pub fn wave(amplitude: f64) -> Self {
        Self::Wave {
            amplitude,
            frequency: 1.0,
            phase: 0.0,
        }
    }

    pub fn bulge(strength: f64) -> Self {
        Self::Bulge {
            strength,
            radius: 0.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wave { .. } => "wave",
            Self::Bulge { .. } => "bulge",
            Self::Twist { .. } => "twist",
            Self::Bend { .. } => "bend",
        }
    }
}

/// Apply `preset` to `vertices`, returning a new list.
pub fn apply_preset(
    preset: MeshPreset,
    vertices: &[MeshVertex],
    width: f64,
    height: f64,
) -> Vec<MeshVertex> {
    match preset {
        MeshPreset::Wave {
            amplitude,
            frequency,
            phase,
        } => wave(vertices, width, amplitude, frequency, phase),
        MeshPreset::Bulge { strength, radius } => {
            bulge(vertices, width, height, strength, radius)
        }
        MeshPreset::Twist { angle } => twist(vertices, width, height, angle),
        MeshPreset::Bend { amount } => bend(vertices, height, amount),
    }
}

pub fn wave(
    vertices: &[MeshVertex],
    width: f64,
    amplitude: f64,
    frequency: f64,
    phase: f64,
) -> Vec<MeshVertex> {
    vertices
        .iter()
        .map(|v| MeshVertex {
            y: v.y + ((v.x / width) * TAU * frequency + phase * TAU).sin() * amplitude,
            ..*v
        })
        .collect()
}

pub fn bulge(
    vertices: &[MeshVertex],
    width: f64,
    height: f64,
    strength: f64,
    radius: f64,
) -> Vec<MeshVertex> {
    let center = Point::new(width / 2.0, height / 2.0);
    let max_dist = center.to_vec2().hypot() * radius;

    vertices
        .iter()
        .map(|v| {
            let offset = point(v) - center;
            let dist = offset.hypot();
            if dist == 0.0 || dist > max_dist {
                return *v;
            }
            let factor = 1.0 + strength * (1.0 - dist / max_dist);
            with_point(v, center + offset * factor)
        })
        .collect()
}

pub fn twist(vertices: &[MeshVertex], width: f64, height: f64, angle: f64) -> Vec<MeshVertex> {
    let center = Point::new(width / 2.0, height / 2.0);
    let max_dist = center.to_vec2().hypot();

    vertices
        .iter()
        .map(|v| {
            let p = point(v);
            let dist = (p - center).hypot();
            let rot = if max_dist > 0.0 {
                dist / max_dist * angle
            } else {
                0.0
            };
            with_point(v, Affine::rotate_about(rot, center) * p)
        })
        .collect()
}

pub fn bend(vertices: &[MeshVertex], height: f64, amount: f64) -> Vec<MeshVertex> {
    vertices
        .iter()
        .map(|v| MeshVertex {
            x: v.x + (1.0 - v.y / height) * amount,
            ..*v
        })
        .collect()
}

/// Keyframes that pin every vertex of `vertices` at `time`.
///
/// Yields a `vertex<N>_x` and a `vertex<N>_y` keyframe per vertex, in vertex order.
pub fn vertex_tracks(vertices: &[MeshVertex], time: f64) -> Vec<(TrackKey, Keyframe)> {
    vertices
        .iter()
        .enumerate()
        .flat_map(|(i, v)| {
            [
                (TrackKey::vertex(i, Axis::X), Keyframe::new(time, v.x)),
                (TrackKey::vertex(i, Axis::Y), Keyframe::new(time, v.y)),
            ]
        })
        .collect()
}

fn point(v: &MeshVertex) -> Point {
    Point::new(v.x, v.y)
}

fn with_point(v: &MeshVertex, p: Point) -> MeshVertex {
    MeshVertex {
        x: p.x,
        y: p.y,
        ..*v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/deform.rs"]
mod tests;
