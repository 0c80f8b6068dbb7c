#![forbid(unsafe_code)]
//! Engine for `.vanim` declarative 2D animation documents.
//!
//! A document is plain JSON: nodes with keyframe tracks, particle emitters, assets and
//! text params. This crate validates documents, edits them as values, samples them frame by
//! frame and simulates their particles.

pub mod animation;
pub mod eval;
pub mod foundation;
pub mod mesh;
pub mod particles;
pub mod scene;
pub mod schema;
pub mod session;

pub use animation::ease::Ease;
pub use animation::keyframe::{Keyframe, KeyframeValue, evaluate_all_tracks, evaluate_track};
pub use animation::track::{Axis, Property, TrackKey};
pub use eval::frame::{EvaluatedFrame, EvaluatedNode, Evaluator, NodeContent, ResolvedTransform};
pub use eval::params::{ParamOverrides, ParamValue, resolve_placeholders};
pub use eval::time::{NodePhase, node_local_time};
pub use foundation::error::{VanimError, VanimResult};
pub use foundation::math::Rng64;
pub use mesh::deform::{MeshPreset, apply_preset};
pub use mesh::grid::{MeshGeometry, generate_grid};
pub use particles::emitter::{Emitter, EmitterState, ParticleInstance, RandomSource, TICK_MS};
pub use scene::document::ROOT_ID;
pub use scene::history::History;
pub use scene::model::{
    Asset, BlendMode, Document, EmitMode, Node, NodeKind, NodeType, Param, Particle,
    ParticleConfig,
};
pub use scene::project::Project;
pub use schema::diagnostic::{Diagnostic, SchemaPath, Severity, format_diagnostics, has_errors};
pub use schema::validate::{parse_and_validate, validate, validate_document};
pub use session::playback::{PlaybackOpts, PlaybackSession, SessionFrame};
