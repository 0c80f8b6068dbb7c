use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::animation::keyframe::Keyframe;
use crate::animation::track::TrackKey;

/// The only document format revision understood by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// A `.vanim` document: a flat scene graph, keyframe tracks and particle emitters.
///
/// This is the JSON-facing representation. Hierarchy is expressed only through container
/// `children` id lists; `nodes` itself is flat and ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub name: String,
    /// Total length in milliseconds.
    pub duration: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub particles: Vec<Particle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<State>,
    #[serde(default)]
    pub params: BTreeMap<String, Param>,
}

impl Document {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn particle(&self, id: &str) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn keyframe_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| n.keyframes.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    Texture {
        path: String,
    },
    Spritesheet {
        path: String,
        cols: u32,
        rows: u32,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
}

impl BlendMode {
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Multiply,
        BlendMode::Screen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Add => "add",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// Node discriminant, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Container,
    Sprite,
    SpritesheetAnim,
    Graphics,
    Text,
    Mesh,
}

impl NodeType {
    pub const ALL: [NodeType; 6] = [
        NodeType::Container,
        NodeType::Sprite,
        NodeType::SpritesheetAnim,
        NodeType::Graphics,
        NodeType::Text,
        NodeType::Mesh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Sprite => "sprite",
            Self::SpritesheetAnim => "spritesheet_anim",
            Self::Graphics => "graphics",
            Self::Text => "text",
            Self::Mesh => "mesh",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Kinds whose `asset` field must name an entry of `Document::assets`.
    pub fn requires_asset(self) -> bool {
        matches!(self, Self::Sprite | Self::SpritesheetAnim | Self::Mesh)
    }
}

/// One scene-graph node. `id` is unique across the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub transform: NodeTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
    /// Start of the visibility window (ms, global). Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Length of the visibility window (ms). Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keyframes: BTreeMap<TrackKey, Vec<Keyframe>>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            transform: NodeTransform::default(),
            blend_mode: None,
            start_time: None,
            duration: None,
            keyframes: BTreeMap::new(),
        }
    }

    pub fn container(id: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeKind::Container {
                children: Some(Vec::new()),
            },
        )
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    pub fn children(&self) -> &[String] {
        match &self.kind {
            NodeKind::Container {
                children: Some(children),
            } => children,
            _ => &[],
        }
    }

    /// Asset reference for sprite, spritesheet and mesh nodes.
    pub fn asset(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Sprite { asset }
            | NodeKind::SpritesheetAnim { asset }
            | NodeKind::Mesh { asset, .. } => Some(asset),
            NodeKind::Container { .. } | NodeKind::Graphics { .. } | NodeKind::Text { .. } => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Container {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Vec<String>>,
    },
    Sprite {
        asset: String,
    },
    SpritesheetAnim {
        asset: String,
    },
    Graphics {
        graphics: GraphicsShape,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<TextStyle>,
    },
    Mesh {
        asset: String,
        vertices: Vec<MeshVertex>,
        indices: Vec<u32>,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Container { .. } => NodeType::Container,
            Self::Sprite { .. } => NodeType::Sprite,
            Self::SpritesheetAnim { .. } => NodeType::SpritesheetAnim,
            Self::Graphics { .. } => NodeType::Graphics,
            Self::Text { .. } => NodeType::Text,
            Self::Mesh { .. } => NodeType::Mesh,
        }
    }
}

/// Static transform fields shared by every node kind. Absent fields use renderer defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl NodeTransform {
    /// JSON names of the transform fields, in declaration order.
    pub const FIELDS: [&'static str; 10] = [
        "x", "y", "scaleX", "scaleY", "rotation", "alpha", "anchorX", "anchorY", "width",
        "height",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GraphicsShape {
    Line {
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke: StrokeStyle,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<FillStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<StrokeStyle>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<FillStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<StrokeStyle>,
    },
    RoundRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<FillStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<StrokeStyle>,
    },
}

impl GraphicsShape {
    /// Shape kinds and the numeric geometry fields each one requires.
    pub const GEOMETRY: [(&'static str, &'static [&'static str]); 4] = [
        ("line", &["fromX", "fromY", "toX", "toY"]),
        ("circle", &["cx", "cy", "radius"]),
        ("rect", &["x", "y", "width", "height"]),
        ("roundRect", &["x", "y", "width", "height", "radius"]),
    ];

    /// Geometry field names for a shape kind, or `None` for an unknown kind.
    pub fn geometry_fields(kind: &str) -> Option<&'static [&'static str]> {
        Self::GEOMETRY
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, fields)| *fields)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

/// Mesh vertex with texture coordinates in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// Emit `count` particles once.
    Burst,
    /// Trickle particles while the emission window is open.
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `t` in `[0, 1)` onto the range.
    pub fn sample(self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaRange {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleConfig {
    pub count: u32,
    /// Lifetime of each particle in milliseconds.
    pub lifetime: f64,
    pub speed: Range,
    pub size: Range,
    pub color: String,
    pub alpha: AlphaRange,
    /// Emission angle in radians.
    pub direction: Range,
    /// Downward acceleration, px per tick squared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<BlendMode>,
}

/// Particle emitter descriptor. Immutable input; simulation state lives in
/// [`crate::particles::emitter::Emitter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    pub id: String,
    /// Global activation time in milliseconds.
    pub start_time: f64,
    pub mode: EmitMode,
    pub x: f64,
    pub y: f64,
    /// Emission window for continuous mode. Absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub config: ParticleConfig,
}

/// Typed text parameter with a default, overridable at playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Param {
    Color {
        default: String,
    },
    #[serde(rename = "string")]
    Text {
        default: String,
    },
    Number {
        default: f64,
    },
}

impl Param {
    /// Default rendered the way it is substituted into text.
    pub fn default_text(&self) -> String {
        match self {
            Self::Color { default } | Self::Text { default } => default.clone(),
            Self::Number { default } => format_number(*default),
        }
    }
}

/// Formats whole numbers without a trailing `.0`.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// `null` reads as an empty list.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

/// Named time region. Carried through editing; not evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    pub label: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
