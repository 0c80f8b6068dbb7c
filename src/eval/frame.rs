use std::collections::BTreeMap;

use serde::Serialize;

use crate::animation::keyframe::{KeyframeValue, evaluate_all_tracks};
use crate::animation::track::{Axis, Property, TrackKey};
use crate::eval::params::{ParamOverrides, resolve_placeholders};
use crate::eval::time::NodePhase;
use crate::scene::model::{
    Asset, BlendMode, Document, GraphicsShape, MeshVertex, Node, NodeKind, TextStyle,
};

/// All nodes of a document sampled at one global time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedFrame {
    pub time: f64,
    /// One entry per document node, in document order.
    pub nodes: Vec<EvaluatedNode>,
}

impl EvaluatedFrame {
    pub fn node(&self, id: &str) -> Option<&EvaluatedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedNode {
    pub id: String,
    pub visible: bool,
    /// Local time the tracks were sampled at; `None` while the node is pending.
    pub local_time: Option<f64>,
    pub values: BTreeMap<TrackKey, KeyframeValue>,
    pub transform: ResolvedTransform,
    pub tint: Option<KeyframeValue>,
    pub blend_mode: BlendMode,
    pub content: NodeContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub alpha: f64,
}

impl Default for ResolvedTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            alpha: 1.0,
        }
    }
}

/// Kind-specific payload after animation and param substitution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NodeContent {
    Container {
        children: Vec<String>,
    },
    Sprite {
        asset: String,
    },
    SpritesheetAnim {
        asset: String,
        /// Frame index, when the asset is a spritesheet.
        frame: Option<u32>,
    },
    Graphics {
        shape: GraphicsShape,
    },
    Text {
        text: String,
        style: Option<TextStyle>,
    },
    Mesh {
        asset: String,
        vertices: Vec<MeshVertex>,
        indices: Vec<u32>,
    },
}

/// Samples documents frame by frame, reusing its output buffer between calls.
#[derive(Debug, Default)]
pub struct Evaluator {
    frame: EvaluatedFrame,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every node of `doc` at `global_time` (ms).
    ///
    /// Never fails and never touches the document; missing data falls back to defaults.
    #[tracing::instrument(skip(self, doc, params), fields(doc = %doc.name))]
    pub fn eval_frame(
        &mut self,
        doc: &Document,
        global_time: f64,
        params: &ParamOverrides,
    ) -> &EvaluatedFrame {
        self.frame.time = global_time;
        self.frame.nodes.clear();
        self.frame.nodes.reserve(doc.nodes.len());
        for node in &doc.nodes {
            self.frame.nodes.push(eval_node(doc, node, global_time, params));
        }
        &self.frame
    }

    pub fn last_frame(&self) -> &EvaluatedFrame {
        &self.frame
    }
}

fn eval_node(
    doc: &Document,
    node: &Node,
    global_time: f64,
    params: &ParamOverrides,
) -> EvaluatedNode {
    let phase = NodePhase::at(global_time, node.start_time, node.duration);
    let local_time = phase.sample_time();
    let values = local_time
        .map(|t| evaluate_all_tracks(&node.keyframes, t))
        .unwrap_or_default();

    let mut transform = base_transform(node);
    let mut tint = None;
    for (key, value) in &values {
        let TrackKey::Prop(prop) = key else {
            continue;
        };
        if *prop == Property::Tint {
            tint = Some(value.clone());
            continue;
        }
        if let Some(v) = value.as_f64() {
            apply_transform_value(&mut transform, *prop, v);
        }
    }

    let content = resolve_content(doc, node, &values, local_time, params);

    EvaluatedNode {
        id: node.id.clone(),
        visible: phase.is_visible(),
        local_time,
        values,
        transform,
        tint,
        blend_mode: node.blend_mode.unwrap_or_default(),
        content,
    }
}

fn base_transform(node: &Node) -> ResolvedTransform {
    let t = &node.transform;
    let d = ResolvedTransform::default();
    ResolvedTransform {
        x: t.x.unwrap_or(d.x),
        y: t.y.unwrap_or(d.y),
        scale_x: t.scale_x.unwrap_or(d.scale_x),
        scale_y: t.scale_y.unwrap_or(d.scale_y),
        rotation: t.rotation.unwrap_or(d.rotation),
        alpha: t.alpha.unwrap_or(d.alpha),
    }
}

fn apply_transform_value(t: &mut ResolvedTransform, prop: Property, v: f64) {
    match prop {
        Property::X => t.x = v,
        Property::Y => t.y = v,
        Property::ScaleX => t.scale_x = v,
        Property::ScaleY => t.scale_y = v,
        Property::Scale => {
            t.scale_x = v;
            t.scale_y = v;
        }
        Property::Rotation => t.rotation = v,
        Property::Alpha => t.alpha = v,
        _ => {}
    }
}

fn resolve_content(
    doc: &Document,
    node: &Node,
    values: &BTreeMap<TrackKey, KeyframeValue>,
    local_time: Option<f64>,
    params: &ParamOverrides,
) -> NodeContent {
    match &node.kind {
        NodeKind::Container { children } => NodeContent::Container {
            children: children.clone().unwrap_or_default(),
        },
        NodeKind::Sprite { asset } => NodeContent::Sprite {
            asset: asset.clone(),
        },
        NodeKind::SpritesheetAnim { asset } => NodeContent::SpritesheetAnim {
            asset: asset.clone(),
            frame: local_time.and_then(|t| spritesheet_frame(doc, node, asset, t)),
        },
        NodeKind::Graphics { graphics } => NodeContent::Graphics {
            shape: animate_shape(graphics, values),
        },
        NodeKind::Text { text, style } => NodeContent::Text {
            text: resolve_placeholders(text, &doc.params, params),
            style: style.clone(),
        },
        NodeKind::Mesh {
            asset,
            vertices,
            indices,
        } => NodeContent::Mesh {
            asset: asset.clone(),
            vertices: animate_vertices(vertices, values),
            indices: indices.clone(),
        },
    }
}

/// `min(floor(local / duration * frames), frames - 1)`, over the node duration or else the
/// document duration.
fn spritesheet_frame(doc: &Document, node: &Node, asset: &str, local: f64) -> Option<u32> {
    let Some(Asset::Spritesheet { cols, rows, .. }) = doc.assets.get(asset) else {
        return None;
    };
    let frames = cols.saturating_mul(*rows);
    if frames == 0 {
        return None;
    }
    let duration = node.duration.unwrap_or(doc.duration);
    if duration <= 0.0 {
        return Some(frames - 1);
    }
    let raw = (local / duration * f64::from(frames)).floor().max(0.0);
    Some((raw as u32).min(frames - 1))
}

/// Copy of `shape` with numeric geometry tracks applied to the fields the shape has.
fn animate_shape(
    shape: &GraphicsShape,
    values: &BTreeMap<TrackKey, KeyframeValue>,
) -> GraphicsShape {
    let mut shape = shape.clone();
    for (key, value) in values {
        let (TrackKey::Prop(prop), Some(v)) = (key, value.as_f64()) else {
            continue;
        };
        if !prop.is_shape_geometry() {
            continue;
        }
        let slot = match (&mut shape, prop) {
            (GraphicsShape::Line { from_x, .. }, Property::FromX) => from_x,
            (GraphicsShape::Line { from_y, .. }, Property::FromY) => from_y,
            (GraphicsShape::Line { to_x, .. }, Property::ToX) => to_x,
            (GraphicsShape::Line { to_y, .. }, Property::ToY) => to_y,
            (GraphicsShape::Circle { radius, .. }, Property::Radius)
            | (GraphicsShape::RoundRect { radius, .. }, Property::Radius) => radius,
            (GraphicsShape::Rect { width, .. }, Property::Width)
            | (GraphicsShape::RoundRect { width, .. }, Property::Width) => width,
            (GraphicsShape::Rect { height, .. }, Property::Height)
            | (GraphicsShape::RoundRect { height, .. }, Property::Height) => height,
            _ => continue,
        };
        *slot = v;
    }
    shape
}

/// Copy of `vertices` with numeric `vertex<N>_x/y` tracks applied. Out-of-range indices are
/// ignored.
fn animate_vertices(
    vertices: &[MeshVertex],
    values: &BTreeMap<TrackKey, KeyframeValue>,
) -> Vec<MeshVertex> {
    let mut out = vertices.to_vec();
    for (key, value) in values {
        let (TrackKey::Vertex { index, axis }, Some(v)) = (key, value.as_f64()) else {
            continue;
        };
        let Some(vertex) = out.get_mut(*index) else {
            continue;
        };
        match axis {
            Axis::X => vertex.x = v,
            Axis::Y => vertex.y = v,
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
