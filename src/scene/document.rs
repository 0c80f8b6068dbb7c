use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;

use crate::animation::keyframe::{Keyframe, insert_sorted};
use crate::animation::track::TrackKey;
use crate::foundation::error::{VanimError, VanimResult};
use crate::mesh::deform::vertex_tracks;
use crate::mesh::grid::generate_grid;
use crate::scene::model::{
    AlphaRange, BlendMode, Document, EmitMode, FORMAT_VERSION, FillStyle, GraphicsShape,
    MeshVertex, Node, NodeKind, NodeType, Particle, ParticleConfig, Range, TextStyle,
};
use crate::schema::validate::parse_and_validate;

/// Id of the top-level container created by [`Document::default`].
pub const ROOT_ID: &str = "root";

impl Default for Document {
    /// Empty 512×512, one second document with a single root container.
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            name: "untitled".to_owned(),
            duration: 1000.0,
            width: 512.0,
            height: 512.0,
            assets: BTreeMap::new(),
            nodes: vec![Node::container(ROOT_ID)],
            particles: Vec::new(),
            states: Vec::new(),
            params: BTreeMap::new(),
        }
    }
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a document from JSON.
    ///
    /// Warnings are logged; any error-severity diagnostic yields [`VanimError::Rejected`].
    pub fn from_reader<R: Read>(mut r: R) -> VanimResult<Self> {
        let mut json = String::new();
        r.read_to_string(&mut json).context("read vanim document")?;
        let (doc, warnings) = parse_and_validate(&json).map_err(VanimError::Rejected)?;
        for w in &warnings {
            tracing::warn!(path = %w.path, "{}", w.message);
        }
        Ok(doc)
    }

    /// Parse and validate a `.vanim` file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VanimResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open vanim document '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> VanimResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VanimError::serde(format!("serialize document '{}': {e}", self.name)))
    }

    /// Write pretty JSON followed by a newline.
    pub fn save(&self, path: impl AsRef<Path>) -> VanimResult<()> {
        let path = path.as_ref();
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        std::fs::write(path, json)
            .with_context(|| format!("write vanim document '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), nodes = self.nodes.len(), "saved document");
        Ok(())
    }

    /// Append `node`, attaching it to the `parent` container's children when one is named.
    ///
    /// A parent that is missing or not a container leaves the node unattached.
    pub fn with_node(&self, node: Node, parent: Option<&str>) -> VanimResult<Self> {
        if self.node(&node.id).is_some() {
            return Err(VanimError::edit(format!(
                "node with id \"{}\" already exists",
                node.id
            )));
        }

        let mut doc = self.clone();
        let id = node.id.clone();
        doc.nodes.push(node);

        let Some(parent_id) = parent else {
            return Ok(doc);
        };
        let attached = doc.nodes.iter_mut().find(|n| n.id == parent_id).and_then(|p| {
            match &mut p.kind {
                NodeKind::Container { children } => {
                    children.get_or_insert_with(Vec::new).push(id.clone());
                    Some(())
                }
                _ => None,
            }
        });
        if attached.is_none() {
            tracing::warn!(
                node = %id,
                parent = %parent_id,
                "parent is not a container; node left unattached"
            );
        }
        Ok(doc)
    }

    /// Remove node `id` and drop it from every container's children.
    pub fn without_node(&self, id: &str) -> Self {
        let mut doc = self.clone();
        doc.nodes.retain(|n| n.id != id);
        for node in &mut doc.nodes {
            if let NodeKind::Container {
                children: Some(children),
            } = &mut node.kind
            {
                children.retain(|c| c != id);
            }
        }
        doc
    }

    /// Replace node `id` with `f(node)`.
    pub fn with_node_updated(&self, id: &str, f: impl FnOnce(Node) -> Node) -> VanimResult<Self> {
        let idx = self.node_index(id)?;
        let mut doc = self.clone();
        let updated = f(doc.nodes[idx].clone());
        if updated.id != id && self.node(&updated.id).is_some() {
            return Err(VanimError::edit(format!(
                "cannot rename \"{id}\" to existing id \"{}\"",
                updated.id
            )));
        }
        doc.nodes[idx] = updated;
        Ok(doc)
    }

    pub fn with_particle(&self, particle: Particle) -> VanimResult<Self> {
        if self.particle(&particle.id).is_some() {
            return Err(VanimError::edit(format!(
                "particle with id \"{}\" already exists",
                particle.id
            )));
        }
        let mut doc = self.clone();
        doc.particles.push(particle);
        Ok(doc)
    }

    pub fn without_particle(&self, id: &str) -> Self {
        let mut doc = self.clone();
        doc.particles.retain(|p| p.id != id);
        doc
    }

    /// Insert `keyframe` into the `key` track of node `node_id`, keeping the track sorted.
    pub fn with_keyframe(
        &self,
        node_id: &str,
        key: TrackKey,
        keyframe: Keyframe,
    ) -> VanimResult<Self> {
        let idx = self.node_index(node_id)?;
        let mut doc = self.clone();
        let track = doc.nodes[idx].keyframes.entry(key).or_default();
        insert_sorted(track, keyframe);
        Ok(doc)
    }

    /// Pin every vertex of mesh `node_id` to `vertices` at `time` through `vertex<N>` tracks.
    pub fn with_vertex_pose(
        &self,
        node_id: &str,
        vertices: &[MeshVertex],
        time: f64,
    ) -> VanimResult<Self> {
        let idx = self.node_index(node_id)?;
        if self.nodes[idx].node_type() != NodeType::Mesh {
            return Err(VanimError::edit(format!("node \"{node_id}\" is not a mesh")));
        }
        let mut doc = self.clone();
        let tracks = &mut doc.nodes[idx].keyframes;
        for (key, kf) in vertex_tracks(vertices, time) {
            insert_sorted(tracks.entry(key).or_default(), kf);
        }
        Ok(doc)
    }

    /// Add what `overlay` has and `self` lacks.
    ///
    /// Nodes and particles are taken when their id is new; assets and params when their key is
    /// new. The duration becomes the longer of the two.
    pub fn merged(&self, overlay: &Document) -> Self {
        let mut doc = self.clone();
        for node in &overlay.nodes {
            if self.node(&node.id).is_none() {
                doc.nodes.push(node.clone());
            }
        }
        for p in &overlay.particles {
            if self.particle(&p.id).is_none() {
                doc.particles.push(p.clone());
            }
        }
        for (key, asset) in &overlay.assets {
            doc.assets
                .entry(key.clone())
                .or_insert_with(|| asset.clone());
        }
        for (key, param) in &overlay.params {
            doc.params
                .entry(key.clone())
                .or_insert_with(|| param.clone());
        }
        doc.duration = doc.duration.max(overlay.duration);
        doc
    }

    fn node_index(&self, id: &str) -> VanimResult<usize> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| VanimError::edit(format!("node \"{id}\" not found")))
    }
}

impl Node {
    /// A ready-to-edit node of the given type with authoring defaults.
    ///
    /// Sprite-like kinds reference `asset` (empty when absent). Meshes start as a 4×4 grid over
    /// 128×128 px.
    pub fn template(node_type: NodeType, id: impl Into<String>, asset: Option<&str>) -> Self {
        let asset = asset.unwrap_or_default().to_owned();
        let kind = match node_type {
            NodeType::Container => NodeKind::Container {
                children: Some(Vec::new()),
            },
            NodeType::Sprite => NodeKind::Sprite { asset },
            NodeType::SpritesheetAnim => NodeKind::SpritesheetAnim { asset },
            NodeType::Graphics => NodeKind::Graphics {
                graphics: GraphicsShape::Circle {
                    cx: 128.0,
                    cy: 128.0,
                    radius: 30.0,
                    fill: Some(FillStyle {
                        color: "#4ec9b0".to_owned(),
                        alpha: None,
                    }),
                    stroke: None,
                },
            },
            NodeType::Text => NodeKind::Text {
                text: "Text".to_owned(),
                style: Some(TextStyle {
                    font_size: Some(24.0),
                    fill: Some("#ffffff".to_owned()),
                    ..TextStyle::default()
                }),
            },
            NodeType::Mesh => {
                let grid = generate_grid(4, 4, 128.0, 128.0).unwrap_or_default();
                NodeKind::Mesh {
                    asset,
                    vertices: grid.vertices,
                    indices: grid.indices,
                }
            }
        };
        let mut node = Node::new(id, kind);
        if node_type == NodeType::Text {
            node.transform.x = Some(128.0);
            node.transform.y = Some(128.0);
        }
        node
    }
}

impl Particle {
    /// A burst of 15 golden sparks at `(x, y)`.
    pub fn template(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            start_time: 0.0,
            mode: EmitMode::Burst,
            x,
            y,
            duration: None,
            config: ParticleConfig {
                count: 15,
                lifetime: 500.0,
                speed: Range::new(2.0, 6.0),
                size: Range::new(1.0, 3.0),
                color: "#FFD700".to_owned(),
                alpha: AlphaRange {
                    start: 1.0,
                    end: 0.0,
                },
                direction: Range::new(0.0, std::f64::consts::TAU),
                gravity: Some(0.0),
                blend_mode: Some(BlendMode::Add),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
