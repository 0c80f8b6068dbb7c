use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::animation::ease::Ease;
use crate::animation::track::TrackKey;
use crate::scene::model::{
    BlendMode, Document, FORMAT_VERSION, GraphicsShape, NodeTransform, NodeType,
};
use crate::schema::diagnostic::{Diagnostic, SchemaPath, has_errors};

type Object = Map<String, Value>;

/// Check a candidate document and collect every finding.
///
/// Never panics and never stops at the first problem, except that a missing `nodes` array ends
/// the walk (nothing below it can be checked meaningfully). A document is usable iff the result
/// holds no error-severity entries.
#[tracing::instrument(skip(candidate))]
pub fn validate(candidate: &Value) -> Vec<Diagnostic> {
    let root = SchemaPath::root();
    let mut out = Vec::new();

    let Some(doc) = candidate.as_object() else {
        out.push(Diagnostic::error(&root, "document must be a JSON object"));
        return out;
    };

    check_header(doc, &root, &mut out);

    let nodes_path = root.field("nodes");
    let Some(nodes) = doc.get("nodes").and_then(Value::as_array) else {
        out.push(Diagnostic::error(&nodes_path, "nodes must be an array"));
        return out;
    };

    let mut ids = HashSet::new();
    let mut child_refs = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        check_node(node, &nodes_path.index(i), &mut ids, &mut child_refs, &mut out);
    }

    check_child_refs(&child_refs, &ids, &nodes_path, &mut out);
    check_asset_refs(doc, nodes, &nodes_path, &mut out);
    check_particles(doc, &root, &mut out);
    check_assets(doc, &root, &mut out);
    check_params(doc, &root, &mut out);

    let errors = out.iter().filter(|d| d.is_error()).count();
    tracing::debug!(errors, warnings = out.len() - errors, "validated document");
    out
}

/// Parse JSON text, validate it, and build the typed document.
///
/// On success the remaining (warning-only) diagnostics are returned alongside the document.
/// Any error-severity finding, or a JSON syntax error, rejects the input.
#[tracing::instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_and_validate(json: &str) -> Result<(Document, Vec<Diagnostic>), Vec<Diagnostic>> {
    let root = SchemaPath::root();
    let value: Value = serde_json::from_str(json)
        .map_err(|e| vec![Diagnostic::error(&root, format!("invalid JSON: {e}"))])?;

    let mut diagnostics = validate(&value);
    if has_errors(&diagnostics) {
        return Err(diagnostics);
    }

    match serde_json::from_value::<Document>(value) {
        Ok(doc) => Ok((doc, diagnostics)),
        Err(e) => {
            diagnostics.push(Diagnostic::error(
                &root,
                format!("document does not match the vanim model: {e}"),
            ));
            Err(diagnostics)
        }
    }
}

/// Validate an already-typed document, e.g. after a sequence of edits.
pub fn validate_document(doc: &Document) -> Vec<Diagnostic> {
    match serde_json::to_value(doc) {
        Ok(value) => validate(&value),
        Err(e) => vec![Diagnostic::error(
            &SchemaPath::root(),
            format!("document could not be serialized: {e}"),
        )],
    }
}

fn check_header(doc: &Object, root: &SchemaPath, out: &mut Vec<Diagnostic>) {
    if doc.get("version").and_then(Value::as_u64) != Some(u64::from(FORMAT_VERSION)) {
        out.push(Diagnostic::error(
            &root.field("version"),
            format!("version must be {FORMAT_VERSION}"),
        ));
    }
    if !doc
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
    {
        out.push(Diagnostic::error(
            &root.field("name"),
            "name must be a non-empty string (kebab-case, e.g. \"snake-strike\")",
        ));
    }
    for (field, what) in [
        ("duration", "duration must be a positive number (milliseconds)"),
        ("width", "width must be a positive number"),
        ("height", "height must be a positive number"),
    ] {
        if !doc.get(field).and_then(Value::as_f64).is_some_and(|v| v > 0.0) {
            out.push(Diagnostic::error(&root.field(field), what));
        }
    }
}

fn check_node(
    node: &Value,
    path: &SchemaPath,
    ids: &mut HashSet<String>,
    child_refs: &mut Vec<String>,
    out: &mut Vec<Diagnostic>,
) {
    let Some(node) = node.as_object() else {
        out.push(Diagnostic::error(path, "node must be an object"));
        return;
    };

    check_node_id(node, path, ids, out);
    let node_type = check_node_type(node, path, out);

    match node_type {
        Some(NodeType::Container) => check_children(node, path, child_refs, out),
        Some(NodeType::Graphics) => check_graphics(node, path, out),
        Some(NodeType::Text) => check_text(node, path, out),
        Some(NodeType::Mesh) => check_mesh(node, path, out),
        Some(NodeType::Sprite | NodeType::SpritesheetAnim) | None => {}
    }
    if let Some(t) = node_type
        && t.requires_asset()
        && !node.get("asset").is_some_and(Value::is_string)
    {
        out.push(Diagnostic::error(
            &path.field("asset"),
            format!(
                "{} node must have an asset field (an id from assets)",
                t.name()
            ),
        ));
    }

    check_blend_mode(node.get("blendMode"), &path.field("blendMode"), out);
    check_transform_fields(node, path, out);
    check_timing(node, path, out);
    check_keyframes(node, path, out);
}

fn check_node_id(
    node: &Object,
    path: &SchemaPath,
    ids: &mut HashSet<String>,
    out: &mut Vec<Diagnostic>,
) {
    let id_path = path.field("id");
    match node.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => {
            if !ids.insert(id.to_owned()) {
                out.push(Diagnostic::error(
                    &id_path,
                    format!("Duplicate id \"{id}\": every node must have a unique id"),
                ));
            }
        }
        _ => out.push(Diagnostic::error(&id_path, "id must be a non-empty string")),
    }
}

fn check_node_type(
    node: &Object,
    path: &SchemaPath,
    out: &mut Vec<Diagnostic>,
) -> Option<NodeType> {
    let found = node
        .get("type")
        .and_then(Value::as_str)
        .and_then(NodeType::lookup);
    if found.is_none() {
        let allowed: Vec<_> = NodeType::ALL.iter().map(|t| t.name()).collect();
        out.push(Diagnostic::error(
            &path.field("type"),
            format!(
                "unknown node type \"{}\"; allowed: {}",
                describe(node.get("type")),
                allowed.join(", ")
            ),
        ));
    }
    found
}

fn check_children(
    node: &Object,
    path: &SchemaPath,
    child_refs: &mut Vec<String>,
    out: &mut Vec<Diagnostic>,
) {
    let children = match node.get("children") {
        None | Some(Value::Null) => return,
        Some(v) => v,
    };
    let children_path = path.field("children");
    let Some(children) = children.as_array() else {
        out.push(Diagnostic::error(
            &children_path,
            "children must be an array of node ids",
        ));
        return;
    };
    for child in children {
        match child.as_str() {
            Some(id) => {
                if !child_refs.iter().any(|c| c == id) {
                    child_refs.push(id.to_owned());
                }
            }
            None => out.push(Diagnostic::error(
                &children_path,
                "every children entry must be a string (a node id)",
            )),
        }
    }
}

fn check_text(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    if !node.get("text").is_some_and(Value::is_string) {
        out.push(Diagnostic::error(
            &path.field("text"),
            "text node must have a text field (string)",
        ));
    }

    let style_path = path.field("style");
    let style = match node.get("style") {
        None | Some(Value::Null) => return,
        Some(v) => v,
    };
    let Some(style) = style.as_object() else {
        out.push(Diagnostic::error(&style_path, "style must be an object"));
        return;
    };
    for field in ["fontFamily", "fontWeight", "fill"] {
        if style.get(field).is_some_and(|v| !v.is_string()) {
            out.push(Diagnostic::error(
                &style_path.field(field),
                format!("{field} must be a string"),
            ));
        }
    }
    if style.get("fontSize").is_some_and(|v| !v.is_number()) {
        out.push(Diagnostic::error(
            &style_path.field("fontSize"),
            "fontSize must be a number",
        ));
    }
    if let Some(align) = style.get("align")
        && !matches!(align.as_str(), Some("left" | "center" | "right"))
    {
        out.push(Diagnostic::error(
            &style_path.field("align"),
            format!(
                "unknown align \"{}\"; allowed: left, center, right",
                describe(Some(align))
            ),
        ));
    }
    if let Some(stroke) = style.get("stroke") {
        check_stroke(stroke, &style_path.field("stroke"), out);
    }
}

fn check_graphics(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let gfx_path = path.field("graphics");
    let Some(gfx) = node.get("graphics").and_then(Value::as_object) else {
        out.push(Diagnostic::error(
            &gfx_path,
            "graphics node must have a graphics object with a type (line/circle/rect/roundRect)",
        ));
        return;
    };

    let kind = gfx.get("type").and_then(Value::as_str);
    let Some(fields) = kind.and_then(GraphicsShape::geometry_fields) else {
        let allowed: Vec<_> = GraphicsShape::GEOMETRY.iter().map(|(k, _)| *k).collect();
        out.push(Diagnostic::error(
            &gfx_path.field("type"),
            format!(
                "unknown graphics type \"{}\"; allowed: {}",
                describe(gfx.get("type")),
                allowed.join(", ")
            ),
        ));
        return;
    };

    for field in fields {
        if !gfx.get(*field).is_some_and(Value::is_number) {
            out.push(Diagnostic::error(
                &gfx_path.field(*field),
                format!("{field} must be a number"),
            ));
        }
    }

    match gfx.get("stroke") {
        Some(stroke) => check_stroke(stroke, &gfx_path.field("stroke"), out),
        None if kind == Some("line") => out.push(Diagnostic::error(
            &gfx_path.field("stroke"),
            "line must have a stroke {width, color}",
        )),
        None => {}
    }
    if let Some(fill) = gfx.get("fill") {
        check_fill(fill, &gfx_path.field("fill"), out);
    }
}

fn check_stroke(stroke: &Value, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let ok = stroke.as_object().is_some_and(|s| {
        s.get("width").is_some_and(Value::is_number)
            && s.get("color").is_some_and(Value::is_string)
            && s.get("alpha").is_none_or(Value::is_number)
    });
    if !ok {
        out.push(Diagnostic::error(
            path,
            "stroke must be {width: number, color: string, alpha?: number}",
        ));
    }
}

fn check_fill(fill: &Value, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let ok = fill.as_object().is_some_and(|f| {
        f.get("color").is_some_and(Value::is_string) && f.get("alpha").is_none_or(Value::is_number)
    });
    if !ok {
        out.push(Diagnostic::error(
            path,
            "fill must be {color: string, alpha?: number}",
        ));
    }
}

fn check_mesh(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let vertices_path = path.field("vertices");
    let vertex_count = match node.get("vertices").and_then(Value::as_array) {
        Some(vertices) if !vertices.is_empty() => {
            let bad = vertices.iter().position(|v| {
                !["x", "y", "u", "v"]
                    .iter()
                    .all(|k| v.get(*k).is_some_and(Value::is_number))
            });
            if let Some(vi) = bad {
                out.push(Diagnostic::error(
                    &vertices_path.index(vi),
                    "every vertex must have numeric x, y, u, v",
                ));
            }
            Some(vertices.len())
        }
        _ => {
            out.push(Diagnostic::error(
                &vertices_path,
                "mesh node must have a non-empty vertices array [{x, y, u, v}]",
            ));
            None
        }
    };

    let indices_path = path.field("indices");
    let Some(indices) = node
        .get("indices")
        .and_then(Value::as_array)
        .filter(|ix| !ix.is_empty())
    else {
        out.push(Diagnostic::error(
            &indices_path,
            "mesh node must have a non-empty indices array (triangle index triples)",
        ));
        return;
    };

    if indices.len() % 3 != 0 {
        out.push(Diagnostic::warning(
            &indices_path,
            "indices should hold index triples (length a multiple of 3)",
        ));
    }

    let parsed: Vec<Option<u32>> = indices
        .iter()
        .map(|ix| ix.as_u64().and_then(|n| u32::try_from(n).ok()))
        .collect();
    if let Some(j) = parsed.iter().position(Option::is_none) {
        out.push(Diagnostic::error(
            &indices_path.index(j),
            "indices must be non-negative integers",
        ));
    } else if let Some(count) = vertex_count
        && let Some(j) = parsed
            .iter()
            .flatten()
            .position(|&ix| ix as usize >= count)
    {
        out.push(Diagnostic::warning(
            &indices_path.index(j),
            format!("index refers to a missing vertex (mesh has {count} vertices)"),
        ));
    }
}

fn check_blend_mode(value: Option<&Value>, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let Some(value) = value else {
        return;
    };
    if value.as_str().and_then(BlendMode::lookup).is_none() {
        let allowed: Vec<_> = BlendMode::ALL.iter().map(|b| b.name()).collect();
        out.push(Diagnostic::error(
            path,
            format!(
                "unknown blendMode \"{}\"; allowed: {}",
                describe(Some(value)),
                allowed.join(", ")
            ),
        ));
    }
}

fn check_transform_fields(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    for field in NodeTransform::FIELDS {
        if let Some(v) = node.get(field)
            && !v.is_number()
            && !v.is_null()
        {
            out.push(Diagnostic::error(
                &path.field(field),
                format!("{field} must be a number"),
            ));
        }
    }
}

fn check_timing(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    if node.get("startTime").is_some_and(|v| !v.is_number() && !v.is_null()) {
        out.push(Diagnostic::error(
            &path.field("startTime"),
            "startTime must be a number (ms)",
        ));
    }
    match node.get("duration") {
        None | Some(Value::Null) => {}
        Some(v) => match v.as_f64() {
            Some(d) if d < 0.0 => out.push(Diagnostic::error(
                &path.field("duration"),
                "duration must not be negative",
            )),
            Some(_) => {}
            None => out.push(Diagnostic::error(
                &path.field("duration"),
                "duration must be a number (ms)",
            )),
        },
    }
}

fn check_keyframes(node: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let Some(value) = node.get("keyframes") else {
        return;
    };
    let kf_path = path.field("keyframes");
    let Some(tracks) = value.as_object() else {
        out.push(Diagnostic::error(
            &kf_path,
            "keyframes must be an object mapping property names to tracks",
        ));
        return;
    };

    for (prop, track) in tracks {
        let track_path = kf_path.field(prop.as_str());
        if !TrackKey::parse(prop).is_known() {
            out.push(Diagnostic::warning(
                &track_path,
                format!(
                    "unknown keyframe property \"{prop}\"; expected a transform or shape property, or vertex<N>_x / vertex<N>_y"
                ),
            ));
        }
        let Some(track) = track.as_array() else {
            out.push(Diagnostic::error(
                &track_path,
                "track must be an array of keyframes [{time, value, easing?}]",
            ));
            continue;
        };
        for (k, kf) in track.iter().enumerate() {
            check_keyframe(kf, &track_path.index(k), out);
        }
        check_track_order(track, &track_path, out);
    }
}

fn check_keyframe(kf: &Value, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let Some(kf) = kf.as_object() else {
        out.push(Diagnostic::error(path, "keyframe must be an object"));
        return;
    };
    if !kf.get("time").is_some_and(Value::is_number) {
        out.push(Diagnostic::error(
            &path.field("time"),
            "time must be a number (ms)",
        ));
    }
    match kf.get("value") {
        None => out.push(Diagnostic::error(
            &path.field("value"),
            "value is required (number or string)",
        )),
        Some(v) if !v.is_number() && !v.is_string() => out.push(Diagnostic::error(
            &path.field("value"),
            "value must be a number or a string",
        )),
        Some(_) => {}
    }
    if let Some(easing) = kf.get("easing")
        && easing.as_str().and_then(Ease::lookup).is_none()
    {
        let allowed: Vec<_> = Ease::ALL.iter().map(|e| e.name()).collect();
        out.push(Diagnostic::error(
            &path.field("easing"),
            format!(
                "unknown easing \"{}\"; allowed: {}",
                describe(Some(easing)),
                allowed.join(", ")
            ),
        ));
    }
}

fn check_track_order(track: &[Value], path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let times: Vec<f64> = track
        .iter()
        .filter_map(|kf| kf.get("time").and_then(Value::as_f64))
        .collect();
    if times.windows(2).any(|w| w[1] < w[0]) {
        out.push(Diagnostic::warning(
            path,
            "keyframes are not in ascending time order; evaluation assumes sorted tracks",
        ));
    }
}

fn check_child_refs(
    child_refs: &[String],
    ids: &HashSet<String>,
    nodes_path: &SchemaPath,
    out: &mut Vec<Diagnostic>,
) {
    for child in child_refs {
        if !ids.contains(child) {
            out.push(Diagnostic::error(
                nodes_path,
                format!(
                    "children refers to nonexistent node \"{child}\"; add a node with that id to nodes"
                ),
            ));
        }
    }
}

fn check_asset_refs(
    doc: &Object,
    nodes: &[Value],
    nodes_path: &SchemaPath,
    out: &mut Vec<Diagnostic>,
) {
    let assets = doc.get("assets").and_then(Value::as_object);
    for (i, node) in nodes.iter().enumerate() {
        let requires_asset = node
            .get("type")
            .and_then(Value::as_str)
            .and_then(NodeType::lookup)
            .is_some_and(NodeType::requires_asset);
        if !requires_asset {
            continue;
        }
        let Some(asset) = node.get("asset").and_then(Value::as_str) else {
            continue;
        };
        if !assets.is_some_and(|a| a.contains_key(asset)) {
            out.push(Diagnostic::warning(
                &nodes_path.index(i).field("asset"),
                format!(
                    "asset \"{asset}\" not found in assets; add {{ \"{asset}\": {{ \"type\": \"texture\", \"path\": \"...\" }} }}"
                ),
            ));
        }
    }
}

fn check_particles(doc: &Object, root: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let particles_path = root.field("particles");
    let particles = match doc.get("particles") {
        None | Some(Value::Null) => return,
        Some(v) => v,
    };
    let Some(particles) = particles.as_array() else {
        out.push(Diagnostic::error(&particles_path, "particles must be an array"));
        return;
    };

    let mut ids = HashSet::new();
    for (i, p) in particles.iter().enumerate() {
        let path = particles_path.index(i);
        let Some(p) = p.as_object() else {
            out.push(Diagnostic::error(&path, "particle must be an object"));
            continue;
        };

        match p.get("id").and_then(Value::as_str) {
            Some(id) => {
                if !ids.insert(id.to_owned()) {
                    out.push(Diagnostic::error(
                        &path.field("id"),
                        format!(
                            "Duplicate id \"{id}\": every particle emitter must have a unique id"
                        ),
                    ));
                }
            }
            None => out.push(Diagnostic::error(&path.field("id"), "id is required")),
        }
        for (field, what) in [
            ("startTime", "startTime is required (number, ms)"),
            ("x", "x is required"),
            ("y", "y is required"),
        ] {
            if !p.get(field).is_some_and(Value::is_number) {
                out.push(Diagnostic::error(&path.field(field), what));
            }
        }
        if !matches!(
            p.get("mode").and_then(Value::as_str),
            Some("burst" | "continuous")
        ) {
            out.push(Diagnostic::error(
                &path.field("mode"),
                "mode must be \"burst\" or \"continuous\"",
            ));
        }
        if p.get("duration").is_some_and(|v| !v.is_number() && !v.is_null()) {
            out.push(Diagnostic::error(
                &path.field("duration"),
                "duration must be a number (ms)",
            ));
        }

        match p.get("config").and_then(Value::as_object) {
            Some(config) => check_particle_config(config, &path.field("config"), out),
            None => out.push(Diagnostic::error(
                &path.field("config"),
                "config is required (object with count, lifetime, speed, size, color, alpha, direction)",
            )),
        }
    }
}

fn check_particle_config(config: &Object, path: &SchemaPath, out: &mut Vec<Diagnostic>) {
    if !config
        .get("count")
        .and_then(Value::as_u64)
        .is_some_and(|n| u32::try_from(n).is_ok())
    {
        out.push(Diagnostic::error(
            &path.field("count"),
            "count must be a non-negative integer",
        ));
    }
    if !config.get("lifetime").is_some_and(Value::is_number) {
        out.push(Diagnostic::error(
            &path.field("lifetime"),
            "lifetime must be a number (ms)",
        ));
    }
    for field in ["speed", "size", "direction"] {
        if !is_pair(config.get(field), "min", "max") {
            out.push(Diagnostic::error(
                &path.field(field),
                format!("{field} must be {{min: number, max: number}}"),
            ));
        }
    }
    if !is_pair(config.get("alpha"), "start", "end") {
        out.push(Diagnostic::error(
            &path.field("alpha"),
            "alpha must be {start: number, end: number}",
        ));
    }
    if !config.get("color").is_some_and(Value::is_string) {
        out.push(Diagnostic::error(
            &path.field("color"),
            "color must be a string",
        ));
    }
    if config.get("gravity").is_some_and(|v| !v.is_number() && !v.is_null()) {
        out.push(Diagnostic::error(
            &path.field("gravity"),
            "gravity must be a number",
        ));
    }
    check_blend_mode(config.get("blendMode"), &path.field("blendMode"), out);
}

fn check_assets(doc: &Object, root: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let Some(assets) = doc.get("assets") else {
        return;
    };
    let assets_path = root.field("assets");
    let Some(assets) = assets.as_object() else {
        out.push(Diagnostic::error(
            &assets_path,
            "assets must be an object mapping asset ids to assets",
        ));
        return;
    };

    for (id, asset) in assets {
        let path = assets_path.field(id.as_str());
        let Some(asset) = asset.as_object() else {
            out.push(Diagnostic::error(&path, "asset must be an object"));
            continue;
        };
        if !asset.get("path").is_some_and(Value::is_string) {
            out.push(Diagnostic::error(&path.field("path"), "path must be a string"));
        }
        match asset.get("type").and_then(Value::as_str) {
            Some("texture") => {}
            Some("spritesheet") => {
                for field in ["cols", "rows"] {
                    if !asset
                        .get(field)
                        .and_then(Value::as_u64)
                        .is_some_and(|n| n > 0 && u32::try_from(n).is_ok())
                    {
                        out.push(Diagnostic::error(
                            &path.field(field),
                            format!("{field} must be a positive integer"),
                        ));
                    }
                }
            }
            _ => out.push(Diagnostic::error(
                &path.field("type"),
                format!(
                    "unknown asset type \"{}\"; allowed: texture, spritesheet",
                    describe(asset.get("type"))
                ),
            )),
        }
    }
}

fn check_params(doc: &Object, root: &SchemaPath, out: &mut Vec<Diagnostic>) {
    let Some(params) = doc.get("params") else {
        return;
    };
    let params_path = root.field("params");
    let Some(params) = params.as_object() else {
        out.push(Diagnostic::error(
            &params_path,
            "params must be an object mapping names to {type, default}",
        ));
        return;
    };

    for (name, param) in params {
        let path = params_path.field(name.as_str());
        let ty = param.get("type").and_then(Value::as_str);
        let default = param.get("default");
        let ok = match ty {
            Some("color" | "string") => default.is_some_and(Value::is_string),
            Some("number") => default.is_some_and(Value::is_number),
            _ => {
                out.push(Diagnostic::error(
                    &path.field("type"),
                    format!(
                        "unknown param type \"{}\"; allowed: color, string, number",
                        describe(param.get("type"))
                    ),
                ));
                continue;
            }
        };
        if !ok {
            out.push(Diagnostic::error(
                &path.field("default"),
                format!(
                    "default must be a {} for a {} param",
                    if ty == Some("number") { "number" } else { "string" },
                    ty.unwrap_or_default()
                ),
            ));
        }
    }
}

fn is_pair(value: Option<&Value>, a: &str, b: &str) -> bool {
    value.and_then(Value::as_object).is_some_and(|o| {
        o.get(a).is_some_and(Value::is_number) && o.get(b).is_some_and(Value::is_number)
    })
}

/// Render a JSON value for a message the way a user wrote it.
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
