use super::*;
use crate::schema::diagnostic::Severity;
use serde_json::json;

fn base() -> Value {
    json!({
        "version": 1,
        "name": "snake-strike",
        "duration": 1000,
        "width": 512,
        "height": 512,
        "assets": {
            "hero": { "type": "texture", "path": "hero.png" },
            "run": { "type": "spritesheet", "path": "run.png", "cols": 4, "rows": 2 }
        },
        "nodes": [
            { "id": "root", "type": "container", "children": ["hero", "ring"] },
            {
                "id": "hero", "type": "sprite", "asset": "hero", "x": 10,
                "keyframes": {
                    "alpha": [
                        { "time": 0, "value": 0 },
                        { "time": 300, "value": 1, "easing": "easeOutCubic" }
                    ]
                }
            },
            {
                "id": "ring", "type": "graphics",
                "graphics": { "type": "circle", "cx": 0, "cy": 0, "radius": 20,
                              "stroke": { "width": 2, "color": "#fff" } }
            }
        ]
    })
}

fn with_node(node: Value) -> Value {
    let mut doc = base();
    doc["nodes"].as_array_mut().unwrap().push(node);
    doc
}

fn errors(diags: &[Diagnostic]) -> Vec<&Diagnostic> {
    diags.iter().filter(|d| d.is_error()).collect()
}

fn warnings(diags: &[Diagnostic]) -> Vec<&Diagnostic> {
    diags.iter().filter(|d| !d.is_error()).collect()
}

fn has(diags: &[Diagnostic], path: &str, severity: Severity) -> bool {
    diags.iter().any(|d| d.path == path && d.severity == severity)
}

#[test]
fn valid_document_is_clean() {
    let diags = validate(&base());
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn non_object_yields_one_root_error() {
    for v in [json!([]), json!(null), json!(42), json!("doc")] {
        let diags = validate(&v);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "$");
        assert!(diags[0].is_error());
    }
}

#[test]
fn header_findings_accumulate() {
    let mut doc = base();
    doc["version"] = json!(2);
    doc["name"] = json!("");
    doc["duration"] = json!(0);
    doc["width"] = json!(-5);
    doc["height"] = json!("tall");
    let diags = validate(&doc);
    for path in ["$.version", "$.name", "$.duration", "$.width", "$.height"] {
        assert!(has(&diags, path, Severity::Error), "missing {path}");
    }
}

#[test]
fn missing_nodes_stops_the_walk() {
    let mut doc = base();
    doc["nodes"] = json!({});
    doc["particles"] = json!([{ "id": 3 }]);
    let diags = validate(&doc);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].path, "$.nodes");
}

#[test]
fn duplicate_ids_are_errors() {
    let doc = with_node(json!({ "id": "hero", "type": "container" }));
    let diags = validate(&doc);
    let dup: Vec<_> = errors(&diags)
        .into_iter()
        .filter(|d| d.message.contains("Duplicate id"))
        .collect();
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].path, "$.nodes[3].id");
}

#[test]
fn dangling_child_reference() {
    let mut doc = base();
    doc["nodes"][0]["children"] = json!(["hero", "ghost"]);
    let diags = validate(&doc);
    let errs = errors(&diags);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].path, "$.nodes");
    assert!(errs[0].message.contains("refers to nonexistent node"));
    assert!(errs[0].message.contains("ghost"));
}

#[test]
fn children_must_be_strings() {
    let mut doc = base();
    doc["nodes"][0]["children"] = json!(["hero", 7]);
    assert!(has(&validate(&doc), "$.nodes[0].children", Severity::Error));

    doc["nodes"][0]["children"] = json!("hero");
    assert!(has(&validate(&doc), "$.nodes[0].children", Severity::Error));
}

#[test]
fn unknown_node_type() {
    let diags = validate(&with_node(json!({ "id": "x", "type": "video" })));
    let errs = errors(&diags);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].path, "$.nodes[3].type");
    assert!(errs[0].message.contains("video"));
}

#[test]
fn sprite_asset_missing_vs_unknown() {
    let diags = validate(&with_node(json!({ "id": "s", "type": "sprite" })));
    assert!(has(&diags, "$.nodes[3].asset", Severity::Error));

    let diags = validate(&with_node(
        json!({ "id": "s", "type": "sprite", "asset": "nope" }),
    ));
    assert!(errors(&diags).is_empty());
    assert!(has(&diags, "$.nodes[3].asset", Severity::Warning));
}

#[test]
fn text_requires_text() {
    let diags = validate(&with_node(json!({ "id": "t", "type": "text" })));
    assert!(has(&diags, "$.nodes[3].text", Severity::Error));

    let diags = validate(&with_node(json!({
        "id": "t", "type": "text", "text": "hi",
        "style": { "fontSize": "big", "align": "justify" }
    })));
    assert!(has(&diags, "$.nodes[3].style.fontSize", Severity::Error));
    assert!(has(&diags, "$.nodes[3].style.align", Severity::Error));
}

#[test]
fn graphics_shape_checks() {
    let diags = validate(&with_node(json!({ "id": "g", "type": "graphics" })));
    assert!(has(&diags, "$.nodes[3].graphics", Severity::Error));

    let diags = validate(&with_node(
        json!({ "id": "g", "type": "graphics", "graphics": { "type": "star" } }),
    ));
    assert!(has(&diags, "$.nodes[3].graphics.type", Severity::Error));

    let diags = validate(&with_node(json!({
        "id": "g", "type": "graphics",
        "graphics": { "type": "line", "fromX": 0, "fromY": 0, "toX": "far", "toY": 1 }
    })));
    assert!(has(&diags, "$.nodes[3].graphics.toX", Severity::Error));
    assert!(has(&diags, "$.nodes[3].graphics.stroke", Severity::Error));
}

#[test]
fn mesh_checks() {
    let diags = validate(&with_node(
        json!({ "id": "m", "type": "mesh", "asset": "hero", "vertices": [], "indices": [] }),
    ));
    assert!(has(&diags, "$.nodes[3].vertices", Severity::Error));
    assert!(has(&diags, "$.nodes[3].indices", Severity::Error));

    let diags = validate(&with_node(json!({
        "id": "m", "type": "mesh", "asset": "hero",
        "vertices": [
            { "x": 0, "y": 0, "u": 0, "v": 0 },
            { "x": 1, "y": 0, "u": 1 },
            { "x": 1, "y": "a", "u": 1, "v": 1 }
        ],
        "indices": [0, 1, 2, 0]
    })));
    // Only the first offending vertex is reported.
    assert!(has(&diags, "$.nodes[3].vertices[1]", Severity::Error));
    assert!(!has(&diags, "$.nodes[3].vertices[2]", Severity::Error));
    assert!(has(&diags, "$.nodes[3].indices", Severity::Warning));
}

#[test]
fn mesh_index_values() {
    let mesh = |indices: Value| {
        with_node(json!({
            "id": "m", "type": "mesh", "asset": "hero",
            "vertices": [
                { "x": 0, "y": 0, "u": 0, "v": 0 },
                { "x": 1, "y": 0, "u": 1, "v": 0 },
                { "x": 0, "y": 1, "u": 0, "v": 1 }
            ],
            "indices": indices
        }))
    };
    assert!(validate(&mesh(json!([0, 1, 2]))).is_empty());

    let diags = validate(&mesh(json!([0, -1, 2])));
    assert!(has(&diags, "$.nodes[3].indices[1]", Severity::Error));

    let diags = validate(&mesh(json!([0, 1, 9])));
    assert!(errors(&diags).is_empty());
    assert!(has(&diags, "$.nodes[3].indices[2]", Severity::Warning));
}

#[test]
fn blend_mode_and_transform_types() {
    let mut doc = base();
    doc["nodes"][1]["blendMode"] = json!("overlay");
    doc["nodes"][1]["rotation"] = json!("90deg");
    doc["nodes"][1]["startTime"] = json!("soon");
    doc["nodes"][2]["duration"] = json!(-1);
    let diags = validate(&doc);
    assert!(has(&diags, "$.nodes[1].blendMode", Severity::Error));
    assert!(has(&diags, "$.nodes[1].rotation", Severity::Error));
    assert!(has(&diags, "$.nodes[1].startTime", Severity::Error));
    assert!(has(&diags, "$.nodes[2].duration", Severity::Error));
}

#[test]
fn keyframe_property_names() {
    let mut doc = base();
    doc["nodes"][1]["keyframes"]["wobble"] = json!([{ "time": 0, "value": 1 }]);
    doc["nodes"][1]["keyframes"]["vertex12_y"] = json!([{ "time": 0, "value": 1 }]);
    let diags = validate(&doc);
    assert!(errors(&diags).is_empty());
    let warns = warnings(&diags);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].path, "$.nodes[1].keyframes.wobble");
}

#[test]
fn keyframe_shapes() {
    let mut doc = base();
    doc["nodes"][1]["keyframes"]["x"] = json!({ "time": 0 });
    doc["nodes"][1]["keyframes"]["y"] = json!([
        { "value": 1 },
        { "time": 10 },
        { "time": 20, "value": null },
        { "time": 30, "value": 1, "easing": "bounce" }
    ]);
    let diags = validate(&doc);
    assert!(has(&diags, "$.nodes[1].keyframes.x", Severity::Error));
    assert!(has(&diags, "$.nodes[1].keyframes.y[0].time", Severity::Error));
    assert!(has(&diags, "$.nodes[1].keyframes.y[1].value", Severity::Error));
    assert!(has(&diags, "$.nodes[1].keyframes.y[2].value", Severity::Error));
    assert!(has(&diags, "$.nodes[1].keyframes.y[3].easing", Severity::Error));

    let mut doc = base();
    doc["nodes"][1]["keyframes"] = json!([1, 2]);
    assert!(has(&validate(&doc), "$.nodes[1].keyframes", Severity::Error));
}

#[test]
fn unsorted_track_is_a_warning() {
    let mut doc = base();
    doc["nodes"][1]["keyframes"]["x"] = json!([
        { "time": 100, "value": 1 },
        { "time": 0, "value": 0 }
    ]);
    let diags = validate(&doc);
    assert!(errors(&diags).is_empty());
    assert!(has(&diags, "$.nodes[1].keyframes.x", Severity::Warning));
}

#[test]
fn particle_checks() {
    let mut doc = base();
    doc["particles"] = json!([
        { "id": 1, "mode": "fountain", "config": null },
        {
            "id": "sparks", "startTime": 0, "mode": "burst", "x": 0, "y": 0,
            "config": {
                "count": 2.5, "lifetime": 500,
                "speed": { "min": 1, "max": 2 }, "size": { "min": 1 },
                "color": "#fff", "alpha": { "start": 1, "end": 0 },
                "direction": { "min": 0, "max": 6.28 }
            }
        },
        {
            "id": "sparks", "startTime": 0, "mode": "burst", "x": 0, "y": 0,
            "config": {
                "count": 5, "lifetime": 500,
                "speed": { "min": 1, "max": 2 }, "size": { "min": 1, "max": 2 },
                "color": "#fff", "alpha": { "start": 1, "end": 0 },
                "direction": { "min": 0, "max": 6.28 }
            }
        }
    ]);
    let diags = validate(&doc);
    for path in [
        "$.particles[0].id",
        "$.particles[0].startTime",
        "$.particles[0].mode",
        "$.particles[0].x",
        "$.particles[0].y",
        "$.particles[0].config",
        "$.particles[1].config.count",
        "$.particles[1].config.size",
        "$.particles[2].id",
    ] {
        assert!(has(&diags, path, Severity::Error), "missing {path}");
    }

    let mut doc = base();
    doc["particles"] = json!({});
    assert!(has(&validate(&doc), "$.particles", Severity::Error));
}

#[test]
fn params_and_assets() {
    let mut doc = base();
    doc["params"] = json!({
        "accent": { "type": "color", "default": "#f00" },
        "count": { "type": "number", "default": "three" },
        "mood": { "type": "feeling", "default": "calm" }
    });
    doc["assets"]["bad"] = json!({ "type": "spritesheet", "path": "x.png", "cols": 0, "rows": 2 });
    let diags = validate(&doc);
    assert!(has(&diags, "$.params.count.default", Severity::Error));
    assert!(has(&diags, "$.params.mood.type", Severity::Error));
    assert!(!has(&diags, "$.params.accent.default", Severity::Error));
    assert!(has(&diags, "$.assets.bad.cols", Severity::Error));
}

#[test]
fn parse_reports_bad_json_at_root() {
    let diags = parse_and_validate("{ not json").unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].path, "$");
    assert!(diags[0].message.starts_with("invalid JSON"));
}

#[test]
fn parse_returns_document_with_warnings() {
    let mut doc = base();
    doc["nodes"][1]["keyframes"]["wobble"] = json!([{ "time": 0, "value": 1 }]);
    let (parsed, warns) = parse_and_validate(&doc.to_string()).unwrap();
    assert_eq!(parsed.nodes.len(), 3);
    assert_eq!(parsed.node("root").unwrap().children(), ["hero", "ring"]);
    assert_eq!(warns.len(), 1);
}

#[test]
fn parse_rejects_errors() {
    let mut doc = base();
    doc["version"] = json!(3);
    let diags = parse_and_validate(&doc.to_string()).unwrap_err();
    assert!(diags.iter().any(|d| d.path == "$.version"));
}

#[test]
fn parse_rejects_model_mismatch_outside_checked_fields() {
    let mut doc = base();
    doc["states"] = json!("intro");
    let diags = parse_and_validate(&doc.to_string()).unwrap_err();
    let last = diags.last().unwrap();
    assert_eq!(last.path, "$");
    assert!(last.message.contains("does not match"));
}

#[test]
fn validate_document_round_trips_typed_model() {
    let (doc, _) = parse_and_validate(&base().to_string()).unwrap();
    assert!(validate_document(&doc).is_empty());
}
