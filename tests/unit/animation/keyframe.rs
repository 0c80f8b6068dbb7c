use super::*;
use crate::animation::track::{Axis, Property};

fn num(v: KeyframeValue) -> f64 {
    v.as_f64().expect("numeric value")
}

fn linear_0_100() -> Vec<Keyframe> {
    vec![Keyframe::new(0.0, 0.0), Keyframe::new(100.0, 100.0)]
}

#[test]
fn empty_track_is_zero() {
    assert_eq!(evaluate_track(&[], 100.0), KeyframeValue::Number(0.0));
}

#[test]
fn single_keyframe_holds() {
    let kfs = vec![Keyframe::new(0.0, 42.0)];
    assert_eq!(num(evaluate_track(&kfs, 0.0)), 42.0);
    assert_eq!(num(evaluate_track(&kfs, 999.0)), 42.0);
    assert_eq!(num(evaluate_track(&kfs, -5.0)), 42.0);
}

#[test]
fn clamps_outside_keys() {
    let kfs = vec![Keyframe::new(100.0, 10.0), Keyframe::new(200.0, 20.0)];
    assert_eq!(num(evaluate_track(&kfs, 0.0)), 10.0);
    assert_eq!(num(evaluate_track(&kfs, 100.0)), 10.0);
    assert_eq!(num(evaluate_track(&kfs, 200.0)), 20.0);
    assert_eq!(num(evaluate_track(&kfs, 999.0)), 20.0);
}

#[test]
fn linear_interpolation() {
    let kfs = linear_0_100();
    assert!((num(evaluate_track(&kfs, 50.0)) - 50.0).abs() < 1e-9);
    assert!((num(evaluate_track(&kfs, 25.0)) - 25.0).abs() < 1e-9);
    assert!((num(evaluate_track(&kfs, 75.0)) - 75.0).abs() < 1e-9);
}

#[test]
fn easing_comes_from_arriving_keyframe() {
    let kfs = vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(100.0, 100.0).eased(Ease::InQuad),
    ];
    assert!((num(evaluate_track(&kfs, 50.0)) - 25.0).abs() < 1e-9);

    // Easing on the departing keyframe has no effect on this segment.
    let kfs = vec![
        Keyframe::new(0.0, 0.0).eased(Ease::InQuad),
        Keyframe::new(100.0, 100.0),
    ];
    assert!((num(evaluate_track(&kfs, 50.0)) - 50.0).abs() < 1e-9);
}

#[test]
fn picks_the_enclosing_segment() {
    let kfs = vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(100.0, 100.0),
        Keyframe::new(200.0, 50.0),
    ];
    assert!((num(evaluate_track(&kfs, 50.0)) - 50.0).abs() < 1e-9);
    assert!((num(evaluate_track(&kfs, 150.0)) - 75.0).abs() < 1e-9);
}

#[test]
fn overshooting_easing_is_not_clamped() {
    let kfs = vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(100.0, 100.0).eased(Ease::OutBack),
    ];
    assert!(num(evaluate_track(&kfs, 60.0)) > 100.0);
}

#[test]
fn strings_snap_at_midpoint() {
    let kfs = vec![
        Keyframe::new(0.0, "#FF0000"),
        Keyframe::new(100.0, "#00FF00"),
    ];
    assert_eq!(evaluate_track(&kfs, 40.0), KeyframeValue::from("#FF0000"));
    assert_eq!(evaluate_track(&kfs, 50.0), KeyframeValue::from("#00FF00"));
    assert_eq!(evaluate_track(&kfs, 60.0), KeyframeValue::from("#00FF00"));
}

#[test]
fn mixed_number_and_string_snaps() {
    let kfs = vec![Keyframe::new(0.0, 1.0), Keyframe::new(100.0, "red")];
    assert_eq!(evaluate_track(&kfs, 10.0), KeyframeValue::Number(1.0));
    assert_eq!(evaluate_track(&kfs, 90.0), KeyframeValue::from("red"));
}

#[test]
fn zero_length_segment() {
    let kfs = vec![Keyframe::new(50.0, 10.0), Keyframe::new(50.0, 20.0)];
    assert_eq!(num(evaluate_track(&kfs, 50.0)), 10.0);
    assert_eq!(num(evaluate_track(&kfs, 51.0)), 20.0);

    let kfs = vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(50.0, 10.0),
        Keyframe::new(50.0, 20.0),
        Keyframe::new(100.0, 30.0),
    ];
    // First matching pair is (0, 50): at its end the value is 10.
    assert_eq!(num(evaluate_track(&kfs, 50.0)), 10.0);
}

#[test]
fn boundary_values_match_first_and_last() {
    let tracks = [
        linear_0_100(),
        vec![
            Keyframe::new(10.0, 3.0),
            Keyframe::new(20.0, -4.0).eased(Ease::Spring),
            Keyframe::new(90.0, 8.0).eased(Ease::InOutSine),
        ],
    ];
    for kfs in tracks {
        let first = kfs.first().unwrap();
        let last = kfs.last().unwrap();
        assert_eq!(evaluate_track(&kfs, first.time), first.value);
        assert_eq!(evaluate_track(&kfs, last.time), last.value);
    }
}

#[test]
fn all_tracks_omits_empty() {
    let mut tracks = BTreeMap::new();
    tracks.insert(TrackKey::Prop(Property::X), linear_0_100());
    tracks.insert(TrackKey::Prop(Property::Alpha), vec![]);
    tracks.insert(
        TrackKey::vertex(1, Axis::Y),
        vec![Keyframe::new(0.0, 5.0)],
    );

    let values = evaluate_all_tracks(&tracks, 50.0);
    assert_eq!(values.len(), 2);
    assert!(!values.contains_key(&TrackKey::Prop(Property::Alpha)));
    assert_eq!(values[&TrackKey::vertex(1, Axis::Y)], KeyframeValue::Number(5.0));
}

#[test]
fn insert_sorted_keeps_order() {
    let mut track = vec![Keyframe::new(0.0, 0.0), Keyframe::new(100.0, 1.0)];
    insert_sorted(&mut track, Keyframe::new(50.0, 0.5));
    insert_sorted(&mut track, Keyframe::new(50.0, 0.7));
    let times: Vec<f64> = track.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 50.0, 50.0, 100.0]);
    assert_eq!(track[2].value, KeyframeValue::Number(0.7));
    assert!(is_sorted(&track));
}

#[test]
fn keyframe_json_shape() {
    let kf: Keyframe = serde_json::from_str(r##"{"time":10,"value":"#fff"}"##).unwrap();
    assert_eq!(kf.value, KeyframeValue::from("#fff"));
    assert_eq!(kf.easing, None);

    let kf: Keyframe =
        serde_json::from_str(r#"{"time":10,"value":2.5,"easing":"easeOutBack"}"#).unwrap();
    assert_eq!(kf.easing, Some(Ease::OutBack));
    let s = serde_json::to_string(&Keyframe::new(1.0, 2.0)).unwrap();
    assert!(!s.contains("easing"));
}
