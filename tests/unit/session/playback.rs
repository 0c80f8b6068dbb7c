use super::*;
use crate::animation::keyframe::Keyframe;
use crate::animation::track::{Property, TrackKey};
use crate::scene::model::{Node, NodeType, Particle};

fn doc() -> Document {
    let mut doc = Document::default()
        .with_node(Node::template(NodeType::Text, "t", None), Some("root"))
        .unwrap()
        .with_keyframe("t", Property::X.into(), Keyframe::new(0.0, 0.0))
        .unwrap()
        .with_keyframe("t", Property::X.into(), Keyframe::new(1000.0, 100.0))
        .unwrap()
        .with_particle(Particle::template("sparks", 10.0, 10.0))
        .unwrap();
    doc.particles[0].start_time = 200.0;
    doc
}

fn x_of(frame: &SessionFrame) -> f64 {
    frame.nodes.node("t").unwrap().values[&TrackKey::Prop(Property::X)]
        .as_f64()
        .unwrap()
}

#[test]
fn paused_session_does_not_move() {
    let mut s = PlaybackSession::new(doc(), PlaybackOpts::default());
    assert!(!s.advance(100.0));
    assert_eq!(s.time(), 0.0);
}

#[test]
fn advance_scales_by_speed() {
    let opts = PlaybackOpts {
        speed: 2.0,
        ..PlaybackOpts::default()
    };
    let mut s = PlaybackSession::new(doc(), opts);
    s.play();
    s.advance(100.0);
    assert_eq!(s.time(), 200.0);
    assert!((x_of(&s.frame()) - 20.0).abs() < 1e-9);
}

#[test]
fn non_looping_clamps_and_completes() {
    let mut s = PlaybackSession::new(doc(), PlaybackOpts::default());
    s.play();
    assert!(!s.advance(900.0));
    assert!(s.advance(300.0));
    assert_eq!(s.time(), 1000.0);
    assert!(!s.is_playing());

    // Playing again from the end restarts.
    s.play();
    assert_eq!(s.time(), 0.0);
}

#[test]
fn looping_wraps_into_range() {
    let opts = PlaybackOpts {
        looping: true,
        ..PlaybackOpts::default()
    };
    let mut s = PlaybackSession::new(doc(), opts);
    s.play();
    assert!(!s.advance(1250.0));
    assert_eq!(s.time(), 250.0);
    assert!(s.is_playing());
}

#[test]
fn region_bounds_playback() {
    let opts = PlaybackOpts {
        looping: true,
        ..PlaybackOpts::default()
    };
    let mut s = PlaybackSession::new(doc(), opts);
    s.set_region(400.0, 600.0).unwrap();
    assert_eq!(s.time(), 400.0);
    s.play();
    s.advance(250.0);
    assert_eq!(s.time(), 450.0);
    s.stop();
    assert_eq!(s.time(), 400.0);
    s.clear_region();
    assert_eq!(s.effective_end(), 1000.0);

    assert!(s.set_region(500.0, 500.0).is_err());
}

#[test]
fn region_is_clamped_to_the_document() {
    let mut s = PlaybackSession::new(doc(), PlaybackOpts::default());
    s.set_region(-200.0, 5000.0).unwrap();
    assert_eq!(s.effective_start(), 0.0);
    assert_eq!(s.effective_end(), 1000.0);

    assert!(s.set_region(1200.0, 1500.0).is_err());
    assert!(s.set_region(0.0, f64::NAN).is_err());
    assert_eq!(s.effective_end(), 1000.0);
}

#[test]
fn seek_clamps() {
    let mut s = PlaybackSession::new(doc(), PlaybackOpts::default());
    s.seek(-50.0);
    assert_eq!(s.time(), 0.0);
    s.seek(5000.0);
    assert_eq!(s.time(), 1000.0);
}

#[test]
fn emitters_follow_the_playhead() {
    let mut s = PlaybackSession::new(doc(), PlaybackOpts::default());
    s.seek(100.0);
    assert!(s.frame().particles[0].instances.is_empty());
    s.seek(250.0);
    let f = s.frame();
    assert_eq!(f.particles[0].id, "sparks");
    assert_eq!(f.particles[0].instances.len(), 15);
    s.stop();
    assert!(s.frame().particles[0].instances.is_empty());
}

#[test]
fn same_seed_same_particles() {
    let run = |seed| {
        let opts = PlaybackOpts {
            seed,
            ..PlaybackOpts::default()
        };
        let mut s = PlaybackSession::new(doc(), opts);
        s.play();
        for _ in 0..20 {
            s.advance(16.0);
        }
        s.frame().particles
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}
