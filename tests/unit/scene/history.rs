use super::*;

fn named(name: &str) -> Document {
    Document::new(name)
}

#[test]
fn empty_history_has_nothing_to_do() {
    let mut h = History::default();
    assert_eq!(h.capacity(), DEFAULT_HISTORY_CAPACITY);
    assert!(!h.can_undo() && !h.can_redo());
    assert!(h.undo(&named("x")).is_none());
    assert!(h.redo(&named("x")).is_none());
}

#[test]
fn undo_then_redo_swaps_snapshots() {
    let mut h = History::default();
    let a = named("a");
    h.push("rename", &a);
    let b = named("b");

    let back = h.undo(&b).unwrap();
    assert_eq!(back.name, "a");
    assert!(h.can_redo());
    assert_eq!(h.redo_label(), Some("rename"));

    let fwd = h.redo(&back).unwrap();
    assert_eq!(fwd.name, "b");
    assert_eq!(h.undo_label(), Some("rename"));
    assert!(!h.can_redo());
}

#[test]
fn push_clears_redo() {
    let mut h = History::default();
    h.push("one", &named("a"));
    let _ = h.undo(&named("b"));
    assert!(h.can_redo());
    h.push("two", &named("a"));
    assert!(!h.can_redo());
}

#[test]
fn oldest_snapshots_fall_off() {
    let mut h = History::with_capacity(3);
    for i in 0..5 {
        h.push(format!("edit {i}"), &named(&i.to_string()));
    }
    assert_eq!(h.undo_len(), 3);
    let mut names = Vec::new();
    let mut cur = named("current");
    while let Some(doc) = h.undo(&cur) {
        names.push(doc.name.clone());
        cur = doc;
    }
    assert_eq!(names, ["4", "3", "2"]);
}

#[test]
fn zero_capacity_keeps_one_step() {
    let mut h = History::with_capacity(0);
    h.push("a", &named("a"));
    h.push("b", &named("b"));
    assert_eq!(h.undo_len(), 1);
    h.clear();
    assert!(!h.can_undo());
}
