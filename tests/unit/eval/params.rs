use super::*;

fn declared() -> BTreeMap<String, Param> {
    let mut m = BTreeMap::new();
    m.insert(
        "player".to_owned(),
        Param::Text {
            default: "Alice".into(),
        },
    );
    m.insert("score".to_owned(), Param::Number { default: 10.0 });
    m
}

#[test]
fn defaults_fill_placeholders() {
    let s = resolve_placeholders("{{player}} scored {{score}}", &declared(), &ParamOverrides::new());
    assert_eq!(s, "Alice scored 10");
}

#[test]
fn overrides_win_and_every_occurrence_is_replaced() {
    let mut overrides = ParamOverrides::new();
    overrides.insert("player".into(), "Bob".into());
    overrides.insert("score".into(), 12.5.into());
    let s = resolve_placeholders("{{player}} vs {{player}}: {{score}}", &declared(), &overrides);
    assert_eq!(s, "Bob vs Bob: 12.5");
}

#[test]
fn undeclared_override_still_applies() {
    let mut overrides = ParamOverrides::new();
    overrides.insert("extra".into(), ParamValue::Number(3.0));
    assert_eq!(
        resolve_placeholders("x{{extra}}", &BTreeMap::new(), &overrides),
        "x3"
    );
}

#[test]
fn unknown_and_unterminated_placeholders_are_kept() {
    let empty = ParamOverrides::new();
    assert_eq!(
        resolve_placeholders("hi {{who}}!", &declared(), &empty),
        "hi {{who}}!"
    );
    assert_eq!(
        resolve_placeholders("{{player}} {{oops", &declared(), &empty),
        "Alice {{oops"
    );
    assert_eq!(resolve_placeholders("plain", &declared(), &empty), "plain");
}

#[test]
fn param_values_deserialize_untagged() {
    let m: ParamOverrides = serde_json::from_str(r#"{"a": 1, "b": "two"}"#).unwrap();
    assert_eq!(m["a"], ParamValue::Number(1.0));
    assert_eq!(m["b"], ParamValue::Text("two".into()));
}
