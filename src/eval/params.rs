use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scene::model::{Param, format_number};

/// Runtime value supplied for a document param.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(&format_number(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Playback-time param overrides keyed by param name.
pub type ParamOverrides = BTreeMap<String, ParamValue>;

/// Replace every `{{name}}` placeholder in `text`.
///
/// An override wins over the declared default. Placeholders naming neither are left as written,
/// as is an unterminated `{{`.
pub fn resolve_placeholders(
    text: &str,
    declared: &BTreeMap<String, Param>,
    overrides: &ParamOverrides,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match (overrides.get(name), declared.get(name)) {
            (Some(v), _) => out.push_str(&v.to_string()),
            (None, Some(p)) => out.push_str(&p.default_text()),
            (None, None) => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/params.rs"]
mod tests;
