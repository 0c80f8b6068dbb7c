use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::track::TrackKey;
use crate::foundation::math::lerp;

/// A keyframe value: numbers interpolate, strings (e.g. hex colors) snap.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeyframeValue {
    Number(f64),
    Text(String),
}

impl KeyframeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl Default for KeyframeValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for KeyframeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for KeyframeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for KeyframeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One keyframe in a property track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Node-local time in milliseconds.
    pub time: f64,
    pub value: KeyframeValue,
    /// Curve used to arrive at this keyframe from the previous one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
}

impl Keyframe {
    pub fn new(time: f64, value: impl Into<KeyframeValue>) -> Self {
        Self {
            time,
            value: value.into(),
            easing: None,
        }
    }

    pub fn eased(mut self, easing: Ease) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Sample a track at `time`.
///
/// Tracks are expected in ascending time order; the scan runs in array order and the first
/// enclosing pair wins. Never fails: an empty track yields `0`.
pub fn evaluate_track(keyframes: &[Keyframe], time: f64) -> KeyframeValue {
    let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
        return KeyframeValue::default();
    };
    if keyframes.len() == 1 || time <= first.time {
        return first.value.clone();
    }
    if time >= last.time {
        return last.value.clone();
    }

    for pair in keyframes.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if time < from.time || time > to.time {
            continue;
        }

        let (a, b) = match (&from.value, &to.value) {
            (KeyframeValue::Number(a), KeyframeValue::Number(b)) => (*a, *b),
            _ => {
                let mid = (from.time + to.time) / 2.0;
                return if time < mid {
                    from.value.clone()
                } else {
                    to.value.clone()
                };
            }
        };

        let span = to.time - from.time;
        if span == 0.0 {
            return to.value.clone();
        }
        let progress = (time - from.time) / span;
        let eased = to.easing.unwrap_or_default().apply(progress);
        return KeyframeValue::Number(lerp(a, b, eased));
    }

    last.value.clone()
}

/// Sample every non-empty track of a node at `local_time`.
///
/// Empty tracks are omitted so callers can tell "not animated" from "animated to 0".
pub fn evaluate_all_tracks(
    tracks: &BTreeMap<TrackKey, Vec<Keyframe>>,
    local_time: f64,
) -> BTreeMap<TrackKey, KeyframeValue> {
    tracks
        .iter()
        .filter(|(_, keys)| !keys.is_empty())
        .map(|(key, keys)| (key.clone(), evaluate_track(keys, local_time)))
        .collect()
}

/// Insert a keyframe keeping the track ordered by time.
///
/// Keyframes with equal times keep insertion order.
pub fn insert_sorted(track: &mut Vec<Keyframe>, keyframe: Keyframe) {
    track.push(keyframe);
    track.sort_by(|a, b| a.time.total_cmp(&b.time));
}

/// `true` when `track` times never decrease.
pub fn is_sorted(track: &[Keyframe]) -> bool {
    track.windows(2).all(|w| w[0].time <= w[1].time)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
