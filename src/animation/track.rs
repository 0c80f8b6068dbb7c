use std::fmt;

/// Named animatable properties with a fixed meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    X,
    Y,
    ScaleX,
    ScaleY,
    /// Uniform scale; drives both axes.
    Scale,
    Rotation,
    Alpha,
    Tint,
    FromX,
    FromY,
    ToX,
    ToY,
    Radius,
    Width,
    Height,
}

impl Property {
    pub const ALL: [Property; 15] = [
        Property::X,
        Property::Y,
        Property::ScaleX,
        Property::ScaleY,
        Property::Scale,
        Property::Rotation,
        Property::Alpha,
        Property::Tint,
        Property::FromX,
        Property::FromY,
        Property::ToX,
        Property::ToY,
        Property::Radius,
        Property::Width,
        Property::Height,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Alpha => "alpha",
            Self::Tint => "tint",
            Self::FromX => "fromX",
            Self::FromY => "fromY",
            Self::ToX => "toX",
            Self::ToY => "toY",
            Self::Radius => "radius",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Properties that reshape a graphics node instead of transforming it.
    pub fn is_shape_geometry(self) -> bool {
        matches!(
            self,
            Self::FromX
                | Self::FromY
                | Self::ToX
                | Self::ToY
                | Self::Radius
                | Self::Width
                | Self::Height
        )
    }
}

/// Mesh vertex coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Parsed keyframe property name.
///
/// Track names are parsed once when a document is loaded: `"vertex12_y"` becomes
/// `Vertex { index: 12, axis: Axis::Y }`. Unrecognized names are preserved verbatim in
/// [`TrackKey::Other`] so documents round-trip and the validator can report them as warnings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKey {
    Prop(Property),
    Vertex { index: usize, axis: Axis },
    Other(String),
}

impl TrackKey {
    pub fn parse(name: &str) -> Self {
        if let Some(p) = Property::lookup(name) {
            return Self::Prop(p);
        }
        if let Some((index, axis)) = parse_vertex_key(name) {
            return Self::Vertex { index, axis };
        }
        Self::Other(name.to_owned())
    }

    pub fn vertex(index: usize, axis: Axis) -> Self {
        Self::Vertex { index, axis }
    }

    /// `false` only for [`TrackKey::Other`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

fn parse_vertex_key(name: &str) -> Option<(usize, Axis)> {
    let rest = name.strip_prefix("vertex")?;
    let (digits, axis) = if let Some(d) = rest.strip_suffix("_x") {
        (d, Axis::X)
    } else {
        (rest.strip_suffix("_y")?, Axis::Y)
    };
    // Only canonical indices, so a key always writes back as it was read.
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    Some((digits.parse().ok()?, axis))
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prop(p) => f.write_str(p.name()),
            Self::Vertex { index, axis } => {
                let a = match axis {
                    Axis::X => "x",
                    Axis::Y => "y",
                };
                write!(f, "vertex{index}_{a}")
            }
            Self::Other(name) => f.write_str(name),
        }
    }
}

impl From<String> for TrackKey {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for TrackKey {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<Property> for TrackKey {
    fn from(p: Property) -> Self {
        Self::Prop(p)
    }
}

impl From<TrackKey> for String {
    fn from(key: TrackKey) -> Self {
        match key {
            TrackKey::Other(name) => name,
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
