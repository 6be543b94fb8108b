use serde::{Deserialize, Serialize};

/// A single coordinate as `[x, y, z]`, matching the layout the envelope transports.
pub type Point3 = [f64; 3];

/// A style attribute map attached to a feature, e.g. `{"color": "red"}`. Backed by
/// `serde_json`'s map type so nested payloads stay opaque to the codec; its canonical
/// serialization (key-sorted) is what the dedup table keys on.
pub type Style = serde_json::Map<String, serde_json::Value>;

/// Shared per-feature metadata. Every field is optional and defaults to its empty form;
/// the codec treats an absent field and an empty one identically.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Base {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
}

impl Base {
    /// The feature's id, with the empty string standing in when none was supplied.
    pub fn object_id(&self) -> &str {
        self.object_id.as_deref().unwrap_or("")
    }
}

/// Row form of a circle: a center point, a radius, and shared metadata. The
/// high-precision center is a mirror channel, present only when the source supplies it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_center: Option<Point3>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub base: Base,
}

/// Row form of a polyline or polygon: an ordered vertex list and shared metadata. The two
/// kinds carry identical structure and differ only in the envelope field they live under.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRow {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Point3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_vertices: Option<Vec<Point3>>,
    #[serde(default)]
    pub base: Base,
}
