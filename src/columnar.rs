use serde::{Deserialize, Serialize};

use crate::row::Style;
use crate::zvalue::ZValues;

/// Columnar form of a circle batch. Parallel arrays, one slot per feature; coordinate
/// buffers hold flattened `(x, y)` pairs with z factored out into [`ZValues`].
///
/// Columns where every feature held the default value are `None` rather than
/// present-but-uniform, decided once when the record is built. The `high_precision_*`
/// channel mirrors the primary one and exists only when the source supplied it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarCircle {
    #[serde(default)]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub centers: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_centers: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "ZValues::is_empty")]
    pub z_values: ZValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_z_values: Option<ZValues>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radius: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<Style>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_indexs: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_indexs: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
}

/// Columnar form of a polyline or polygon batch. Identical to [`ColumnarCircle`] except
/// that the shared vertex buffer is indexed through `point_counts`, the per-feature vertex
/// count, instead of one pair per feature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarPath {
    #[serde(default)]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_vertices: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub point_counts: Vec<usize>,
    #[serde(default, skip_serializing_if = "ZValues::is_empty")]
    pub z_values: ZValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_precision_z_values: Option<ZValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<Style>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_indexs: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_indexs: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
}

/// Pair a unique-value table with its index column. Both are present or both absent; a
/// half-present pair is treated as absent, matching the tolerance for malformed input.
pub(crate) fn paired<'a, T>(
    values: &'a Option<Vec<T>>,
    indexes: &'a Option<Vec<usize>>,
) -> Option<(&'a [T], &'a [usize])> {
    match (values, indexes) {
        (Some(values), Some(indexes)) => Some((values.as_slice(), indexes.as_slice())),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_columns_are_absent_on_the_wire() {
        let record = ColumnarCircle {
            count: 1,
            centers: vec![1.0, 2.0],
            z_values: ZValues::Uniform(5.0),
            radius: vec![3.0],
            ..Default::default()
        };
        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(
            wire,
            json!({
                "count": 1,
                "centers": [1.0, 2.0],
                "z_values": [5.0],
                "radius": [3.0],
            })
        );
    }

    #[test]
    fn wire_round_trip() {
        let record = ColumnarPath {
            count: 2,
            object_ids: Some(vec!["a".to_string(), "".to_string()]),
            vertices: vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0],
            point_counts: vec![2, 1],
            z_values: ZValues::PerElement(vec![5.0, 5.1, 5.2]),
            styles: Some(vec![Style::new()]),
            style_indexs: Some(vec![0, 0]),
            ..Default::default()
        };
        let wire = serde_json::to_string(&record).unwrap();
        let back: ColumnarPath = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, record);
    }
}
