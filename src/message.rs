use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::columnar::{ColumnarCircle, ColumnarPath};
use crate::error::Result;
use crate::row::{CircleRow, PathRow};

/// Message envelope. Only `data.updates[].primitives` is interpreted by the codec; every
/// other field rides through the flattened passthrough maps untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub data: Data,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<Update>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub primitives: BTreeMap<String, PrimitiveSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One named primitive collection inside an update. Each kind lives under either its raw
/// field (`circles`) or its columnar sibling (`conversion_circles`); encode and decode swap
/// between the two in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circles: Option<Vec<CircleRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polylines: Option<Vec<PathRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<Vec<PathRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_circles: Option<ColumnarCircle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_polylines: Option<ColumnarPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_polygons: Option<ColumnarPath>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PrimitiveSet {
    /// Encode each non-empty raw collection, leaving an emptied row list behind and the
    /// columnar record under the paired `conversion_*` field. Empty collections are left
    /// alone.
    pub fn encode(&mut self) -> Result<()> {
        if let Some(rows) = self.circles.take() {
            if rows.is_empty() {
                self.circles = Some(rows);
            } else {
                self.conversion_circles = Some(ColumnarCircle::from_rows(rows)?);
                self.circles = Some(Vec::new());
            }
        }
        if let Some(rows) = self.polylines.take() {
            if rows.is_empty() {
                self.polylines = Some(rows);
            } else {
                self.conversion_polylines = Some(ColumnarPath::from_rows(rows)?);
                self.polylines = Some(Vec::new());
            }
        }
        if let Some(rows) = self.polygons.take() {
            if rows.is_empty() {
                self.polygons = Some(rows);
            } else {
                self.conversion_polygons = Some(ColumnarPath::from_rows(rows)?);
                self.polygons = Some(Vec::new());
            }
        }
        Ok(())
    }

    /// Decode each present columnar record back under its raw field, removing the
    /// `conversion_*` field from the set.
    pub fn decode(&mut self) -> Result<()> {
        if let Some(record) = self.conversion_circles.take() {
            self.circles = Some(record.to_rows()?);
        }
        if let Some(record) = self.conversion_polylines.take() {
            self.polylines = Some(record.to_rows()?);
        }
        if let Some(record) = self.conversion_polygons.take() {
            self.polygons = Some(record.to_rows()?);
        }
        Ok(())
    }
}

/// Walk every update entry and every named primitive collection, converting raw row lists
/// to their columnar form in place. All other message content is untouched.
pub fn encode_message(message: &mut Message) -> Result<()> {
    for update in &mut message.data.updates {
        for set in update.primitives.values_mut() {
            set.encode()?;
        }
    }
    Ok(())
}

/// Walk every update entry and every named primitive collection, converting columnar
/// records back to raw row lists in place. All other message content is untouched.
pub fn decode_message(message: &mut Message) -> Result<()> {
    for update in &mut message.data.updates {
        for set in update.primitives.values_mut() {
            set.decode()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        json!({
            "type": "update",
            "data": {
                "seq": 9,
                "updates": [
                    {
                        "timestamp": 1234,
                        "primitives": {
                            "lane": {
                                "polylines": [
                                    {
                                        "vertices": [[0.0, 0.0, 5.0], [1.0, 1.0, 5.0]],
                                        "base": {
                                            "object_id": "lane-1",
                                            "style": {"color": "yellow"},
                                            "classes": ["lane_line"]
                                        }
                                    }
                                ],
                                "annotations": true
                            },
                            "obstacle": {
                                "circles": [
                                    {
                                        "center": [1.0, 2.0, 5.0],
                                        "radius": 3.0,
                                        "base": {"object_id": "ob-1"}
                                    }
                                ]
                            }
                        }
                    },
                    {
                        "primitives": {
                            "lane": {
                                "polygons": [
                                    {
                                        "vertices": [[0.0, 0.0, 1.0], [2.0, 0.0, 1.0], [1.0, 2.0, 1.0]],
                                        "base": {"object_id": "zone-1"}
                                    }
                                ]
                            }
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn encode_swaps_raw_collections_for_columnar_siblings() {
        let mut message: Message = serde_json::from_value(fixture()).unwrap();
        encode_message(&mut message).unwrap();

        let wire = serde_json::to_value(&message).unwrap();
        let lane = &wire["data"]["updates"][0]["primitives"]["lane"];
        assert_eq!(lane["polylines"], json!([]));
        assert_eq!(lane["conversion_polylines"]["count"], json!(1));
        assert_eq!(lane["conversion_polylines"]["point_counts"], json!([2]));
        assert_eq!(lane["conversion_polylines"]["z_values"], json!([5.0]));
        // Unrelated content survives at every level.
        assert_eq!(wire["type"], json!("update"));
        assert_eq!(wire["data"]["seq"], json!(9));
        assert_eq!(wire["data"]["updates"][0]["timestamp"], json!(1234));
        assert_eq!(lane["annotations"], json!(true));

        let obstacle = &wire["data"]["updates"][0]["primitives"]["obstacle"];
        assert_eq!(obstacle["circles"], json!([]));
        assert_eq!(obstacle["conversion_circles"]["centers"], json!([1.0, 2.0]));

        // Every update entry is walked, not just the first.
        let zone = &wire["data"]["updates"][1]["primitives"]["lane"];
        assert_eq!(zone["polygons"], json!([]));
        assert_eq!(zone["conversion_polygons"]["count"], json!(1));
    }

    #[test]
    fn decode_restores_rows_and_drops_columnar_fields() {
        let original: Message = serde_json::from_value(fixture()).unwrap();
        let mut message = original.clone();
        encode_message(&mut message).unwrap();
        decode_message(&mut message).unwrap();

        let wire = serde_json::to_value(&message).unwrap();
        assert!(wire["data"]["updates"][0]["primitives"]["lane"]
            .get("conversion_polylines")
            .is_none());

        let lanes = message.data.updates[0].primitives["lane"]
            .polylines
            .as_ref()
            .unwrap();
        assert_eq!(
            lanes,
            original.data.updates[0].primitives["lane"]
                .polylines
                .as_ref()
                .unwrap()
        );
        let zones = message.data.updates[1].primitives["lane"]
            .polygons
            .as_ref()
            .unwrap();
        assert_eq!(
            zones,
            original.data.updates[1].primitives["lane"]
                .polygons
                .as_ref()
                .unwrap()
        );
    }

    #[test]
    fn empty_collections_are_left_alone() {
        let mut message: Message = serde_json::from_value(json!({
            "data": {
                "updates": [
                    {"primitives": {"empty": {"circles": []}}}
                ]
            }
        }))
        .unwrap();
        encode_message(&mut message).unwrap();
        let set = &message.data.updates[0].primitives["empty"];
        assert_eq!(set.circles, Some(Vec::new()));
        assert_eq!(set.conversion_circles, None);
    }

    #[test]
    fn message_without_updates_is_a_no_op() {
        let mut message: Message = serde_json::from_value(json!({"status": "ok"})).unwrap();
        encode_message(&mut message).unwrap();
        decode_message(&mut message).unwrap();
        let wire = serde_json::to_value(&message).unwrap();
        assert_eq!(wire["status"], json!("ok"));
    }
}
