use crate::columnar::{ColumnarCircle, ColumnarPath};
use crate::dedup::DedupTable;
use crate::error::Result;
use crate::row::{Base, CircleRow, PathRow, Style};
use crate::zvalue::ZValues;

/// Accumulates the metadata columns every primitive kind shares: object ids, interned
/// styles, interned serialized class lists, and serialized subcategories. Tracks, per
/// column, whether any feature carried a non-default value; columns that never did are
/// dropped wholesale when the record is finished.
#[derive(Default)]
struct BaseColumns {
    object_ids: Vec<String>,
    any_id: bool,
    styles: DedupTable<Style>,
    style_indexs: Vec<usize>,
    any_style: bool,
    classes: DedupTable<String>,
    class_indexs: Vec<usize>,
    any_class: bool,
    subcategories: Vec<String>,
    any_subcategory: bool,
}

struct FinishedBase {
    object_ids: Option<Vec<String>>,
    styles: Option<Vec<Style>>,
    style_indexs: Option<Vec<usize>>,
    classes: Option<Vec<String>>,
    class_indexs: Option<Vec<usize>>,
    subcategories: Option<Vec<String>>,
}

impl BaseColumns {
    fn push(&mut self, base: &Base) -> Result<()> {
        let id = base.object_id();
        self.any_id |= !id.is_empty();
        self.object_ids.push(id.to_string());

        let style = base.style.clone().unwrap_or_default();
        self.any_style |= !style.is_empty();
        let key = serde_json::to_string(&style)?;
        let index = self.styles.intern(key, style);
        self.style_indexs.push(index);

        let classes = serde_json::to_string(base.classes.as_deref().unwrap_or_default())?;
        self.any_class |= classes != "[]";
        let index = self.classes.intern(classes.clone(), classes);
        self.class_indexs.push(index);

        let subcategories =
            serde_json::to_string(base.subcategories.as_deref().unwrap_or_default())?;
        self.any_subcategory |= subcategories != "[]";
        self.subcategories.push(subcategories);

        Ok(())
    }

    fn finish(self) -> FinishedBase {
        FinishedBase {
            object_ids: self.any_id.then_some(self.object_ids),
            styles: self.any_style.then_some(self.styles.into_values()),
            style_indexs: self.any_style.then_some(self.style_indexs),
            classes: self.any_class.then_some(self.classes.into_values()),
            class_indexs: self.any_class.then_some(self.class_indexs),
            subcategories: self.any_subcategory.then_some(self.subcategories),
        }
    }
}

impl ColumnarCircle {
    /// Encode a batch of circle rows, consuming them. The record is finalized here: z
    /// columns are compressed and all-default metadata columns are dropped.
    pub fn from_rows(rows: Vec<CircleRow>) -> Result<Self> {
        let count = rows.len();
        let mut base = BaseColumns::default();
        let mut centers = Vec::with_capacity(count * 2);
        let mut z_samples = Vec::with_capacity(count);
        let mut high_precision_centers: Option<Vec<f64>> = None;
        let mut high_precision_z = Vec::new();
        let mut radius = Vec::with_capacity(count);

        for row in rows {
            base.push(&row.base)?;
            if let Some([x, y, z]) = row.center {
                centers.push(x);
                centers.push(y);
                z_samples.push(z);
            }
            if let Some([x, y, z]) = row.high_precision_center {
                let buffer = high_precision_centers.get_or_insert_with(Vec::new);
                buffer.push(x);
                buffer.push(y);
                high_precision_z.push(z);
            }
            radius.push(row.radius);
        }

        let base = base.finish();
        let high_precision_z_values = high_precision_centers
            .is_some()
            .then(|| ZValues::compress(high_precision_z));
        Ok(ColumnarCircle {
            count,
            object_ids: base.object_ids,
            centers,
            high_precision_centers,
            z_values: ZValues::compress(z_samples),
            high_precision_z_values,
            radius,
            styles: base.styles,
            style_indexs: base.style_indexs,
            classes: base.classes,
            class_indexs: base.class_indexs,
            subcategories: base.subcategories,
        })
    }
}

impl ColumnarPath {
    /// Encode a batch of polyline or polygon rows, consuming them. Vertices flatten into
    /// one shared buffer, with `point_counts` recording each feature's share of it.
    pub fn from_rows(rows: Vec<PathRow>) -> Result<Self> {
        let count = rows.len();
        let mut base = BaseColumns::default();
        let mut vertices = Vec::new();
        let mut point_counts = Vec::with_capacity(count);
        let mut z_samples = Vec::new();
        let mut high_precision_vertices: Option<Vec<f64>> = None;
        let mut high_precision_z = Vec::new();

        for row in rows {
            base.push(&row.base)?;
            let mut point_count = 0;
            for [x, y, z] in row.vertices {
                point_count += 1;
                vertices.push(x);
                vertices.push(y);
                z_samples.push(z);
            }
            point_counts.push(point_count);
            if let Some(points) = row.high_precision_vertices {
                let buffer = high_precision_vertices.get_or_insert_with(Vec::new);
                for [x, y, z] in points {
                    buffer.push(x);
                    buffer.push(y);
                    high_precision_z.push(z);
                }
            }
        }

        let base = base.finish();
        let high_precision_z_values = high_precision_vertices
            .is_some()
            .then(|| ZValues::compress(high_precision_z));
        Ok(ColumnarPath {
            count,
            object_ids: base.object_ids,
            vertices,
            high_precision_vertices,
            point_counts,
            z_values: ZValues::compress(z_samples),
            high_precision_z_values,
            styles: base.styles,
            style_indexs: base.style_indexs,
            classes: base.classes,
            class_indexs: base.class_indexs,
            subcategories: base.subcategories,
        })
    }
}
