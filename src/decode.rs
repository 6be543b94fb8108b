use crate::columnar::{paired, ColumnarCircle, ColumnarPath};
use crate::error::{Error, Result};
use crate::row::{Base, CircleRow, PathRow, Style};
use crate::zvalue::{ZCursor, ZValues};

/// Read cursor over a flattened (x, y) coordinate buffer. Decoding never mutates the
/// record it reads, so a columnar record can be decoded any number of times.
struct PairCursor<'a> {
    buffer: &'a [f64],
    column: &'static str,
    pos: usize,
}

impl<'a> PairCursor<'a> {
    fn new(buffer: &'a [f64], column: &'static str) -> Self {
        PairCursor {
            buffer,
            column,
            pos: 0,
        }
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.buffer.len()
    }

    fn next_pair(&mut self) -> Result<(f64, f64)> {
        if self.pos + 2 > self.buffer.len() {
            return Err(Error::LengthTooShort {
                column: self.column,
                expected: 2,
                actual: self.buffer.len() - self.pos,
            });
        }
        let pair = (self.buffer[self.pos], self.buffer[self.pos + 1]);
        self.pos += 2;
        Ok(pair)
    }
}

fn column_at<'a, T>(column: &'static str, values: &'a [T], index: usize) -> Result<&'a T> {
    values.get(index).ok_or(Error::BadIndex {
        column,
        index,
        len: values.len(),
    })
}

/// Borrowed view of the metadata columns, resolving one feature's [`Base`] at a time.
/// Absent columns yield absent fields; a present column shorter than the feature count is
/// a hard error.
struct BaseReader<'a> {
    object_ids: Option<&'a [String]>,
    styles: Option<(&'a [Style], &'a [usize])>,
    classes: Option<(&'a [String], &'a [usize])>,
    subcategories: Option<&'a [String]>,
}

impl<'a> BaseReader<'a> {
    fn resolve(&self, index: usize) -> Result<Base> {
        let object_id = match self.object_ids {
            Some(ids) => {
                let id = column_at("object_ids", ids, index)?;
                // Empty ids inside a retained column decode as "0".
                Some(if id.is_empty() {
                    "0".to_string()
                } else {
                    id.clone()
                })
            }
            None => None,
        };

        let style = match self.styles {
            Some((styles, indexes)) => {
                let &i = column_at("style_indexs", indexes, index)?;
                Some(column_at("styles", styles, i)?.clone())
            }
            None => None,
        };

        let classes = match self.classes {
            Some((classes, indexes)) => {
                let &i = column_at("class_indexs", indexes, index)?;
                Some(serde_json::from_str(column_at("classes", classes, i)?)?)
            }
            None => None,
        };

        let subcategories = match self.subcategories {
            Some(subcategories) => Some(serde_json::from_str(column_at(
                "subcategories",
                subcategories,
                index,
            )?)?),
            None => None,
        };

        Ok(Base {
            object_id,
            style,
            classes,
            subcategories,
        })
    }
}

impl ColumnarCircle {
    /// Decode the record back into circle rows, in original order. Pure with respect to
    /// the record; repeated calls yield identical rows.
    pub fn to_rows(&self) -> Result<Vec<CircleRow>> {
        let base = BaseReader {
            object_ids: self.object_ids.as_deref(),
            styles: paired(&self.styles, &self.style_indexs),
            classes: paired(&self.classes, &self.class_indexs),
            subcategories: self.subcategories.as_deref(),
        };
        let mut centers = PairCursor::new(&self.centers, "centers");
        let mut z = ZCursor::new(&self.z_values);
        let mut high_precision_centers = self
            .high_precision_centers
            .as_deref()
            .map(|buffer| PairCursor::new(buffer, "high_precision_centers"));
        let no_z = ZValues::default();
        let mut high_precision_z =
            ZCursor::new(self.high_precision_z_values.as_ref().unwrap_or(&no_z));

        let mut rows = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let center = if centers.has_remaining() {
                let (x, y) = centers.next_pair()?;
                Some([x, y, z.next("z_values")?])
            } else {
                None
            };
            let high_precision_center = match high_precision_centers.as_mut() {
                Some(cursor) if cursor.has_remaining() => {
                    let (x, y) = cursor.next_pair()?;
                    Some([x, y, high_precision_z.next("high_precision_z_values")?])
                }
                _ => None,
            };
            let radius = *column_at("radius", &self.radius, i)?;
            rows.push(CircleRow {
                center,
                high_precision_center,
                radius,
                base: base.resolve(i)?,
            });
        }
        Ok(rows)
    }
}

impl ColumnarPath {
    /// Decode the record back into polyline/polygon rows, in original order. Each feature
    /// takes `point_counts[i]` pairs from the shared vertex buffer; a buffer that runs dry
    /// before the last feature is a hard error.
    pub fn to_rows(&self) -> Result<Vec<PathRow>> {
        let base = BaseReader {
            object_ids: self.object_ids.as_deref(),
            styles: paired(&self.styles, &self.style_indexs),
            classes: paired(&self.classes, &self.class_indexs),
            subcategories: self.subcategories.as_deref(),
        };
        let mut vertices = PairCursor::new(&self.vertices, "vertices");
        let mut z = ZCursor::new(&self.z_values);
        let mut high_precision_vertices = self
            .high_precision_vertices
            .as_deref()
            .map(|buffer| PairCursor::new(buffer, "high_precision_vertices"));
        let no_z = ZValues::default();
        let mut high_precision_z =
            ZCursor::new(self.high_precision_z_values.as_ref().unwrap_or(&no_z));

        let mut rows = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let &point_count = column_at("point_counts", &self.point_counts, i)?;
            let mut points = Vec::with_capacity(point_count);
            for _ in 0..point_count {
                let (x, y) = vertices.next_pair()?;
                points.push([x, y, z.next("z_values")?]);
            }
            let high_precision = match high_precision_vertices.as_mut() {
                Some(cursor) if cursor.has_remaining() => {
                    let mut points = Vec::with_capacity(point_count);
                    for _ in 0..point_count {
                        let (x, y) = cursor.next_pair()?;
                        points.push([x, y, high_precision_z.next("high_precision_z_values")?]);
                    }
                    Some(points)
                }
                _ => None,
            };
            rows.push(PathRow {
                vertices: points,
                high_precision_vertices: high_precision,
                base: base.resolve(i)?,
            });
        }
        Ok(rows)
    }
}
