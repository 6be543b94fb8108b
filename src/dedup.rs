use std::collections::HashMap;

/// Interning table for repeated per-feature values (style maps, serialized class lists).
///
/// Values are kept in first-seen order, which is the order the wire form transmits them in,
/// and looked up by their canonical serialization so that structurally equal values always
/// collapse to one entry regardless of how they were built. A table lives for a single
/// encode call; nothing is retained across calls.
#[derive(Clone, Debug, Default)]
pub struct DedupTable<T> {
    values: Vec<T>,
    by_key: HashMap<String, usize>,
}

impl<T> DedupTable<T> {
    /// Intern a value under its canonical key, returning the index of the structurally
    /// equal entry already present, or appending and returning the new index.
    pub fn intern(&mut self, key: String, value: T) -> usize {
        if let Some(&index) = self.by_key.get(&key) {
            return index;
        }
        let index = self.values.len();
        self.values.push(value);
        self.by_key.insert(key, index);
        index
    }

    /// Consume the table, yielding the unique values in first-seen order.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_seen_order() {
        let mut table = DedupTable::default();
        assert_eq!(table.intern("b".to_string(), "b"), 0);
        assert_eq!(table.intern("a".to_string(), "a"), 1);
        assert_eq!(table.intern("c".to_string(), "c"), 2);
        assert_eq!(table.into_values(), vec!["b", "a", "c"]);
    }

    #[test]
    fn repeated_keys_collapse() {
        let mut table = DedupTable::default();
        assert_eq!(table.intern("x".to_string(), 1), 0);
        assert_eq!(table.intern("y".to_string(), 2), 1);
        assert_eq!(table.intern("x".to_string(), 3), 0);
        // The first-interned value wins for a repeated key.
        assert_eq!(table.into_values(), vec![1, 2]);
    }

    #[test]
    fn structural_equality_through_canonical_keys() {
        // Two maps built in different key orders serialize to the same canonical form.
        let a: crate::Style = serde_json::from_str(r#"{"color":"red","width":2}"#).unwrap();
        let b: crate::Style = serde_json::from_str(r#"{"width":2,"color":"red"}"#).unwrap();
        let key_a = serde_json::to_string(&a).unwrap();
        let key_b = serde_json::to_string(&b).unwrap();
        assert_eq!(key_a, key_b);

        let mut table = DedupTable::default();
        let ia = table.intern(key_a, a);
        let ib = table.intern(key_b, b);
        assert_eq!(ia, ib);
        assert_eq!(table.into_values().len(), 1);
    }
}
