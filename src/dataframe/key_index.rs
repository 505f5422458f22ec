// In: src/dataframe/key_index.rs

//! A bijection between an ordered sequence of unique keys and dense
//! zero-based positions.
//!
//! The default is the identity index: position == key, with no storage. An
//! explicit `Keyed` index owns its key order plus a reverse map for O(1)
//! key→position lookup.

use hashbrown::HashMap;

use crate::error::CellscopeError;
use crate::types::Key;

#[derive(Debug, Clone)]
pub enum KeyIndex {
    /// Dense integer keys 0..n; `Key::Int(i)` maps to position `i`.
    Identity(usize),
    /// Explicit unique keys in a fixed order.
    Keyed {
        keys: Vec<Key>,
        positions: HashMap<Key, usize>,
    },
}

impl KeyIndex {
    pub fn identity(len: usize) -> Self {
        KeyIndex::Identity(len)
    }

    /// Builds a keyed index. Duplicate keys break the bijection and are
    /// rejected with `ShapeError`.
    pub fn from_keys(keys: Vec<Key>) -> Result<Self, CellscopeError> {
        let mut positions = HashMap::with_capacity(keys.len());
        for (pos, key) in keys.iter().enumerate() {
            if positions.insert(key.clone(), pos).is_some() {
                return Err(CellscopeError::ShapeError(format!(
                    "duplicate key '{}' in index",
                    key
                )));
            }
        }
        Ok(KeyIndex::Keyed { keys, positions })
    }

    pub fn len(&self) -> usize {
        match self {
            KeyIndex::Identity(n) => *n,
            KeyIndex::Keyed { keys, .. } => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// key → dense position, or `None` if the key is absent.
    pub fn position_of(&self, key: &Key) -> Option<usize> {
        match self {
            KeyIndex::Identity(n) => match key {
                Key::Int(i) if (*i as usize) < *n => Some(*i as usize),
                _ => None,
            },
            KeyIndex::Keyed { positions, .. } => positions.get(key).copied(),
        }
    }

    /// dense position → key, or `None` if out of range.
    pub fn key_at(&self, pos: usize) -> Option<Key> {
        match self {
            KeyIndex::Identity(n) => (pos < *n).then(|| Key::Int(pos as u32)),
            KeyIndex::Keyed { keys, .. } => keys.get(pos).cloned(),
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.position_of(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_int_keys_in_range() {
        let idx = KeyIndex::identity(3);
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.position_of(&Key::Int(2)), Some(2));
        assert_eq!(idx.position_of(&Key::Int(3)), None);
        assert_eq!(idx.position_of(&Key::from("name")), None);
        assert_eq!(idx.key_at(1), Some(Key::Int(1)));
        assert_eq!(idx.key_at(3), None);
    }

    #[test]
    fn test_keyed_index_is_bidirectional() {
        let idx =
            KeyIndex::from_keys(vec![Key::from("a"), Key::from("b"), Key::from("c")]).unwrap();
        assert_eq!(idx.position_of(&Key::from("b")), Some(1));
        assert_eq!(idx.key_at(2), Some(Key::from("c")));
        assert!(!idx.contains(&Key::from("z")));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = KeyIndex::from_keys(vec![Key::from("a"), Key::from("a")]);
        assert!(matches!(result, Err(CellscopeError::ShapeError(_))));
    }
}
