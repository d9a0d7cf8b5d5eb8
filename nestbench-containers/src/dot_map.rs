//! DotMap - key and attribute access over one mapping
//!
//! A dynamic container in the style of attribute-access dict wrappers. Keys
//! can be read with [`DotMap::get`]; the same entries resolve as attributes
//! through dotted paths such as `"level1.level2.level3"`. Writing a dotted
//! path creates any missing intermediate maps.

use nestbench_core::{AccessError, Implementation, NestedDocument, Node};
use std::collections::HashMap;

/// Value stored in a [`DotMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotValue {
    /// Integer leaf
    Int(i64),
    /// Nested map
    Map(DotMap),
}

impl DotValue {
    /// The integer leaf, if any
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DotValue::Int(value) => Some(*value),
            DotValue::Map(_) => None,
        }
    }

    /// The nested map, if any
    pub fn as_map(&self) -> Option<&DotMap> {
        match self {
            DotValue::Map(map) => Some(map),
            DotValue::Int(_) => None,
        }
    }
}

/// Mapping with both key-style and attribute-style access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotMap {
    entries: HashMap<String, DotValue>,
}

impl DotMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-copy a nested document
    pub fn from_document(document: &NestedDocument) -> Self {
        fn convert(node: &Node) -> DotValue {
            match node {
                Node::Int(value) => DotValue::Int(*value),
                Node::Map(map) => DotValue::Map(DotMap {
                    entries: map
                        .iter()
                        .map(|(key, child)| (key.clone(), convert(child)))
                        .collect(),
                }),
            }
        }

        Self {
            entries: document
                .root()
                .iter()
                .map(|(key, node)| (key.clone(), convert(node)))
                .collect(),
        }
    }

    /// Key lookup
    pub fn get(&self, key: &str) -> Option<&DotValue> {
        self.entries.get(key)
    }

    /// Mutable key lookup
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DotValue> {
        self.entries.get_mut(key)
    }

    /// Insert or replace a key
    pub fn insert(&mut self, key: impl Into<String>, value: DotValue) -> Option<DotValue> {
        self.entries.insert(key.into(), value)
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute lookup: like [`get`](Self::get), but a miss is an error
    pub fn attr(&self, name: &str) -> Result<&DotValue, AccessError> {
        self.entries
            .get(name)
            .ok_or_else(|| AccessError::MissingAttribute(name.to_string()))
    }

    /// Resolve a dotted attribute path
    pub fn get_path(&self, path: &str) -> Result<&DotValue, AccessError> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.attr(first)?;
        let mut parent = first;
        for segment in segments {
            current = current
                .as_map()
                .ok_or_else(|| AccessError::NotAMapping(parent.to_string()))?
                .attr(segment)?;
            parent = segment;
        }
        Ok(current)
    }

    /// Assign through a dotted attribute path, creating missing parents
    pub fn set_path(&mut self, path: &str, value: DotValue) -> Result<(), AccessError> {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut map = self;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            let entry = map
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| DotValue::Map(DotMap::new()));
            map = match entry {
                DotValue::Map(inner) => inner,
                DotValue::Int(_) => return Err(AccessError::NotAMapping(segment.to_string())),
            };
        }
        map.assign(leaf, value);
        Ok(())
    }

    /// Overwrite `key` in place, inserting it only when absent
    pub fn assign(&mut self, key: &str, value: DotValue) {
        match self.entries.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.entries.insert(key.to_string(), value);
            }
        }
    }
}

fn child<'a>(map: &'a DotMap, key: &str) -> Result<&'a DotMap, AccessError> {
    map.get(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))?
        .as_map()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))
}

fn child_mut<'a>(map: &'a mut DotMap, key: &str) -> Result<&'a mut DotMap, AccessError> {
    match map.get_mut(key) {
        Some(DotValue::Map(inner)) => Ok(inner),
        Some(DotValue::Int(_)) => Err(AccessError::NotAMapping(key.to_string())),
        None => Err(AccessError::MissingKey(key.to_string())),
    }
}

fn construct(document: &NestedDocument) -> Result<DotMap, AccessError> {
    Ok(DotMap::from_document(document))
}

fn read_key(map: &DotMap) -> Result<i64, AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    child(child(map, l1)?, l2)?
        .get(l3)
        .ok_or_else(|| AccessError::MissingKey(l3.to_string()))?
        .as_int()
        .ok_or_else(|| AccessError::NotAnInteger(l3.to_string()))
}

fn write_key(map: &mut DotMap, value: i64) -> Result<(), AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    child_mut(child_mut(map, l1)?, l2)?.assign(l3, DotValue::Int(value));
    Ok(())
}

fn read_dot(map: &DotMap) -> Result<i64, AccessError> {
    let path = NestedDocument::DOTTED_PATH;
    map.get_path(path)?
        .as_int()
        .ok_or_else(|| AccessError::NotAnInteger(path.to_string()))
}

fn write_dot(map: &mut DotMap, value: i64) -> Result<(), AccessError> {
    map.set_path(NestedDocument::DOTTED_PATH, DotValue::Int(value))
}

pub(crate) fn implementation() -> Implementation {
    Implementation::builder("DotMap", "DotMap::from(doc)", construct)
        .key_access(read_key, write_key)
        .dot_access(read_dot, write_dot)
        .build()
}
