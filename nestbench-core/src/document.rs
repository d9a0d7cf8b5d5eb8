//! Fixed Nested Document
//!
//! Every container is constructed from the same `{level1: {level2: {level3: 100}}}`
//! record so that timings stay comparable across heterogeneous APIs.

use crate::registry::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value inside the nested document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Integer leaf
    Int(i64),
    /// Nested mapping
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// Borrow the child mapping, if this node is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            Node::Int(_) => None,
        }
    }

    /// Read the integer leaf, if this node is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(value) => Some(*value),
            Node::Map(_) => None,
        }
    }
}

/// The immutable benchmark input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedDocument {
    root: BTreeMap<String, Node>,
}

impl NestedDocument {
    /// Key path from the root to the benchmarked leaf.
    pub const PATH: [&'static str; 3] = ["level1", "level2", "level3"];

    /// Dotted form of [`Self::PATH`].
    pub const DOTTED_PATH: &'static str = "level1.level2.level3";

    /// Leaf value every freshly constructed container must expose.
    pub const INITIAL_VALUE: i64 = 100;

    /// The fixed `{level1: {level2: {level3: 100}}}` document.
    pub fn fixed() -> Self {
        let [l1, l2, l3] = Self::PATH;
        let level2 = BTreeMap::from([(l3.to_string(), Node::Int(Self::INITIAL_VALUE))]);
        let level1 = BTreeMap::from([(l2.to_string(), Node::Map(level2))]);
        let root = BTreeMap::from([(l1.to_string(), Node::Map(level1))]);
        Self { root }
    }

    /// Wrap an arbitrary root mapping.
    pub fn from_root(root: BTreeMap<String, Node>) -> Self {
        Self { root }
    }

    /// Top-level entries.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    /// Walk [`Self::PATH`] and return the leaf.
    pub fn leaf(&self) -> Result<i64, AccessError> {
        let [l1, l2, l3] = Self::PATH;
        let level1 = child_map(&self.root, l1)?;
        let level2 = child_map(level1, l2)?;
        level2
            .get(l3)
            .ok_or_else(|| AccessError::MissingKey(l3.to_string()))?
            .as_int()
            .ok_or_else(|| AccessError::NotAnInteger(l3.to_string()))
    }
}

fn child_map<'a>(
    map: &'a BTreeMap<String, Node>,
    key: &str,
) -> Result<&'a BTreeMap<String, Node>, AccessError> {
    map.get(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))?
        .as_map()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))
}

impl Default for NestedDocument {
    fn default() -> Self {
        Self::fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_leaf() {
        assert_eq!(NestedDocument::fixed().leaf().unwrap(), 100);
    }

    #[test]
    fn test_missing_level() {
        let doc = NestedDocument::from_root(BTreeMap::from([(
            "level1".to_string(),
            Node::Map(BTreeMap::new()),
        )]));
        assert!(matches!(doc.leaf(), Err(AccessError::MissingKey(k)) if k == "level2"));
    }

    #[test]
    fn test_leaf_type_mismatch() {
        let level2 = BTreeMap::from([(
            "level3".to_string(),
            Node::Map(BTreeMap::new()),
        )]);
        let level1 = BTreeMap::from([("level2".to_string(), Node::Map(level2))]);
        let doc = NestedDocument::from_root(BTreeMap::from([(
            "level1".to_string(),
            Node::Map(level1),
        )]));
        assert!(matches!(doc.leaf(), Err(AccessError::NotAnInteger(_))));
    }
}
