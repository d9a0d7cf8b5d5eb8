//! `std::collections::BTreeMap` container
//!
//! Ordered counterpart of the `HashMap` baseline.
//! Key-style access only.

use nestbench_core::{AccessError, Implementation, NestedDocument, Node};
use std::collections::BTreeMap;

/// Value stored in a [`BTreeDoc`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BTreeValue {
    /// Integer leaf
    Int(i64),
    /// Nested map
    Map(BTreeDoc),
}

/// Nested `BTreeMap` document
pub type BTreeDoc = BTreeMap<String, BTreeValue>;

fn convert(node: &Node) -> BTreeValue {
    match node {
        Node::Int(value) => BTreeValue::Int(*value),
        Node::Map(map) => BTreeValue::Map(
            map.iter()
                .map(|(key, child)| (key.clone(), convert(child)))
                .collect(),
        ),
    }
}

fn construct(document: &NestedDocument) -> Result<BTreeDoc, AccessError> {
    Ok(document
        .root()
        .iter()
        .map(|(key, node)| (key.clone(), convert(node)))
        .collect())
}

fn child<'a>(map: &'a BTreeDoc, key: &str) -> Result<&'a BTreeDoc, AccessError> {
    match map.get(key) {
        Some(BTreeValue::Map(inner)) => Ok(inner),
        Some(BTreeValue::Int(_)) => Err(AccessError::NotAMapping(key.to_string())),
        None => Err(AccessError::MissingKey(key.to_string())),
    }
}

fn child_mut<'a>(map: &'a mut BTreeDoc, key: &str) -> Result<&'a mut BTreeDoc, AccessError> {
    match map.get_mut(key) {
        Some(BTreeValue::Map(inner)) => Ok(inner),
        Some(BTreeValue::Int(_)) => Err(AccessError::NotAMapping(key.to_string())),
        None => Err(AccessError::MissingKey(key.to_string())),
    }
}

fn read_key(map: &BTreeDoc) -> Result<i64, AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    match child(child(map, l1)?, l2)?.get(l3) {
        Some(BTreeValue::Int(value)) => Ok(*value),
        Some(BTreeValue::Map(_)) => Err(AccessError::NotAnInteger(l3.to_string())),
        None => Err(AccessError::MissingKey(l3.to_string())),
    }
}

fn write_key(map: &mut BTreeDoc, value: i64) -> Result<(), AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    let level2 = child_mut(child_mut(map, l1)?, l2)?;
    match level2.get_mut(l3) {
        Some(leaf) => *leaf = BTreeValue::Int(value),
        None => {
            level2.insert(l3.to_string(), BTreeValue::Int(value));
        }
    }
    Ok(())
}

pub(crate) fn implementation() -> Implementation {
    Implementation::builder("BTreeMap", "BTreeMap::from(doc)", construct)
        .key_access(read_key, write_key)
        .build()
}
