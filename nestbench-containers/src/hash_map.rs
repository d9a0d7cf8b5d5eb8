//! `std::collections::HashMap` baseline
//!
//! The plain built-in mapping every other container is measured against.
//! Key-style access only.

use nestbench_core::{AccessError, Implementation, NestedDocument, Node};
use std::collections::HashMap;

/// Value stored in a [`HashDoc`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashValue {
    /// Integer leaf
    Int(i64),
    /// Nested map
    Map(HashDoc),
}

/// Nested `HashMap` document
pub type HashDoc = HashMap<String, HashValue>;

fn convert(node: &Node) -> HashValue {
    match node {
        Node::Int(value) => HashValue::Int(*value),
        Node::Map(map) => HashValue::Map(
            map.iter()
                .map(|(key, child)| (key.clone(), convert(child)))
                .collect(),
        ),
    }
}

fn construct(document: &NestedDocument) -> Result<HashDoc, AccessError> {
    Ok(document
        .root()
        .iter()
        .map(|(key, node)| (key.clone(), convert(node)))
        .collect())
}

fn child<'a>(map: &'a HashDoc, key: &str) -> Result<&'a HashDoc, AccessError> {
    match map.get(key) {
        Some(HashValue::Map(inner)) => Ok(inner),
        Some(HashValue::Int(_)) => Err(AccessError::NotAMapping(key.to_string())),
        None => Err(AccessError::MissingKey(key.to_string())),
    }
}

fn child_mut<'a>(map: &'a mut HashDoc, key: &str) -> Result<&'a mut HashDoc, AccessError> {
    match map.get_mut(key) {
        Some(HashValue::Map(inner)) => Ok(inner),
        Some(HashValue::Int(_)) => Err(AccessError::NotAMapping(key.to_string())),
        None => Err(AccessError::MissingKey(key.to_string())),
    }
}

fn read_key(map: &HashDoc) -> Result<i64, AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    match child(child(map, l1)?, l2)?.get(l3) {
        Some(HashValue::Int(value)) => Ok(*value),
        Some(HashValue::Map(_)) => Err(AccessError::NotAnInteger(l3.to_string())),
        None => Err(AccessError::MissingKey(l3.to_string())),
    }
}

fn write_key(map: &mut HashDoc, value: i64) -> Result<(), AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    let level2 = child_mut(child_mut(map, l1)?, l2)?;
    match level2.get_mut(l3) {
        Some(leaf) => *leaf = HashValue::Int(value),
        None => {
            level2.insert(l3.to_string(), HashValue::Int(value));
        }
    }
    Ok(())
}

pub(crate) fn implementation() -> Implementation {
    Implementation::builder("HashMap", "HashMap::from(doc)", construct)
        .key_access(read_key, write_key)
        .build()
}
