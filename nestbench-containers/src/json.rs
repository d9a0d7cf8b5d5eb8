//! `serde_json::Value` container
//!
//! A dynamically typed document; key-style access walks object members.

use nestbench_core::{AccessError, Implementation, NestedDocument};
use serde_json::Value;

fn construct(document: &NestedDocument) -> Result<Value, AccessError> {
    serde_json::to_value(document).map_err(|e| AccessError::Construction(e.to_string()))
}

fn member<'a>(value: &'a Value, key: &str) -> Result<&'a Value, AccessError> {
    value
        .as_object()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))?
        .get(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))
}

fn member_mut<'a>(value: &'a mut Value, key: &str) -> Result<&'a mut Value, AccessError> {
    value
        .as_object_mut()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))?
        .get_mut(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))
}

fn read_key(value: &Value) -> Result<i64, AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    member(member(member(value, l1)?, l2)?, l3)?
        .as_i64()
        .ok_or_else(|| AccessError::NotAnInteger(l3.to_string()))
}

fn write_key(value: &mut Value, new_value: i64) -> Result<(), AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    let level2 = member_mut(member_mut(value, l1)?, l2)?
        .as_object_mut()
        .ok_or_else(|| AccessError::NotAMapping(l2.to_string()))?;
    match level2.get_mut(l3) {
        Some(leaf) => *leaf = Value::from(new_value),
        None => {
            level2.insert(l3.to_string(), Value::from(new_value));
        }
    }
    Ok(())
}

pub(crate) fn implementation(name: &'static str, constructor: &'static str) -> Implementation {
    Implementation::builder(name, constructor, construct)
        .key_access(read_key, write_key)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_as_object() {
        let value = construct(&NestedDocument::fixed()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"level1": {"level2": {"level3": 100}}})
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut value = construct(&NestedDocument::fixed()).unwrap();
        write_key(&mut value, 200).unwrap();
        assert_eq!(read_key(&value).unwrap(), 200);
        assert_eq!(
            value,
            serde_json::json!({"level1": {"level2": {"level3": 200}}})
        );
    }

    #[test]
    fn test_write_inserts_missing_leaf() {
        let mut value = serde_json::json!({"level1": {"level2": {}}});
        write_key(&mut value, 7).unwrap();
        assert_eq!(read_key(&value).unwrap(), 7);
    }

    #[test]
    fn test_non_integer_leaf() {
        let value = serde_json::json!({"level1": {"level2": {"level3": "x"}}});
        assert_eq!(
            read_key(&value),
            Err(AccessError::NotAnInteger("level3".to_string()))
        );
    }
}
