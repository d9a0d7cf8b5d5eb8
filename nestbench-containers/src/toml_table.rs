//! `toml::Table` container

use nestbench_core::{AccessError, Implementation, NestedDocument};
use toml::{Table, Value};

fn construct(document: &NestedDocument) -> Result<Table, AccessError> {
    match Value::try_from(document) {
        Ok(Value::Table(table)) => Ok(table),
        Ok(other) => Err(AccessError::Construction(format!(
            "expected a table, got {}",
            other.type_str()
        ))),
        Err(e) => Err(AccessError::Construction(e.to_string())),
    }
}

fn table<'a>(table: &'a Table, key: &str) -> Result<&'a Table, AccessError> {
    table
        .get(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))?
        .as_table()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))
}

fn table_mut<'a>(table: &'a mut Table, key: &str) -> Result<&'a mut Table, AccessError> {
    table
        .get_mut(key)
        .ok_or_else(|| AccessError::MissingKey(key.to_string()))?
        .as_table_mut()
        .ok_or_else(|| AccessError::NotAMapping(key.to_string()))
}

fn read_key(root: &Table) -> Result<i64, AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    table(table(root, l1)?, l2)?
        .get(l3)
        .ok_or_else(|| AccessError::MissingKey(l3.to_string()))?
        .as_integer()
        .ok_or_else(|| AccessError::NotAnInteger(l3.to_string()))
}

fn write_key(root: &mut Table, value: i64) -> Result<(), AccessError> {
    let [l1, l2, l3] = NestedDocument::PATH;
    let level2 = table_mut(table_mut(root, l1)?, l2)?;
    match level2.get_mut(l3) {
        Some(leaf) => *leaf = Value::Integer(value),
        None => {
            level2.insert(l3.to_string(), Value::Integer(value));
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
    fn test_document_becomes_nested_tables() {
        let root = construct(&NestedDocument::fixed()).unwrap();
        assert_eq!(read_key(&root).unwrap(), 100);

        let rendered = toml::to_string(&root).unwrap();
        assert_eq!(toml::from_str::<Table>(&rendered).unwrap(), root);
    }

    #[test]
    fn test_write_then_read() {
        let mut root = construct(&NestedDocument::fixed()).unwrap();
        write_key(&mut root, 200).unwrap();
        write_key(&mut root, 201).unwrap();
        assert_eq!(read_key(&root).unwrap(), 201);
        assert_eq!(table(table(&root, "level1").unwrap(), "level2").unwrap().len(), 1);
    }
}
