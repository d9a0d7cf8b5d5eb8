#![warn(missing_docs)]
//! nestbench Containers
//!
//! The nested-mapping implementations the harness compares, and the default
//! registry that declares their capabilities.
//!
//! | Name          | Key | Dot | Notes                                  |
//! |---------------|-----|-----|----------------------------------------|
//! | `HashMap`     | yes | no  | std baseline                           |
//! | `BTreeMap`    | yes | no  | ordered std map                        |
//! | `serde_json`  | yes | no  | `serde_json::Value`, `json` feature    |
//! | `toml::Table` | yes | no  | `toml::Table`, `toml` feature          |
//! | `DotMap`      | yes | yes | dotted-path attribute access           |
//! | `Typed`       | no  | yes | plain struct fields                    |
//!
//! Containers behind a disabled feature stay registered so the capability
//! matrix is complete, but fail their availability probe.

mod btree_map;
mod dot_map;
mod hash_map;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "toml")]
mod toml_table;
mod typed;

pub use btree_map::{BTreeDoc, BTreeValue};
pub use dot_map::{DotMap, DotValue};
pub use hash_map::{HashDoc, HashValue};
pub use typed::{Level1, Level2, Typed};

use nestbench_core::{Implementation, Registry, RegistryError};

const JSON_NAME: &str = "serde_json";
const JSON_CONSTRUCTOR: &str = "serde_json::to_value(doc)";
const TOML_NAME: &str = "toml::Table";
const TOML_CONSTRUCTOR: &str = "toml::Value::try_from(doc)";

/// Every known container, in report order.
pub fn default_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    registry.register(baseline())?;
    registry.register(btree_map::implementation())?;
    registry.register(json_value())?;
    registry.register(toml_value())?;
    registry.register(dot_map::implementation())?;
    registry.register(typed::implementation())?;
    Ok(registry)
}

/// The std `HashMap` baseline, usable on its own in a custom registry.
pub fn baseline() -> Implementation {
    hash_map::implementation()
}

fn json_value() -> Implementation {
    #[cfg(feature = "json")]
    {
        json::implementation(JSON_NAME, JSON_CONSTRUCTOR)
    }
    #[cfg(not(feature = "json"))]
    {
        Implementation::unavailable(JSON_NAME, JSON_CONSTRUCTOR, true, false)
    }
}

fn toml_value() -> Implementation {
    #[cfg(feature = "toml")]
    {
        toml_table::implementation(TOML_NAME, TOML_CONSTRUCTOR)
    }
    #[cfg(not(feature = "toml"))]
    {
        Implementation::unavailable(TOML_NAME, TOML_CONSTRUCTOR, true, false)
    }
}
