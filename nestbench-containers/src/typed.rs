//! Plain struct container
//!
//! Attribute access is ordinary field access; there is no key-style access.

use nestbench_core::{AccessError, Implementation, NestedDocument};

/// Root record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typed {
    /// First level
    pub level1: Level1,
}

/// Second level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level1 {
    /// Second level
    pub level2: Level2,
}

/// Innermost level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level2 {
    /// The benchmarked leaf
    pub level3: i64,
}

impl TryFrom<&NestedDocument> for Typed {
    type Error = AccessError;

    fn try_from(document: &NestedDocument) -> Result<Self, Self::Error> {
        Ok(Typed {
            level1: Level1 {
                level2: Level2 {
                    level3: document.leaf()?,
                },
            },
        })
    }
}

fn construct(document: &NestedDocument) -> Result<Typed, AccessError> {
    Typed::try_from(document)
}

fn read_dot(typed: &Typed) -> Result<i64, AccessError> {
    Ok(typed.level1.level2.level3)
}

fn write_dot(typed: &mut Typed, value: i64) -> Result<(), AccessError> {
    typed.level1.level2.level3 = value;
    Ok(())
}

pub(crate) fn implementation() -> Implementation {
    Implementation::builder(
        "Typed",
        "Typed { level1: Level1 { level2: Level2 { level3 } } }",
        construct,
    )
    .dot_access(read_dot, write_dot)
    .build()
}
