//! Object container families and detection of the family a tree uses.
//!
//! A tree's family is decided once, from its first object in depth-first
//! order (the root itself, then the head element of each container). Every
//! other object in the tree must belong to the same family, and every object
//! the engine produces is created in it.

use std::fmt;

use crate::error::{JselError, Result};
use crate::value::Value;

/// The concrete encoding used for objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Association sequence of `(name, value)` pairs; insertion order is kept.
    #[default]
    Ordered,
    /// Hash map; constant-time lookup, no order guarantee.
    Hashed,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Ordered => f.write_str("ordered"),
            Family::Hashed => f.write_str("hashed"),
        }
    }
}

/// Find the family of the first object in the tree, if it has any objects.
///
/// # Examples
///
/// ```
/// use jsel_core::{sample_family, Family, Value};
/// use serde_json::json;
///
/// let tree = Value::from_json(json!([1, {"a": {}}]), Family::Hashed);
/// assert_eq!(sample_family(&tree), Some(Family::Hashed));
/// assert_eq!(sample_family(&Value::from(3)), None);
/// ```
pub fn sample_family(tree: &Value) -> Option<Family> {
    match tree {
        Value::Object(object) => Some(object.family()),
        Value::Array(items) => items.iter().find_map(sample_family),
        _ => None,
    }
}

/// Determine the family of `tree` and check that every object in it agrees.
///
/// Trees without any object (scalars, arrays of scalars, empty arrays) take
/// `fallback`. A tree that mixes families fails with
/// [`JselError::IllegalObject`].
pub fn detect_family(tree: &Value, fallback: Family) -> Result<Family> {
    let family = sample_family(tree).unwrap_or(fallback);
    check_family(tree, family)?;
    Ok(family)
}

fn check_family(value: &Value, family: Family) -> Result<()> {
    match value {
        Value::Object(object) => {
            if object.family() != family {
                return Err(JselError::IllegalObject {
                    expected: family,
                    found: object.family(),
                });
            }
            object.iter().try_for_each(|(_, child)| check_family(child, family))
        }
        Value::Array(items) => items.iter().try_for_each(|item| check_family(item, family)),
        _ => Ok(()),
    }
}
