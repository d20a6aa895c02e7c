//! # jsel-core
//!
//! Path-addressed reads and writes over in-memory JSON-shaped trees.
//!
//! A [`Path`] walks a [`Value`] tree through object members, 1-based array
//! indices, and selectors that filter an array down to the objects whose
//! member equals a given value. Member steps against an array broadcast over
//! its object elements. Writes never touch the input: every operation returns
//! a new tree, and a failed operation returns only the error.
//!
//! Objects come in two interchangeable families ([`Family::Ordered`] and
//! [`Family::Hashed`]). The family is detected from the input tree and every
//! object in the result, including ones created on the way, uses it.
//!
//! ## Quick start
//!
//! ```rust
//! use jsel_core::{get, set, set_p, delete, Family, Path, Value};
//! use serde_json::json;
//!
//! let tree = Value::from_json(
//!     json!({"items": [{"name": "a", "age": 1}, {"name": "b"}]}),
//!     Family::Ordered,
//! );
//!
//! // Broadcast read across the array's objects.
//! let ages: Path = "items.age".parse().unwrap();
//! assert_eq!(get(&ages, &tree).unwrap(), Some(Value::from(vec![Value::from(1)])));
//!
//! // Create a member inside the selected element.
//! let b_age: Path = "items[name=b].age".parse().unwrap();
//! let updated = set_p(&b_age, &tree, 7).unwrap();
//! assert_eq!(
//!     serde_json::Value::from(&updated),
//!     json!({"items": [{"name": "a", "age": 1}, {"name": "b", "age": 7}]})
//! );
//!
//! // Prepend to the array.
//! let front: Path = "items[new]".parse().unwrap();
//! let updated = set(&front, &updated, "first").unwrap();
//! assert_eq!(get(&"items[1]".parse().unwrap(), &updated).unwrap(), Some(Value::from("first")));
//!
//! // Deleting a member that is not there leaves the tree as it was.
//! let missing: Path = "nothing".parse().unwrap();
//! assert_eq!(delete(&missing, &tree).unwrap(), tree);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` tree and `serde_json` interop
//! - [`object`] — `Object` containers, one per family
//! - [`family`] — family detection and consistency checks
//! - [`path`] — `Path`/`PathElement` and the textual path form
//! - [`engine`] — `Engine` configuration and the public operations
//! - [`error`] — error types

mod array;
pub mod engine;
pub mod error;
pub mod family;
mod mutate;
pub mod object;
pub mod path;
pub mod value;
mod walk;

pub use engine::Engine;
pub use error::{ErrorKind, JselError, Result};
pub use family::{detect_family, sample_family, Family};
pub use object::Object;
pub use path::{Index, Path, PathElement};
pub use value::Value;

/// Read the value at `path`; `Ok(None)` when nothing is there.
///
/// ```
/// use jsel_core::{get, path, Family, Index, Value};
/// use serde_json::json;
///
/// let tree = Value::from_json(json!({"xs": [10, 20]}), Family::Ordered);
/// assert_eq!(get(&path!["xs", Index::Last], &tree).unwrap(), Some(Value::from(20)));
/// assert_eq!(get(&path!["ys"], &tree).unwrap(), None);
/// ```
pub fn get(path: &Path, tree: &Value) -> Result<Option<Value>> {
    Engine::default().get(path, tree)
}

/// Read the value at `path`, or `default` when nothing is there.
pub fn get_or(path: &Path, tree: &Value, default: impl Into<Value>) -> Result<Value> {
    Engine::default().get_or(path, tree, default)
}

/// Replace or insert the value at `path`; intermediate segments must exist.
pub fn set(path: &Path, tree: &Value, value: impl Into<Value>) -> Result<Value> {
    Engine::default().set(path, tree, value)
}

/// Replace or insert the value at `path`, creating missing structure.
pub fn set_p(path: &Path, tree: &Value, value: impl Into<Value>) -> Result<Value> {
    Engine::default().set_p(path, tree, value)
}

/// Remove the value at `path`.
pub fn delete(path: &Path, tree: &Value) -> Result<Value> {
    Engine::default().delete(path, tree)
}
