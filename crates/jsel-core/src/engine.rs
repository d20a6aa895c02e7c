//! Public entry points: family detection, path validation, and dispatch to
//! the walk and mutation engines.

use std::borrow::Cow;

use tracing::debug;

use crate::error::{JselError, Result};
use crate::family::{detect_family, Family};
use crate::mutate::{Action, Mutation};
use crate::path::{Path, PathElement};
use crate::value::Value;
use crate::walk::walk;

/// Call configuration shared by every operation.
///
/// The only setting is the family used for trees that contain no object at
/// all (scalars, empty arrays, arrays of scalars); any object created in such
/// a tree is built in this family.
///
/// # Examples
///
/// ```
/// use jsel_core::{Engine, Family, Path, Value};
///
/// let engine = Engine::new().with_default_family(Family::Hashed);
/// let path: Path = "a.b".parse().unwrap();
/// let tree = engine.set_p(&path, &Value::Null, 1).unwrap();
/// assert_eq!(tree.as_object().map(|o| o.family()), Some(Family::Hashed));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    default_family: Family,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_family(mut self, family: Family) -> Self {
        self.default_family = family;
        self
    }

    pub fn default_family(&self) -> Family {
        self.default_family
    }

    /// The family every object in `tree` uses, or the default family if it has none.
    pub fn family_of(&self, tree: &Value) -> Result<Family> {
        detect_family(tree, self.default_family)
    }

    /// Read the value at `path`. `Ok(None)` means the path leads nowhere.
    pub fn get(&self, path: &Path, tree: &Value) -> Result<Option<Value>> {
        let family = self.family_of(tree)?;
        debug!(op = "get", %path, %family, "resolving path");
        if path.iter().any(PathElement::is_new) {
            return Err(JselError::MisplacedNew);
        }
        let path = path.in_family(family);
        walk(path.elements(), tree)
            .map(|found| found.map(Cow::into_owned))
            .inspect_err(|err| debug!(op = "get", %path, kind = ?err.kind(), "read failed"))
    }

    /// Read the value at `path`, substituting `default` when it is absent.
    pub fn get_or(&self, path: &Path, tree: &Value, default: impl Into<Value>) -> Result<Value> {
        Ok(self.get(path, tree)?.unwrap_or_else(|| default.into()))
    }

    /// Replace or insert the value at `path`. Every segment before the last
    /// must already exist.
    pub fn set(&self, path: &Path, tree: &Value, value: impl Into<Value>) -> Result<Value> {
        self.mutate("set", path, tree, false, Some(value.into()))
    }

    /// Like [`Engine::set`], but missing objects and arrays along the way are created.
    pub fn set_p(&self, path: &Path, tree: &Value, value: impl Into<Value>) -> Result<Value> {
        self.mutate("set_p", path, tree, true, Some(value.into()))
    }

    /// Remove the value at `path`. A missing final member is not an error;
    /// a missing intermediate segment is.
    pub fn delete(&self, path: &Path, tree: &Value) -> Result<Value> {
        self.mutate("delete", path, tree, false, None)
    }

    /// Shared write path; `value` is `None` for a delete.
    fn mutate(
        &self,
        op: &'static str,
        path: &Path,
        tree: &Value,
        create_missing: bool,
        value: Option<Value>,
    ) -> Result<Value> {
        let family = self.family_of(tree)?;
        debug!(op, %path, %family, "applying path mutation");

        let (last, init) = path.elements().split_last().ok_or(JselError::EmptyPath)?;
        if init.iter().any(PathElement::is_new) || (last.is_new() && value.is_none()) {
            return Err(JselError::MisplacedNew);
        }

        // Stored values and selector values share the tree's family like
        // every other object.
        let value = value.map(|value| value.into_family(family));
        let path = path.in_family(family);
        let action = match &value {
            Some(value) => Action::Set(value),
            None => Action::Delete,
        };

        Mutation {
            family,
            create_missing,
            action,
        }
        .apply(path.elements(), tree)
        .inspect_err(|err| debug!(op, %path, kind = ?err.kind(), "mutation failed"))
    }
}
