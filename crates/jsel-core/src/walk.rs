//! Read-side descent: resolve a path against a tree.
//!
//! Plain member and index steps borrow from the input tree. Selector and
//! broadcast steps build a composite array, and everything resolved below
//! them is owned.

use std::borrow::Cow;

use tracing::trace;

use crate::array;
use crate::error::{JselError, Result};
use crate::path::{Index, PathElement};
use crate::value::Value;

/// Resolve `path` against `current`. `Ok(None)` means absent.
pub(crate) fn walk<'a>(path: &[PathElement], current: &'a Value) -> Result<Option<Cow<'a, Value>>> {
    let Some((segment, rest)) = path.split_first() else {
        return Ok(Some(Cow::Borrowed(current)));
    };
    trace!(%segment, remaining = rest.len(), "walk step");

    match (segment, current) {
        (PathElement::New, _) => Err(JselError::MisplacedNew),
        (_, Value::Null) => Ok(None),

        (PathElement::Member(name), Value::Object(object)) => match object.get(name) {
            Some(child) => walk(rest, child),
            None => Ok(None),
        },
        (PathElement::Member(name), Value::Array(items)) => {
            let collected = array::broadcast_values(items, name);
            if collected.is_empty() {
                return Ok(None);
            }
            owned(rest, Value::Array(collected))
        }
        (PathElement::Member(_), _) => Ok(None),

        (PathElement::Selector(..), Value::Object(_)) => Err(JselError::SelectorUsedOnObject {
            segment: segment.clone(),
        }),
        (PathElement::Selector(name, expected), Value::Array(items)) => {
            owned(rest, Value::Array(array::select(items, name, expected)))
        }
        (PathElement::Selector(..), scalar) => Err(JselError::SelectorForNonArray {
            segment: segment.clone(),
            value: scalar.clone(),
        }),

        (PathElement::Index(index), Value::Array(items)) => match index.position(items.len()) {
            Some(pos) => walk(rest, &items[pos]),
            None if matches!(index, Index::At(_)) => Err(JselError::IndexOutOfBounds {
                segment: segment.clone(),
                len: items.len(),
            }),
            None => Ok(None),
        },
        (PathElement::Index(_), other) => Err(JselError::IndexForNonArray {
            segment: segment.clone(),
            value: other.clone(),
        }),
    }
}

/// Continue the walk from a value built during this step.
fn owned<'a>(rest: &[PathElement], composite: Value) -> Result<Option<Cow<'a, Value>>> {
    Ok(walk(rest, &composite)?.map(|found| Cow::Owned(found.into_owned())))
}
