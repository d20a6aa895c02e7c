//! Write-side descent: set, create-and-set, and delete.
//!
//! Each step rebuilds only the container it passes through and reuses
//! clones of everything else, so the input tree is never touched and a
//! failure anywhere simply drops the partial result.

use tracing::trace;

use crate::array;
use crate::error::{JselError, Result};
use crate::family::Family;
use crate::object::Object;
use crate::path::{Index, PathElement};
use crate::value::Value;

/// What happens at the end of the path.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action<'v> {
    Set(&'v Value),
    Delete,
}

/// One write through a tree of a known family.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mutation<'v> {
    pub(crate) family: Family,
    pub(crate) create_missing: bool,
    pub(crate) action: Action<'v>,
}

impl Mutation<'_> {
    /// Apply this mutation at `path` below `current`, returning the new value.
    pub(crate) fn apply(&self, path: &[PathElement], current: &Value) -> Result<Value> {
        let (segment, rest) = path.split_first().ok_or(JselError::EmptyPath)?;
        trace!(%segment, remaining = rest.len(), create_missing = self.create_missing, "mutate step");

        match segment {
            PathElement::Member(name) => self.member(segment, name, rest, current),
            PathElement::Index(index) => self.index(segment, *index, rest, current),
            PathElement::Selector(name, expected) => {
                self.selector(segment, name, expected, rest, current)
            }
            PathElement::New => self.prepend(segment, rest, current),
        }
    }

    fn placeholder(&self) -> Value {
        Value::make_empty(self.family)
    }

    /// The value stored where nothing existed before: the set value itself at
    /// the end of the path, otherwise the rest of the path grown from an
    /// empty object.
    fn seed(&self, segment: &PathElement, rest: &[PathElement]) -> Result<Value> {
        match (rest.is_empty(), self.action) {
            (true, Action::Set(value)) => Ok(value.clone()),
            (true, Action::Delete) => Err(JselError::NoPath {
                segment: segment.clone(),
            }),
            (false, _) => self.apply(rest, &self.placeholder()),
        }
    }

    fn member(&self, segment: &PathElement, name: &str, rest: &[PathElement], current: &Value) -> Result<Value> {
        match current {
            Value::Object(object) => {
                let mut object = object.clone();
                if rest.is_empty() {
                    match self.action {
                        Action::Set(value) => {
                            object.insert(name.to_owned(), value.clone());
                        }
                        Action::Delete => {
                            object.remove(name);
                        }
                    }
                    return Ok(Value::Object(object));
                }
                let child = match object.get(name) {
                    Some(child) => self.apply(rest, child)?,
                    None if self.create_missing => self.seed(segment, rest)?,
                    None => {
                        return Err(JselError::NoPath {
                            segment: segment.clone(),
                        })
                    }
                };
                object.insert(name.to_owned(), child);
                Ok(Value::Object(object))
            }
            // An empty array has no elements to broadcast over; it is grown
            // like any other empty structure.
            other if self.create_missing && other.is_empty_shaped() => {
                self.member(segment, name, rest, &self.placeholder())
            }
            Value::Array(items) => self.broadcast(segment, name, rest, items),
            _ => Err(JselError::NoPath {
                segment: segment.clone(),
            }),
        }
    }

    /// Member step against an array: distribute over its object elements.
    fn broadcast(&self, segment: &PathElement, name: &str, rest: &[PathElement], items: &[Value]) -> Result<Value> {
        if rest.is_empty() && matches!(self.action, Action::Delete) {
            return Ok(Value::Array(array::remove_member(items, name)));
        }

        if !array::any_has_member(items, name) {
            if !self.create_missing {
                return Err(JselError::NoPath {
                    segment: segment.clone(),
                });
            }
            let value = self.seed(segment, rest)?;
            return Ok(Value::Array(array::insert_member(items, name, &value, self.family)));
        }

        items
            .iter()
            .map(|item| match item {
                Value::Object(object) if object.contains_key(name) => {
                    self.member(segment, name, rest, item)
                }
                other => Ok(other.clone()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn index(&self, segment: &PathElement, index: Index, rest: &[PathElement], current: &Value) -> Result<Value> {
        match current {
            Value::Array(items) => {
                let len = items.len();
                match index.position(len) {
                    Some(pos) => {
                        let mut items = items.clone();
                        match (rest.is_empty(), self.action) {
                            (true, Action::Delete) => {
                                items.remove(pos);
                            }
                            (true, Action::Set(value)) => items[pos] = value.clone(),
                            (false, _) => items[pos] = self.apply(rest, &items[pos])?,
                        }
                        Ok(Value::Array(items))
                    }
                    None if self.create_missing && index.extends(len) => {
                        let mut items = items.clone();
                        items.push(self.seed(segment, rest)?);
                        Ok(Value::Array(items))
                    }
                    None => Err(JselError::IndexOutOfBounds {
                        segment: segment.clone(),
                        len,
                    }),
                }
            }
            other if self.create_missing && other.is_empty_shaped() => {
                self.index(segment, index, rest, &Value::Array(Vec::new()))
            }
            other => Err(JselError::IndexForNonArray {
                segment: segment.clone(),
                value: other.clone(),
            }),
        }
    }

    fn selector(
        &self,
        segment: &PathElement,
        name: &str,
        expected: &Value,
        rest: &[PathElement],
        current: &Value,
    ) -> Result<Value> {
        let items = match current {
            Value::Array(items) => items,
            other if self.create_missing && other.is_empty_shaped() => {
                return self.selector(segment, name, expected, rest, &Value::Array(Vec::new()));
            }
            Value::Object(_) => {
                return Err(JselError::SelectorUsedOnObject {
                    segment: segment.clone(),
                })
            }
            other => {
                return Err(JselError::SelectorUsedOnNonArray {
                    segment: segment.clone(),
                    value: other.clone(),
                })
            }
        };

        let positions = array::select_positions(items, name, expected);

        if rest.is_empty() {
            return match self.action {
                Action::Delete => Ok(Value::Array(array::remove_positions(items, &positions))),
                Action::Set(value) => self.replace_matched(segment, name, expected, items, &positions, value),
            };
        }

        let subset = if positions.is_empty() {
            if !self.create_missing {
                return Err(JselError::NoPath {
                    segment: segment.clone(),
                });
            }
            vec![self.seed_object(name, expected)]
        } else {
            array::pick(items, &positions)
        };

        let replacement = match self.apply(rest, &Value::Array(subset))? {
            Value::Array(replacement) => replacement,
            other => vec![other],
        };
        Ok(Value::Array(array::splice(items, &positions, replacement)))
    }

    /// Final selector step of a set: merge an object into every match, or
    /// splice an array's elements in place of the matches.
    fn replace_matched(
        &self,
        segment: &PathElement,
        name: &str,
        expected: &Value,
        items: &[Value],
        positions: &[usize],
        value: &Value,
    ) -> Result<Value> {
        let no_match = positions.is_empty();
        if no_match && !self.create_missing && (value.is_object() || value.is_array()) {
            return Err(JselError::NoPath {
                segment: segment.clone(),
            });
        }

        match value {
            Value::Object(patch) if no_match => {
                let mut seed = self.seed_object_map(name, expected);
                seed.merge(patch);
                let mut out = items.to_vec();
                out.push(Value::Object(seed));
                Ok(Value::Array(out))
            }
            Value::Object(patch) => Ok(Value::Array(array::merge_at(items, positions, patch))),
            Value::Array(elements) => Ok(Value::Array(array::splice(items, positions, elements.clone()))),
            scalar => Err(JselError::ReplacingObjectWithValue {
                segment: segment.clone(),
                value: scalar.clone(),
            }),
        }
    }

    fn seed_object_map(&self, name: &str, expected: &Value) -> Object {
        Object::from_pairs(self.family, [(name.to_owned(), expected.clone())])
    }

    fn seed_object(&self, name: &str, expected: &Value) -> Value {
        Value::Object(self.seed_object_map(name, expected))
    }

    fn prepend(&self, segment: &PathElement, rest: &[PathElement], current: &Value) -> Result<Value> {
        let value = match (rest.is_empty(), self.action) {
            (true, Action::Set(value)) => value,
            _ => return Err(JselError::MisplacedNew),
        };
        match current {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len() + 1);
                out.push(value.clone());
                out.extend(items.iter().cloned());
                Ok(Value::Array(out))
            }
            other if other.is_empty_shaped() => Ok(Value::Array(vec![value.clone()])),
            other => Err(JselError::IndexForNonArray {
                segment: segment.clone(),
                value: other.clone(),
            }),
        }
    }
}
