//! Object containers, one variant per [`Family`].

use std::collections::hash_map;
use std::collections::HashMap;
use std::slice;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::family::Family;
use crate::value::Value;

/// A mapping from member name to [`Value`].
///
/// The `Ordered` variant follows key-store semantics: inserting an existing
/// name keeps its original position and replaces the value, new names are
/// appended.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Ordered(Vec<(String, Value)>),
    Hashed(HashMap<String, Value>),
}

impl Default for Object {
    fn default() -> Self {
        Object::empty(Family::default())
    }
}

impl Object {
    /// An object with no members in the given family.
    pub fn empty(family: Family) -> Self {
        match family {
            Family::Ordered => Object::Ordered(Vec::new()),
            Family::Hashed => Object::Hashed(HashMap::new()),
        }
    }

    /// Build an object from pairs. Later duplicates overwrite earlier values
    /// while keeping the first position.
    pub fn from_pairs<I>(family: Family, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut object = Object::empty(family);
        for (name, value) in pairs {
            object.insert(name, value);
        }
        object
    }

    pub fn family(&self) -> Family {
        match self {
            Object::Ordered(_) => Family::Ordered,
            Object::Hashed(_) => Family::Hashed,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Object::Ordered(pairs) => pairs.len(),
            Object::Hashed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Object::Ordered(pairs) => pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            Object::Hashed(map) => map.get(name),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace a member, returning the previous value.
    pub fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        match self {
            Object::Ordered(pairs) => match pairs.iter_mut().find(|(k, _)| *k == name) {
                Some((_, slot)) => Some(std::mem::replace(slot, value)),
                None => {
                    pairs.push((name, value));
                    None
                }
            },
            Object::Hashed(map) => map.insert(name, value),
        }
    }

    /// Remove a member. Removing a name that is not present is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        match self {
            Object::Ordered(pairs) => {
                let pos = pairs.iter().position(|(k, _)| k == name)?;
                let (_, old) = pairs.remove(pos);
                pairs.retain(|(k, _)| k != name);
                Some(old)
            }
            Object::Hashed(map) => map.remove(name),
        }
    }

    /// Member-wise union: every member of `other` is inserted, overriding
    /// members of the same name.
    pub fn merge(&mut self, other: &Object) {
        for (name, value) in other {
            self.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        match self {
            Object::Ordered(pairs) => Iter::Ordered(pairs.iter()),
            Object::Hashed(map) => Iter::Hashed(map.iter()),
        }
    }

    pub fn into_pairs(self) -> Vec<(String, Value)> {
        match self {
            Object::Ordered(pairs) => pairs,
            Object::Hashed(map) => map.into_iter().collect(),
        }
    }

    /// Re-encode this object, and every object nested in it, in `family`.
    pub fn into_family(self, family: Family) -> Object {
        let pairs = self
            .into_pairs()
            .into_iter()
            .map(|(name, value)| (name, value.into_family(family)));
        Object::from_pairs(family, pairs)
    }
}

/// Iterator over the members of an [`Object`].
pub enum Iter<'a> {
    Ordered(slice::Iter<'a, (String, Value)>),
    Hashed(hash_map::Iter<'a, String, Value>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Ordered(inner) => inner.next().map(|(k, v)| (k, v)),
            Iter::Hashed(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Ordered(inner) => inner.size_hint(),
            Iter::Hashed(inner) => inner.size_hint(),
        }
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
