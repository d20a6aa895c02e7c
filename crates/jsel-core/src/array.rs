//! Array primitives shared by the walk and mutation engines: selector
//! matching, member broadcast, and splicing a rewritten subset back into
//! its array.

use crate::family::Family;
use crate::object::Object;
use crate::value::Value;

/// Whether `item` is an object whose member `name` equals `expected`.
pub(crate) fn matches_selector(item: &Value, name: &str, expected: &Value) -> bool {
    item.as_object()
        .and_then(|object| object.get(name))
        .is_some_and(|actual| actual == expected)
}

/// Positions of the elements matched by a selector, in ascending order.
pub(crate) fn select_positions(items: &[Value], name: &str, expected: &Value) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_selector(item, name, expected))
        .map(|(pos, _)| pos)
        .collect()
}

/// Clone the elements at `positions`.
pub(crate) fn pick(items: &[Value], positions: &[usize]) -> Vec<Value> {
    positions.iter().map(|&pos| items[pos].clone()).collect()
}

/// The elements matched by a selector, in array order.
pub(crate) fn select(items: &[Value], name: &str, expected: &Value) -> Vec<Value> {
    items
        .iter()
        .filter(|item| matches_selector(item, name, expected))
        .cloned()
        .collect()
}

/// Collect member `name` from every object element. Array-valued members are
/// concatenated; every other value, objects included, is kept whole.
pub(crate) fn broadcast_values(items: &[Value], name: &str) -> Vec<Value> {
    let mut collected = Vec::new();
    for value in items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|object| object.get(name))
    {
        match value {
            Value::Array(inner) => collected.extend(inner.iter().cloned()),
            other => collected.push(other.clone()),
        }
    }
    collected
}

/// Whether any object element carries member `name`.
pub(crate) fn any_has_member(items: &[Value], name: &str) -> bool {
    items
        .iter()
        .filter_map(Value::as_object)
        .any(|object| object.contains_key(name))
}

/// Remove member `name` from every object element.
pub(crate) fn remove_member(items: &[Value], name: &str) -> Vec<Value> {
    items
        .iter()
        .map(|item| match item {
            Value::Object(object) => {
                let mut object = object.clone();
                object.remove(name);
                Value::Object(object)
            }
            other => other.clone(),
        })
        .collect()
}

/// Set member `name` on every object element. An array without object
/// elements gets a new one-member object appended instead.
pub(crate) fn insert_member(items: &[Value], name: &str, value: &Value, family: Family) -> Vec<Value> {
    let mut out: Vec<Value> = items
        .iter()
        .map(|item| match item {
            Value::Object(object) => {
                let mut object = object.clone();
                object.insert(name.to_owned(), value.clone());
                Value::Object(object)
            }
            other => other.clone(),
        })
        .collect();
    if !items.iter().any(Value::is_object) {
        out.push(Value::Object(Object::from_pairs(
            family,
            [(name.to_owned(), value.clone())],
        )));
    }
    out
}

/// Merge `patch` into each element at `positions`.
pub(crate) fn merge_at(items: &[Value], positions: &[usize], patch: &Object) -> Vec<Value> {
    let mut out = items.to_vec();
    for &pos in positions {
        if let Value::Object(object) = &mut out[pos] {
            object.merge(patch);
        }
    }
    out
}

/// Remove the elements at `positions`.
pub(crate) fn remove_positions(items: &[Value], positions: &[usize]) -> Vec<Value> {
    items
        .iter()
        .enumerate()
        .filter(|(pos, _)| !positions.contains(pos))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Put `replacement` where the elements at `positions` were.
///
/// A same-sized replacement is swapped in element by element. Otherwise each
/// replacement element that is still equal to one of the matched originals
/// (searched in order) stays at that original's position, and matched
/// originals with no counterpart are dropped. Elements without a counterpart
/// go just before the next surviving original, or just after the last one.
/// With no survivors they go to the first matched position, or to the end
/// when nothing was matched. Unmatched elements never move.
pub(crate) fn splice(items: &[Value], positions: &[usize], replacement: Vec<Value>) -> Vec<Value> {
    if positions.len() == replacement.len() {
        let mut out = items.to_vec();
        for (&pos, value) in positions.iter().zip(replacement) {
            out[pos] = value;
        }
        return out;
    }

    // slots[i] holds what goes where items[positions[i]] was.
    let mut slots: Vec<Vec<Value>> = vec![Vec::new(); positions.len()];
    let mut pending = Vec::new();
    let mut next = 0;
    let mut last_kept = None;
    for value in replacement {
        match (next..positions.len()).find(|&i| items[positions[i]] == value) {
            Some(i) => {
                slots[i].append(&mut pending);
                slots[i].push(value);
                next = i + 1;
                last_kept = Some(i);
            }
            None => pending.push(value),
        }
    }
    if let Some(i) = last_kept.or((!slots.is_empty()).then_some(0)) {
        slots[i].append(&mut pending);
    }

    let mut out = Vec::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        match positions.binary_search(&pos) {
            Ok(i) => out.append(&mut slots[i]),
            Err(_) => out.push(item.clone()),
        }
    }
    out.extend(pending);
    out
}
