/// Write-path tests for `set` (existing structure only) and `set_p`
/// (creates missing structure).
use jsel_core::{get, path, set, set_p, ErrorKind, Family, Index, JselError, Path, PathElement, Value};
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn tree(json: serde_json::Value) -> Value {
    Value::from_json(json, Family::Ordered)
}

fn json_of(value: &Value) -> serde_json::Value {
    serde_json::Value::from(value)
}

fn p(src: &str) -> Path {
    src.parse().unwrap()
}

fn inventory() -> Value {
    tree(json!({
        "store": "north",
        "items": [
            {"id": 1, "name": "lamp", "age": 3},
            {"id": 2, "name": "desk"},
            {"id": 3, "name": "chair", "age": 7}
        ]
    }))
}

// ============================================================================
// 1. Members
// ============================================================================

#[test]
fn set_replaces_existing_member() {
    let out = set(&p("store"), &inventory(), "south").unwrap();
    assert_eq!(get(&p("store"), &out).unwrap(), Some(Value::from("south")));
}

#[test]
fn set_inserts_missing_final_member() {
    let out = set(&p("owner"), &inventory(), "Kim").unwrap();
    assert_eq!(json_of(&out)["owner"], json!("Kim"));
}

#[test]
fn set_keeps_member_order() {
    let t = tree(json!({"a": 1, "b": 2, "c": 3}));
    let out = set(&p("b"), &t, 20).unwrap();
    assert_eq!(out.to_string(), r#"{"a":1,"b":20,"c":3}"#);

    let out = set(&p("d"), &t, 4).unwrap();
    assert_eq!(out.to_string(), r#"{"a":1,"b":2,"c":3,"d":4}"#);
}

#[test]
fn set_fails_on_missing_intermediate() {
    let err = set(&p("meta.created"), &inventory(), "today").unwrap_err();
    assert_eq!(
        err,
        JselError::NoPath {
            segment: PathElement::from("meta"),
        }
    );
}

#[test]
fn set_fails_through_scalar() {
    let err = set(&p("store.code"), &inventory(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);
}

#[test]
fn set_p_creates_nested_objects() {
    let out = set_p(&p("meta.audit.created"), &inventory(), "today").unwrap();
    assert_eq!(json_of(&out)["meta"], json!({"audit": {"created": "today"}}));
}

#[test]
fn set_p_replaces_null_with_structure() {
    let t = tree(json!({"meta": null}));
    let out = set_p(&p("meta.audit"), &t, true).unwrap();
    assert_eq!(json_of(&out), json!({"meta": {"audit": true}}));
}

#[test]
fn set_p_grows_empty_array_into_object() {
    let t = tree(json!({"a": []}));
    let out = set_p(&p("a.b"), &t, 1).unwrap();
    assert_eq!(json_of(&out), json!({"a": {"b": 1}}));
    assert_eq!(get(&p("a.b"), &out).unwrap(), Some(Value::from(1)));
}

#[test]
fn set_without_create_on_empty_array_fails() {
    let t = tree(json!({"a": []}));
    let err = set(&p("a.b"), &t, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);
}

#[test]
fn set_p_still_fails_through_scalar() {
    let err = set_p(&p("store.code"), &inventory(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);
}

#[test]
fn set_whole_object_value() {
    let value = tree(json!({"street": "Main", "no": 5}));
    let out = set(&p("address"), &inventory(), value.clone()).unwrap();
    assert_eq!(get(&p("address"), &out).unwrap(), Some(value));
}

// ============================================================================
// 2. Indices
// ============================================================================

#[test]
fn set_index_replaces_positionally() {
    let out = set(&p("items[2]"), &inventory(), "gone").unwrap();
    assert_eq!(json_of(&out)["items"][1], json!("gone"));
    assert_eq!(json_of(&out)["items"].as_array().unwrap().len(), 3);
}

#[test]
fn set_through_index() {
    let out = set(&p("items[last].name"), &inventory(), "stool").unwrap();
    assert_eq!(json_of(&out)["items"][2]["name"], json!("stool"));
}

#[test]
fn set_index_out_of_bounds() {
    let err = set(&p("items[4]"), &inventory(), 1).unwrap_err();
    assert_eq!(
        err,
        JselError::IndexOutOfBounds {
            segment: PathElement::Index(Index::At(4)),
            len: 3,
        }
    );
}

#[test]
fn set_p_appends_at_next_index() {
    let out = set_p(&p("items[4]"), &inventory(), "extra").unwrap();
    assert_eq!(json_of(&out)["items"][3], json!("extra"));

    let err = set_p(&p("items[9]"), &inventory(), "extra").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn set_p_creates_array_for_index() {
    let out = set_p(&p("log[first].msg"), &inventory(), "hi").unwrap();
    assert_eq!(json_of(&out)["log"], json!([{"msg": "hi"}]));
}

#[test]
fn set_index_on_scalar_fails() {
    let err = set(&path!["store", Index::First], &inventory(), 1).unwrap_err();
    assert_eq!(
        err,
        JselError::IndexForNonArray {
            segment: PathElement::Index(Index::First),
            value: Value::from("north"),
        }
    );
}

// ============================================================================
// 3. New
// ============================================================================

#[test]
fn new_prepends_to_array() {
    let t = inventory();
    let out = set(&p("items[new]"), &t, "first!").unwrap();
    let items = json_of(&out)["items"].clone();
    assert_eq!(items.as_array().unwrap().len(), 4);
    assert_eq!(items[0], json!("first!"));
    assert_eq!(items[1]["id"], json!(1));
}

#[test]
fn new_creates_array_from_null_or_empty() {
    let t = tree(json!({"a": null, "b": {}, "c": []}));
    for member in ["a", "b", "c"] {
        let out = set(&path![member, PathElement::New], &t, 1).unwrap();
        assert_eq!(json_of(&out)[member], json!([1]), "{member}");
    }
}

#[test]
fn new_on_missing_member_needs_set_p() {
    let err = set(&p("tags[new]"), &inventory(), "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);

    let out = set_p(&p("tags[new]"), &inventory(), "x").unwrap();
    assert_eq!(json_of(&out)["tags"], json!(["x"]));
}

#[test]
fn new_on_non_empty_object_fails() {
    let t = tree(json!({"a": {"k": 1}}));
    let err = set(&p("a[new]"), &t, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexForNonArray);
}

#[test]
fn new_must_be_last() {
    let err = set_p(&p("items[new].name"), &inventory(), 1).unwrap_err();
    assert_eq!(err, JselError::MisplacedNew);
}

// ============================================================================
// 4. Broadcast
// ============================================================================

#[test]
fn broadcast_set_updates_only_objects_with_member() {
    let t = tree(json!([{"age": 1}, {"name": "x"}, {"age": 2}]));
    let out = set(&p("age"), &t, 99).unwrap();
    assert_eq!(json_of(&out), json!([{"age": 99}, {"name": "x"}, {"age": 99}]));
}

#[test]
fn broadcast_set_without_any_member_fails() {
    let t = tree(json!([{"name": "x"}, 3]));
    let err = set(&p("age"), &t, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);
}

#[test]
fn broadcast_set_p_adds_member_to_every_object() {
    let t = tree(json!([{"name": "x"}, 3, {"name": "y"}]));
    let out = set_p(&p("age"), &t, 1).unwrap();
    assert_eq!(
        json_of(&out),
        json!([{"name": "x", "age": 1}, 3, {"name": "y", "age": 1}])
    );
}

#[test]
fn broadcast_set_p_on_array_without_objects_appends_one() {
    let t = tree(json!({"xs": [1, 2]}));
    let out = set_p(&p("xs.flag"), &t, true).unwrap();
    assert_eq!(json_of(&out), json!({"xs": [1, 2, {"flag": true}]}));
}

#[test]
fn broadcast_set_descends_into_each_match() {
    let t = tree(json!({"teams": [
        {"lead": {"name": "Ana"}},
        {"size": 3},
        {"lead": {"name": "Bo"}}
    ]}));
    let out = set(&p("teams.lead.name"), &t, "TBD").unwrap();
    assert_eq!(
        json_of(&out)["teams"],
        json!([{"lead": {"name": "TBD"}}, {"size": 3}, {"lead": {"name": "TBD"}}])
    );
}

// ============================================================================
// 5. Selectors
// ============================================================================

#[test]
fn selector_then_member_updates_in_place() {
    let out = set(&p("items[id=2].name"), &inventory(), "table").unwrap();
    assert_eq!(
        json_of(&out)["items"],
        json!([
            {"id": 1, "name": "lamp", "age": 3},
            {"id": 2, "name": "table"},
            {"id": 3, "name": "chair", "age": 7}
        ])
    );
}

#[test]
fn selector_then_missing_member_needs_set_p() {
    let err = set(&p("items[id=2].age"), &inventory(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);

    let out = set_p(&p("items[id=2].age"), &inventory(), 1).unwrap();
    assert_eq!(json_of(&out)["items"][1], json!({"id": 2, "name": "desk", "age": 1}));
}

#[test]
fn final_selector_merges_object_into_matches() {
    let t = tree(json!([
        {"kind": "a", "n": 1},
        {"kind": "b", "n": 2},
        {"kind": "a", "n": 3}
    ]));
    let patch = tree(json!({"n": 0, "seen": true}));
    let out = set(&p("[kind=a]"), &t, patch).unwrap();
    assert_eq!(
        json_of(&out),
        json!([
            {"kind": "a", "n": 0, "seen": true},
            {"kind": "b", "n": 2},
            {"kind": "a", "n": 0, "seen": true}
        ])
    );
}

#[test]
fn final_selector_with_scalar_fails() {
    let err = set(&p("items[id=1]"), &inventory(), 5).unwrap_err();
    assert_eq!(
        err,
        JselError::ReplacingObjectWithValue {
            segment: PathElement::select("id", 1),
            value: Value::from(5),
        }
    );
}

#[test]
fn final_selector_without_match() {
    let patch = tree(json!({"name": "rug"}));

    let err = set(&p("items[id=9]"), &inventory(), patch.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPath);

    let out = set_p(&p("items[id=9]"), &inventory(), patch).unwrap();
    assert_eq!(json_of(&out)["items"][3], json!({"id": 9, "name": "rug"}));
}

#[test]
fn final_selector_with_array_splices_elements() {
    let t = tree(json!([{"k": 1}, {"k": 2}, {"k": 1}, {"k": 3}]));
    let replacement = tree(json!([{"k": 10}]));
    let out = set(&p("[k=1]"), &t, replacement).unwrap();
    assert_eq!(json_of(&out), json!([{"k": 10}, {"k": 2}, {"k": 3}]));
}

#[test]
fn selector_seed_is_created_by_set_p() {
    let t = tree(json!({"users": []}));
    let out = set_p(&p("users[login=kim].email"), &t, "kim@example.com").unwrap();
    assert_eq!(
        json_of(&out),
        json!({"users": [{"login": "kim", "email": "kim@example.com"}]})
    );
}

#[test]
fn selector_on_missing_array_is_created_by_set_p() {
    let out = set_p(&p("users[login=kim].admin"), &inventory(), false).unwrap();
    assert_eq!(json_of(&out)["users"], json!([{"login": "kim", "admin": false}]));
}

#[test]
fn selector_then_new_prepends_inside_each_match() {
    let t = tree(json!({"posts": [
        {"id": 1, "tags": ["a"]},
        {"id": 2, "tags": ["b"]}
    ]}));
    let out = set(&p("posts[id=2].tags[new]"), &t, "hot").unwrap();
    assert_eq!(
        json_of(&out)["posts"],
        json!([{"id": 1, "tags": ["a"]}, {"id": 2, "tags": ["hot", "b"]}])
    );
}

#[test]
fn selector_seed_lands_after_last_match() {
    let t = tree(json!({"rows": [
        {"g": 1, "v": "a"},
        {"other": true},
        {"g": 1, "v": "b"},
        {"tail": true}
    ]}));
    let out = set_p(&p("rows[g=1][v=c].w"), &t, 0).unwrap();
    assert_eq!(
        json_of(&out)["rows"],
        json!([
            {"g": 1, "v": "a"},
            {"other": true},
            {"g": 1, "v": "b"},
            {"v": "c", "w": 0},
            {"tail": true}
        ])
    );
}

#[test]
fn selector_on_object_fails() {
    let err = set(&p("items[first][id=1]"), &inventory(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SelectorUsedOnObject);
}

#[test]
fn selector_on_scalar_fails() {
    let err = set(&p("store[id=1].x"), &inventory(), 1).unwrap_err();
    assert_eq!(
        err,
        JselError::SelectorUsedOnNonArray {
            segment: PathElement::select("id", 1),
            value: Value::from("north"),
        }
    );
}

// ============================================================================
// 6. Contract
// ============================================================================

#[test]
fn empty_path_is_rejected() {
    let err = set(&Path::default(), &inventory(), 1).unwrap_err();
    assert_eq!(err, JselError::EmptyPath);
}

#[test]
fn failed_write_leaves_input_untouched() {
    let t = inventory();
    let before = t.clone();
    assert!(set(&p("items[id=1].age.deeper"), &t, 1).is_err());
    assert_eq!(t, before);
}

#[test]
fn successful_write_leaves_input_untouched() {
    let t = inventory();
    let before = t.clone();
    let out = set_p(&p("items.age"), &t, 0).unwrap();
    assert_ne!(out, t);
    assert_eq!(t, before);
}
