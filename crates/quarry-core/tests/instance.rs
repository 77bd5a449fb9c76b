use quarry_core::{stmt::Value, Instance};

use pretty_assertions::assert_eq;

#[test]
fn set_tracks_previous_and_current() {
    let mut instance = Instance::new("User");
    instance.set("name", "Alice");

    let dirty: Vec<_> = instance.dirty_fields().collect();
    assert_eq!(dirty.len(), 1);
    assert_eq!(dirty[0].1.previous, Value::Null);
    assert_eq!(dirty[0].1.current, Value::from("Alice"));

    instance.set("name", "Bob");
    assert_eq!(
        instance.dirty_value("name"),
        Some(&Value::from("Bob")),
        "current value follows the latest set"
    );
    assert_eq!(
        instance.dirty_fields().next().unwrap().1.previous,
        Value::Null,
        "previous value stays pinned to the pre-dirty value"
    );
}

#[test]
fn reverting_a_field_clears_its_mark() {
    let mut instance = Instance::new("User");
    instance.set("name", "Alice");
    instance.clear_dirty();

    instance.set("name", "Bob");
    assert!(instance.is_dirty());

    instance.set("name", "Alice");
    assert!(!instance.is_dirty());
    assert_eq!(instance.get("name"), Some(&Value::from("Alice")));
}

#[test]
fn setting_the_same_value_does_not_dirty() {
    let mut instance = Instance::new("User");
    instance.set("name", "Alice");
    instance.clear_dirty();

    instance.set("name", "Alice");
    assert!(!instance.is_dirty());
}

#[test]
fn assign_bypasses_dirty_tracking() {
    let mut instance = Instance::new("User");
    instance.assign("id", 7);
    assert!(!instance.is_dirty());
    assert_eq!(instance.get("id"), Some(&Value::from(7)));
}

#[test]
fn associations_accumulate_per_name() {
    let mut user = Instance::new("User");
    let mut role = Instance::new("Role");
    role.assign("name", "admin");

    user.associate("Role", role.clone());
    user.associate("Role", role);
    assert_eq!(user.associated("Role").len(), 2);
    assert_eq!(user.associated("Permission").len(), 0);
}
