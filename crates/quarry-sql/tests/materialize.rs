use quarry_core::{
    schema::{DefaultValue, Field, FieldType, Model},
    stmt::{JoinKind, Query, Value},
    Instance, Schema,
};
use quarry_sql::{AnsiDialect, Generator, QueryResult};

use pretty_assertions::assert_eq;

fn schema() -> Schema {
    Schema::from_models([
        Model::new("User", "users")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("firstName", FieldType::Text))
            .field(
                Field::new("createdAt", FieldType::DateTime)
                    .default_value(DefaultValue::literal("NOW()").remote()),
            ),
        Model::new("Role", "roles")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("name", FieldType::Text))
            .field(Field::new("userId", FieldType::foreign_key("User", "id"))),
    ])
}

fn joined_query() -> Query {
    Query::new("User").join("id", JoinKind::Left, Query::reference("Role", "userId"))
}

fn joined_result() -> QueryResult {
    QueryResult::new(
        vec![
            "User:id".into(),
            "User:firstName".into(),
            "Role:id".into(),
            "Role:name".into(),
        ],
        vec![
            vec![1.into(), "Alice".into(), 10.into(), "admin".into()],
            vec![1.into(), "Alice".into(), 11.into(), "editor".into()],
            vec![2.into(), "Bob".into(), 10.into(), "admin".into()],
            vec![3.into(), "Carol".into(), Value::Null, Value::Null],
        ],
    )
}

#[test]
fn rows_group_and_deduplicate_per_model() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let data = generator
        .group_rows_by_model(&joined_query(), &joined_result())
        .unwrap();

    assert_eq!(data.root, "User");
    assert_eq!(data.models["User"].len(), 3);
    assert_eq!(data.models["Role"].len(), 2);

    // Alice links to both roles, Bob to one, Carol to none.
    assert_eq!(data.relations.len(), 3);
    assert_eq!(data.relations[0]["Role"], vec![0, 1]);
    assert_eq!(data.relations[1]["Role"], vec![0]);
    assert!(data.relations[2].is_empty());
}

#[test]
fn unmatched_outer_join_rows_attach_nothing() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let data = generator
        .group_rows_by_model(&joined_query(), &joined_result())
        .unwrap();

    // Carol's NULL role fragment must not become a Role row.
    let carol = &data.models["User"][2];
    assert_eq!(carol["firstName"], Value::from("Carol"));
    assert!(!data.models["Role"]
        .iter()
        .any(|row| row.values().all(Value::is_null)));
}

#[test]
fn graph_attaches_related_instances() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let data = generator
        .group_rows_by_model(&joined_query(), &joined_result())
        .unwrap();

    let mut visited = 0;
    let instances = generator
        .build_model_graph(&data, |_| visited += 1)
        .unwrap();

    assert_eq!(instances.len(), 3);
    // 3 roots plus 3 attached role instances.
    assert_eq!(visited, 6);

    let alice = &instances[0];
    assert_eq!(alice.get("firstName"), Some(&Value::from("Alice")));
    assert!(alice.is_persisted());
    assert!(!alice.is_dirty());

    let roles = alice.associated("Role");
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].get("name"), Some(&Value::from("admin")));
    assert_eq!(roles[1].get("name"), Some(&Value::from("editor")));

    assert_eq!(instances[2].associated("Role").len(), 0);
}

#[test]
fn unprefixed_columns_route_to_the_root_model() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let result = QueryResult::new(
        vec!["id".into(), "firstName".into()],
        vec![vec![1.into(), "Alice".into()], vec![1.into(), "Alice".into()]],
    );
    let data = generator
        .group_rows_by_model(&Query::new("User"), &result)
        .unwrap();
    assert_eq!(data.models["User"].len(), 1);
}

#[test]
fn write_results_settle_instances() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let model = schema.resolve("User").unwrap();

    let mut first = Instance::new("User");
    first.set("firstName", "Alice");
    let mut second = Instance::new("User");
    second.set("firstName", "Bob");
    let mut instances = [first, second];

    let result = QueryResult::new(
        vec!["id".into(), "createdAt".into()],
        vec![
            vec![1.into(), "2026-01-01".into()],
            vec![2.into(), "2026-01-01".into()],
        ],
    );
    generator.apply_write_results(model, &mut instances, &result);

    assert_eq!(instances[0].get("id"), Some(&Value::from(1)));
    assert_eq!(instances[1].get("id"), Some(&Value::from(2)));
    assert_eq!(
        instances[0].get("createdAt"),
        Some(&Value::from("2026-01-01"))
    );
    for instance in &instances {
        assert!(instance.is_persisted());
        assert!(!instance.is_dirty());
    }
}
