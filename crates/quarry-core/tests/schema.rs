use quarry_core::{
    schema::{Field, FieldType, Model},
    Schema,
};

fn valid_schema() -> Schema {
    Schema::from_models([
        Model::new("User", "users")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("email", FieldType::Text).unique())
            .field(Field::new("age", FieldType::Integer).indexed_with(["email"]))
            .field(Field::new("roles", FieldType::relation("Role"))),
        Model::new("Role", "roles")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("userId", FieldType::foreign_key("User", "id"))),
    ])
}

#[test]
fn valid_schema_verifies() {
    valid_schema().verify().unwrap();
}

#[test]
fn resolve_finds_models_by_name() {
    let schema = valid_schema();
    assert_eq!(schema.resolve("Role").unwrap().table_name, "roles");
    assert!(schema.resolve("Ghost").is_none());
}

#[test]
fn relation_fields_are_not_stored() {
    let schema = valid_schema();
    let user = schema.resolve("User").unwrap();
    let stored: Vec<&str> = user.stored_fields().map(|field| &field.name[..]).collect();
    assert_eq!(stored, ["id", "email", "age"]);
}

#[test]
fn duplicate_model_names_fail() {
    let schema = Schema::from_models([
        Model::new("User", "users"),
        Model::new("User", "users_2"),
    ]);
    let err = schema.verify().unwrap_err();
    assert!(err.to_string().contains("duplicate model name `User`"));
}

#[test]
fn duplicate_field_names_fail() {
    let schema = Schema::from_models([Model::new("User", "users")
        .field(Field::new("id", FieldType::BigInt).primary_key())
        .field(Field::new("id", FieldType::Text))]);
    let err = schema.verify().unwrap_err();
    assert!(err
        .to_string()
        .contains("duplicate field name `id` on model `User`"));
}

#[test]
fn multiple_primary_keys_fail() {
    let schema = Schema::from_models([Model::new("User", "users")
        .field(Field::new("id", FieldType::BigInt).primary_key())
        .field(Field::new("uuid", FieldType::Text).primary_key())]);
    let err = schema.verify().unwrap_err();
    assert!(err
        .to_string()
        .contains("model `User` declares more than one primary key"));
}

#[test]
fn dangling_foreign_keys_fail() {
    let schema = Schema::from_models([Model::new("Role", "roles")
        .field(Field::new("userId", FieldType::foreign_key("User", "id")))]);
    let err = schema.verify().unwrap_err();
    assert!(err
        .to_string()
        .contains("field `Role.userId` references unknown model `User`"));

    let schema = Schema::from_models([
        Model::new("User", "users").field(Field::new("id", FieldType::BigInt).primary_key()),
        Model::new("Role", "roles")
            .field(Field::new("userId", FieldType::foreign_key("User", "uuid"))),
    ]);
    let err = schema.verify().unwrap_err();
    assert!(err
        .to_string()
        .contains("field `Role.userId` references unknown field `User.uuid`"));
}

#[test]
fn unknown_index_companions_fail() {
    let schema = Schema::from_models([Model::new("User", "users")
        .field(Field::new("id", FieldType::BigInt).primary_key())
        .field(Field::new("age", FieldType::Integer).indexed_with(["email"]))]);
    let err = schema.verify().unwrap_err();
    assert!(err
        .to_string()
        .contains("index on `User.age` names unknown companion field `email`"));
}
