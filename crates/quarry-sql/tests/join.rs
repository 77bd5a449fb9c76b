use quarry_core::{
    schema::{Field, FieldType, Model},
    stmt::{Condition, FieldRef, JoinKind, Operand, Operator, ProjectionEntry, Query},
    Schema,
};
use quarry_sql::{AnsiDialect, Generator, SelectOptions};

use pretty_assertions::assert_eq;

fn schema() -> Schema {
    Schema::from_models([
        Model::new("User", "users")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("firstName", FieldType::Text)),
        Model::new("Role", "roles")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("name", FieldType::Text))
            .field(Field::new("userId", FieldType::foreign_key("User", "id"))),
        Model::new("Permission", "permissions")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("scope", FieldType::Text))
            .field(Field::new("roleId", FieldType::foreign_key("Role", "id"))),
    ])
}

fn select(query: Query) -> String {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let query = query.project(ProjectionEntry::Field(FieldRef::root("id")));
    generator
        .generate_select_statement(&query, &SelectOptions::default())
        .unwrap()
}

const PROJECTED: &str = "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\"";

#[test]
fn inner_join_through_reference() {
    let query = Query::new("User").join("id", JoinKind::Inner, Query::reference("Role", "userId"));
    assert_eq!(
        select(query),
        format!("{PROJECTED} INNER JOIN \"roles\" ON \"users\".\"id\" = \"roles\".\"userId\"")
    );
}

#[test]
fn left_outer_join() {
    let query = Query::new("User").filter(
        Condition::new(
            "id",
            Operator::Eq,
            Operand::query(Query::reference("Role", "userId")),
        )
        .join_kind(JoinKind::Left)
        .outer(),
    );
    assert_eq!(
        select(query),
        format!(
            "{PROJECTED} LEFT OUTER JOIN \"roles\" ON \"users\".\"id\" = \"roles\".\"userId\""
        )
    );
}

#[test]
fn joins_order_by_dependency_not_declaration() {
    // The Permission join depends on Role, yet is declared first.
    let query = Query::new("User")
        .filter(
            Condition::new(
                "id",
                Operator::Eq,
                Operand::query(Query::reference("Permission", "roleId")),
            )
            .on_model("Role"),
        )
        .join("id", JoinKind::Inner, Query::reference("Role", "userId"));
    assert_eq!(
        select(query),
        format!(
            "{PROJECTED} \
             INNER JOIN \"roles\" ON \"users\".\"id\" = \"roles\".\"userId\" \
             INNER JOIN \"permissions\" ON \"roles\".\"id\" = \"permissions\".\"roleId\""
        )
    );
}

#[test]
fn join_order_is_deterministic_for_independent_joins() {
    // Two joins off the root with no mutual dependency order by name.
    let query = Query::new("User")
        .join("id", JoinKind::Inner, Query::reference("Role", "userId"))
        .filter(
            Condition::new(
                "id",
                Operator::Eq,
                Operand::query(Query::reference("Permission", "roleId")),
            )
            .on_model("User"),
        );
    let first = select(query.clone());
    let second = select(query);
    assert_eq!(first, second);
    let permissions = first.find("\"permissions\"").unwrap();
    let roles = first.find("\"roles\"").unwrap();
    assert!(permissions < roles, "joins must order by model name: {first}");
}

#[test]
fn include_relations_projects_every_model() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let query = Query::new("User").join("id", JoinKind::Inner, Query::reference("Role", "userId"));
    let options = SelectOptions {
        include_relations: true,
        ..Default::default()
    };
    assert_eq!(
        generator.generate_select_statement(&query, &options).unwrap(),
        "SELECT \"users\".\"id\" AS \"User:id\", \
         \"users\".\"firstName\" AS \"User:firstName\", \
         \"roles\".\"id\" AS \"Role:id\", \
         \"roles\".\"name\" AS \"Role:name\", \
         \"roles\".\"userId\" AS \"Role:userId\" \
         FROM \"users\" \
         INNER JOIN \"roles\" ON \"users\".\"id\" = \"roles\".\"userId\""
    );
}

#[test]
fn join_without_target_field_errors() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let query = Query::new("User").join("id", JoinKind::Inner, Query::new("Role"));
    let err = generator
        .generate_select_statement(&query, &SelectOptions::default())
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("join against model `Role` requires a field reference"));
}
