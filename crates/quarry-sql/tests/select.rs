use quarry_core::{
    schema::{Field, FieldType, Model},
    stmt::{Direction, FieldRef, Literal, Operand, Operator, OrderBy, ProjectionEntry, Query},
    Schema,
};
use quarry_sql::{AnsiDialect, Dialect, Generator, PostgresqlDialect, SelectOptions};

use pretty_assertions::assert_eq;

fn schema() -> Schema {
    Schema::from_models([
        Model::new("User", "users")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("firstName", FieldType::Text))
            .field(Field::new("lastName", FieldType::Text))
            .field(Field::new("age", FieldType::Integer)),
        Model::new("Role", "roles")
            .field(Field::new("id", FieldType::BigInt).primary_key())
            .field(Field::new("name", FieldType::Text))
            .field(Field::new("userId", FieldType::foreign_key("User", "id"))),
    ])
}

fn select(query: &Query) -> String {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    generator
        .generate_select_statement(query, &SelectOptions::default())
        .unwrap()
}

const USER_FIELDS: &str = "\"users\".\"id\" AS \"User:id\", \
     \"users\".\"firstName\" AS \"User:firstName\", \
     \"users\".\"lastName\" AS \"User:lastName\", \
     \"users\".\"age\" AS \"User:age\"";

#[test]
fn default_projection_covers_root_fields() {
    let query = Query::new("User");
    assert_eq!(select(&query), format!("SELECT {USER_FIELDS} FROM \"users\""));
}

#[test]
fn where_order_limit_offset() {
    let query = Query::new("User")
        .and("age", Operator::Gte, Operand::value(21))
        .order_by(OrderBy::asc(FieldRef::root("lastName")))
        .limit(10)
        .offset(5);
    assert_eq!(
        select(&query),
        format!(
            "SELECT {USER_FIELDS} FROM \"users\" \
             WHERE \"users\".\"age\" >= 21 \
             ORDER BY \"users\".\"lastName\" ASC LIMIT 10 OFFSET 5"
        )
    );
}

#[test]
fn explicit_projection_with_literals() {
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .project(ProjectionEntry::Literal(
            Literal::count_all().with_alias("count"),
        ));
    assert_eq!(
        select(&query),
        "SELECT \"users\".\"id\" AS \"User:id\", COUNT(*) AS \"count\" FROM \"users\""
    );
}

#[test]
fn projection_alias_round_trips() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let model = schema.resolve("User").unwrap();
    let field = model.resolve_field("firstName").unwrap();

    let rendered = generator.field_name(model, field);
    assert_eq!(rendered, "\"User:firstName\"");

    let parsed = Generator::parse_field_projection("User:firstName").unwrap();
    assert_eq!(parsed, ("User", "firstName"));
}

#[test]
fn group_by_and_having() {
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("lastName")))
        .group_by_field(FieldRef::root("lastName"))
        .having(Query::new("User").and("age", Operator::Gt, Operand::value(30)));
    assert_eq!(
        select(&query),
        "SELECT \"users\".\"lastName\" AS \"User:lastName\" FROM \"users\" \
         GROUP BY \"users\".\"lastName\" HAVING \"users\".\"age\" > 30"
    );
}

#[test]
fn having_without_group_by_is_ignored() {
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .having(Query::new("User").and("age", Operator::Gt, Operand::value(30)));
    assert_eq!(
        select(&query),
        "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\""
    );
}

#[test]
fn distinct_on_postgresql() {
    let schema = schema();
    let generator = Generator::new(&schema, &PostgresqlDialect);
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .distinct(Literal::distinct_on(Literal::own_field("lastName")));
    assert_eq!(
        generator
            .generate_select_statement(&query, &SelectOptions::default())
            .unwrap(),
        "SELECT DISTINCT ON (\"users\".\"lastName\") \"users\".\"id\" AS \"User:id\" \
         FROM \"users\""
    );
}

#[test]
fn distinct_without_on_support_leads_the_projection() {
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .distinct(Literal::distinct_on(Literal::own_field("lastName")));
    assert_eq!(
        select(&query),
        "SELECT DISTINCT \"users\".\"lastName\", \"users\".\"id\" AS \"User:id\" \
         FROM \"users\""
    );
}

#[test]
fn default_order_applies_when_query_has_none() {
    let schema = Schema::from_models([Model::new("User", "users")
        .field(Field::new("id", FieldType::BigInt).primary_key())
        .field(Field::new("lastName", FieldType::Text))
        .default_order("lastName", Direction::Asc)]);
    let generator = Generator::new(&schema, &AnsiDialect);
    let query = Query::new("User").project(ProjectionEntry::Field(FieldRef::root("id")));
    assert_eq!(
        generator
            .generate_select_statement(&query, &SelectOptions::default())
            .unwrap(),
        "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\" \
         ORDER BY \"users\".\"lastName\" ASC"
    );
}

#[test]
fn reverse_order_flips_directions() {
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .order_by(OrderBy::asc(FieldRef::root("age")));
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let options = SelectOptions {
        reverse_order: true,
        ..Default::default()
    };
    assert_eq!(
        generator.generate_select_statement(&query, &options).unwrap(),
        "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\" \
         ORDER BY \"users\".\"age\" DESC"
    );
}

/// A dialect where ORDER BY only takes effect under an explicit LIMIT.
struct LimitBoundDialect;

impl Dialect for LimitBoundDialect {
    fn name(&self) -> &'static str {
        "limit-bound"
    }

    fn order_requires_limit(&self) -> bool {
        true
    }

    fn unbounded_limit(&self) -> u64 {
        500
    }
}

#[test]
fn force_limit_applies_unbounded_limit() {
    let schema = schema();
    let generator = Generator::new(&schema, &LimitBoundDialect);
    let query = Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .order_by(OrderBy::asc(FieldRef::root("age")));
    let options = SelectOptions {
        force_limit: true,
        ..Default::default()
    };
    assert_eq!(
        generator.generate_select_statement(&query, &options).unwrap(),
        "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\" \
         ORDER BY \"users\".\"age\" ASC LIMIT 500"
    );
}

#[test]
fn unknown_model_errors() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let err = generator
        .generate_select_statement(&Query::new("Ghost"), &SelectOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("unable to resolve model `Ghost`"));
}
