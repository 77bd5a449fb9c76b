use quarry_core::{
    schema::{Field, FieldType, Model},
    stmt::{FieldRef, Operand, Operator, OrderBy, ProjectionEntry, Query},
    Schema,
};
use quarry_sql::{AnsiDialect, Generator, Pager};

use pretty_assertions::assert_eq;

fn schema() -> Schema {
    Schema::from_models([Model::new("User", "users")
        .field(Field::new("id", FieldType::BigInt).primary_key())
        .field(Field::new("age", FieldType::Integer))])
}

fn query() -> Query {
    Query::new("User")
        .project(ProjectionEntry::Field(FieldRef::root("id")))
        .order_by(OrderBy::asc(FieldRef::root("id")))
}

const PAGE: &str = "SELECT \"users\".\"id\" AS \"User:id\" FROM \"users\" \
     ORDER BY \"users\".\"id\" ASC";

#[test]
fn pages_advance_the_offset() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let mut pager = Pager::new(query(), 2);

    assert_eq!(
        pager.next_statement(&generator).unwrap().unwrap(),
        format!("{PAGE} LIMIT 2 OFFSET 0")
    );
    pager.advance(2);

    assert_eq!(
        pager.next_statement(&generator).unwrap().unwrap(),
        format!("{PAGE} LIMIT 2 OFFSET 2")
    );
    pager.advance(1);

    assert!(pager.is_done());
    assert_eq!(pager.next_statement(&generator).unwrap(), None);
}

#[test]
fn empty_page_finishes_the_pager() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let mut pager = Pager::new(query(), 3);

    pager.next_statement(&generator).unwrap().unwrap();
    pager.advance(0);
    assert!(pager.is_done());
    assert_eq!(pager.next_statement(&generator).unwrap(), None);
}

#[test]
fn grouped_queries_bypass_paging() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let grouped = query().group_by_field(FieldRef::root("age"));
    let mut pager = Pager::new(grouped, 2);

    let sql = pager.next_statement(&generator).unwrap().unwrap();
    assert!(!sql.contains("LIMIT"), "grouped statement must not page: {sql}");
    assert!(sql.contains("GROUP BY \"users\".\"age\""));

    assert!(pager.is_done());
    assert_eq!(pager.next_statement(&generator).unwrap(), None);
}

#[test]
fn zero_batch_size_clamps_to_one() {
    let schema = schema();
    let generator = Generator::new(&schema, &AnsiDialect);
    let mut pager = Pager::new(
        Query::new("User")
            .project(ProjectionEntry::Field(FieldRef::root("id")))
            .and("age", Operator::Gte, Operand::value(0)),
        0,
    );
    let sql = pager.next_statement(&generator).unwrap().unwrap();
    assert!(sql.ends_with("LIMIT 1 OFFSET 0"), "{sql}");
}
