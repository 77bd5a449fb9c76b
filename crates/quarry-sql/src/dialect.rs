mod postgresql;
pub use postgresql::PostgresqlDialect;

mod sqlite;
pub use sqlite::SqliteDialect;

use quarry_core::{
    schema::FieldType,
    stmt::{JoinKind, Value},
    Result,
};

/// The differences between SQL dialects.
///
/// Every generator routes identifier quoting, value escaping, join-type
/// mapping, and feature gating through this trait, so a new dialect is added
/// by overriding a small surface rather than rewriting the generators. The
/// defaults describe plain ANSI SQL.
pub trait Dialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    /// Quotes each dot-separated segment independently, e.g.
    /// `users.id` becomes `"users"."id"`.
    fn escape_identifier(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);
        let mut separator = "";
        for segment in name.split('.') {
            out.push_str(separator);
            out.push('"');
            out.push_str(&segment.replace('"', "\"\""));
            out.push('"');
            separator = ".";
        }
        out
    }

    /// Escapes a concrete value. `Value::Literal` never reaches this point;
    /// the generator renders literals itself.
    fn escape_value(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::I64(v) => v.to_string(),
            Value::F64(v) => {
                if !v.is_finite() {
                    anyhow::bail!("cannot escape a non-finite float value");
                }
                v.to_string()
            }
            Value::String(v) => format!("'{}'", v.replace('\'', "''")),
            Value::List(_) => anyhow::bail!("cannot escape a list value directly"),
            Value::Literal(_) => anyhow::bail!("literal values are rendered by the generator"),
        })
    }

    /// Storage type for a concrete field type. Foreign keys and relations
    /// are resolved by the generator before reaching this point.
    fn column_type(&self, ty: &FieldType) -> Result<String> {
        ansi_column_type(ty)
    }

    /// Maps a logical join type onto the dialect's join token.
    fn join_type(&self, kind: JoinKind, outer: bool) -> String {
        match (kind, outer) {
            (JoinKind::Cross, _) => "CROSS JOIN",
            (JoinKind::Full, false) => "FULL JOIN",
            (JoinKind::Full, true) => "FULL OUTER JOIN",
            (JoinKind::Inner, _) => "INNER JOIN",
            (JoinKind::Left, false) => "LEFT JOIN",
            (JoinKind::Left, true) => "LEFT OUTER JOIN",
            (JoinKind::Right, false) => "RIGHT JOIN",
            (JoinKind::Right, true) => "RIGHT OUTER JOIN",
        }
        .to_string()
    }

    /// Translates a LIKE pattern before escaping. Identity by default.
    fn format_like_pattern(&self, pattern: &str) -> String {
        pattern.to_string()
    }

    /// Appended after a LIKE comparison, e.g. ` ESCAPE '\'`.
    fn like_postfix(&self) -> &'static str {
        ""
    }

    /// Foreign key constraint clause inside CREATE TABLE. All arguments are
    /// pre-escaped.
    fn foreign_key_clause(&self, column: &str, table: &str, target_column: &str) -> String {
        format!("FOREIGN KEY ({column}) REFERENCES {table} ({target_column})")
    }

    /// Conflict clause appended to an INSERT to make it an upsert.
    fn upsert_clause(&self) -> Result<String> {
        anyhow::bail!(
            "UPSERT is not supported for this connection type ({})",
            self.name()
        )
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn supports_returning_on_delete(&self) -> bool {
        self.supports_returning()
    }

    fn supports_limit(&self) -> bool {
        true
    }

    fn supports_offset(&self) -> bool {
        true
    }

    fn supports_limit_on_delete(&self) -> bool {
        false
    }

    fn supports_limit_on_update(&self) -> bool {
        false
    }

    /// `DISTINCT ON (...)` projection support.
    fn supports_distinct_on(&self) -> bool {
        false
    }

    /// ORDER BY only takes effect under an explicit LIMIT.
    fn order_requires_limit(&self) -> bool {
        false
    }

    /// Ordering is restricted to projected columns.
    fn order_by_projected_only(&self) -> bool {
        false
    }

    /// Explicit limit standing in for "no limit" where the dialect requires
    /// one syntactically.
    fn unbounded_limit(&self) -> u64 {
        i64::MAX as u64
    }
}

/// Plain ANSI SQL: every trait default as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {}

/// ANSI storage type mapping, shared by the trait default and dialects that
/// only override a few entries.
pub fn ansi_column_type(ty: &FieldType) -> Result<String> {
    Ok(match ty {
        FieldType::BigInt => "BIGINT",
        FieldType::Blob => "BLOB",
        FieldType::Boolean => "BOOLEAN",
        FieldType::DateTime => "TIMESTAMP",
        FieldType::Integer => "INTEGER",
        FieldType::Real => "DOUBLE PRECISION",
        FieldType::Text => "TEXT",
        FieldType::ForeignKey { .. } | FieldType::Relation { .. } => {
            anyhow::bail!("field type must be resolved before rendering; ty={ty:?}")
        }
    }
    .to_string())
}
