use super::{ansi_column_type, Dialect};

use quarry_core::{schema::FieldType, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresqlDialect;

impl Dialect for PostgresqlDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn column_type(&self, ty: &FieldType) -> Result<String> {
        Ok(match ty {
            FieldType::Blob => "BYTEA".to_string(),
            FieldType::DateTime => "TIMESTAMPTZ".to_string(),
            ty => ansi_column_type(ty)?,
        })
    }

    fn upsert_clause(&self) -> Result<String> {
        Ok("ON CONFLICT DO NOTHING".to_string())
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn supports_distinct_on(&self) -> bool {
        true
    }
}
