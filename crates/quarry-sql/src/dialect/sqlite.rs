use super::{ansi_column_type, Dialect};

use quarry_core::{schema::FieldType, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn column_type(&self, ty: &FieldType) -> Result<String> {
        Ok(match ty {
            FieldType::DateTime => "DATETIME".to_string(),
            FieldType::Real => "REAL".to_string(),
            ty => ansi_column_type(ty)?,
        })
    }

    fn like_postfix(&self) -> &'static str {
        " ESCAPE '\\'"
    }

    fn upsert_clause(&self) -> Result<String> {
        Ok("ON CONFLICT DO NOTHING".to_string())
    }

    fn supports_returning(&self) -> bool {
        true
    }
}
