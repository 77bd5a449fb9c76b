use super::Generator;

use quarry_core::schema::{Field, Model};

/// Escaped-name construction. Every identifier that ends up in a statement
/// flows through one of these, so quoting rules live in exactly one place.
impl Generator<'_> {
    /// `"Model:field"` alias form. Materialization relies on this shape to
    /// route result columns back to their models.
    pub fn field_name(&self, model: &Model, field: &Field) -> String {
        self.dialect
            .escape_identifier(&format!("{}:{}", model.name, field.name))
    }

    /// Fully qualified `"table"."column"`.
    pub fn column_name(&self, model: &Model, field: &Field) -> String {
        format!(
            "{}.{}",
            self.table_name(model),
            self.dialect.escape_identifier(field.column_name())
        )
    }

    /// Escaped column without the table qualifier.
    pub fn column_name_only(&self, field: &Field) -> String {
        self.dialect.escape_identifier(field.column_name())
    }

    /// Qualified column with a prefix spliced onto the table name, as used
    /// by statements that alias the target table.
    pub fn column_name_prefixed(&self, model: &Model, field: &Field, table_prefix: &str) -> String {
        format!(
            "{}.{}",
            self.table_name_prefixed(model, table_prefix),
            self.dialect.escape_identifier(field.column_name())
        )
    }

    pub fn table_name(&self, model: &Model) -> String {
        self.dialect.escape_identifier(&model.table_name)
    }

    pub fn table_name_prefixed(&self, model: &Model, prefix: &str) -> String {
        self.dialect
            .escape_identifier(&format!("{prefix}{}", model.table_name))
    }

    /// `column AS alias` projection entry. An explicit alias wins; otherwise
    /// the default `"Model:field"` alias applies unless suppressed.
    pub fn projection_name(
        &self,
        model: &Model,
        field: &Field,
        alias: Option<&str>,
        no_alias: bool,
    ) -> String {
        let column = self.column_name(model, field);
        if no_alias {
            return column;
        }
        let alias = match alias {
            Some(alias) => self.dialect.escape_identifier(alias),
            None => self.field_name(model, field),
        };
        format!("{column} AS {alias}")
    }

    /// Inverse of the default projection alias: `Model:field` split back
    /// into its parts. Returns `None` for columns without the marker.
    pub fn parse_field_projection(alias: &str) -> Option<(&str, &str)> {
        alias.split_once(':')
    }
}
