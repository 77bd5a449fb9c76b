use super::Generator;

use quarry_core::{
    schema::{DefaultKind, DefaultValue, Field, FieldType, Model},
    Result,
};

/// `CASCADE` / `RESTRICT` on destructive statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

impl DropBehavior {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => " CASCADE",
            Self::Restrict => " RESTRICT",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateTableOptions {
    pub if_not_exists: bool,

    /// Render DEFAULT clauses even for database-supplied defaults.
    pub include_remote_defaults: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DropTableOptions {
    pub if_exists: bool,
    pub behavior: Option<DropBehavior>,
}

#[derive(Debug, Clone, Default)]
pub struct DropColumnOptions {
    pub if_exists: bool,
    pub behavior: Option<DropBehavior>,
}

impl Generator<'_> {
    /// CREATE TABLE from a model's stored fields, with foreign key
    /// constraints trailing the column list. Index creation is emitted as
    /// separate statements; see
    /// [`generate_create_table_statements`](Self::generate_create_table_statements).
    pub fn generate_create_table_statement(
        &self,
        model: &Model,
        options: &CreateTableOptions,
    ) -> Result<String> {
        let mut lines = vec![];
        for field in model.stored_fields() {
            lines.push(self.column_declaration(field, options.include_remote_defaults)?);
        }
        for field in model.stored_fields() {
            if let FieldType::ForeignKey {
                model: target_model,
                field: target_field,
            } = &field.ty
            {
                let target = self.model(target_model)?;
                let column = self.field(target, target_field)?;
                lines.push(self.dialect.foreign_key_clause(
                    &self.column_name_only(field),
                    &self.table_name(target),
                    &self.column_name_only(column),
                ));
            }
        }

        let if_not_exists = if options.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let body = lines.join(",\n  ");
        Ok(format!(
            "CREATE TABLE {if_not_exists}{} (\n  {body}\n)",
            self.table_name(model)
        ))
    }

    /// The table plus its index statements, in execution order.
    pub fn generate_create_table_statements(
        &self,
        model: &Model,
        options: &CreateTableOptions,
    ) -> Result<Vec<String>> {
        let mut statements = vec![self.generate_create_table_statement(model, options)?];
        statements.extend(self.generate_model_index_statements(model)?);
        Ok(statements)
    }

    pub fn generate_drop_table_statement(
        &self,
        model: &Model,
        options: &DropTableOptions,
    ) -> String {
        format!(
            "DROP TABLE {}{}{}",
            if options.if_exists { "IF EXISTS " } else { "" },
            self.table_name(model),
            options.behavior.map(DropBehavior::as_sql).unwrap_or("")
        )
    }

    /// Renames the model's table.
    pub fn generate_alter_table_rename_statement(
        &self,
        model: &Model,
        new_table_name: &str,
    ) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.table_name(model),
            self.dialect.escape_identifier(new_table_name)
        )
    }

    pub fn generate_add_column_statement(&self, model: &Model, field: &Field) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.table_name(model),
            self.column_declaration(field, false)?
        ))
    }

    pub fn generate_drop_column_statement(
        &self,
        model: &Model,
        field: &Field,
        options: &DropColumnOptions,
    ) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}{}{}",
            self.table_name(model),
            if options.if_exists { "IF EXISTS " } else { "" },
            self.column_name_only(field),
            options.behavior.map(DropBehavior::as_sql).unwrap_or("")
        )
    }

    /// One column's declaration inside CREATE TABLE or ADD COLUMN.
    pub(crate) fn column_declaration(
        &self,
        field: &Field,
        include_remote_defaults: bool,
    ) -> Result<String> {
        let mut out = format!("{} {}", self.column_name_only(field), self.storage_type(field)?);

        if field.primary_key {
            out.push_str(" PRIMARY KEY");
        } else if field.unique {
            out.push_str(" UNIQUE");
        }
        if !field.nullable && !field.primary_key {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &field.default_value {
            if default.on_insert && (!default.remote || include_remote_defaults) {
                out.push_str(" DEFAULT ");
                out.push_str(&self.render_default(default)?);
            }
        }

        Ok(out)
    }

    pub(crate) fn render_default(&self, default: &DefaultValue) -> Result<String> {
        match &default.kind {
            DefaultKind::Value(value) => self.dialect.escape_value(value),
            DefaultKind::Literal(expr) => Ok(expr.clone()),
        }
    }
}
