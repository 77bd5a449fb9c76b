use super::Generator;

use quarry_core::{
    schema::{Field, Model},
    Result,
};

use super::ddl::DropBehavior;

#[derive(Debug, Clone, Default)]
pub struct CreateIndexOptions {
    pub unique: bool,
    pub if_not_exists: bool,
    pub concurrently: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DropIndexOptions {
    pub if_exists: bool,
    pub concurrently: bool,
    pub behavior: Option<DropBehavior>,
}

/// An index resolved to its deterministic name and column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexDef {
    pub name: String,
    /// Raw column names, in declaration order.
    pub columns: Vec<String>,
}

impl Generator<'_> {
    /// Deterministic index name: `idx_<table>_<columns>` with the column
    /// names sorted and deduplicated, so the same field set always maps to
    /// the same index regardless of declaration order.
    pub fn index_name(&self, model: &Model, fields: &[&Field]) -> String {
        let mut columns: Vec<&str> = fields.iter().map(|field| field.column_name()).collect();
        columns.sort_unstable();
        columns.dedup();
        format!("idx_{}_{}", model.table_name, columns.join("_"))
    }

    /// CREATE INDEX over the named fields. An empty field list is a no-op
    /// and returns an empty string.
    pub fn generate_create_index_statement(
        &self,
        model: &Model,
        field_names: &[&str],
        options: &CreateIndexOptions,
    ) -> Result<String> {
        if field_names.is_empty() {
            return Ok(String::new());
        }
        let fields = field_names
            .iter()
            .map(|name| self.field(model, name))
            .collect::<Result<Vec<_>>>()?;
        let def = IndexDef {
            name: self.index_name(model, &fields),
            columns: fields
                .iter()
                .map(|field| field.column_name().to_string())
                .collect(),
        };
        Ok(self.render_create_index(model, &def, options))
    }

    pub(crate) fn render_create_index(
        &self,
        model: &Model,
        def: &IndexDef,
        options: &CreateIndexOptions,
    ) -> String {
        let columns = def
            .columns
            .iter()
            .map(|column| self.dialect.escape_identifier(column))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE {}INDEX {}{}{} ON {} ({columns})",
            if options.unique { "UNIQUE " } else { "" },
            if options.concurrently {
                "CONCURRENTLY "
            } else {
                ""
            },
            if options.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.dialect.escape_identifier(&def.name),
            self.table_name(model)
        )
    }

    /// DROP INDEX over the named fields, resolving the same deterministic
    /// name CREATE INDEX would produce.
    pub fn generate_drop_index_statement(
        &self,
        model: &Model,
        field_names: &[&str],
        options: &DropIndexOptions,
    ) -> Result<String> {
        if field_names.is_empty() {
            return Ok(String::new());
        }
        let fields = field_names
            .iter()
            .map(|name| self.field(model, name))
            .collect::<Result<Vec<_>>>()?;
        let name = self.index_name(model, &fields);
        Ok(self.render_drop_index(&name, options))
    }

    pub(crate) fn render_drop_index(&self, name: &str, options: &DropIndexOptions) -> String {
        format!(
            "DROP INDEX {}{}{}{}",
            if options.concurrently {
                "CONCURRENTLY "
            } else {
                ""
            },
            if options.if_exists { "IF EXISTS " } else { "" },
            self.dialect.escape_identifier(name),
            options.behavior.map(DropBehavior::as_sql).unwrap_or("")
        )
    }

    /// Every index declared by the model's field index specifiers, as
    /// idempotent CREATE INDEX statements.
    pub fn generate_model_index_statements(&self, model: &Model) -> Result<Vec<String>> {
        let options = CreateIndexOptions {
            if_not_exists: true,
            ..Default::default()
        };
        let mut statements = vec![];
        for field in model.stored_fields() {
            for def in self.field_index_defs(model, field)? {
                statements.push(self.render_create_index(model, &def, &options));
            }
        }
        Ok(statements)
    }

    /// Resolves one field's index specifiers. The field itself need not be
    /// part of the model yet; its companions must be.
    pub(crate) fn field_index_defs(&self, model: &Model, field: &Field) -> Result<Vec<IndexDef>> {
        let mut defs = vec![];
        for spec in &field.indexes {
            let mut fields = vec![field];
            for companion in &spec.companions {
                fields.push(self.field(model, companion)?);
            }
            defs.push(IndexDef {
                name: self.index_name(model, &fields),
                columns: fields
                    .iter()
                    .map(|field| field.column_name().to_string())
                    .collect(),
            });
        }
        Ok(defs)
    }
}
