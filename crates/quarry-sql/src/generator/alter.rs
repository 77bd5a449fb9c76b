use super::index::CreateIndexOptions;
use super::Generator;

use quarry_core::{
    schema::{Field, Model},
    Result,
};

impl Generator<'_> {
    /// Diffs two definitions of one column and emits one ALTER statement per
    /// attribute that changed, in a fixed order: nullability, type, default,
    /// primary key, unique, index changes, and finally the rename.
    ///
    /// `proposed` may carry a different name or column; it is resolved
    /// through the usual column-name fallback, so a field renamed without an
    /// explicit column mapping renames its column too.
    pub fn generate_alter_column_statements(
        &self,
        model: &Model,
        current: &Field,
        proposed: &Field,
    ) -> Result<Vec<String>> {
        let table = self.table_name(model);
        let column = self.column_name_only(current);
        let mut statements = vec![];

        if current.nullable != proposed.nullable {
            let action = if proposed.nullable {
                "DROP NOT NULL"
            } else {
                "SET NOT NULL"
            };
            statements.push(format!("ALTER TABLE {table} ALTER COLUMN {column} {action}"));
        }

        if current.ty != proposed.ty {
            statements.push(format!(
                "ALTER TABLE {table} ALTER COLUMN {column} TYPE {}",
                self.storage_type(proposed)?
            ));
        }

        if current.default_value != proposed.default_value {
            match &proposed.default_value {
                Some(default) => statements.push(format!(
                    "ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {}",
                    self.render_default(default)?
                )),
                None => statements.push(format!(
                    "ALTER TABLE {table} ALTER COLUMN {column} DROP DEFAULT"
                )),
            }
        }

        if current.primary_key != proposed.primary_key {
            if proposed.primary_key {
                statements.push(format!("ALTER TABLE {table} ADD PRIMARY KEY ({column})"));
            } else {
                let constraint = self
                    .dialect
                    .escape_identifier(&format!("{}_pkey", model.table_name));
                statements.push(format!("ALTER TABLE {table} DROP CONSTRAINT {constraint}"));
            }
        }

        if current.unique != proposed.unique {
            let constraint = self.dialect.escape_identifier(&format!(
                "uniq_{}_{}",
                model.table_name,
                proposed.column_name()
            ));
            if proposed.unique {
                statements.push(format!(
                    "ALTER TABLE {table} ADD CONSTRAINT {constraint} UNIQUE ({column})"
                ));
            } else {
                statements.push(format!("ALTER TABLE {table} DROP CONSTRAINT {constraint}"));
            }
        }

        // Index membership changes resolve through deterministic names, so
        // equality on the name means the index is unchanged.
        let current_indexes = self.field_index_defs(model, current)?;
        let proposed_indexes = self.field_index_defs(model, proposed)?;
        for def in &current_indexes {
            if !proposed_indexes.iter().any(|p| p.name == def.name) {
                statements.push(format!(
                    "DROP INDEX IF EXISTS {}",
                    self.dialect.escape_identifier(&def.name)
                ));
            }
        }
        let create_options = CreateIndexOptions {
            if_not_exists: true,
            ..Default::default()
        };
        for def in &proposed_indexes {
            if !current_indexes.iter().any(|c| c.name == def.name) {
                statements.push(self.render_create_index(model, def, &create_options));
            }
        }

        if current.column_name() != proposed.column_name() {
            statements.push(format!(
                "ALTER TABLE {table} RENAME COLUMN {column} TO {}",
                self.column_name_only(proposed)
            ));
        }

        Ok(statements)
    }
}
