use super::Generator;

use quarry_core::{
    schema::{Field, Model},
    Result,
};

impl Generator<'_> {
    /// Columns a write must read back: the primary key, every field with a
    /// database-supplied default, and fields written as remote literals in
    /// this statement.
    pub(crate) fn returning_columns(&self, model: &Model, remote_writes: &[&str]) -> Vec<String> {
        let mut fields: Vec<&Field> = vec![];

        if let Some(pk) = model.primary_key_field() {
            fields.push(pk);
        }
        for field in model.stored_fields() {
            if field.has_remote_default() && !fields.iter().any(|f| f.name == field.name) {
                fields.push(field);
            }
        }
        for name in remote_writes {
            if let Some(field) = model.resolve_field(name) {
                if !fields.iter().any(|f| f.name == field.name) {
                    fields.push(field);
                }
            }
        }

        fields
            .into_iter()
            .map(|field| self.column_name_only(field))
            .collect()
    }

    /// ` RETURNING ...` tail, or `None` when the dialect lacks support or
    /// there is nothing to read back.
    pub(crate) fn returning_clause(
        &self,
        model: &Model,
        remote_writes: &[&str],
        supported: bool,
    ) -> Result<Option<String>> {
        if !supported {
            return Ok(None);
        }
        let columns = self.returning_columns(model, remote_writes);
        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(" RETURNING {}", columns.join(","))))
    }
}
