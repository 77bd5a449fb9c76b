use super::Generator;

use quarry_core::{schema::Model, stmt::Value, Instance, Result};

impl Generator<'_> {
    /// Batch INSERT covering the union of dirty fields across the batch.
    /// Instances missing a value for some column fall back to `DEFAULT`.
    /// Returns an empty string when nothing is dirty.
    pub fn generate_insert_statement(
        &self,
        model: &Model,
        instances: &[Instance],
    ) -> Result<String> {
        let mut field_names: Vec<&str> = vec![];
        for instance in instances {
            for (name, _) in instance.dirty_fields() {
                if !field_names.contains(&name) {
                    field_names.push(name);
                }
            }
        }
        if field_names.is_empty() {
            return Ok(String::new());
        }

        let columns = field_names
            .iter()
            .map(|name| Ok(self.column_name_only(self.field(model, name)?)))
            .collect::<Result<Vec<_>>>()?
            .join(",");

        let mut remote_writes: Vec<&str> = vec![];
        let mut rows = Vec::with_capacity(instances.len());
        for instance in instances {
            let mut row = Vec::with_capacity(field_names.len());
            for name in &field_names {
                match instance.dirty_value(name) {
                    Some(value) => {
                        if let Value::Literal(literal) = value {
                            if literal.is_remote() && !remote_writes.contains(name) {
                                remote_writes.push(*name);
                            }
                        }
                        row.push(self.render_value(&model.name, value)?);
                    }
                    // The column belongs to another instance in the batch;
                    // the database default applies here.
                    None => row.push("DEFAULT".to_string()),
                }
            }
            rows.push(format!("({})", row.join(",")));
        }

        let mut sql = format!(
            "INSERT INTO {} ({columns}) VALUES {}",
            self.table_name(model),
            rows.join(",")
        );
        if let Some(returning) =
            self.returning_clause(model, &remote_writes, self.dialect.supports_returning())?
        {
            sql.push_str(&returning);
        }
        Ok(sql)
    }

    /// INSERT with the dialect's conflict clause spliced in ahead of any
    /// RETURNING tail. Errors on dialects without upsert support.
    pub fn generate_upsert_statement(
        &self,
        model: &Model,
        instances: &[Instance],
    ) -> Result<String> {
        let insert = self.generate_insert_statement(model, instances)?;
        if insert.is_empty() {
            return Ok(insert);
        }
        let clause = self.dialect.upsert_clause()?;
        Ok(match insert.find(" RETURNING ") {
            Some(at) => format!("{} {clause}{}", &insert[..at], &insert[at..]),
            None => format!("{insert} {clause}"),
        })
    }
}
