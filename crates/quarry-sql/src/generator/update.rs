use super::Generator;

use quarry_core::{
    schema::Model,
    stmt::{Query, Value},
    Instance, Result,
};

use indexmap::IndexMap;

impl Generator<'_> {
    /// Single-row UPDATE of an instance's dirty fields, keyed on the primary
    /// key. Returns an empty string when nothing is dirty.
    pub fn generate_update_statement(&self, model: &Model, instance: &Instance) -> Result<String> {
        if !instance.is_dirty() {
            return Ok(String::new());
        }

        let mut remote_writes: Vec<&str> = vec![];
        let mut sets = vec![];
        for (name, entry) in instance.dirty_fields() {
            let field = self.field(model, name)?;
            if let Value::Literal(literal) = &entry.current {
                if literal.is_remote() {
                    remote_writes.push(name);
                }
            }
            sets.push(format!(
                "{} = {}",
                self.column_name_only(field),
                self.render_value(&model.name, &entry.current)?
            ));
        }

        let pk = self.primary_key(model)?;
        let id = instance.get(&pk.name).cloned().unwrap_or(Value::Null);
        if id.is_null() {
            anyhow::bail!(
                "cannot update a `{}` instance without a primary key value",
                model.name
            );
        }

        let mut sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            self.table_name(model),
            sets.join(", "),
            self.column_name(model, pk),
            self.dialect.escape_value(&id)?
        );
        if let Some(returning) =
            self.returning_clause(model, &remote_writes, self.dialect.supports_returning())?
        {
            sql.push_str(&returning);
        }
        Ok(sql)
    }

    /// Bulk UPDATE driven by a query's conditions. ORDER BY and LIMIT only
    /// render on dialects that allow them on UPDATE. Returns an empty string
    /// for an empty attribute map.
    pub fn generate_update_all_statement(
        &self,
        query: &Query,
        attributes: &IndexMap<String, Value>,
    ) -> Result<String> {
        if attributes.is_empty() {
            return Ok(String::new());
        }
        let model = self.model(&query.model)?;

        let mut sets = vec![];
        for (name, value) in attributes {
            let field = self.field(model, name)?;
            sets.push(format!(
                "{} = {}",
                self.column_name_only(field),
                self.render_value(&model.name, value)?
            ));
        }

        let mut sql = format!("UPDATE {} SET {}", self.table_name(model), sets.join(", "));

        let where_sql = self.render_where(query)?;
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if self.dialect.supports_limit_on_update() {
            if let Some(limit) = query.limit {
                let order = self.order_entries(query, model, false, false)?;
                if !order.is_empty() {
                    sql.push_str(" ORDER BY ");
                    sql.push_str(&order.join(", "));
                }
                sql.push_str(&format!(" LIMIT {limit}"));
                if let Some(offset) = query.offset {
                    sql.push_str(&format!(" OFFSET {offset}"));
                }
            }
        }

        Ok(sql)
    }
}
