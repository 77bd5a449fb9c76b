use super::Generator;

use quarry_core::{
    schema::Model,
    stmt::{Operand, Operator, Query, Value},
    Instance, Result,
};

/// What a DELETE targets.
#[derive(Debug)]
pub enum DeleteTarget<'a> {
    /// Every row of the model's table.
    All,

    /// Specific instances, matched on their primary keys.
    Instances(&'a [Instance]),

    /// Rows matched by a query's conditions.
    Query(&'a Query),
}

impl Generator<'_> {
    pub fn generate_delete_statement(
        &self,
        model: &Model,
        target: DeleteTarget<'_>,
    ) -> Result<String> {
        match target {
            DeleteTarget::All => Ok(format!("DELETE FROM {}", self.table_name(model))),

            DeleteTarget::Instances(instances) => {
                if instances.is_empty() {
                    return Ok(String::new());
                }
                let pk = model.primary_key_field().ok_or_else(|| {
                    anyhow::anyhow!(
                        "cannot delete `{}` instances without a primary key; supply an explicit query",
                        model.name
                    )
                })?;
                let mut ids = Vec::with_capacity(instances.len());
                for instance in instances {
                    let id = instance.get(&pk.name).cloned().unwrap_or(Value::Null);
                    if id.is_null() {
                        anyhow::bail!(
                            "cannot delete a `{}` instance missing its primary key value",
                            model.name
                        );
                    }
                    ids.push(id);
                }
                let query = Query::new(model.name.as_str()).and(
                    pk.name.as_str(),
                    Operator::Eq,
                    Operand::List(ids),
                );
                self.generate_delete_statement(model, DeleteTarget::Query(&query))
            }

            DeleteTarget::Query(query) => {
                if query.has_joins() {
                    return self.delete_with_joins(model, query);
                }

                let mut sql = format!("DELETE FROM {}", self.table_name(model));
                let where_sql = self.render_where(query)?;
                if !where_sql.is_empty() {
                    sql.push_str(" WHERE ");
                    sql.push_str(&where_sql);
                }

                if self.dialect.supports_limit_on_delete() {
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

                if let Some(returning) = self.returning_clause(
                    model,
                    &[],
                    self.dialect.supports_returning_on_delete(),
                )? {
                    sql.push_str(&returning);
                }
                Ok(sql)
            }
        }
    }

    /// DELETE cannot carry a JOIN clause, so joined deletes alias the target
    /// table and correlate an EXISTS sub-select on the primary key.
    fn delete_with_joins(&self, model: &Model, query: &Query) -> Result<String> {
        let pk = model.primary_key_field().ok_or_else(|| {
            anyhow::anyhow!(
                "joined delete on `{}` requires a primary key field",
                model.name
            )
        })?;
        let alias = self.table_name_prefixed(model, "_");

        let mut sub = format!("SELECT 1 FROM {}", self.table_name(model));
        sub.push_str(&self.render_joins(query)?);
        sub.push_str(" WHERE ");
        let where_sql = self.render_where(query)?;
        if !where_sql.is_empty() {
            sub.push_str(&where_sql);
            sub.push_str(" AND ");
        }
        sub.push_str(&format!(
            "{} = {}",
            self.column_name(model, pk),
            self.column_name_prefixed(model, pk, "_")
        ));
        sub.push_str(" LIMIT 1 OFFSET 0");

        Ok(format!(
            "DELETE FROM {} AS {alias} WHERE EXISTS ({sub})",
            self.table_name(model)
        ))
    }
}
