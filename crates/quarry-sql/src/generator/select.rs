use super::{Generator, LiteralCtx};

use quarry_core::{
    schema::Model,
    stmt::{FieldRef, Literal, OrderBy, ProjectionEntry, Query},
    Result,
};

/// Caller-facing knobs for SELECT generation.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Project every model used by the query, not only the root model.
    pub include_relations: bool,

    /// Flip every ORDER BY direction, e.g. for a "last page" query.
    pub reverse_order: bool,

    /// On dialects where ORDER BY only takes effect under LIMIT, apply the
    /// dialect's unbounded limit when the query orders without one.
    pub force_limit: bool,
}

/// Internal rendering position of a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectMode {
    TopLevel,
    /// Value position inside a condition: no aliases, no default ordering.
    Subquery,
    /// `EXISTS (...)` body: projects `1` and pins LIMIT 1 OFFSET 0.
    Exists,
}

impl Generator<'_> {
    pub fn generate_select_statement(
        &self,
        query: &Query,
        options: &SelectOptions,
    ) -> Result<String> {
        self.render_select(query, options, SelectMode::TopLevel)
    }

    pub(crate) fn render_subquery(&self, query: &Query) -> Result<String> {
        self.render_select(query, &SelectOptions::default(), SelectMode::Subquery)
    }

    pub(crate) fn render_exists_select(&self, query: &Query) -> Result<String> {
        self.render_select(query, &SelectOptions::default(), SelectMode::Exists)
    }

    fn render_select(
        &self,
        query: &Query,
        options: &SelectOptions,
        mode: SelectMode,
    ) -> Result<String> {
        let root = self.model(&query.model)?;

        let projection = match mode {
            SelectMode::Exists => "1".to_string(),
            SelectMode::Subquery => self.subquery_projection(query, root)?,
            SelectMode::TopLevel => self.projection_list(query, root, options)?,
        };

        let mut sql = format!("SELECT {projection} FROM {}", self.table_name(root));
        sql.push_str(&self.render_joins(query)?);

        let where_sql = self.render_where(query)?;
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !query.group_by.is_empty() {
            let columns = query
                .group_by
                .iter()
                .map(|field_ref| {
                    let (model, field) = self.resolve_ref(field_ref, &query.model)?;
                    Ok(self.column_name(model, field))
                })
                .collect::<Result<Vec<_>>>()?
                .join(", ");
            sql.push_str(" GROUP BY ");
            sql.push_str(&columns);

            // HAVING is only meaningful under GROUP BY.
            if let Some(having) = &query.having {
                let having_sql = self.render_where(having)?;
                if !having_sql.is_empty() {
                    sql.push_str(" HAVING ");
                    sql.push_str(&having_sql);
                }
            }
        }

        if mode == SelectMode::Exists {
            sql.push_str(" LIMIT 1 OFFSET 0");
            return Ok(sql);
        }

        let use_default_order = mode == SelectMode::TopLevel;
        let order = self.order_entries(query, root, options.reverse_order, use_default_order)?;
        let mut limit = query.limit;
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
            if limit.is_none() && options.force_limit && self.dialect.order_requires_limit() {
                limit = Some(self.dialect.unbounded_limit());
            }
        }

        if let Some(limit) = limit {
            if self.dialect.supports_limit() {
                sql.push_str(&format!(" LIMIT {limit}"));
            }
        }
        if let Some(offset) = query.offset {
            if self.dialect.supports_offset() {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        Ok(sql)
    }

    fn projection_list(
        &self,
        query: &Query,
        root: &Model,
        options: &SelectOptions,
    ) -> Result<String> {
        let mut head = String::new();
        let mut parts: Vec<String> = vec![];

        if let Some(distinct) = &query.distinct {
            let cx = LiteralCtx::projection(&query.model);
            match &**distinct {
                Literal::Distinct(literal) => match &literal.arg {
                    None => head.push_str("DISTINCT "),
                    Some(_) => {
                        let rendered = self.render_distinct(literal, &cx)?;
                        if rendered.starts_with("DISTINCT ON") {
                            head.push_str(&rendered);
                            head.push(' ');
                        } else {
                            // No ON form: the target column leads the list.
                            head.push_str("DISTINCT ");
                            parts.push(
                                rendered.trim_start_matches("DISTINCT ").to_string(),
                            );
                        }
                    }
                },
                // Any other literal is shorthand for DISTINCT over it.
                literal => {
                    let inner = self.render_literal(literal, &cx)?;
                    if self.dialect.supports_distinct_on() {
                        head.push_str(&format!("DISTINCT ON ({inner}) "));
                    } else {
                        head.push_str("DISTINCT ");
                        parts.push(inner);
                    }
                }
            }
        }

        let all_models = options.include_relations
            || query
                .projection
                .iter()
                .any(|entry| matches!(entry, ProjectionEntry::AllModels));

        if query.projection.is_empty() || all_models {
            let models = if all_models {
                query.models_used()
            } else {
                vec![&query.model[..]]
            };
            for name in models {
                let model = self.model(name)?;
                for field in model.stored_fields() {
                    parts.push(self.projection_name(model, field, None, false));
                }
            }
        }

        let models_used = query.models_used();
        for entry in &query.projection {
            match entry {
                ProjectionEntry::AllModels => {}
                ProjectionEntry::Field(field_ref) => {
                    let (model, field) = self.resolve_ref(field_ref, &query.model)?;
                    // Fields of models the query never touches are skipped.
                    if !models_used.contains(&model.name.as_str()) {
                        continue;
                    }
                    let rendered = self.projection_name(model, field, None, false);
                    if !parts.contains(&rendered) {
                        parts.push(rendered);
                    }
                }
                ProjectionEntry::Literal(literal) => {
                    parts.push(
                        self.render_literal(literal, &LiteralCtx::projection(&query.model))?,
                    );
                }
                ProjectionEntry::Raw(sql) => parts.push(sql.clone()),
            }
        }

        // Dialects that restrict ordering to projected columns get the order
        // fields merged in.
        if self.dialect.order_by_projected_only() {
            for order in self.effective_order(query, root) {
                let (model, field) = self.resolve_ref(&order.field, &query.model)?;
                let rendered = self.projection_name(model, field, None, false);
                if !parts.contains(&rendered) {
                    parts.push(rendered);
                }
            }
        }

        Ok(format!("{head}{}", parts.join(", ")))
    }

    /// Sub-query projection: explicit entries without aliases, otherwise the
    /// focused field, otherwise the primary key.
    fn subquery_projection(&self, query: &Query, root: &Model) -> Result<String> {
        if !query.projection.is_empty() {
            let mut parts = vec![];
            for entry in &query.projection {
                match entry {
                    ProjectionEntry::AllModels => {
                        for field in root.stored_fields() {
                            parts.push(self.column_name(root, field));
                        }
                    }
                    ProjectionEntry::Field(field_ref) => {
                        let (model, field) = self.resolve_ref(field_ref, &query.model)?;
                        parts.push(self.column_name(model, field));
                    }
                    ProjectionEntry::Literal(literal) => {
                        parts.push(
                            self.render_literal(literal, &LiteralCtx::expression(&query.model))?,
                        );
                    }
                    ProjectionEntry::Raw(sql) => parts.push(sql.clone()),
                }
            }
            return Ok(parts.join(", "));
        }

        let field = match &query.field {
            Some(name) => self.field(root, name)?,
            None => self.primary_key(root)?,
        };
        Ok(self.column_name(root, field))
    }

    /// Explicit order, falling back to the model's default order for
    /// top-level statements.
    fn effective_order(&self, query: &Query, root: &Model) -> Vec<OrderBy> {
        if !query.order.is_empty() {
            return query.order.clone();
        }
        root.default_order
            .iter()
            .map(|(field, direction)| OrderBy {
                field: FieldRef::root(field.clone()),
                direction: *direction,
            })
            .collect()
    }

    /// Rendered `column DIRECTION` entries.
    pub(crate) fn order_entries(
        &self,
        query: &Query,
        root: &Model,
        reverse: bool,
        use_default: bool,
    ) -> Result<Vec<String>> {
        let order = if use_default {
            self.effective_order(query, root)
        } else {
            query.order.clone()
        };

        order
            .iter()
            .map(|entry| {
                let (model, field) = self.resolve_ref(&entry.field, &query.model)?;
                let direction = if reverse {
                    entry.direction.reverse()
                } else {
                    entry.direction
                };
                Ok(format!(
                    "{} {}",
                    self.column_name(model, field),
                    direction.as_str()
                ))
            })
            .collect()
    }
}
