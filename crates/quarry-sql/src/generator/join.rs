use super::{Generator, ValueShape};

use quarry_core::{
    schema::{Field, Model},
    stmt::{Connector, JoinKind, Operand, Operator, Query},
    Result,
};

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

/// One join condition with both sides resolved against the schema.
#[derive(Debug)]
pub(crate) struct JoinInfo<'a> {
    pub op: Operator,
    pub kind: JoinKind,
    pub outer: bool,
    pub connector: Connector,

    /// Frame side, rendered left of the operator.
    pub left: (&'a Model, &'a Field),

    /// Referenced side, rendered right of the operator.
    pub right: (&'a Model, &'a Field),

    /// Model this join depends on being in the statement already.
    pub dependency: &'a str,
}

impl<'a> Generator<'a> {
    /// Resolves every join frame, grouped by the joined (non-root) model.
    /// Multiple conditions against the same model share one ON clause.
    pub(crate) fn collect_joins(
        &self,
        query: &Query,
    ) -> Result<IndexMap<String, Vec<JoinInfo<'a>>>> {
        let mut joins: IndexMap<String, Vec<JoinInfo<'a>>> = IndexMap::new();

        for condition in query.join_frames() {
            let Operand::Query { query: target, .. } = &condition.operand else {
                continue;
            };
            let Some(target_field) = &target.field else {
                anyhow::bail!(
                    "join against model `{}` requires a field reference",
                    target.model
                );
            };

            let left_model = self.model(condition.model.as_deref().unwrap_or(&query.model))?;
            let left_field = self.field(left_model, &condition.field)?;
            let right_model = self.model(&target.model)?;
            let right_field = self.field(right_model, target_field)?;

            // The joined side is whichever side is not the query root.
            let (joined, dependency) = if right_model.name == query.model {
                (&left_model.name, &right_model.name)
            } else {
                (&right_model.name, &left_model.name)
            };

            joins.entry(joined.clone()).or_default().push(JoinInfo {
                op: condition.op,
                kind: condition.join,
                outer: condition.outer,
                connector: condition.connector,
                left: (left_model, left_field),
                right: (right_model, right_field),
                dependency,
            });
        }

        Ok(joins)
    }

    /// Dependency-orders joined models so a join never references a table
    /// that has not been introduced yet. Ties and cycles break on model
    /// name, keeping the output byte-stable across runs.
    pub(crate) fn order_joins(&self, joins: &IndexMap<String, Vec<JoinInfo<'_>>>) -> Vec<String> {
        let mut indegree: BTreeMap<&str, usize> =
            joins.keys().map(|name| (&name[..], 0)).collect();
        let mut edges: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        for (joined, infos) in joins {
            for info in infos {
                if info.dependency == joined {
                    continue;
                }
                // Dependencies outside the join set (the root) are free.
                if !joins.contains_key(info.dependency) {
                    continue;
                }
                if edges
                    .entry(info.dependency)
                    .or_default()
                    .insert(joined)
                {
                    *indegree.get_mut(&joined[..]).unwrap() += 1;
                }
            }
        }

        let mut ready: BTreeSet<&str> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut ordered = Vec::with_capacity(joins.len());

        while let Some(&name) = ready.iter().next() {
            ready.remove(name);
            ordered.push(name.to_string());
            let Some(dependents) = edges.get(name) else {
                continue;
            };
            for &dependent in dependents {
                let degree = indegree.get_mut(dependent).unwrap();
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(dependent);
                }
            }
        }

        // Cyclic joins keep a positive degree; append them in name order.
        for (name, degree) in indegree {
            if degree > 0 {
                ordered.push(name.to_string());
            }
        }

        ordered
    }

    /// The full join clause, leading space included, or an empty string for
    /// a joinless query.
    pub(crate) fn render_joins(&self, query: &Query) -> Result<String> {
        let joins = self.collect_joins(query)?;
        if joins.is_empty() {
            return Ok(String::new());
        }

        let mut out = String::new();
        for model_name in self.order_joins(&joins) {
            let infos = &joins[&model_name];
            let first = &infos[0];
            let join_token = self.dialect.join_type(first.kind, first.outer);
            let table = self.table_name(self.model(&model_name)?);

            let mut on = String::new();
            for (i, info) in infos.iter().enumerate() {
                if i > 0 {
                    on.push(' ');
                    on.push_str(info.connector.as_str());
                    on.push(' ');
                }
                let token = self.operator_token(info.op, ValueShape::JoinRef)?;
                on.push_str(&self.column_name(info.left.0, info.left.1));
                on.push(' ');
                on.push_str(token);
                on.push(' ');
                on.push_str(&self.column_name(info.right.0, info.right.1));
            }

            out.push_str(&format!(" {join_token} {table} ON {on}"));
        }

        Ok(out)
    }
}
