use super::{Generator, LiteralCtx};

use quarry_core::{
    stmt::{Condition, Operand, Operator, Query, Value},
    Result,
};

/// Shape of a condition's right-hand side, which picks the operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueShape {
    /// A list of values, rendered `IN (...)`.
    List,
    /// NULL or a boolean, compared with `IS` / `IS NOT`.
    Special,
    /// A column or sub-query reference.
    JoinRef,
    Scalar,
}

impl Generator<'_> {
    /// SQL token for an operator applied to a value of the given shape.
    /// Invalid combinations, like `>` against a list, error here.
    pub(crate) fn operator_token(&self, op: Operator, shape: ValueShape) -> Result<&'static str> {
        use Operator::*;
        use ValueShape::*;

        Ok(match (op, shape) {
            (Eq, List) => "IN",
            (Eq, Special) => "IS",
            (Eq, _) => "=",
            (Ne, List) => "NOT IN",
            (Ne, Special) => "IS NOT",
            (Ne, _) => "!=",

            (Gt | Gte | Lt | Lte, List) => {
                anyhow::bail!("list values cannot be compared with {op:?}")
            }
            (Gt, _) => ">",
            (Gte, _) => ">=",
            (Lt, _) => "<",
            (Lte, _) => "<=",

            (Like | NotLike, List) => anyhow::bail!("LIKE operators never accept list values"),
            (Like | NotLike, Special) => anyhow::bail!("LIKE operators require a string value"),
            (Like | NotLike, JoinRef) => {
                anyhow::bail!("LIKE operators are not supported for join references")
            }
            (Like, _) => "LIKE",
            (NotLike, _) => "NOT LIKE",

            (Exists | NotExists, _) => {
                anyhow::bail!("EXISTS conditions are rendered as sub-queries, not comparisons")
            }
        })
    }

    /// Renders one condition frame, or `None` when the frame contributes
    /// nothing to the WHERE clause (a join frame in value position).
    pub(crate) fn render_condition(
        &self,
        query: &Query,
        condition: &Condition,
    ) -> Result<Option<String>> {
        if condition.op.is_exists() {
            let Operand::Query { query: sub, .. } = &condition.operand else {
                anyhow::bail!("EXISTS requires a sub-query operand");
            };
            let token = if condition.op == Operator::NotExists {
                "NOT EXISTS"
            } else {
                "EXISTS"
            };
            let sub_sql = self.render_exists_select(sub)?;
            return Ok(Some(format!("{token}({sub_sql})")));
        }

        let owner = condition.model.as_deref().unwrap_or(&query.model);
        let model = self.model(owner)?;
        let field = self.field(model, &condition.field)?;
        let column = self.column_name(model, field);

        match &condition.operand {
            Operand::List(values) => self
                .render_list_condition(&query.model, &column, condition.op, values)
                .map(Some),

            Operand::Query {
                query: sub,
                quantifier,
            } => {
                // A conditionless sub-query is a join target, not a filter.
                if !sub.has_conditions() {
                    return Ok(None);
                }
                let sub_sql = self.render_subquery(sub)?;
                let sql = match quantifier {
                    Some(quantifier) => {
                        let token = self.operator_token(condition.op, ValueShape::JoinRef)?;
                        format!("{column} {token} {}({sub_sql})", quantifier.as_str())
                    }
                    None => {
                        let token = match condition.op {
                            Operator::Eq => "IN",
                            Operator::Ne => "NOT IN",
                            op => self.operator_token(op, ValueShape::JoinRef)?,
                        };
                        format!("{column} {token} ({sub_sql})")
                    }
                };
                Ok(Some(sql))
            }

            Operand::Field(field_ref) => {
                let (right_model, right_field) = self.resolve_ref(field_ref, &query.model)?;
                let token = self.operator_token(condition.op, ValueShape::JoinRef)?;
                Ok(Some(format!(
                    "{column} {token} {}",
                    self.column_name(right_model, right_field)
                )))
            }

            Operand::Literal(literal) => {
                let token = self.operator_token(condition.op, ValueShape::Scalar)?;
                let rhs = self.render_literal(literal, &LiteralCtx::expression(&query.model))?;
                Ok(Some(format!("{column} {token} {rhs}")))
            }

            Operand::Value(value) => self
                .render_scalar_condition(&query.model, &column, condition.op, value)
                .map(Some),
        }
    }

    fn render_scalar_condition(
        &self,
        root_model: &str,
        column: &str,
        op: Operator,
        value: &Value,
    ) -> Result<String> {
        if let Value::List(values) = value {
            return self.render_list_condition(root_model, column, op, values);
        }

        if op.is_like() {
            let Value::String(pattern) = value else {
                anyhow::bail!("LIKE operators require a string value");
            };
            let token = self.operator_token(op, ValueShape::Scalar)?;
            let pattern = self.dialect.format_like_pattern(pattern);
            let escaped = self.dialect.escape_value(&Value::String(pattern))?;
            return Ok(format!(
                "{column} {token} {escaped}{}",
                self.dialect.like_postfix()
            ));
        }

        let shape = if value.is_special() {
            ValueShape::Special
        } else {
            ValueShape::Scalar
        };
        let token = self.operator_token(op, shape)?;
        let rhs = self.render_value(root_model, value)?;
        Ok(format!("{column} {token} {rhs}"))
    }

    /// Array condition: flatten, deduplicate, then split into an `IN` list
    /// plus one `IS` / `IS NOT` clause per NULL or boolean member.
    fn render_list_condition(
        &self,
        root_model: &str,
        column: &str,
        op: Operator,
        values: &[Value],
    ) -> Result<String> {
        // Errors for every non-equality operator.
        let list_token = self.operator_token(op, ValueShape::List)?;

        let mut flat: Vec<&Value> = vec![];
        flatten_values(values, &mut flat);
        if flat.is_empty() {
            anyhow::bail!("cannot render a condition from an empty value list");
        }

        let (special, ordinary): (Vec<&Value>, Vec<&Value>) =
            flat.into_iter().partition(|value| value.is_special());

        let mut clauses = vec![];
        if !ordinary.is_empty() {
            let items = ordinary
                .into_iter()
                .map(|value| self.render_value(root_model, value))
                .collect::<Result<Vec<_>>>()?
                .join(",");
            clauses.push(format!("{column} {list_token} ({items})"));
        }
        for value in special {
            let token = self.operator_token(op, ValueShape::Special)?;
            clauses.push(format!(
                "{column} {token} {}",
                self.dialect.escape_value(value)?
            ));
        }

        if clauses.len() == 1 {
            Ok(clauses.pop().unwrap())
        } else {
            // NEQ must miss every member, so its clauses conjoin.
            let joiner = if op == Operator::Ne { " AND " } else { " OR " };
            Ok(format!("({})", clauses.join(joiner)))
        }
    }
}

/// Flattens nested lists and drops duplicates, preserving first-seen order.
fn flatten_values<'a>(values: &'a [Value], out: &mut Vec<&'a Value>) {
    for value in values {
        match value {
            Value::List(inner) => flatten_values(inner, out),
            value => {
                if !out.contains(&value) {
                    out.push(value);
                }
            }
        }
    }
}
