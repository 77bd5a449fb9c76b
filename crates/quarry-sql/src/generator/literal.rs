use super::Generator;

use quarry_core::{
    stmt::{AggregateFunc, Literal, LiteralDistinct},
    Result,
};

/// Where a literal is being rendered, which decides whether aliases apply.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LiteralCtx<'a> {
    /// Model that unqualified field references resolve against.
    pub root_model: &'a str,

    /// Rendering inside a projection list; aliases are allowed here.
    pub projection: bool,

    /// Nested inside another literal; aliases are always suppressed.
    pub nested: bool,
}

impl<'a> LiteralCtx<'a> {
    pub(crate) fn projection(root_model: &'a str) -> Self {
        Self {
            root_model,
            projection: true,
            nested: false,
        }
    }

    pub(crate) fn expression(root_model: &'a str) -> Self {
        Self {
            root_model,
            projection: false,
            nested: false,
        }
    }

    fn nest(&self) -> Self {
        Self {
            nested: true,
            ..*self
        }
    }
}

impl Generator<'_> {
    pub(crate) fn render_literal(&self, literal: &Literal, cx: &LiteralCtx<'_>) -> Result<String> {
        match literal {
            Literal::Raw(sql) => Ok(sql.clone()),

            Literal::Field(literal) => {
                let (model, field) = self.resolve_ref(&literal.field, cx.root_model)?;
                if cx.nested || !cx.projection || literal.options.no_alias {
                    Ok(self.column_name(model, field))
                } else {
                    Ok(self.projection_name(
                        model,
                        field,
                        literal.options.alias.as_deref(),
                        false,
                    ))
                }
            }

            Literal::Aggregate(literal) => {
                let inner = match &literal.arg {
                    Some(arg) => self.render_literal(arg, &cx.nest())?,
                    None if literal.func == AggregateFunc::Count => "*".to_string(),
                    None => anyhow::bail!(
                        "aggregate {} requires an argument",
                        literal.func.sql_name()
                    ),
                };
                let mut out = format!("{}({inner})", literal.func.sql_name());
                if cx.projection && !cx.nested && !literal.options.no_alias {
                    if let Some(alias) = &literal.options.alias {
                        out.push_str(" AS ");
                        out.push_str(&self.dialect.escape_identifier(alias));
                    }
                }
                Ok(out)
            }

            Literal::Distinct(literal) => self.render_distinct(literal, cx),
        }
    }

    /// `DISTINCT`, `DISTINCT <expr>`, or `DISTINCT ON (<expr>)` depending on
    /// the argument and what the dialect supports.
    pub(crate) fn render_distinct(
        &self,
        literal: &LiteralDistinct,
        cx: &LiteralCtx<'_>,
    ) -> Result<String> {
        let Some(arg) = &literal.arg else {
            return Ok("DISTINCT".to_string());
        };
        let inner = self.render_literal(arg, &cx.nest())?;
        if cx.projection && self.dialect.supports_distinct_on() {
            Ok(format!("DISTINCT ON ({inner})"))
        } else {
            Ok(format!("DISTINCT {inner}"))
        }
    }
}
