use super::{Connector, JoinKind, Operand, Operator};

/// A single comparison frame: field, operator, value.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Owning model of the left-hand field; `None` resolves to the query's
    /// root model.
    pub model: Option<String>,

    pub field: String,

    pub op: Operator,

    pub operand: Operand,

    /// How this frame chains onto the previous clause.
    pub connector: Connector,

    /// Join type when this frame references another query context.
    pub join: JoinKind,

    /// Render the join with OUTER semantics.
    pub outer: bool,
}

impl Condition {
    pub fn new(field: impl Into<String>, op: Operator, operand: impl Into<Operand>) -> Self {
        Self {
            model: None,
            field: field.into(),
            op,
            operand: operand.into(),
            connector: Connector::And,
            join: JoinKind::Inner,
            outer: false,
        }
    }

    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }

    pub fn on_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn join_kind(mut self, join: JoinKind) -> Self {
        self.join = join;
        self
    }

    pub fn outer(mut self) -> Self {
        self.outer = true;
        self
    }

    /// A join frame references an unconditioned query context. Nested
    /// queries carrying conditions of their own are sub-queries instead.
    pub fn is_join(&self) -> bool {
        if self.op.is_exists() {
            return false;
        }
        matches!(&self.operand, Operand::Query { query, .. } if !query.has_conditions())
    }
}
