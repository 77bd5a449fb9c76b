use super::{FieldRef, Literal, Quantifier, Query, Value};

/// The right-hand side of a condition frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A reference to another model's field (a join reference).
    Field(FieldRef),

    /// A list of values; collapses into `IN` / `NOT IN`.
    List(Vec<Value>),

    Literal(Literal),

    /// A nested query context: a sub-query when it has conditions of its
    /// own, a join reference otherwise.
    Query {
        query: Box<Query>,
        quantifier: Option<Quantifier>,
    },

    Value(Value),
}

impl Operand {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field(FieldRef::new(model, field))
    }

    pub fn query(query: Query) -> Self {
        Self::Query {
            query: Box::new(query),
            quantifier: None,
        }
    }

    pub fn any(query: Query) -> Self {
        Self::Query {
            query: Box::new(query),
            quantifier: Some(Quantifier::Any),
        }
    }

    pub fn all(query: Query) -> Self {
        Self::Query {
            query: Box::new(query),
            quantifier: Some(Quantifier::All),
        }
    }
}

impl From<Value> for Operand {
    fn from(src: Value) -> Self {
        Self::Value(src)
    }
}

impl From<Literal> for Operand {
    fn from(src: Literal) -> Self {
        Self::Literal(src)
    }
}

impl From<Query> for Operand {
    fn from(src: Query) -> Self {
        Self::query(src)
    }
}
