use super::{FieldRef, Literal};

/// One entry of a query's projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionEntry {
    /// Project every field of every model used in the query.
    AllModels,

    Field(FieldRef),

    Literal(Literal),

    /// Raw SQL passed through untouched.
    Raw(String),
}
