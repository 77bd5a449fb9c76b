/// Comparison operator of a condition frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Exists,
    NotExists,
}

impl Operator {
    pub const fn is_exists(&self) -> bool {
        matches!(self, Self::Exists | Self::NotExists)
    }

    pub const fn is_like(&self) -> bool {
        matches!(self, Self::Like | Self::NotLike)
    }
}
