use super::{Condition, Connector, Query};

/// One step of a query's operation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Condition(Condition),

    /// A parenthesized logical grouping holding a nested query.
    Group { connector: Connector, query: Query },
}

impl Frame {
    pub fn connector(&self) -> Connector {
        match self {
            Self::Condition(condition) => condition.connector,
            Self::Group { connector, .. } => *connector,
        }
    }
}
