use super::{Direction, FieldRef};

/// One `ORDER BY` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: FieldRef,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: FieldRef) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: FieldRef) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}
