use super::{
    Condition, Connector, FieldRef, Frame, JoinKind, Literal, Operand, Operator, OrderBy,
    ProjectionEntry,
};

/// The materialized summary of a chainable query: an ordered frame list plus
/// projection, ordering, grouping, and paging state.
///
/// Exactly one root model per top-level query. Each frame is immutable once
/// pushed; builder methods consume and return the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Name of the root model.
    pub model: String,

    /// Focused field of this context; set on join references.
    pub field: Option<String>,

    pub frames: Vec<Frame>,

    pub projection: Vec<ProjectionEntry>,

    pub order: Vec<OrderBy>,

    pub group_by: Vec<FieldRef>,

    /// `HAVING` filter, itself a query walked recursively.
    pub having: Option<Box<Query>>,

    pub distinct: Option<Box<Literal>>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Query {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            field: None,
            frames: vec![],
            projection: vec![],
            order: vec![],
            group_by: vec![],
            having: None,
            distinct: None,
            limit: None,
            offset: None,
        }
    }

    /// A bare model/field reference, used as the target of a join condition.
    pub fn reference(model: impl Into<String>, field: impl Into<String>) -> Self {
        let mut query = Self::new(model);
        query.field = Some(field.into());
        query
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.frames.push(Frame::Condition(condition));
        self
    }

    pub fn and(self, field: impl Into<String>, op: Operator, operand: impl Into<Operand>) -> Self {
        self.filter(Condition::new(field, op, operand))
    }

    pub fn or(self, field: impl Into<String>, op: Operator, operand: impl Into<Operand>) -> Self {
        self.filter(Condition::new(field, op, operand).or())
    }

    /// Pushes a parenthesized sub-group.
    pub fn group(mut self, connector: Connector, query: Query) -> Self {
        self.frames.push(Frame::Group { connector, query });
        self
    }

    /// Joins `target`'s model onto this query through `field`.
    pub fn join(self, field: impl Into<String>, kind: JoinKind, target: Query) -> Self {
        self.filter(Condition::new(field, Operator::Eq, Operand::query(target)).join_kind(kind))
    }

    pub fn project(mut self, entry: ProjectionEntry) -> Self {
        self.projection.push(entry);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn group_by_field(mut self, field: FieldRef) -> Self {
        self.group_by.push(field);
        self
    }

    pub fn having(mut self, having: Query) -> Self {
        self.having = Some(Box::new(having));
        self
    }

    pub fn distinct(mut self, literal: Literal) -> Self {
        self.distinct = Some(Box::new(literal));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// True when any frame contributes a WHERE clause. Join frames do not.
    pub fn has_conditions(&self) -> bool {
        self.frames.iter().any(|frame| match frame {
            Frame::Condition(condition) => !condition.is_join(),
            Frame::Group { query, .. } => query.has_conditions(),
        })
    }

    pub fn has_joins(&self) -> bool {
        self.join_frames().next().is_some()
    }

    /// Top-level join condition frames, in declaration order.
    pub fn join_frames(&self) -> impl Iterator<Item = &Condition> + '_ {
        self.frames.iter().filter_map(|frame| match frame {
            Frame::Condition(condition) if condition.is_join() => Some(condition),
            _ => None,
        })
    }

    /// Names of all models referenced by this query: the root model followed
    /// by join targets, in declaration order.
    pub fn models_used(&self) -> Vec<&str> {
        let mut models = vec![&self.model[..]];
        for join in self.join_frames() {
            if let Operand::Query { query, .. } = &join.operand {
                if !models.contains(&&query.model[..]) {
                    models.push(&query.model[..]);
                }
            }
        }
        models
    }
}
