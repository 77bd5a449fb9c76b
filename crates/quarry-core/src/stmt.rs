mod condition;
pub use condition::Condition;

mod connector;
pub use connector::Connector;

mod direction;
pub use direction::Direction;

mod field_ref;
pub use field_ref::FieldRef;

mod frame;
pub use frame::Frame;

mod join_kind;
pub use join_kind::JoinKind;

mod literal;
pub use literal::{
    AggregateFunc, Literal, LiteralAggregate, LiteralDistinct, LiteralField, LiteralOptions,
};

mod operand;
pub use operand::Operand;

mod operator;
pub use operator::Operator;

mod order_by;
pub use order_by::OrderBy;

mod projection;
pub use projection::ProjectionEntry;

mod quantifier;
pub use quantifier::Quantifier;

mod query;
pub use query::Query;

mod value;
pub use value::Value;
