use super::Field;
use crate::stmt::Direction;

use std::fmt;

/// A named collection of fields mapped to one database table.
#[derive(Debug)]
pub struct Model {
    /// Uniquely identifies the model in the schema.
    pub id: ModelId,

    /// Name of the model, e.g. `User`.
    pub name: String,

    /// Name of the backing table, e.g. `users`.
    pub table_name: String,

    /// The model's fields, in declaration order.
    pub fields: Vec<Field>,

    /// Ordering applied to selects when the query does not specify one.
    pub default_order: Vec<(String, Direction)>,
}

/// Uniquely identifies a model.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            id: ModelId::placeholder(),
            name: name.into(),
            table_name: table_name.into(),
            fields: vec![],
            default_order: vec![],
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn default_order(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.default_order.push((field.into(), direction));
        self
    }

    /// Looks up a field by name.
    pub fn resolve_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.primary_key)
    }

    pub fn primary_key_field_name(&self) -> Option<&str> {
        self.primary_key_field().map(|field| &field.name[..])
    }

    /// Non-virtual fields, in declaration order.
    pub fn stored_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| !field.ty.is_virtual())
    }
}

impl ModelId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
