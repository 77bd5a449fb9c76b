use super::{model::ModelId, DefaultValue, FieldType, IndexSpec};

use std::fmt;

/// Describes one column of a model.
///
/// Immutable after schema definition; mutating a live schema invalidates
/// generated SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Uniquely identifies the field in the schema.
    pub id: FieldId,

    /// Name of the field, e.g. `firstName`.
    pub name: String,

    /// Name of the backing column when it differs from the field name.
    pub column: Option<String>,

    pub ty: FieldType,

    pub nullable: bool,

    /// True if the field is the model's primary key.
    pub primary_key: bool,

    pub unique: bool,

    /// Index specifiers; each entry indexes this column together with its
    /// companion fields.
    pub indexes: Vec<IndexSpec>,

    pub default_value: Option<DefaultValue>,
}

/// Uniquely identifies a field within a schema.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            id: FieldId::placeholder(),
            name: name.into(),
            column: None,
            ty,
            nullable: true,
            primary_key: false,
            unique: false,
            indexes: vec![],
            default_value: None,
        }
    }

    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Indexes this field on its own.
    pub fn indexed(mut self) -> Self {
        self.indexes.push(IndexSpec::own());
        self
    }

    /// Indexes this field combined with the named companion fields.
    pub fn indexed_with<I, S>(mut self, companions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes.push(IndexSpec::with(companions));
        self
    }

    pub fn default_value(mut self, default_value: DefaultValue) -> Self {
        self.default_value = Some(default_value);
        self
    }

    /// Name of the backing column. Defaults to the field name.
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// True when the field's default is supplied by the database engine.
    pub fn has_remote_default(&self) -> bool {
        matches!(&self.default_value, Some(default) if default.remote)
    }
}

impl FieldId {
    pub fn placeholder() -> Self {
        Self {
            model: ModelId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
