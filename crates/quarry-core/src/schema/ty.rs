/// The type of a field, from quarry's point of view.
///
/// Dialects map these onto their own column types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    BigInt,
    Blob,
    Boolean,
    DateTime,

    /// A foreign key into another model's field. Stored using the referenced
    /// field's storage type.
    ForeignKey { model: String, field: String },

    Integer,
    Real,

    /// A relationship accessor. Virtual: excluded from storage.
    Relation { model: String },

    Text,
}

impl FieldType {
    pub fn foreign_key(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ForeignKey {
            model: model.into(),
            field: field.into(),
        }
    }

    pub fn relation(model: impl Into<String>) -> Self {
        Self::Relation {
            model: model.into(),
        }
    }

    /// Virtual fields are excluded from storage entirely.
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Relation { .. })
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey { .. })
    }
}
