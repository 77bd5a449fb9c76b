use crate::stmt::Value;

/// Default value specifier for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultValue {
    pub kind: DefaultKind,

    /// Applied when inserting new rows.
    pub on_insert: bool,

    /// Applied when updating existing rows.
    pub on_update: bool,

    /// The value is supplied by the database engine itself, e.g. an
    /// autoincrement counter or `NOW()`.
    pub remote: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultKind {
    /// A static client-side value.
    Value(Value),

    /// A raw SQL expression, rendered unescaped.
    Literal(String),
}

impl DefaultValue {
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            kind: DefaultKind::Value(value.into()),
            on_insert: true,
            on_update: false,
            remote: false,
        }
    }

    pub fn literal(expr: impl Into<String>) -> Self {
        Self {
            kind: DefaultKind::Literal(expr.into()),
            on_insert: true,
            on_update: false,
            remote: false,
        }
    }

    pub fn remote(mut self) -> Self {
        self.remote = true;
        self
    }

    pub fn on_update(mut self) -> Self {
        self.on_update = true;
        self
    }
}
