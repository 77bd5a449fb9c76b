/// A reference to a model's field.
///
/// `model == None` resolves to the root model of the surrounding query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub model: Option<String>,
    pub field: String,
}

impl FieldRef {
    pub fn new(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            field: field.into(),
        }
    }

    /// References a field of the query's root model.
    pub fn root(field: impl Into<String>) -> Self {
        Self {
            model: None,
            field: field.into(),
        }
    }
}
