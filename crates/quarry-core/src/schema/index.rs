/// One index specifier on a field: the owning column plus zero or more
/// companion fields forming a combined index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSpec {
    /// Additional field names combined with the owning field.
    pub companions: Vec<String>,
}

impl IndexSpec {
    /// Index the owning field on its own.
    pub fn own() -> Self {
        Self::default()
    }

    pub fn with<I, S>(companions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            companions: companions.into_iter().map(Into::into).collect(),
        }
    }
}
