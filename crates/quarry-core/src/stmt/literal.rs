use super::FieldRef;

/// A typed wrapper signaling "render this as raw/aggregate SQL, not as an
/// escaped value".
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An aggregate function application.
    Aggregate(LiteralAggregate),

    /// `DISTINCT`, bare or wrapping an inner literal.
    Distinct(LiteralDistinct),

    /// An escaped field/projection reference.
    Field(LiteralField),

    /// A raw SQL fragment, passed through untouched.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralAggregate {
    pub func: AggregateFunc,

    /// `None` is only meaningful for `COUNT`, which renders `*`.
    pub arg: Option<Box<Literal>>,

    pub options: LiteralOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Avg,
    Count,
    Max,
    Min,
    Sum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralDistinct {
    pub arg: Option<Box<Literal>>,
    pub options: LiteralOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralField {
    pub field: FieldRef,
    pub options: LiteralOptions,
}

/// Rendering options shared by all literal kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralOptions {
    /// Explicit projection alias.
    pub alias: Option<String>,

    /// Suppress ` AS ...` even in projection context.
    pub no_alias: bool,

    /// The value is supplied by the database engine; writes touching this
    /// literal must be read back through a RETURNING clause.
    pub remote: bool,
}

impl AggregateFunc {
    pub fn sql_name(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
        }
    }
}

impl Literal {
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    pub fn field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field(LiteralField {
            field: FieldRef::new(model, field),
            options: LiteralOptions::default(),
        })
    }

    /// Field literal resolved against the query's root model.
    pub fn own_field(field: impl Into<String>) -> Self {
        Self::Field(LiteralField {
            field: FieldRef::root(field),
            options: LiteralOptions::default(),
        })
    }

    fn aggregate(func: AggregateFunc, arg: Option<Literal>) -> Self {
        Self::Aggregate(LiteralAggregate {
            func,
            arg: arg.map(Box::new),
            options: LiteralOptions::default(),
        })
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::aggregate(AggregateFunc::Count, None)
    }

    pub fn count(arg: Literal) -> Self {
        Self::aggregate(AggregateFunc::Count, Some(arg))
    }

    pub fn sum(arg: Literal) -> Self {
        Self::aggregate(AggregateFunc::Sum, Some(arg))
    }

    pub fn avg(arg: Literal) -> Self {
        Self::aggregate(AggregateFunc::Avg, Some(arg))
    }

    pub fn min(arg: Literal) -> Self {
        Self::aggregate(AggregateFunc::Min, Some(arg))
    }

    pub fn max(arg: Literal) -> Self {
        Self::aggregate(AggregateFunc::Max, Some(arg))
    }

    /// Bare `DISTINCT`.
    pub fn distinct() -> Self {
        Self::Distinct(LiteralDistinct {
            arg: None,
            options: LiteralOptions::default(),
        })
    }

    pub fn distinct_on(arg: Literal) -> Self {
        Self::Distinct(LiteralDistinct {
            arg: Some(Box::new(arg)),
            options: LiteralOptions::default(),
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        if let Some(options) = self.options_mut() {
            options.alias = Some(alias.into());
        }
        self
    }

    pub fn no_alias(mut self) -> Self {
        if let Some(options) = self.options_mut() {
            options.no_alias = true;
        }
        self
    }

    pub fn remote(mut self) -> Self {
        if let Some(options) = self.options_mut() {
            options.remote = true;
        }
        self
    }

    pub fn is_remote(&self) -> bool {
        self.options().is_some_and(|options| options.remote)
    }

    pub fn options(&self) -> Option<&LiteralOptions> {
        match self {
            Self::Aggregate(literal) => Some(&literal.options),
            Self::Distinct(literal) => Some(&literal.options),
            Self::Field(literal) => Some(&literal.options),
            Self::Raw(_) => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut LiteralOptions> {
        match self {
            Self::Aggregate(literal) => Some(&mut literal.options),
            Self::Distinct(literal) => Some(&mut literal.options),
            Self::Field(literal) => Some(&mut literal.options),
            Self::Raw(_) => None,
        }
    }
}
