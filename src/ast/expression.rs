use crate::ast::*;

/// A sum type of the fragments a query tree is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    /// A value the compiler extracts into the parameter map.
    Value(Value<'a>),
    /// A value rendered into the query text without parameterization.
    Raw(Raw<'a>),
    /// A column, optionally qualified with a table.
    Column(Column<'a>),
    /// An ordered list of values, rendered in parentheses.
    Row(Row<'a>),
    /// A function call translated through the engine's function registry.
    Function(Function<'a>),
    /// An operator translated through the engine's operator registry.
    Operator(Operator<'a>),
    /// A raw SQL template with `{N}` placeholders.
    RawSql(RawSql<'a>),
    /// A sub-select.
    Select(Box<Select<'a>>),
}

impl<'a> Expression<'a> {
    /// Joins the expression with another one with `AND`.
    pub fn and<T>(self, other: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::and(vec![self, other.into()]).into()
    }

    /// Joins the expression with another one with `OR`.
    pub fn or<T>(self, other: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::or(vec![self, other.into()]).into()
    }

    /// The operator key when the expression renders as an infix chain and
    /// can capture surrounding operands.
    pub(crate) fn infix_key(&self) -> Option<&str> {
        match self {
            Expression::Operator(op) if !matches!(op.operands, Operands::Unary { .. }) => {
                Some(op.key.as_ref())
            }
            _ => None,
        }
    }
}

impl<'a> From<Value<'a>> for Expression<'a> {
    fn from(v: Value<'a>) -> Self {
        Expression::Value(v)
    }
}

impl<'a> From<Raw<'a>> for Expression<'a> {
    fn from(r: Raw<'a>) -> Self {
        Expression::Raw(r)
    }
}

impl<'a> From<Column<'a>> for Expression<'a> {
    fn from(c: Column<'a>) -> Self {
        Expression::Column(c)
    }
}

impl<'a> From<Row<'a>> for Expression<'a> {
    fn from(r: Row<'a>) -> Self {
        Expression::Row(r)
    }
}

impl<'a> From<Function<'a>> for Expression<'a> {
    fn from(f: Function<'a>) -> Self {
        Expression::Function(f)
    }
}

impl<'a> From<Operator<'a>> for Expression<'a> {
    fn from(o: Operator<'a>) -> Self {
        Expression::Operator(o)
    }
}

impl<'a> From<RawSql<'a>> for Expression<'a> {
    fn from(r: RawSql<'a>) -> Self {
        Expression::RawSql(r)
    }
}

impl<'a> From<Select<'a>> for Expression<'a> {
    fn from(s: Select<'a>) -> Self {
        Expression::Select(Box::new(s))
    }
}

macro_rules! expression_value {
    ($($kind:ty),*) => (
        $(
            impl<'a> From<$kind> for Expression<'a> {
                fn from(that: $kind) -> Self {
                    Expression::Value(that.into())
                }
            }
        )*
    );
}

expression_value!(
    i32,
    i64,
    usize,
    f32,
    f64,
    bool,
    &'a str,
    String,
    serde_json::Value
);

#[cfg(feature = "uuid")]
expression_value!(uuid::Uuid);

#[cfg(feature = "chrono")]
expression_value!(
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDate,
    chrono::NaiveTime
);
