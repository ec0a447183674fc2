use crate::ast::Query;
use std::borrow::Cow;

/// A common table expression, usable in the `WITH` block of a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression<'a> {
    pub(crate) identifier: Cow<'a, str>,
    pub(crate) columns: Vec<Cow<'a, str>>,
    pub(crate) selection: Box<Query<'a>>,
}

impl<'a> CommonTableExpression<'a> {
    /// Names a column of the nested expression. The expression exposes
    /// the underlying columns if this method is never called.
    pub fn column(mut self, column: impl Into<Cow<'a, str>>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// The name the expression is referred to with in the outer query.
    pub fn identifier(&self) -> &str {
        self.identifier.as_ref()
    }
}

/// Conversion into a common table expression.
pub trait IntoCommonTableExpression<'a> {
    fn into_cte(self, identifier: impl Into<Cow<'a, str>>) -> CommonTableExpression<'a>
    where
        Self: Into<Query<'a>>,
    {
        CommonTableExpression {
            identifier: identifier.into(),
            columns: Vec::new(),
            selection: Box::new(self.into()),
        }
    }
}

impl<'a, T> IntoCommonTableExpression<'a> for T where T: Into<Query<'a>> {}

/// The `WITH` block of a statement: an ordered, appendable list of common
/// table expressions. Compiling an empty block is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct With<'a> {
    pub(crate) recursive: bool,
    pub(crate) ctes: Vec<CommonTableExpression<'a>>,
}

impl<'a> With<'a> {
    /// Creates an empty `WITH` block.
    pub fn new() -> Self {
        With::default()
    }

    /// Marks the block recursive. Whether the `RECURSIVE` keyword is
    /// rendered depends on the engine's configuration.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Appends a common table expression.
    pub fn cte(mut self, cte: CommonTableExpression<'a>) -> Self {
        self.ctes.push(cte);
        self
    }

    /// The number of expressions in the block.
    pub fn len(&self) -> usize {
        self.ctes.len()
    }

    /// `true` if the block holds no expressions.
    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
    }
}
