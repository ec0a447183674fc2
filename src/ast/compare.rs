use crate::ast::{Column, Expression, Function, Operator};

/// An item that can be compared against other expressions, producing
/// operator fragments in the query tree.
pub trait Comparable<'a> {
    /// Tests if both sides are the same value.
    fn equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if both sides are not the same value.
    fn not_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is smaller than the right side.
    fn less_than<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is at most the same as the right side.
    fn less_than_or_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is bigger than the right side.
    fn greater_than<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is at least the same as the right side.
    fn greater_than_or_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is included in the right-side row or
    /// sub-select.
    fn in_selection<T>(self, selection: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side is not included in the right-side row or
    /// sub-select.
    fn not_in_selection<T>(self, selection: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side matches the given pattern.
    fn like<T>(self, pattern: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the left side does not match the given pattern.
    fn not_like<T>(self, pattern: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;

    /// Tests if the value is `NULL`.
    fn is_null(self) -> Expression<'a>;

    /// Tests if the value is not `NULL`.
    fn is_not_null(self) -> Expression<'a>;

    /// Tests if the value lies between the two given bounds, inclusive.
    fn between<L, R>(self, left: L, right: R) -> Expression<'a>
    where
        L: Into<Expression<'a>>,
        R: Into<Expression<'a>>;

    /// The value, or the given fallback when the value is `NULL`.
    fn coalesce<T>(self, fallback: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>;
}

impl<'a, U> Comparable<'a> for U
where
    U: Into<Column<'a>>,
{
    fn equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("eq", self.into(), comparison).into()
    }

    fn not_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("ne", self.into(), comparison).into()
    }

    fn less_than<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("lt", self.into(), comparison).into()
    }

    fn less_than_or_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("lte", self.into(), comparison).into()
    }

    fn greater_than<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("gt", self.into(), comparison).into()
    }

    fn greater_than_or_equals<T>(self, comparison: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("gte", self.into(), comparison).into()
    }

    fn in_selection<T>(self, selection: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("in", self.into(), selection).into()
    }

    fn not_in_selection<T>(self, selection: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("notin", self.into(), selection).into()
    }

    fn like<T>(self, pattern: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("like", self.into(), pattern).into()
    }

    fn not_like<T>(self, pattern: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        Operator::binary("notlike", self.into(), pattern).into()
    }

    fn is_null(self) -> Expression<'a> {
        Operator::unary_postfix("isnull", self.into()).into()
    }

    fn is_not_null(self) -> Expression<'a> {
        Operator::unary_postfix("isnotnull", self.into()).into()
    }

    fn between<L, R>(self, left: L, right: R) -> Expression<'a>
    where
        L: Into<Expression<'a>>,
        R: Into<Expression<'a>>,
    {
        let column: Column<'a> = self.into();

        Operator::and(vec![
            Operator::binary("gte", column.clone(), left).into(),
            Operator::binary("lte", column, right).into(),
        ])
        .into()
    }

    fn coalesce<T>(self, fallback: T) -> Expression<'a>
    where
        T: Into<Expression<'a>>,
    {
        let column: Column<'a> = self.into();
        Function::new("coalesce", vec![column.into(), fallback.into()]).into()
    }
}
