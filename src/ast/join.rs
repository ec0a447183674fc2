use crate::ast::{Expression, Table};

/// The table and conditions of a join clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinData<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) conditions: Expression<'a>,
}

/// A join clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Join<'a> {
    /// Implements an `INNER JOIN` with the given `JoinData`.
    Inner(JoinData<'a>),
    /// Implements a `LEFT JOIN` with the given `JoinData`.
    Left(JoinData<'a>),
    /// Implements a `RIGHT JOIN` with the given `JoinData`.
    Right(JoinData<'a>),
    /// Implements a `FULL JOIN` with the given `JoinData`.
    Full(JoinData<'a>),
}

impl<'a> From<Table<'a>> for JoinData<'a> {
    fn from(table: Table<'a>) -> Self {
        JoinData {
            table,
            conditions: Expression::Value(crate::ast::Value::boolean(true)),
        }
    }
}
