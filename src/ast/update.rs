use crate::ast::*;

/// A builder for an `UPDATE` statement.
///
/// ```rust
/// # use sqlforge::{ast::*, engine::Engine};
/// # fn main() -> sqlforge::Result<()> {
/// let update = Update::table("users")
///     .set("name", "Naukio")
///     .so_that("id".equals(1));
///
/// let compiled = Engine::generic().compile(update)?;
///
/// assert_eq!(
///     r#"UPDATE "users" SET "name" = @p0 WHERE "id" = @p1"#,
///     compiled.sql
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Update<'a> {
    pub(crate) table: Option<Table<'a>>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) values: Vec<Expression<'a>>,
    pub(crate) conditions: Option<Expression<'a>>,
}

impl<'a> Update<'a> {
    /// Creates a new `UPDATE` statement for the given table.
    pub fn table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Update {
            table: Some(table.into()),
            ..Default::default()
        }
    }

    /// Adds a column/value assignment pair. Compiling without any pair is
    /// an error.
    pub fn set<C, V>(mut self, column: C, value: V) -> Self
    where
        C: Into<Column<'a>>,
        V: Into<Expression<'a>>,
    {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    /// Adds `WHERE` conditions to the statement.
    pub fn so_that<T>(mut self, conditions: T) -> Self
    where
        T: Into<Expression<'a>>,
    {
        self.conditions = Some(conditions.into());
        self
    }
}
