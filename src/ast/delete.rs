use crate::ast::*;

/// A builder for a `DELETE` statement. The target list is ordered and
/// appendable; compiling an empty list is an error.
///
/// ```rust
/// # use sqlforge::{ast::*, engine::Engine};
/// # fn main() -> sqlforge::Result<()> {
/// let delete = Delete::from_table("users").so_that("id".equals(1));
/// let compiled = Engine::generic().compile(delete)?;
///
/// assert_eq!(r#"DELETE FROM "users" WHERE "id" = @p0"#, compiled.sql);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Delete<'a> {
    pub(crate) tables: Vec<Table<'a>>,
    pub(crate) conditions: Option<Expression<'a>>,
}

impl<'a> Delete<'a> {
    /// Creates a new `DELETE` statement targeting the given table.
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Delete {
            tables: vec![table.into()],
            ..Default::default()
        }
    }

    /// Appends another target table.
    pub fn and_from<T>(mut self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.tables.push(table.into());
        self
    }

    /// The number of target tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// `true` if no target table was set.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
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
