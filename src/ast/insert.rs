use crate::ast::*;

/// What to do when an inserted row conflicts with an existing unique
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Ignore the conflicting row. Rendered through the engine's
    /// `insert_ignore` operator entry; dialects without one reject the
    /// statement.
    DoNothing,
}

/// A builder for an `INSERT` statement. The target table is mandatory:
/// compiling without calling [`into`](Self::into) is an error.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Insert<'a> {
    pub(crate) table: Option<Table<'a>>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) values: Values<'a>,
    pub(crate) on_conflict: Option<OnConflict>,
}

impl<'a> Insert<'a> {
    /// Creates an empty `INSERT` statement.
    pub fn new() -> Self {
        Insert::default()
    }

    /// Sets the target table.
    ///
    /// ```rust
    /// # use sqlforge::{ast::*, engine::Engine};
    /// # fn main() -> sqlforge::Result<()> {
    /// let insert = Insert::new()
    ///     .into("users")
    ///     .column("name")
    ///     .push_values(vec!["Musti"]);
    ///
    /// let compiled = Engine::generic().compile(insert)?;
    ///
    /// assert_eq!(r#"INSERT INTO "users" ("name") VALUES (@p0)"#, compiled.sql);
    /// # Ok(())
    /// # }
    /// ```
    pub fn into<T>(mut self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.table = Some(table.into());
        self
    }

    /// Adds a target column.
    pub fn column<T>(mut self, column: T) -> Self
    where
        T: Into<Column<'a>>,
    {
        self.columns.push(column.into());
        self
    }

    /// Sets the target columns in bulk.
    pub fn columns<T>(mut self, columns: Vec<T>) -> Self
    where
        T: Into<Column<'a>>,
    {
        self.columns = columns.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Appends a row of values. Every row must match the column list in
    /// width, checked at compile time.
    pub fn push_values<T>(mut self, row: T) -> Self
    where
        T: Into<Row<'a>>,
    {
        self.values.push(row);
        self
    }

    /// Replaces the value rows in bulk.
    pub fn values(mut self, values: Values<'a>) -> Self {
        self.values = values;
        self
    }

    /// Sets the conflict handling for the statement.
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }
}
