use crate::ast::*;

/// A builder for a `SELECT` statement.
///
/// ```rust
/// # use sqlforge::{ast::*, engine::Engine};
/// # fn main() -> sqlforge::Result<()> {
/// let query = Select::from_table("users").so_that("name".equals("Naukio"));
/// let compiled = Engine::generic().compile(query)?;
///
/// assert_eq!(r#"SELECT * FROM "users" WHERE "name" = @p0"#, compiled.sql);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Select<'a> {
    pub(crate) with: Option<With<'a>>,
    pub(crate) distinct: bool,
    pub(crate) top: Option<Top<'a>>,
    pub(crate) table: Option<Table<'a>>,
    pub(crate) columns: Option<Vec<Expression<'a>>>,
    pub(crate) conditions: Option<Expression<'a>>,
    pub(crate) joins: Vec<Join<'a>>,
    pub(crate) grouping: Vec<Column<'a>>,
    pub(crate) ordering: Ordering<'a>,
    pub(crate) offset: Option<u64>,
    pub(crate) fetch: Option<u64>,
}

impl<'a> Select<'a> {
    /// Creates a new `SELECT` statement for the given table.
    ///
    /// ```rust
    /// # use sqlforge::{ast::*, engine::Engine};
    /// # fn main() -> sqlforge::Result<()> {
    /// let compiled = Engine::generic().compile(Select::from_table(("crm", "users")))?;
    ///
    /// assert_eq!(r#"SELECT * FROM "crm"."users""#, compiled.sql);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Select {
            table: Some(table.into()),
            ..Default::default()
        }
    }

    /// Selects a static value as a column.
    pub fn value<T>(mut self, value: T) -> Self
    where
        T: Into<Expression<'a>>,
    {
        self.columns.get_or_insert_with(Vec::new).push(value.into());
        self
    }

    /// Adds a column to be selected.
    pub fn column<T>(mut self, column: T) -> Self
    where
        T: Into<Column<'a>>,
    {
        self.columns
            .get_or_insert_with(Vec::new)
            .push(column.into().into());
        self
    }

    /// A bulk method to select multiple values. Setting an explicitly
    /// empty list makes the statement uncompilable.
    pub fn columns<T>(mut self, columns: Vec<T>) -> Self
    where
        T: Into<Expression<'a>>,
    {
        self.columns = Some(columns.into_iter().map(|c| c.into()).collect());
        self
    }

    /// Deduplicates the result set.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds `WHERE` conditions to the query. See
    /// [Comparable](trait.Comparable.html#required-methods) for the
    /// comparison builders.
    pub fn so_that<T>(mut self, conditions: T) -> Self
    where
        T: Into<Expression<'a>>,
    {
        self.conditions = Some(conditions.into());
        self
    }

    /// Adds an `INNER JOIN` clause to the query.
    pub fn inner_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Inner(join.into()));
        self
    }

    /// Adds a `LEFT JOIN` clause to the query.
    pub fn left_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Left(join.into()));
        self
    }

    /// Adds a `RIGHT JOIN` clause to the query.
    pub fn right_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Right(join.into()));
        self
    }

    /// Adds a `FULL JOIN` clause to the query.
    pub fn full_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Full(join.into()));
        self
    }

    /// Adds a grouping to the `GROUP BY` section.
    pub fn group_by<T>(mut self, group: T) -> Self
    where
        T: Into<Column<'a>>,
    {
        self.grouping.push(group.into());
        self
    }

    /// Adds an ordering to the `ORDER BY` section.
    pub fn order_by<T>(mut self, value: T) -> Self
    where
        T: IntoOrderDefinition<'a>,
    {
        self.ordering = self.ordering.append(value.into_order_definition());
        self
    }

    /// Sets a `TOP`-style row limit.
    pub fn top(mut self, top: Top<'a>) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the number of rows to skip. Composed into a single trailing
    /// clause with [`fetch`](Self::fetch), offset first, regardless of
    /// call order.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the number of rows to return after the offset. Setting a fetch
    /// without an offset defaults the offset to zero.
    pub fn fetch(mut self, fetch: u64) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Appends a common table expression to the statement's `WITH` block.
    pub fn with(mut self, cte: CommonTableExpression<'a>) -> Self {
        self.with = Some(self.with.take().unwrap_or_default().cte(cte));
        self
    }

    /// Replaces the whole `WITH` block.
    pub fn with_block(mut self, with: With<'a>) -> Self {
        self.with = Some(with);
        self
    }

    /// Combines the statement with another one using `UNION`.
    pub fn union(self, other: Select<'a>) -> SetOperation<'a> {
        SetOperation::new(self).union(other)
    }

    /// Combines the statement with another one using `UNION ALL`.
    pub fn union_all(self, other: Select<'a>) -> SetOperation<'a> {
        SetOperation::new(self).union_all(other)
    }

    /// Combines the statement with another one using `INTERSECT`.
    pub fn intersect(self, other: Select<'a>) -> SetOperation<'a> {
        SetOperation::new(self).intersect(other)
    }

    /// Combines the statement with another one using `EXCEPT`.
    pub fn except(self, other: Select<'a>) -> SetOperation<'a> {
        SetOperation::new(self).except(other)
    }
}
