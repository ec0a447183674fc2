use crate::ast::Expression;

/// An ordered list of expressions, rendered in parentheses. Used for `IN`
/// comparisons and `INSERT` value rows. Compiling an empty row is an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row<'a> {
    pub(crate) values: Vec<Expression<'a>>,
}

impl<'a> Row<'a> {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row { values: Vec::new() }
    }

    /// Creates an empty row with an allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value to the row.
    pub fn push<T>(&mut self, value: T)
    where
        T: Into<Expression<'a>>,
    {
        self.values.push(value.into());
    }

    /// The number of values in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if the row holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a, T> From<Vec<T>> for Row<'a>
where
    T: Into<Expression<'a>>,
{
    fn from(values: Vec<T>) -> Self {
        Row {
            values: values.into_iter().map(|v| v.into()).collect(),
        }
    }
}

impl<'a> IntoIterator for Row<'a> {
    type Item = Expression<'a>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// An ordered set of rows, used as the value source of a multi-row
/// `INSERT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values<'a> {
    pub(crate) rows: Vec<Row<'a>>,
}

impl<'a> Values<'a> {
    /// Creates an empty set of rows.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a set of rows from the given rows.
    pub fn new(rows: Vec<Row<'a>>) -> Self {
        Self { rows }
    }

    /// Creates an empty set of rows with an allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a row.
    pub fn push<T>(&mut self, row: T)
    where
        T: Into<Row<'a>>,
    {
        self.rows.push(row.into());
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, I, R> From<I> for Values<'a>
where
    I: Iterator<Item = R>,
    R: Into<Row<'a>>,
{
    fn from(rows: I) -> Self {
        Self {
            rows: rows.map(|r| r.into()).collect(),
        }
    }
}

impl<'a> IntoIterator for Values<'a> {
    type Item = Row<'a>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
