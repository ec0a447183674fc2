use crate::ast::Table;
use std::borrow::Cow;

/// A column definition, optionally qualified with a table and aliased for
/// the result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub(crate) name: Cow<'a, str>,
    pub(crate) table: Option<Table<'a>>,
    pub(crate) alias: Option<Cow<'a, str>>,
}

impl<'a> Column<'a> {
    /// Creates a new unqualified column.
    pub fn new<S>(name: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        Column {
            name: name.into(),
            table: None,
            alias: None,
        }
    }

    /// The `*` column, selecting everything from its table.
    pub fn wildcard() -> Self {
        Column::new("*")
    }

    /// Qualifies the column with a table.
    pub fn table<T>(mut self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.table = Some(table.into());
        self
    }

    /// Gives the column a result-set alias.
    pub fn alias<S>(mut self, alias: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.alias = Some(alias.into());
        self
    }

    /// The raw column name.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        self.name.as_ref() == "*"
    }

    pub(crate) fn is_empty_name(&self) -> bool {
        self.name.as_ref().is_empty()
    }
}

impl<'a> From<&'a str> for Column<'a> {
    fn from(name: &'a str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column<'_> {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

impl<'a> From<(&'a str, &'a str)> for Column<'a> {
    fn from((table, name): (&'a str, &'a str)) -> Self {
        Column::new(name).table(table)
    }
}

impl<'a> From<(&'a str, &'a str, &'a str)> for Column<'a> {
    fn from((schema, table, name): (&'a str, &'a str, &'a str)) -> Self {
        Column::new(name).table((schema, table))
    }
}
