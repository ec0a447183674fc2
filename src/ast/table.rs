use crate::ast::{Column, Expression, JoinData, RawSql, Select};
use crate::error::{Error, ErrorKind};
use crate::schema::{Describe, SchemaRegistry, TableInfo};
use std::{borrow::Cow, sync::Arc};

/// An object that can be aliased.
pub trait Aliasable<'a> {
    /// Alias the table for usage elsewhere in the query.
    fn alias<T>(self, alias: T) -> Table<'a>
    where
        T: Into<Cow<'a, str>>;
}

/// The source a table fragment points at.
#[derive(Debug, Clone, PartialEq)]
pub enum TableType<'a> {
    /// A table name.
    Table(Cow<'a, str>),
    /// A nested `SELECT`.
    Query(Box<Select<'a>>),
    /// A raw SQL sub-query.
    Raw(RawSql<'a>),
}

/// A table definition, usable as a select source, join target or statement
/// target. Resolving members off a table mapped to a registered type routes
/// through the schema registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<'a> {
    pub(crate) typ: TableType<'a>,
    pub(crate) alias: Option<Cow<'a, str>>,
    pub(crate) schema: Option<Cow<'a, str>>,
    pub(crate) mapping: Option<Arc<TableInfo>>,
}

impl<'a> Table<'a> {
    /// Defines the schema the table is located in.
    pub fn schema<S>(mut self, schema: S) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        self.schema = Some(schema.into());
        self
    }

    /// Creates a table backed by a type registered in the given schema
    /// registry. The table name, schema and member mappings come from the
    /// resolved [`TableInfo`].
    pub fn for_type<T>(registry: &SchemaRegistry) -> crate::Result<Table<'static>>
    where
        T: Describe,
    {
        let info = registry.get::<T>()?;

        Ok(Table {
            typ: TableType::Table(Cow::Owned(info.table_name().to_string())),
            alias: None,
            schema: info.schema().map(|s| Cow::Owned(s.to_string())),
            mapping: Some(info),
        })
    }

    /// Resolves a member path of the mapped type into a column qualified
    /// with this table, using the SQL name the schema registry computed.
    pub fn member(&self, path: &str) -> crate::Result<Column<'a>> {
        let column = self.member_unqualified(path)?;
        Ok(column.table(self.clone()))
    }

    /// Resolves a member path into an unqualified column, for positions
    /// where a bare column name is required.
    pub fn member_unqualified(&self, path: &str) -> crate::Result<Column<'static>> {
        let mapping = self.mapping.as_ref().ok_or_else(|| {
            Error::builder(ErrorKind::invalid_configuration(
                "The table is not mapped to a registered type.",
            ))
            .build()
        })?;

        let name = mapping.column_name(path).ok_or_else(|| {
            Error::builder(ErrorKind::invalid_configuration(format!(
                "No column mapped for member path `{path}` on type `{}`.",
                mapping.type_name()
            )))
            .build()
        })?;

        Ok(Column::new(name.to_string()))
    }

    /// The name the table is referred to with elsewhere in the query: the
    /// alias when present, otherwise the source name.
    pub fn effective_name(&self) -> Option<&str> {
        match self.alias {
            Some(ref alias) => Some(alias.as_ref()),
            None => match self.typ {
                TableType::Table(ref name) => Some(name.as_ref()),
                _ => None,
            },
        }
    }
}

impl<'a> From<&'a str> for Table<'a> {
    fn from(name: &'a str) -> Self {
        Table {
            typ: TableType::Table(name.into()),
            alias: None,
            schema: None,
            mapping: None,
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Table<'a> {
    fn from((schema, name): (&'a str, &'a str)) -> Self {
        let table: Table<'a> = name.into();
        table.schema(schema)
    }
}

impl From<String> for Table<'_> {
    fn from(name: String) -> Self {
        Table {
            typ: TableType::Table(name.into()),
            alias: None,
            schema: None,
            mapping: None,
        }
    }
}

impl From<(String, String)> for Table<'_> {
    fn from((schema, name): (String, String)) -> Self {
        let table: Table<'_> = name.into();
        table.schema(schema)
    }
}

impl<'a> From<Select<'a>> for Table<'a> {
    fn from(select: Select<'a>) -> Self {
        Table {
            typ: TableType::Query(Box::new(select)),
            alias: None,
            schema: None,
            mapping: None,
        }
    }
}

impl<'a> From<RawSql<'a>> for Table<'a> {
    fn from(raw: RawSql<'a>) -> Self {
        Table {
            typ: TableType::Raw(raw),
            alias: None,
            schema: None,
            mapping: None,
        }
    }
}

/// An object that can form the left side of a join clause.
pub trait Joinable<'a> {
    /// Pairs the table with its join conditions.
    fn on<T>(self, conditions: T) -> JoinData<'a>
    where
        T: Into<Expression<'a>>;
}

impl<'a, U> Joinable<'a> for U
where
    U: Into<Table<'a>>,
{
    fn on<T>(self, conditions: T) -> JoinData<'a>
    where
        T: Into<Expression<'a>>,
    {
        JoinData {
            table: self.into(),
            conditions: conditions.into(),
        }
    }
}

impl<'a> Aliasable<'a> for Table<'a> {
    fn alias<T>(mut self, alias: T) -> Table<'a>
    where
        T: Into<Cow<'a, str>>,
    {
        self.alias = Some(alias.into());
        self
    }
}

macro_rules! aliasable {
    ($($kind:ty),*) => (
        $(
            impl<'a> Aliasable<'a> for $kind {
                fn alias<T>(self, alias: T) -> Table<'a>
                where
                    T: Into<Cow<'a, str>>,
                {
                    let table: Table<'a> = self.into();
                    table.alias(alias)
                }
            }
        )*
    );
}

aliasable!(String, (String, String));
aliasable!(&'a str, (&'a str, &'a str));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Select;

    #[test]
    fn the_alias_wins_as_the_effective_name() {
        let table = Table::from("users").alias("u");
        assert_eq!(Some("u"), table.effective_name());
    }

    #[test]
    fn an_unaliased_table_is_referred_to_by_its_source_name() {
        let table = Table::from("users");
        assert_eq!(Some("users"), table.effective_name());
    }

    #[test]
    fn an_unaliased_sub_query_has_no_effective_name() {
        let table = Table::from(Select::from_table("users"));
        assert_eq!(None, table.effective_name());

        let aliased = Table::from(Select::from_table("users")).alias("inner");
        assert_eq!(Some("inner"), aliased.effective_name());
    }
}
