use crate::ast::{Column, Expression};

/// The direction of an ordering item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// One `ORDER BY` entry: the target expression and an optional explicit
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDefinition<'a> {
    pub(crate) value: Expression<'a>,
    pub(crate) order: Option<Order>,
}

/// A list of ordering items, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordering<'a>(pub(crate) Vec<OrderDefinition<'a>>);

impl<'a> Ordering<'a> {
    /// Appends an ordering item, returning the extended list.
    pub fn append(mut self, value: OrderDefinition<'a>) -> Self {
        self.0.push(value);
        self
    }

    /// The number of ordering items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no ordering was defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Conversion into an `OrderDefinition`.
pub trait IntoOrderDefinition<'a> {
    fn into_order_definition(self) -> OrderDefinition<'a>;
}

impl<'a> IntoOrderDefinition<'a> for &'a str {
    fn into_order_definition(self) -> OrderDefinition<'a> {
        let column: Column<'a> = self.into();

        OrderDefinition {
            value: column.into(),
            order: None,
        }
    }
}

impl<'a> IntoOrderDefinition<'a> for Column<'a> {
    fn into_order_definition(self) -> OrderDefinition<'a> {
        OrderDefinition {
            value: self.into(),
            order: None,
        }
    }
}

impl<'a> IntoOrderDefinition<'a> for Expression<'a> {
    fn into_order_definition(self) -> OrderDefinition<'a> {
        OrderDefinition {
            value: self,
            order: None,
        }
    }
}

impl<'a> IntoOrderDefinition<'a> for OrderDefinition<'a> {
    fn into_order_definition(self) -> OrderDefinition<'a> {
        self
    }
}

/// An item that can be used as an `ORDER BY` target with an explicit
/// direction.
pub trait Orderable<'a>: Sized {
    /// Order by the item, ascending.
    fn ascend(self) -> OrderDefinition<'a>;

    /// Order by the item, descending.
    fn descend(self) -> OrderDefinition<'a>;
}

impl<'a, U> Orderable<'a> for U
where
    U: Into<Column<'a>>,
{
    fn ascend(self) -> OrderDefinition<'a> {
        let column: Column<'a> = self.into();

        OrderDefinition {
            value: column.into(),
            order: Some(Order::Asc),
        }
    }

    fn descend(self) -> OrderDefinition<'a> {
        let column: Column<'a> = self.into();

        OrderDefinition {
            value: column.into(),
            order: Some(Order::Desc),
        }
    }
}
