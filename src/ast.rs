//! An abstract syntax tree for SQL queries.
//!
//! The ast module handles everything related to building abstract SQL
//! fragments without going into engine-level specifics. Everything related
//! to rendering the fragments into text and parameters is in the
//! [engine](../engine/index.html) module.
mod column;
mod compare;
mod cte;
mod delete;
mod expression;
mod function;
mod insert;
mod join;
mod limits;
mod operator;
mod ordering;
mod query;
mod raw;
mod row;
mod select;
mod table;
mod union;
mod update;
mod values;

pub use column::Column;
pub use compare::Comparable;
pub use cte::{CommonTableExpression, IntoCommonTableExpression, With};
pub use delete::Delete;
pub use expression::Expression;
pub use function::*;
pub use insert::{Insert, OnConflict};
pub use join::{Join, JoinData};
pub use limits::{Top, TopValue};
pub use operator::{concat, not, Operands, Operator};
pub use ordering::{IntoOrderDefinition, Order, OrderDefinition, Orderable, Ordering};
pub use query::Query;
pub use raw::RawSql;
pub use row::{Row, Values};
pub use select::Select;
pub use table::{Aliasable, Joinable, Table, TableType};
pub use union::{SetOperation, SetOperator};
pub use update::Update;
pub use values::{IntoRaw, Raw, Value};

pub(crate) use raw::Segment;
pub(crate) use values::Params;
