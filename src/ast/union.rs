use crate::ast::Select;
use std::fmt;

/// The combinator between two sides of a set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `UNION ALL`
    UnionAll,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOperator::Union => write!(f, "UNION"),
            SetOperator::UnionAll => write!(f, "UNION ALL"),
            SetOperator::Intersect => write!(f, "INTERSECT"),
            SetOperator::Except => write!(f, "EXCEPT"),
        }
    }
}

/// A chain of `SELECT` statements combined with set operators, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation<'a> {
    pub(crate) first: Box<Select<'a>>,
    pub(crate) rest: Vec<(SetOperator, Select<'a>)>,
}

impl<'a> SetOperation<'a> {
    /// Starts a chain from the given statement.
    pub fn new(first: Select<'a>) -> Self {
        SetOperation {
            first: Box::new(first),
            rest: Vec::new(),
        }
    }

    /// Appends a statement with `UNION`.
    pub fn union(mut self, select: Select<'a>) -> Self {
        self.rest.push((SetOperator::Union, select));
        self
    }

    /// Appends a statement with `UNION ALL`.
    pub fn union_all(mut self, select: Select<'a>) -> Self {
        self.rest.push((SetOperator::UnionAll, select));
        self
    }

    /// Appends a statement with `INTERSECT`.
    pub fn intersect(mut self, select: Select<'a>) -> Self {
        self.rest.push((SetOperator::Intersect, select));
        self
    }

    /// Appends a statement with `EXCEPT`.
    pub fn except(mut self, select: Select<'a>) -> Self {
        self.rest.push((SetOperator::Except, select));
        self
    }

    /// The number of statements in the chain.
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; a chain holds at least one statement.
    pub fn is_empty(&self) -> bool {
        false
    }
}
