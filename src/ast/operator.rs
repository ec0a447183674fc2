use crate::ast::Expression;
use std::borrow::Cow;

/// The operand shape of an operator fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Operands<'a> {
    /// An ordered, appendable operand list (`AND`, `OR`, concatenation).
    Nary(Vec<Expression<'a>>),
    /// A left/right pair.
    Binary {
        left: Box<Expression<'a>>,
        right: Box<Expression<'a>>,
    },
    /// A single operand, rendered before or after the token.
    Unary {
        operand: Box<Expression<'a>>,
        postfix: bool,
    },
}

/// An operator fragment. The logical key is translated into the rendered
/// token through the engine's operator registry at compile time; the
/// registry entry decides between infix and function-call rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator<'a> {
    pub(crate) key: Cow<'static, str>,
    pub(crate) operands: Operands<'a>,
}

impl<'a> Operator<'a> {
    /// Creates an n-ary operator over the given operand list.
    pub fn nary<K>(key: K, operands: Vec<Expression<'a>>) -> Self
    where
        K: Into<Cow<'static, str>>,
    {
        Operator {
            key: key.into(),
            operands: Operands::Nary(operands),
        }
    }

    /// Creates a binary operator.
    pub fn binary<K, L, R>(key: K, left: L, right: R) -> Self
    where
        K: Into<Cow<'static, str>>,
        L: Into<Expression<'a>>,
        R: Into<Expression<'a>>,
    {
        Operator {
            key: key.into(),
            operands: Operands::Binary {
                left: Box::new(left.into()),
                right: Box::new(right.into()),
            },
        }
    }

    /// Creates a unary operator with the token rendered before the
    /// operand.
    pub fn unary<K, T>(key: K, operand: T) -> Self
    where
        K: Into<Cow<'static, str>>,
        T: Into<Expression<'a>>,
    {
        Operator {
            key: key.into(),
            operands: Operands::Unary {
                operand: Box::new(operand.into()),
                postfix: false,
            },
        }
    }

    /// Creates a unary operator with the token rendered after the operand,
    /// as in `IS NULL`.
    pub fn unary_postfix<K, T>(key: K, operand: T) -> Self
    where
        K: Into<Cow<'static, str>>,
        T: Into<Expression<'a>>,
    {
        Operator {
            key: key.into(),
            operands: Operands::Unary {
                operand: Box::new(operand.into()),
                postfix: true,
            },
        }
    }

    /// An `AND` list over the given expressions.
    pub fn and(operands: Vec<Expression<'a>>) -> Self {
        Operator::nary("and", operands)
    }

    /// An `OR` list over the given expressions.
    pub fn or(operands: Vec<Expression<'a>>) -> Self {
        Operator::nary("or", operands)
    }

    /// The logical operator key.
    pub fn key(&self) -> &str {
        self.key.as_ref()
    }

    /// Appends an operand. Binary and unary shapes are widened into an
    /// operand list first.
    pub fn append<T>(&mut self, operand: T)
    where
        T: Into<Expression<'a>>,
    {
        let null = || Expression::Value(crate::ast::Value::null());

        match self.operands {
            Operands::Nary(ref mut operands) => operands.push(operand.into()),
            Operands::Binary {
                ref mut left,
                ref mut right,
            } => {
                let left = std::mem::replace(left.as_mut(), null());
                let right = std::mem::replace(right.as_mut(), null());
                self.operands = Operands::Nary(vec![left, right, operand.into()]);
            }
            Operands::Unary {
                operand: ref mut existing,
                ..
            } => {
                let existing = std::mem::replace(existing.as_mut(), null());
                self.operands = Operands::Nary(vec![existing, operand.into()]);
            }
        }
    }

    /// The number of operands.
    pub fn len(&self) -> usize {
        match self.operands {
            Operands::Nary(ref operands) => operands.len(),
            Operands::Binary { .. } => 2,
            Operands::Unary { .. } => 1,
        }
    }

    /// `true` if the operand list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// String concatenation over the given expressions. Renders as the infix
/// `||` operator or a `CONCAT(...)` call depending on the engine.
pub fn concat<'a, T, I>(exprs: I) -> Operator<'a>
where
    T: Into<Expression<'a>>,
    I: IntoIterator<Item = T>,
{
    Operator::nary("concat", exprs.into_iter().map(|e| e.into()).collect())
}

/// Negates the given expression.
pub fn not<'a, T>(expr: T) -> Operator<'a>
where
    T: Into<Expression<'a>>,
{
    Operator::unary("not", expr)
}
