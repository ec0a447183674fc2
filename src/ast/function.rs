use crate::ast::{Column, Expression};
use std::borrow::Cow;

/// A function call. The logical key is translated into the rendered
/// function name through the engine's function registry at compile time;
/// a key unknown to both the engine and the built-in defaults fails the
/// compilation with a not-supported error.
#[derive(Debug, Clone, PartialEq)]
pub struct Function<'a> {
    pub(crate) key: Cow<'static, str>,
    pub(crate) args: Vec<Expression<'a>>,
}

impl<'a> Function<'a> {
    /// Creates a function call with the given logical key and arguments.
    pub fn new<K>(key: K, args: Vec<Expression<'a>>) -> Self
    where
        K: Into<Cow<'static, str>>,
    {
        Function {
            key: key.into(),
            args,
        }
    }

    /// The logical function key.
    pub fn key(&self) -> &str {
        self.key.as_ref()
    }

    /// Appends an argument.
    pub fn push_arg<T>(&mut self, arg: T)
    where
        T: Into<Expression<'a>>,
    {
        self.args.push(arg.into());
    }

    /// The number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// `true` if the call has no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

macro_rules! unary_function {
    ($(#[$doc:meta] $name:ident => $key:expr),* $(,)?) => {
        $(
            #[$doc]
            pub fn $name<'a, T>(expr: T) -> Function<'a>
            where
                T: Into<Expression<'a>>,
            {
                Function::new($key, vec![expr.into()])
            }
        )*
    };
}

unary_function! {
    /// The absolute value of a numeric expression.
    abs => "abs",
    /// Rounds a numeric expression up to the nearest integer.
    ceiling => "ceiling",
    /// Rounds a numeric expression down to the nearest integer.
    floor => "floor",
    /// Rounds a numeric expression to the nearest integer.
    round => "round",
    /// Uppercases a string expression.
    upper => "upper",
    /// Lowercases a string expression.
    lower => "lower",
    /// The length of a string expression.
    length => "length",
    /// Trims surrounding whitespace from a string expression.
    trim => "trim",
    /// Counts the rows or non-null values of the expression.
    count => "count",
    /// Sums the values of the expression over the grouped rows.
    sum => "sum",
    /// Averages the values of the expression over the grouped rows.
    avg => "avg",
    /// The minimum value of the expression over the grouped rows.
    min => "min",
    /// The maximum value of the expression over the grouped rows.
    max => "max",
}

/// Counts all rows, `COUNT(*)`.
pub fn count_all<'a>() -> Function<'a> {
    Function::new("count", vec![Column::wildcard().into()])
}

/// The first non-null expression of the list.
pub fn coalesce<'a, T, I>(exprs: I) -> Function<'a>
where
    T: Into<Expression<'a>>,
    I: IntoIterator<Item = T>,
{
    Function::new("coalesce", exprs.into_iter().map(|e| e.into()).collect())
}

/// A substring of the expression, `from` being 1-based. The rendered
/// function name differs per dialect (`SUBSTRING` vs `SUBSTR`).
pub fn substring<'a, T, F>(expr: T, from: F, length: Option<i64>) -> Function<'a>
where
    T: Into<Expression<'a>>,
    F: Into<Expression<'a>>,
{
    let mut args = vec![expr.into(), from.into()];

    if let Some(length) = length {
        args.push(crate::ast::Value::integer(length).into());
    }

    Function::new("substring", args)
}

/// The identity value generated by the last insert. Not every dialect can
/// retrieve it; compiling this under such an engine raises a not-supported
/// error.
pub fn identity<'a>() -> Function<'a> {
    Function::new("identity", Vec::new())
}
