use crate::error::{Error, ErrorKind};
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use std::{
    borrow::{Borrow, Cow},
    convert::TryFrom,
    fmt,
    str::FromStr,
};

#[cfg(feature = "uuid")]
use uuid::Uuid;

#[cfg(feature = "chrono")]
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A value written to the query as-is without parameterization.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw<'a>(pub(crate) Value<'a>);

/// Converts the value into a state to skip parameterization.
///
/// Must be used carefully to avoid SQL injections.
pub trait IntoRaw<'a> {
    fn raw(self) -> Raw<'a>;
}

impl<'a, T> IntoRaw<'a> for T
where
    T: Into<Value<'a>>,
{
    fn raw(self) -> Raw<'a> {
        Raw(self.into())
    }
}

/// A value the compiler extracts into the parameter map. Null values should
/// be defined by their corresponding type variants with a `None` value for
/// best compatibility.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// 64-bit signed integer.
    Integer(Option<i64>),
    /// A decimal value.
    Real(Option<Decimal>),
    /// String value.
    Text(Option<Cow<'a, str>>),
    /// Bytes value.
    Bytes(Option<Cow<'a, [u8]>>),
    /// Boolean value.
    Boolean(Option<bool>),
    /// A single character.
    Char(Option<char>),
    /// A JSON value.
    Json(Option<serde_json::Value>),
    #[cfg(feature = "uuid")]
    /// An UUID value.
    Uuid(Option<Uuid>),
    #[cfg(feature = "chrono")]
    /// A datetime value.
    DateTime(Option<DateTime<Utc>>),
    #[cfg(feature = "chrono")]
    /// A date value.
    Date(Option<NaiveDate>),
    #[cfg(feature = "chrono")]
    /// A time value.
    Time(Option<NaiveTime>),
}

pub(crate) struct Params<'a>(pub(crate) &'a [Value<'a>]);

impl<'a> fmt::Display for Params<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();

        write!(f, "[")?;
        for (i, val) in self.0.iter().enumerate() {
            write!(f, "{val}")?;

            if i < (len - 1) {
                write!(f, ",")?;
            }
        }
        write!(f, "]")
    }
}

impl<'a> fmt::Display for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = match self {
            Value::Integer(val) => val.map(|v| write!(f, "{v}")),
            Value::Real(val) => val.map(|v| write!(f, "{v}")),
            Value::Text(val) => val.as_ref().map(|v| write!(f, "\"{v}\"")),
            Value::Bytes(val) => val.as_ref().map(|v| write!(f, "<{} bytes blob>", v.len())),
            Value::Boolean(val) => val.map(|v| write!(f, "{v}")),
            Value::Char(val) => val.map(|v| write!(f, "'{v}'")),
            Value::Json(val) => val.as_ref().map(|v| write!(f, "{v}")),
            #[cfg(feature = "uuid")]
            Value::Uuid(val) => val.map(|v| write!(f, "{v}")),
            #[cfg(feature = "chrono")]
            Value::DateTime(val) => val.map(|v| write!(f, "{v}")),
            #[cfg(feature = "chrono")]
            Value::Date(val) => val.map(|v| write!(f, "{v}")),
            #[cfg(feature = "chrono")]
            Value::Time(val) => val.map(|v| write!(f, "{v}")),
        };

        match res {
            Some(r) => r,
            None => write!(f, "null"),
        }
    }
}

impl<'a> Value<'a> {
    /// Creates a new integer value.
    pub fn integer<I>(value: I) -> Self
    where
        I: Into<i64>,
    {
        Value::Integer(Some(value.into()))
    }

    /// Creates a new decimal value.
    pub fn real(value: Decimal) -> Self {
        Value::Real(Some(value))
    }

    /// Creates a new string value.
    pub fn text<T>(value: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Value::Text(Some(value.into()))
    }

    /// Creates a new bytes value.
    pub fn bytes<B>(value: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Value::Bytes(Some(value.into()))
    }

    /// Creates a new boolean value.
    pub fn boolean<B>(value: B) -> Self
    where
        B: Into<bool>,
    {
        Value::Boolean(Some(value.into()))
    }

    /// Creates a new character value.
    pub fn character<C>(value: C) -> Self
    where
        C: Into<char>,
    {
        Value::Char(Some(value.into()))
    }

    /// Creates a new JSON value.
    pub fn json(value: serde_json::Value) -> Self {
        Value::Json(Some(value))
    }

    /// Creates a new uuid value.
    #[cfg(feature = "uuid")]
    pub fn uuid(value: Uuid) -> Self {
        Value::Uuid(Some(value))
    }

    /// Creates a new datetime value.
    #[cfg(feature = "chrono")]
    pub fn datetime(value: DateTime<Utc>) -> Self {
        Value::DateTime(Some(value))
    }

    /// Creates a new date value.
    #[cfg(feature = "chrono")]
    pub fn date(value: NaiveDate) -> Self {
        Value::Date(Some(value))
    }

    /// Creates a new time value.
    #[cfg(feature = "chrono")]
    pub fn time(value: NaiveTime) -> Self {
        Value::Time(Some(value))
    }

    /// A null text value, useful as a typed null literal.
    pub fn null() -> Self {
        Value::Text(None)
    }

    /// `true` if the `Value` is null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Integer(i) => i.is_none(),
            Value::Real(r) => r.is_none(),
            Value::Text(t) => t.is_none(),
            Value::Bytes(b) => b.is_none(),
            Value::Boolean(b) => b.is_none(),
            Value::Char(c) => c.is_none(),
            Value::Json(json) => json.is_none(),
            #[cfg(feature = "uuid")]
            Value::Uuid(u) => u.is_none(),
            #[cfg(feature = "chrono")]
            Value::DateTime(dt) => dt.is_none(),
            #[cfg(feature = "chrono")]
            Value::Date(d) => d.is_none(),
            #[cfg(feature = "chrono")]
            Value::Time(t) => t.is_none(),
        }
    }

    /// `true` if the `Value` is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns a &str if the value is text, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(Some(cow)) => Some(cow.borrow()),
            Value::Bytes(Some(cow)) => std::str::from_utf8(cow.as_ref()).ok(),
            _ => None,
        }
    }

    /// Transforms the `Value` to a `String` if it's text, otherwise `None`.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Text(Some(cow)) => Some(cow.into_owned()),
            Value::Bytes(Some(cow)) => String::from_utf8(cow.into_owned()).ok(),
            _ => None,
        }
    }

    /// `true` if the `Value` is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns an i64 if the value is an integer, otherwise `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => *i,
            _ => None,
        }
    }

    /// Returns a decimal if the value is a real value, otherwise `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Real(d) => *d,
            _ => None,
        }
    }

    /// Returns a bool if the value is a boolean, otherwise `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => *b,
            // For schemas which don't tag booleans
            Value::Integer(Some(i)) if *i == 0 || *i == 1 => Some(*i == 1),
            _ => None,
        }
    }
}

macro_rules! value {
    ($target:ident: $kind:ty, $paramkind:ident, $that:expr) => {
        impl<'a> From<$kind> for crate::ast::Value<'a> {
            fn from($target: $kind) -> Self {
                crate::ast::Value::$paramkind(Some($that))
            }
        }
    };
}

value!(val: i64, Integer, val);
value!(val: bool, Boolean, val);
value!(val: Decimal, Real, val);
value!(val: serde_json::Value, Json, val);
#[cfg(feature = "uuid")]
value!(val: Uuid, Uuid, val);
value!(val: &'a str, Text, val.into());
value!(val: String, Text, val.into());
value!(val: usize, Integer, i64::try_from(val).unwrap());
value!(val: i32, Integer, i64::from(val));
value!(val: &'a [u8], Bytes, val.into());
#[cfg(feature = "chrono")]
value!(val: DateTime<Utc>, DateTime, val);
#[cfg(feature = "chrono")]
value!(val: chrono::NaiveTime, Time, val);
#[cfg(feature = "chrono")]
value!(val: chrono::NaiveDate, Date, val);

value!(
    val: f64,
    Real,
    Decimal::from_str(&val.to_string()).expect("f64 is not a Decimal")
);

value!(val: f32, Real, Decimal::from_f32(val).expect("f32 is not a Decimal"));

impl<'a> TryFrom<Value<'a>> for i64 {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<i64, Self::Error> {
        value
            .as_i64()
            .ok_or_else(|| Error::builder(ErrorKind::invalid_operation("Not an i64")).build())
    }
}

impl<'a> TryFrom<Value<'a>> for Decimal {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<Decimal, Self::Error> {
        value
            .as_decimal()
            .ok_or_else(|| Error::builder(ErrorKind::invalid_operation("Not a decimal")).build())
    }
}

impl<'a> TryFrom<Value<'a>> for String {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<String, Self::Error> {
        value
            .into_string()
            .ok_or_else(|| Error::builder(ErrorKind::invalid_operation("Not a string")).build())
    }
}

impl<'a> TryFrom<Value<'a>> for bool {
    type Error = Error;

    fn try_from(value: Value<'a>) -> Result<bool, Self::Error> {
        value
            .as_bool()
            .ok_or_else(|| Error::builder(ErrorKind::invalid_operation("Not a bool")).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_null_value_displays_as_null() {
        assert_eq!("null", format!("{}", Value::Text(None)));
    }

    #[test]
    fn a_text_value_converts_back_into_a_string() {
        let value = Value::text("meow");
        let s: String = value.try_into().unwrap();
        assert_eq!("meow", s);
    }

    #[test]
    fn an_integer_tagged_as_boolean_converts_into_a_bool() {
        assert_eq!(Some(true), Value::integer(1).as_bool());
        assert_eq!(Some(false), Value::integer(0).as_bool());
        assert_eq!(None, Value::integer(2).as_bool());
    }
}
