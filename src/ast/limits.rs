use crate::ast::RawSql;
use crate::error::{Error, ErrorKind};

/// The value of a `TOP` row-limit modifier: a plain count or an opaque raw
/// fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum TopValue<'a> {
    /// A literal row count, extracted into the parameter map.
    Count(i64),
    /// A raw fragment rendered as-is.
    Raw(RawSql<'a>),
}

/// A `TOP`-style row limit. `PERCENT` and `WITH TIES` only apply to plain
/// counts; requesting either on a raw value is an invalid-operation error
/// rather than being silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Top<'a> {
    pub(crate) value: TopValue<'a>,
    pub(crate) percent: bool,
    pub(crate) with_ties: bool,
}

impl<'a> Top<'a> {
    /// A row limit of `count` rows.
    pub fn count(count: i64) -> Self {
        Top {
            value: TopValue::Count(count),
            percent: false,
            with_ties: false,
        }
    }

    /// A row limit computed by a raw fragment.
    pub fn raw(value: RawSql<'a>) -> Self {
        Top {
            value: TopValue::Raw(value),
            percent: false,
            with_ties: false,
        }
    }

    /// Interprets the count as a percentage of the result set.
    pub fn percent(mut self) -> crate::Result<Self> {
        if let TopValue::Raw(_) = self.value {
            let kind = ErrorKind::invalid_operation("PERCENT is not valid on a raw TOP value");
            return Err(Error::builder(kind).build());
        }

        self.percent = true;
        Ok(self)
    }

    /// Includes the rows tied with the last row of the limited set.
    pub fn with_ties(mut self) -> crate::Result<Self> {
        if let TopValue::Raw(_) = self.value {
            let kind = ErrorKind::invalid_operation("WITH TIES is not valid on a raw TOP value");
            return Err(Error::builder(kind).build());
        }

        self.with_ties = true;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_on_a_count_is_allowed() {
        let top = Top::count(10).percent().unwrap();
        assert!(top.percent);
    }

    #[test]
    fn percent_on_a_raw_value_is_an_invalid_operation() {
        let raw = RawSql::new("10 + 1", Vec::new()).unwrap();
        let err = Top::raw(raw).percent().unwrap_err();
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn with_ties_on_a_raw_value_is_an_invalid_operation() {
        let raw = RawSql::new("10", Vec::new()).unwrap();
        let err = Top::raw(raw).with_ties().unwrap_err();
        assert!(err.is_invalid_operation());
    }
}
