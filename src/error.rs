//! Error module
use std::{borrow::Cow, fmt};
use thiserror::Error;

/// The error type for query construction, schema resolution and SQL
/// compilation.
#[derive(Debug, Error)]
pub struct Error {
    kind: ErrorKind,
    context: Option<String>,
}

pub(crate) struct ErrorBuilder {
    kind: ErrorKind,
    context: Option<String>,
}

impl ErrorBuilder {
    #[allow(dead_code)]
    pub(crate) fn set_context(&mut self, context: impl Into<String>) -> &mut Self {
        self.context = Some(context.into());
        self
    }

    pub(crate) fn build(self) -> Error {
        Error {
            kind: self.kind,
            context: self.context,
        }
    }
}

impl Error {
    pub(crate) fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder { kind, context: None }
    }

    /// Additional context for the error, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// A more specific error type for matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// `true` if the fragment graph could not be rendered. Covers both
    /// malformed graphs and graphs requesting a clause the active engine
    /// does not implement.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Compile(_) | ErrorKind::ClauseNotSupported { .. }
        )
    }

    /// `true` if the active engine does not implement the requested
    /// function, operator or clause.
    pub fn is_clause_not_supported(&self) -> bool {
        matches!(self.kind, ErrorKind::ClauseNotSupported { .. })
    }

    /// `true` if a schema declaration could not be resolved.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidConfiguration(_))
    }

    /// `true` if a builder was used in a way its current state forbids.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidOperation(_))
    }

    /// `true` if a raw SQL template failed to parse.
    pub fn is_format_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Format(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("Cannot compile the query: {}", _0)]
    Compile(Cow<'static, str>),

    #[error("The engine does not support {}", clause)]
    ClauseNotSupported { clause: String },

    #[error("Invalid schema configuration: {}", _0)]
    InvalidConfiguration(Cow<'static, str>),

    #[error("Invalid operation: {}", _0)]
    InvalidOperation(Cow<'static, str>),

    #[error("Malformed raw SQL template: {}", _0)]
    Format(Cow<'static, str>),
}

impl ErrorKind {
    pub(crate) fn compile(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Compile(msg.into())
    }

    pub(crate) fn clause_not_supported(clause: impl Into<String>) -> Self {
        Self::ClauseNotSupported {
            clause: clause.into(),
        }
    }

    pub(crate) fn invalid_configuration(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn invalid_operation(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub(crate) fn format(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Format(msg.into())
    }
}

impl From<Error> for ErrorKind {
    fn from(e: Error) -> Self {
        e.kind
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Self::builder(ErrorKind::compile("Problems writing AST into a query string.")).build()
    }
}
