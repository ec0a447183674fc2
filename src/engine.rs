//! Rendering fragment trees into query text and parameters.
//!
//! An [`Engine`] is a bundle of syntax settings and translation
//! registries. The bundled presets cover the common dialects; every
//! setting stays adjustable on the instance, so a preset is a starting
//! point rather than a fixed target.

mod dialect;
mod registry;
mod renderer;

pub use registry::{FunctionInfo, FunctionRegistry, OperatorInfo, OperatorRegistry};

use crate::ast::{Params, Query, Value};
use indexmap::IndexMap;
use tracing::debug;

/// The case folding applied to identifiers before quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCase {
    /// Keep identifiers the way they were written.
    #[default]
    AsGiven,
    /// Uppercase identifiers.
    Upper,
    /// Lowercase identifiers.
    Lower,
}

/// The result of a compilation: the query text and the parameter map in
/// extraction order. On engines with positional placeholders the text
/// renders `?` markers; the map keys stay named either way, so parameter
/// `n` of the text is entry `n` of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled<'a> {
    pub sql: String,
    pub parameters: IndexMap<String, Value<'a>>,
}

/// A dialect-configurable compilation engine. Every field is plain data
/// and freely adjustable before compiling; [`compile`](Engine::compile)
/// itself never mutates the engine.
#[derive(Debug, Clone)]
pub struct Engine {
    /// A display name for logging and diagnostics.
    pub name: String,
    /// The character opening a quoted identifier.
    pub escape_start: char,
    /// The character closing a quoted identifier.
    pub escape_end: char,
    /// The prefix of generated parameter names.
    pub parameter_prefix: String,
    /// Renders anonymous `?` placeholders in the text instead of the
    /// parameter names.
    pub positional_parameters: bool,
    /// The case folding applied to identifiers before quoting.
    pub name_case: NameCase,
    /// Whether a recursive `WITH` block renders the `RECURSIVE` keyword.
    pub with_recursive_keyword: bool,
    /// Operator translations overriding the built-in defaults.
    pub operators: OperatorRegistry,
    /// Function translations overriding the built-in defaults.
    pub functions: FunctionRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::generic()
    }
}

impl Engine {
    /// Quotes an identifier for this engine. Dotted names are quoted per
    /// segment; a segment that already carries the engine's quotes is
    /// passed through verbatim, so escaping is idempotent.
    ///
    /// ```rust
    /// # use sqlforge::engine::Engine;
    /// let engine = Engine::generic();
    ///
    /// assert_eq!(r#""crm"."users""#, engine.escape("crm.users"));
    /// assert_eq!(r#""users""#, engine.escape(&engine.escape("users")));
    /// ```
    pub fn escape(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 4);

        for (i, segment) in name.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }

            let already_quoted = segment.len() >= 2
                && segment.starts_with(self.escape_start)
                && segment.ends_with(self.escape_end);

            if already_quoted {
                out.push_str(segment);
                continue;
            }

            out.push(self.escape_start);

            match self.name_case {
                NameCase::AsGiven => out.push_str(segment),
                NameCase::Upper => out.push_str(&segment.to_uppercase()),
                NameCase::Lower => out.push_str(&segment.to_lowercase()),
            }

            out.push(self.escape_end);
        }

        out
    }

    /// Compiles a fragment tree into query text and its ordered parameter
    /// map. The tree is checked for malformed shapes before any text is
    /// rendered; the same tree compiled twice under the same engine gives
    /// the same result.
    ///
    /// ```rust
    /// # use sqlforge::{ast::*, engine::Engine};
    /// # fn main() -> sqlforge::Result<()> {
    /// let query = Select::from_table("users").so_that("id".equals(1));
    /// let compiled = Engine::generic().compile(query)?;
    ///
    /// assert_eq!(r#"SELECT * FROM "users" WHERE "id" = @p0"#, compiled.sql);
    /// assert_eq!(Some(1), compiled.parameters["@p0"].as_i64());
    /// # Ok(())
    /// # }
    /// ```
    pub fn compile<'a, Q>(&self, query: Q) -> crate::Result<Compiled<'a>>
    where
        Q: Into<Query<'a>>,
    {
        let (sql, parameters) = renderer::Renderer::render(self, query.into())?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let values: Vec<Value<'_>> = parameters.values().cloned().collect();

            debug!(
                engine = %self.name,
                sql = %sql,
                params = %Params(&values),
                "compiled query",
            );
        }

        Ok(Compiled { sql, parameters })
    }
}
