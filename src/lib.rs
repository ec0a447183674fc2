//! # sqlforge
//!
//! A library for building and compiling SQL programmatically: queries are
//! assembled as fragment trees and compiled by an [`Engine`] into
//! dialect-correct SQL text plus an ordered parameter map, without ever
//! concatenating user data into the query string.
//!
//! ### Building and compiling a query
//!
//! ```rust
//! use sqlforge::{ast::*, engine::Engine};
//!
//! fn main() -> sqlforge::Result<()> {
//!     let query = Select::from_table("users")
//!         .column("id")
//!         .so_that("name".equals("Musti").and("age".less_than(10)));
//!
//!     let compiled = Engine::generic().compile(query)?;
//!
//!     assert_eq!(
//!         r#"SELECT "id" FROM "users" WHERE "name" = @p0 AND "age" < @p1"#,
//!         compiled.sql
//!     );
//!     assert_eq!(Some("Musti"), compiled.parameters["@p0"].as_str());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Mapping types through the schema registry
//!
//! ```rust
//! use sqlforge::{ast::*, engine::Engine, schema::*};
//!
//! struct Person;
//!
//! impl Describe for Person {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::new("Person")
//!             .member(MemberDescriptor::scalar("Id").primary_key())
//!             .member(MemberDescriptor::scalar("Salary"))
//!     }
//! }
//!
//! fn main() -> sqlforge::Result<()> {
//!     let mut registry = SchemaRegistry::new();
//!     registry.register::<Person>()?;
//!
//!     let person = Table::for_type::<Person>(&registry)?.alias("person");
//!     let query = Select::from_table(person.clone()).value(abs(person.member("Salary")?));
//!
//!     let compiled = Engine::generic().compile(query)?;
//!     assert_eq!(
//!         r#"SELECT ABS("person"."Salary") FROM "Person" AS "person""#,
//!         compiled.sql
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! The bundled dialect presets ([`Engine::mysql`], [`Engine::oracle`],
//! [`Engine::sqlite`]) are plain data overlays over [`Engine::generic`];
//! every option and translation stays adjustable on the instance.
//!
//! [`Engine`]: engine::Engine
//! [`Engine::generic`]: engine::Engine::generic
//! [`Engine::mysql`]: engine::Engine::mysql
//! [`Engine::oracle`]: engine::Engine::oracle
//! [`Engine::sqlite`]: engine::Engine::sqlite

pub mod ast;
pub mod engine;
pub mod error;
pub mod schema;

/// The commonly used types and traits in one import.
pub mod prelude {
    pub use crate::ast::*;
    pub use crate::engine::{Compiled, Engine, NameCase};
    pub use crate::error::{Error, ErrorKind};
    pub use crate::schema::{
        Describe, ForeignKeyTarget, MemberDescriptor, MetadataPolicy, SchemaRegistry, TableConfig,
        TableInfo, TableLayout, TypeDescriptor,
    };
}

pub use error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;
