//! Schema-driven table definition and row insertion for an interactive
//! database console.
//!
//! The core never talks to a terminal or a server directly: it works through
//! the [`session::SchemaCatalog`], [`session::StatementExecutor`] and
//! [`session::PromptSource`] traits, passed in explicitly as a
//! [`session::Session`].

pub mod builder;
pub mod ddl;
pub mod error;
pub mod format;
pub mod planner;
pub mod schema;
pub mod session;
pub mod storage;
pub mod tables;
pub mod types;

pub use error::{BuildError, CatalogError, CoercionError, ExecutionError, InsertError, TableError};
pub use session::Session;
pub use storage::MemDatabase;
