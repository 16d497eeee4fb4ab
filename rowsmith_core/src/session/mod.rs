pub mod catalog;
pub mod executor;
pub mod prompt;

pub use catalog::SchemaCatalog;
pub use executor::{ExecOutcome, NamedParam, ResultSet, StatementExecutor};
pub use prompt::PromptSource;

use crate::types::coerce::UnknownTypePolicy;

/// A database handle that answers both introspection and statements.
pub trait Connection: SchemaCatalog + StatementExecutor {}

impl<T: SchemaCatalog + StatementExecutor + ?Sized> Connection for T {}

/// Explicit context for one operator operation.
pub struct Session<'a> {
    pub db: &'a mut dyn Connection,
    pub prompts: &'a mut dyn PromptSource,
    pub policy: UnknownTypePolicy,
}

impl<'a> Session<'a> {
    pub fn new(
        db: &'a mut dyn Connection,
        prompts: &'a mut dyn PromptSource,
        policy: UnknownTypePolicy,
    ) -> Self {
        Self {
            db,
            prompts,
            policy,
        }
    }
}
