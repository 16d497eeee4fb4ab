use crate::error::ExecutionError;
use crate::types::Row;
use crate::types::value::TypedValue;

/// A data value bound to a placeholder such as `@p1`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParam {
    pub name: String,
    pub value: TypedValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    RowsAffected(u64),
    Rows(ResultSet),
}

impl ExecOutcome {
    pub fn rows_affected(&self) -> u64 {
        match self {
            ExecOutcome::RowsAffected(n) => *n,
            ExecOutcome::Rows(rs) => rs.rows.len() as u64,
        }
    }
}

/// Runs statements with named parameter binding. Values are never
/// substituted into the statement text.
pub trait StatementExecutor {
    fn execute(&mut self, sql: &str, params: &[NamedParam]) -> Result<ExecOutcome, ExecutionError>;
}
