//! Error types for rowsmith operations.
//!
//! Every error carries enough context (table, column, raw input) for a caller
//! to render its own message; nothing here is meant to be shown verbatim
//! except through `Display`.

use thiserror::Error;

/// Prompt source failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("cancelled by operator")]
    Cancelled,

    #[error("prompt failed: {reason}")]
    Failed { reason: String },
}

/// Column definition builder errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("custom data type cannot be empty")]
    EmptyType,

    #[error("'{data_type}' is not a valid data type")]
    InvalidType { data_type: String },

    #[error("a column named '{name}' already exists in this table")]
    DuplicateColumn { name: String },

    #[error("a table named '{name}' already exists")]
    DuplicateTable { name: String },

    #[error("'{name}' is reserved and cannot name a column")]
    ReservedName { name: String },

    #[error("no columns defined")]
    EmptyDefinitionSet,

    #[error("table definition cancelled")]
    Cancelled,

    #[error("prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl BuildError {
    /// Input violations the interactive driver answers by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BuildError::EmptyName
                | BuildError::EmptyType
                | BuildError::InvalidType { .. }
                | BuildError::DuplicateColumn { .. }
                | BuildError::DuplicateTable { .. }
                | BuildError::ReservedName { .. }
                | BuildError::EmptyDefinitionSet
        )
    }
}

impl From<PromptError> for BuildError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => BuildError::Cancelled,
            PromptError::Failed { reason } => BuildError::PromptFailed { reason },
        }
    }
}

/// Why a piece of text could not be read as its column's type.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CoercionFailure {
    #[error("expected {expected}")]
    Malformed { expected: &'static str },

    #[error("value out of range for {expected}")]
    OutOfRange { expected: &'static str },

    #[error("data type is not supported")]
    UnsupportedType,
}

/// A single value that failed coercion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot read '{raw}' as {declared_type} for column '{column}': {failure}")]
pub struct CoercionError {
    pub column: String,
    pub declared_type: String,
    pub raw: String,
    pub failure: CoercionFailure,
}

/// Schema introspection errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("table '{table}' does not exist")]
    NoSuchTable { table: String },

    #[error("schema introspection failed: {reason}")]
    Introspection { reason: String },
}

/// A statement rejected by the database, message kept verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Insert planning and execution errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("table '{table}' does not exist")]
    NoSuchTable { table: String },

    #[error("failed to read schema of '{table}': {reason}")]
    SchemaFetch { table: String, reason: String },

    #[error("invalid value for table '{table}': {source}")]
    ValueCoercion {
        table: String,
        #[source]
        source: CoercionError,
    },

    #[error("table '{table}' has no columns that accept input")]
    EmptyPlan { table: String },

    #[error("no value supplied for column '{column}' of '{table}'")]
    MissingValue { table: String, column: String },

    #[error("'{column}' is not an insertable column of '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("more than one value supplied for column '{column}' of '{table}'")]
    DuplicateValue { table: String, column: String },

    #[error("insert into '{table}' failed: {source}")]
    Execution {
        table: String,
        #[source]
        source: ExecutionError,
    },

    #[error("insert cancelled")]
    Cancelled,

    #[error("prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl InsertError {
    pub(crate) fn from_catalog(table: &str, err: CatalogError) -> Self {
        match err {
            CatalogError::NoSuchTable { table } => InsertError::NoSuchTable { table },
            CatalogError::Introspection { reason } => InsertError::SchemaFetch {
                table: table.to_string(),
                reason,
            },
        }
    }
}

impl From<PromptError> for InsertError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => InsertError::Cancelled,
            PromptError::Failed { reason } => InsertError::PromptFailed { reason },
        }
    }
}

/// Errors from the create, drop and view table flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to list tables: {reason}")]
    SchemaFetch { reason: String },

    #[error("table '{table}' does not exist")]
    NoSuchTable { table: String },

    #[error("no tables found in the database")]
    NoTables,

    #[error("statement failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("operation declined")]
    Declined,

    #[error("operation cancelled")]
    Cancelled,

    #[error("prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl From<PromptError> for TableError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => TableError::Cancelled,
            PromptError::Failed { reason } => TableError::PromptFailed { reason },
        }
    }
}

impl From<CatalogError> for TableError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NoSuchTable { table } => TableError::NoSuchTable { table },
            CatalogError::Introspection { reason } => TableError::SchemaFetch { reason },
        }
    }
}

/// Reference backend file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Malformed(#[from] serde_json::Error),
}
