//! Column definition builder.
//!
//! The step functions here are pure: each answers one question about the next
//! column (is the name acceptable, is a primary key still available, may this
//! column auto-increment) so that the set can never reach an invalid state.
//! Options that do not apply are simply not offered; [`ColumnSetBuilder::accept`]
//! ignores answers to questions that were never asked.

mod interactive;

pub use interactive::{collect_columns, define_table, type_choices};

use crate::error::BuildError;
use crate::schema::ColumnDefinition;
use crate::types::datatype::{is_identity_capable, is_valid_type_text};

/// Column name that ends the definition loop.
pub const DONE_SENTINEL: &str = "done";

/// First entry of the type menu; selecting it asks for free-form text.
pub const CUSTOM_TYPE_CHOICE: &str = "Custom (enter manually)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameStep {
    Done,
    Column(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeChoice {
    Catalog(String),
    Custom(String),
}

/// Operator answers for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDraft {
    pub name: String,
    pub data_type: String,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub nullable: bool,
}

#[derive(Debug, Default)]
pub struct ColumnSetBuilder {
    columns: Vec<ColumnDefinition>,
}

impl ColumnSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn offer_name(&self, raw: &str) -> Result<NameStep, BuildError> {
        let name = raw.trim();
        if name.eq_ignore_ascii_case(DONE_SENTINEL) {
            return Ok(NameStep::Done);
        }
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self.contains(name) {
            return Err(BuildError::DuplicateColumn {
                name: name.to_string(),
            });
        }
        Ok(NameStep::Column(name.to_string()))
    }

    /// Only one column per set may claim the primary key.
    pub fn primary_key_offered(&self) -> bool {
        self.columns.iter().all(|c| !c.is_primary_key)
    }

    pub fn accept(&mut self, draft: ColumnDraft) -> Result<&ColumnDefinition, BuildError> {
        let name = match self.offer_name(&draft.name)? {
            NameStep::Column(name) => name,
            NameStep::Done => {
                return Err(BuildError::ReservedName {
                    name: draft.name.trim().to_string(),
                });
            }
        };
        let data_type = resolve_type(TypeChoice::Custom(draft.data_type))?;
        let is_primary_key = draft.primary_key && self.primary_key_offered();
        let is_auto_increment =
            draft.auto_increment && auto_increment_offered(is_primary_key, &data_type);
        let is_nullable = nullability_asked(is_primary_key) && draft.nullable;

        self.columns.push(ColumnDefinition {
            name,
            data_type,
            is_primary_key,
            is_auto_increment,
            is_nullable,
        });
        let last = self.columns.len() - 1;
        Ok(&self.columns[last])
    }

    /// Hands out the collected set, leaving the builder empty.
    pub fn finish(&mut self) -> Result<Vec<ColumnDefinition>, BuildError> {
        if self.columns.is_empty() {
            return Err(BuildError::EmptyDefinitionSet);
        }
        Ok(std::mem::take(&mut self.columns))
    }
}

pub fn validate_table_name(raw: &str, existing_tables: &[String]) -> Result<String, BuildError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(BuildError::EmptyName);
    }
    if existing_tables.iter().any(|t| t.eq_ignore_ascii_case(name)) {
        return Err(BuildError::DuplicateTable {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

pub fn resolve_type(choice: TypeChoice) -> Result<String, BuildError> {
    let text = match choice {
        TypeChoice::Catalog(name) => name,
        TypeChoice::Custom(text) => text,
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(BuildError::EmptyType);
    }
    if !is_valid_type_text(text) {
        return Err(BuildError::InvalidType {
            data_type: text.to_string(),
        });
    }
    Ok(text.to_string())
}

pub fn auto_increment_offered(is_primary_key: bool, data_type: &str) -> bool {
    is_primary_key && is_identity_capable(data_type)
}

/// A primary key is forced NOT NULL, so nullability is never asked for it.
pub const fn nullability_asked(is_primary_key: bool) -> bool {
    !is_primary_key
}
