use serde::{Deserialize, Serialize};

use crate::types::datatype::{TypeFamily, type_family};

/// One column of an existing table, as reported by the schema catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub declared_type: String,
    pub is_nullable: bool,
    /// Generated by the engine on insert; never offered for input.
    pub is_identity: bool,
}

impl ColumnMetadata {
    /// A non-nullable, operator-supplied column.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_nullable: false,
            is_identity: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self.is_nullable = false;
        self
    }

    pub fn family(&self) -> TypeFamily {
        type_family(&self.declared_type)
    }

    /// Label used when listing the column to an operator.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.declared_type)
    }
}

/// A column being authored for a table that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub is_nullable: bool,
}

impl ColumnDefinition {
    /// Metadata the column will report once the table exists.
    pub fn metadata(&self) -> ColumnMetadata {
        ColumnMetadata {
            name: self.name.clone(),
            declared_type: self.data_type.clone(),
            is_nullable: self.is_nullable && !self.is_primary_key,
            is_identity: self.is_auto_increment,
        }
    }
}

/// A finished definition set plus the new table's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.is_primary_key)
    }
}
