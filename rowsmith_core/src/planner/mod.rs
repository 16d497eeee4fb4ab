//! Insert planning.
//!
//! A plan covers every required column (non-nullable, non-identity) plus the
//! optional columns the operator picked, each with a coerced value. Identity
//! columns never appear. The plan renders to a statement with one named
//! placeholder per entry.

mod interactive;

pub use interactive::insert_row;

use tracing::debug;

use crate::ddl;
use crate::error::InsertError;
use crate::schema::ColumnMetadata;
use crate::session::{NamedParam, SchemaCatalog};
use crate::types::coerce::{UnknownTypePolicy, coerce};
use crate::types::value::TypedValue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    pub required: Vec<ColumnMetadata>,
    pub optional: Vec<ColumnMetadata>,
}

impl ColumnPartition {
    /// No column accepts operator input.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

pub fn partition(columns: &[ColumnMetadata]) -> ColumnPartition {
    let mut out = ColumnPartition::default();
    for col in columns.iter().filter(|c| !c.is_identity) {
        if col.is_nullable {
            out.optional.push(col.clone());
        } else {
            out.required.push(col.clone());
        }
    }
    out
}

pub fn fetch_columns<C>(catalog: &mut C, table: &str) -> Result<Vec<ColumnMetadata>, InsertError>
where
    C: SchemaCatalog + ?Sized,
{
    let columns = catalog
        .list_columns(table)
        .map_err(|e| InsertError::from_catalog(table, e))?;
    if columns.is_empty() {
        return Err(InsertError::NoSuchTable {
            table: table.to_string(),
        });
    }
    debug!(table, columns = columns.len(), "fetched column metadata");
    Ok(columns)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub column: String,
    pub value: TypedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    table: String,
    entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub params: Vec<NamedParam>,
}

impl InsertPlan {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| &e.value)
    }

    pub fn statement(&self) -> InsertStatement {
        let sql = ddl::insert_sql(&self.table, self.entries.iter().map(|e| e.column.as_str()));
        let params = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| NamedParam {
                name: ddl::param_name(i),
                value: e.value.clone(),
            })
            .collect();
        InsertStatement { sql, params }
    }
}

/// Required columns followed by the selected optional ones, in schema order.
///
/// Fails with `EmptyPlan` when nothing is populatable and with
/// `UnknownColumn` when a selection is not an optional column of the table.
pub fn choose_columns<'a>(
    table: &str,
    partition: &'a ColumnPartition,
    selected_optional: &[String],
) -> Result<Vec<&'a ColumnMetadata>, InsertError> {
    if partition.is_empty() {
        return Err(InsertError::EmptyPlan {
            table: table.to_string(),
        });
    }
    for name in selected_optional {
        if !partition.optional.iter().any(|c| &c.name == name) {
            return Err(InsertError::UnknownColumn {
                table: table.to_string(),
                column: name.clone(),
            });
        }
    }
    let chosen = partition
        .required
        .iter()
        .chain(
            partition
                .optional
                .iter()
                .filter(|c| selected_optional.contains(&c.name)),
        )
        .collect();
    Ok(chosen)
}

pub fn coerce_entry(
    table: &str,
    column: &ColumnMetadata,
    raw: &str,
    policy: UnknownTypePolicy,
) -> Result<PlanEntry, InsertError> {
    let value = coerce(&column.name, raw, &column.declared_type, policy).map_err(|source| {
        InsertError::ValueCoercion {
            table: table.to_string(),
            source,
        }
    })?;
    Ok(PlanEntry {
        column: column.name.clone(),
        value,
    })
}

/// Builds a plan from already collected operator text.
///
/// `values` pairs column names with raw text. Every chosen column needs
/// exactly one value; a repeated column or a value for any other column
/// (identity, unselected, unknown) is rejected rather than dropped.
pub fn build_plan(
    table: &str,
    columns: &[ColumnMetadata],
    selected_optional: &[String],
    values: &[(String, String)],
    policy: UnknownTypePolicy,
) -> Result<InsertPlan, InsertError> {
    let partition = partition(columns);
    let chosen = choose_columns(table, &partition, selected_optional)?;

    if let Some((stray, _)) = values
        .iter()
        .find(|(name, _)| !chosen.iter().any(|c| &c.name == name))
    {
        return Err(InsertError::UnknownColumn {
            table: table.to_string(),
            column: stray.clone(),
        });
    }

    for (i, (name, _)) in values.iter().enumerate() {
        if values[..i].iter().any(|(earlier, _)| earlier == name) {
            return Err(InsertError::DuplicateValue {
                table: table.to_string(),
                column: name.clone(),
            });
        }
    }

    let mut entries = Vec::with_capacity(chosen.len());
    for col in chosen {
        let raw = values
            .iter()
            .find(|(name, _)| name == &col.name)
            .map(|(_, raw)| raw.as_str())
            .ok_or_else(|| InsertError::MissingValue {
                table: table.to_string(),
                column: col.name.clone(),
            })?;
        entries.push(coerce_entry(table, col, raw, policy)?);
    }

    Ok(InsertPlan {
        table: table.to_string(),
        entries,
    })
}
