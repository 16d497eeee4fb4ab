use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ddl::SortOrder;
use crate::error::{CatalogError, ExecutionError, StoreError};
use crate::schema::{ColumnDefinition, ColumnMetadata};
use crate::session::{ExecOutcome, NamedParam, ResultSet, SchemaCatalog, StatementExecutor};
use crate::storage::persistence;
use crate::storage::statement::{Statement, parse};
use crate::types::Row;
use crate::types::datatype::TypeFamily;
use crate::types::value::{TypedValue, value_to_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MemTable {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) primary_key: Option<usize>,
    pub(crate) next_identity: i64,
    pub(crate) rows: Vec<Row>,
}

/// Takes back one applied mutation when the write-through fails.
#[derive(Debug)]
enum Undo {
    Create { key: String },
    Drop { table: MemTable },
    Insert { key: String, next_identity: i64 },
}

/// In-process database answering the statements the core emits.
///
/// Table names are matched case-insensitively. With a backing file every
/// successful create, drop or insert is written through as JSON.
#[derive(Debug, Default)]
pub struct MemDatabase {
    tables: BTreeMap<String, MemTable>,
    path: Option<PathBuf>,
}

impl MemDatabase {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens (or starts) a database persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = persistence::load(&path)?
            .into_iter()
            .map(|t| (t.name.to_lowercase(), t))
            .collect();
        Ok(Self {
            tables,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn table(&self, name: &str) -> Result<&MemTable, ExecutionError> {
        self.tables
            .get(&name.to_lowercase())
            .ok_or_else(|| invalid_object(name))
    }

    fn save(&self) -> Result<(), ExecutionError> {
        match &self.path {
            Some(path) => persistence::save(path, self.tables.values())
                .map_err(|e| ExecutionError::new(e.to_string())),
            None => Ok(()),
        }
    }

    /// Runs one statement. Every check happens before the first change, so
    /// an `Err` leaves the tables untouched. Mutations hand back their undo.
    fn apply(
        &mut self,
        stmt: Statement,
        params: &[NamedParam],
    ) -> Result<(ExecOutcome, Option<Undo>), ExecutionError> {
        match stmt {
            Statement::CreateTable { table, columns } => self.create_table(table, columns),
            Statement::DropTable { table } => {
                let dropped = self
                    .tables
                    .remove(&table.to_lowercase())
                    .ok_or_else(|| invalid_object(&table))?;
                Ok((
                    ExecOutcome::RowsAffected(0),
                    Some(Undo::Drop { table: dropped }),
                ))
            }
            Statement::Insert {
                table,
                columns,
                params: markers,
            } => self.insert(&table, &columns, &markers, params),
            Statement::SelectAll { table, order_by } => {
                Ok((ExecOutcome::Rows(self.select(&table, order_by)?), None))
            }
        }
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Create { key } => {
                self.tables.remove(&key);
            }
            Undo::Drop { table } => {
                self.tables.insert(table.name.to_lowercase(), table);
            }
            Undo::Insert { key, next_identity } => {
                if let Some(t) = self.tables.get_mut(&key) {
                    t.rows.pop();
                    t.next_identity = next_identity;
                }
            }
        }
    }

    fn select(
        &self,
        table: &str,
        order_by: Option<(String, SortOrder)>,
    ) -> Result<ResultSet, ExecutionError> {
        let t = self.table(table)?;
        let mut rows = t.rows.clone();
        if let Some((column, order)) = order_by {
            let idx = t
                .columns
                .iter()
                .position(|c| c.name.eq_ignore_ascii_case(&column))
                .ok_or_else(|| ExecutionError::new(format!("Invalid column name '{column}'.")))?;
            rows.sort_by(|a, b| {
                let ord = compare_cells(a[idx].as_ref(), b[idx].as_ref());
                match order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }
        Ok(ResultSet {
            columns: t.columns.iter().map(|c| c.name.clone()).collect(),
            rows,
        })
    }

    fn create_table(
        &mut self,
        table: String,
        columns: Vec<ColumnDefinition>,
    ) -> Result<(ExecOutcome, Option<Undo>), ExecutionError> {
        let key = table.to_lowercase();
        if self.tables.contains_key(&key) {
            return Err(ExecutionError::new(format!(
                "There is already an object named '{table}' in the database."
            )));
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name.eq_ignore_ascii_case(&col.name)) {
                return Err(ExecutionError::new(format!(
                    "Column names in each table must be unique. Column name '{}' is specified more than once.",
                    col.name
                )));
            }
        }
        if columns.iter().filter(|c| c.is_primary_key).count() > 1 {
            return Err(ExecutionError::new(format!(
                "Cannot add multiple PRIMARY KEY constraints to table '{table}'."
            )));
        }
        if columns.iter().filter(|c| c.is_auto_increment).count() > 1 {
            return Err(ExecutionError::new(format!(
                "Multiple identity columns specified for table '{table}'."
            )));
        }

        let metadata: Vec<ColumnMetadata> = columns.iter().map(ColumnDefinition::metadata).collect();
        if let Some(col) = metadata.iter().find(|c| c.is_identity && !is_integer(c.family())) {
            return Err(ExecutionError::new(format!(
                "Identity column '{}' must be of an integer data type.",
                col.name
            )));
        }

        self.tables.insert(
            key.clone(),
            MemTable {
                name: table,
                primary_key: columns.iter().position(|c| c.is_primary_key),
                columns: metadata,
                next_identity: 1,
                rows: Vec::new(),
            },
        );
        Ok((ExecOutcome::RowsAffected(0), Some(Undo::Create { key })))
    }

    fn insert(
        &mut self,
        table: &str,
        columns: &[String],
        markers: &[String],
        params: &[NamedParam],
    ) -> Result<(ExecOutcome, Option<Undo>), ExecutionError> {
        if columns.len() != markers.len() {
            return Err(ExecutionError::new(
                "There are fewer columns in the INSERT statement than values specified in the VALUES clause.",
            ));
        }
        let key = table.to_lowercase();
        let t = self.tables.get_mut(&key).ok_or_else(|| invalid_object(table))?;

        let mut supplied: Vec<Option<TypedValue>> = vec![None; t.columns.len()];
        for (name, marker) in columns.iter().zip(markers) {
            let idx = t
                .columns
                .iter()
                .position(|c| c.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| ExecutionError::new(format!("Invalid column name '{name}'.")))?;
            let col = &t.columns[idx];
            if col.is_identity {
                return Err(ExecutionError::new(format!(
                    "Cannot insert explicit value for identity column '{}' in table '{}'.",
                    col.name, t.name
                )));
            }
            if supplied[idx].is_some() {
                return Err(ExecutionError::new(format!(
                    "The column name '{}' is specified more than once in the INSERT.",
                    col.name
                )));
            }
            let value = params
                .iter()
                .find(|p| &p.name == marker)
                .map(|p| p.value.clone())
                .ok_or_else(|| {
                    ExecutionError::new(format!("Must declare the scalar variable \"{marker}\"."))
                })?;
            if !value.fits(col.family()) {
                return Err(ExecutionError::new(format!(
                    "Operand type clash: {} is incompatible with {}",
                    value_to_string(&value),
                    col.declared_type
                )));
            }
            supplied[idx] = Some(value);
        }

        let mut row: Row = Vec::with_capacity(t.columns.len());
        for (col, value) in t.columns.iter().zip(supplied) {
            let cell = if col.is_identity {
                Some(identity_value(col, t.next_identity)?)
            } else {
                value
            };
            if cell.is_none() && !col.is_nullable {
                return Err(ExecutionError::new(format!(
                    "Cannot insert the value NULL into column '{}', table '{}'; column does not allow nulls.",
                    col.name, t.name
                )));
            }
            row.push(cell);
        }

        if let Some(pk) = t.primary_key {
            if t.rows.iter().any(|r| r[pk] == row[pk]) {
                let key = row[pk].as_ref().map(value_to_string).unwrap_or_default();
                return Err(ExecutionError::new(format!(
                    "Violation of PRIMARY KEY constraint on table '{}'. Cannot insert duplicate key ({key}).",
                    t.name
                )));
            }
        }

        let next_identity = t.next_identity;
        if t.columns.iter().any(|c| c.is_identity) {
            t.next_identity += 1;
        }
        t.rows.push(row);
        Ok((
            ExecOutcome::RowsAffected(1),
            Some(Undo::Insert { key, next_identity }),
        ))
    }
}

fn invalid_object(name: &str) -> ExecutionError {
    ExecutionError::new(format!("Invalid object name '{name}'."))
}

fn is_integer(family: TypeFamily) -> bool {
    matches!(
        family,
        TypeFamily::Integer
            | TypeFamily::SmallInteger
            | TypeFamily::TinyInteger
            | TypeFamily::BigInteger
    )
}

fn identity_value(col: &ColumnMetadata, next: i64) -> Result<TypedValue, ExecutionError> {
    let value = match col.family() {
        TypeFamily::BigInteger => Some(TypedValue::BigInt(next)),
        _ => i32::try_from(next).ok().map(TypedValue::Int),
    };
    value.filter(|v| v.fits(col.family())).ok_or_else(|| {
        ExecutionError::new(format!(
            "Arithmetic overflow error converting IDENTITY to data type {}.",
            col.declared_type
        ))
    })
}

/// NULLs sort first. Cells of different kinds compare equal so the sort
/// keeps their stored order.
fn compare_cells(a: Option<&TypedValue>, b: Option<&TypedValue>) -> Ordering {
    use TypedValue::*;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Int(x), Int(y)) => x.cmp(y),
            (BigInt(x), BigInt(y)) => x.cmp(y),
            (Int(x), BigInt(y)) => i64::from(*x).cmp(y),
            (BigInt(x), Int(y)) => x.cmp(&i64::from(*y)),
            (Decimal(x), Decimal(y)) => x.cmp(y),
            (Double(x), Double(y)) => x.total_cmp(y),
            (Bool(x), Bool(y)) => x.cmp(y),
            (DateTime(x), DateTime(y)) => x.cmp(y),
            (Text(x), Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Binary(x), Binary(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

impl SchemaCatalog for MemDatabase {
    fn list_tables(&mut self) -> Result<Vec<String>, CatalogError> {
        Ok(self.tables.values().map(|t| t.name.clone()).collect())
    }

    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnMetadata>, CatalogError> {
        self.tables
            .get(&table.to_lowercase())
            .map(|t| t.columns.clone())
            .ok_or_else(|| CatalogError::NoSuchTable {
                table: table.to_string(),
            })
    }
}

impl StatementExecutor for MemDatabase {
    fn execute(&mut self, sql: &str, params: &[NamedParam]) -> Result<ExecOutcome, ExecutionError> {
        let stmt = parse(sql).map_err(ExecutionError::new)?;
        debug!(sql, params = params.len(), "executing statement");

        let (outcome, undo) = self.apply(stmt, params)?;
        if let Some(undo) = undo {
            if let Err(err) = self.save() {
                self.undo(undo);
                return Err(err);
            }
        }
        Ok(outcome)
    }
}
