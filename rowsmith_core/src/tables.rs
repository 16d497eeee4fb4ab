//! Create, drop, view and sort flows built on the collaborator traits.

use tracing::info;

use crate::builder::define_table;
use crate::ddl::{self, SortOrder};
use crate::error::{BuildError, TableError};
use crate::schema::TableDefinition;
use crate::session::{ExecOutcome, ResultSet, SchemaCatalog, Session};

const CANCEL_CHOICE: &str = "Cancel";

const SORT_ORDERS: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

/// Sorted base table names.
pub fn list_tables<C>(catalog: &mut C) -> Result<Vec<String>, TableError>
where
    C: SchemaCatalog + ?Sized,
{
    let mut tables = catalog.list_tables()?;
    tables.sort_by_key(|t| t.to_lowercase());
    Ok(tables)
}

/// Lets the operator pick one of the existing tables.
pub fn choose_table(session: &mut Session<'_>, title: &str) -> Result<String, TableError> {
    let tables = list_tables(&mut *session.db)?;
    if tables.is_empty() {
        return Err(TableError::NoTables);
    }
    let picked = session.prompts.select_one(title, &tables)?;
    tables
        .get(picked)
        .cloned()
        .ok_or_else(|| TableError::PromptFailed {
            reason: format!("table selection {picked} is out of range"),
        })
}

/// Defines a new table, previews its DDL and creates it once confirmed.
pub fn create_table(session: &mut Session<'_>) -> Result<TableDefinition, TableError> {
    let existing = list_tables(&mut *session.db)?;
    let def = define_table(&mut *session.prompts, &existing).map_err(|err| match err {
        BuildError::Cancelled => TableError::Cancelled,
        other => TableError::Build(other),
    })?;

    let sql = ddl::create_table_sql(&def);
    session
        .prompts
        .notice(&format!("The following SQL will be executed:\n{sql}"));
    if !session.prompts.confirm("Do you want to execute this SQL?")? {
        return Err(TableError::Declined);
    }

    session.db.execute(&sql, &[])?;
    info!(table = %def.name, columns = def.columns.len(), "table created");
    Ok(def)
}

/// Drops a table picked from the catalog's list. Returns the dropped name.
pub fn drop_table(session: &mut Session<'_>) -> Result<String, TableError> {
    let mut choices = list_tables(&mut *session.db)?;
    if choices.is_empty() {
        return Err(TableError::NoTables);
    }
    let cancel = choices.len();
    choices.push(CANCEL_CHOICE.to_string());

    let picked = session
        .prompts
        .select_one("Select a table to drop:", &choices)?;
    let table = match choices.get(picked) {
        Some(_) if picked == cancel => return Err(TableError::Cancelled),
        Some(choice) => choice.clone(),
        None => {
            return Err(TableError::PromptFailed {
                reason: format!("table selection {picked} is out of range"),
            });
        }
    };

    if !session
        .prompts
        .confirm(&format!("Are you sure you want to drop the table '{table}'?"))?
    {
        return Err(TableError::Declined);
    }

    session.db.execute(&ddl::drop_table_sql(&table), &[])?;
    info!(table = %table, "table dropped");
    Ok(table)
}

/// Reads every row of a table picked from the catalog's list.
pub fn view_table(session: &mut Session<'_>) -> Result<(String, ResultSet), TableError> {
    let table = choose_table(session, "Select a table to view data:")?;
    let result = into_rows(session.db.execute(&ddl::select_all_sql(&table), &[])?);
    Ok((table, result))
}

/// Reads every row of a table ordered by one of its columns. The column
/// comes from the table's introspected schema, never from typed text.
pub fn sort_table(session: &mut Session<'_>) -> Result<(String, ResultSet), TableError> {
    let table = choose_table(session, "Select a table to sort data:")?;
    let columns: Vec<String> = session
        .db
        .list_columns(&table)?
        .into_iter()
        .map(|c| c.name)
        .collect();
    if columns.is_empty() {
        return Err(TableError::NoSuchTable { table });
    }

    let picked = session
        .prompts
        .select_one("Select a column to sort by:", &columns)?;
    let column = columns
        .get(picked)
        .ok_or_else(|| TableError::PromptFailed {
            reason: format!("column selection {picked} is out of range"),
        })?;

    let orders: Vec<String> = SORT_ORDERS.iter().map(|o| o.keyword().to_string()).collect();
    let picked = session
        .prompts
        .select_one("Ascending or descending?", &orders)?;
    let order = *SORT_ORDERS
        .get(picked)
        .ok_or_else(|| TableError::PromptFailed {
            reason: format!("sort order selection {picked} is out of range"),
        })?;

    let sql = ddl::select_sorted_sql(&table, column, order);
    let result = into_rows(session.db.execute(&sql, &[])?);
    Ok((table, result))
}

fn into_rows(outcome: ExecOutcome) -> ResultSet {
    match outcome {
        ExecOutcome::Rows(rs) => rs,
        ExecOutcome::RowsAffected(_) => ResultSet::default(),
    }
}
