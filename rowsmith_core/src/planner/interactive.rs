use tracing::{debug, info};

use super::{InsertPlan, choose_columns, coerce_entry, fetch_columns, partition};
use crate::error::{InsertError, PromptError};
use crate::schema::ColumnMetadata;
use crate::session::Session;

/// Inserts one row into `table`, asking the operator for the values.
///
/// Each value is coerced as soon as it is entered; the first failure aborts
/// the attempt before anything reaches the database.
pub fn insert_row(session: &mut Session<'_>, table: &str) -> Result<u64, InsertError> {
    let columns = fetch_columns(&mut *session.db, table)?;
    let partition = partition(&columns);
    if partition.is_empty() {
        return Err(InsertError::EmptyPlan {
            table: table.to_string(),
        });
    }

    if !partition.required.is_empty() {
        session.prompts.notice(&format!(
            "Required columns: {}",
            labels(&partition.required).join(", ")
        ));
    }

    let selected = if partition.optional.is_empty() {
        Vec::new()
    } else {
        let picked = session.prompts.select_many(
            "Select optional columns to insert data into:",
            &labels(&partition.optional),
        )?;
        picked
            .into_iter()
            .map(|i| {
                partition
                    .optional
                    .get(i)
                    .map(|c| c.name.clone())
                    .ok_or_else(|| PromptError::Failed {
                        reason: format!("column selection {i} is out of range"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let chosen = choose_columns(table, &partition, &selected)?;
    let mut entries = Vec::with_capacity(chosen.len());
    for col in chosen {
        let raw = session.prompts.ask_text(&format!(
            "Enter the value for {} ({}):",
            col.name, col.declared_type
        ))?;
        entries.push(coerce_entry(table, col, &raw, session.policy)?);
    }

    let plan = InsertPlan {
        table: table.to_string(),
        entries,
    };
    let statement = plan.statement();
    debug!(sql = %statement.sql, params = statement.params.len(), "executing insert");

    let outcome = session
        .db
        .execute(&statement.sql, &statement.params)
        .map_err(|source| InsertError::Execution {
            table: table.to_string(),
            source,
        })?;
    let rows = outcome.rows_affected();
    info!(table, rows, "row inserted");
    Ok(rows)
}

fn labels(columns: &[ColumnMetadata]) -> Vec<String> {
    columns.iter().map(ColumnMetadata::label).collect()
}
