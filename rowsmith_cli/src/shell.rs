//! Menus and result rendering. All schema and data work goes through
//! `rowsmith_core`; this module only decides what to show next.

use rowsmith_core::error::{InsertError, PromptError, TableError};
use rowsmith_core::format::format_rows;
use rowsmith_core::planner::insert_row;
use rowsmith_core::session::{Connection, PromptSource, ResultSet, Session};
use rowsmith_core::tables::{choose_table, create_table, drop_table, sort_table, view_table};
use rowsmith_core::types::coerce::UnknownTypePolicy;
use tracing::debug;

const MAIN_MENU: &[&str] = &["Table Management", "Data Management", "View Data", "Exit"];
const TABLE_MENU: &[&str] = &["Create Table", "Drop Table", "Back"];
const DATA_MENU: &[&str] = &["Insert Data", "Back"];
const VIEW_MENU: &[&str] = &["View Tables", "Sort Data", "Back"];

/// Runs the main menu until the operator exits. Only a broken prompt source
/// ends it with an error.
pub fn run(
    db: &mut dyn Connection,
    prompts: &mut dyn PromptSource,
    policy: UnknownTypePolicy,
) -> Result<(), PromptError> {
    loop {
        let picked = match prompts.select_one("Main Menu", &menu(MAIN_MENU)) {
            Ok(i) => i,
            Err(PromptError::Cancelled) => return Ok(()),
            Err(err) => return Err(err),
        };
        let mut session = Session::new(&mut *db, &mut *prompts, policy);
        match picked {
            0 => table_menu(&mut session)?,
            1 => data_menu(&mut session)?,
            2 => view_data(&mut session)?,
            _ => return Ok(()),
        }
    }
}

fn menu(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `Ok(None)` when the operator backed out of the menu.
fn pick(session: &mut Session<'_>, title: &str, items: &[&str]) -> Result<Option<usize>, PromptError> {
    match session.prompts.select_one(title, &menu(items)) {
        Ok(i) if i + 1 < items.len() => Ok(Some(i)),
        Ok(_) | Err(PromptError::Cancelled) => Ok(None),
        Err(err) => Err(err),
    }
}

fn table_menu(session: &mut Session<'_>) -> Result<(), PromptError> {
    while let Some(choice) = pick(session, "Table Management", TABLE_MENU)? {
        match choice {
            0 => loop {
                match create_table(session) {
                    Ok(def) => {
                        println!("Table '{}' created successfully!", def.name);
                        break;
                    }
                    Err(TableError::Cancelled | TableError::Declined) => {
                        println!("Table creation canceled.");
                        break;
                    }
                    Err(TableError::PromptFailed { reason }) => {
                        return Err(PromptError::Failed { reason });
                    }
                    Err(err @ TableError::Execution(_)) => {
                        println!("Error creating table: {err}");
                        if !retry(session)? {
                            break;
                        }
                    }
                    Err(err) => {
                        println!("Error creating table: {err}");
                        break;
                    }
                }
            },
            _ => match drop_table(session) {
                Ok(table) => println!("Table '{table}' dropped successfully!"),
                Err(TableError::Cancelled | TableError::Declined) => {}
                Err(TableError::PromptFailed { reason }) => {
                    return Err(PromptError::Failed { reason });
                }
                Err(err) => println!("Error dropping table: {err}"),
            },
        }
    }
    Ok(())
}

fn data_menu(session: &mut Session<'_>) -> Result<(), PromptError> {
    while pick(session, "Data Management", DATA_MENU)?.is_some() {
        let table = match choose_table(session, "Select a table to insert data into:") {
            Ok(table) => table,
            Err(TableError::Cancelled) => continue,
            Err(TableError::PromptFailed { reason }) => return Err(PromptError::Failed { reason }),
            Err(err) => {
                println!("Error: {err}");
                continue;
            }
        };
        match insert_row(session, &table) {
            Ok(rows) => println!("Data inserted successfully into {table} ({rows} row)."),
            Err(InsertError::Cancelled) => println!("Insert canceled."),
            Err(InsertError::PromptFailed { reason }) => return Err(PromptError::Failed { reason }),
            Err(err) => {
                debug!(error = ?err, "insert aborted");
                println!("Error inserting data: {err}");
            }
        }
    }
    Ok(())
}

fn view_data(session: &mut Session<'_>) -> Result<(), PromptError> {
    while let Some(choice) = pick(session, "Data Viewing", VIEW_MENU)? {
        let viewed = match choice {
            0 => view_table(session),
            _ => sort_table(session),
        };
        match viewed {
            Ok((table, rows)) => print_rows(&table, &rows),
            Err(TableError::Cancelled) => {}
            Err(TableError::PromptFailed { reason }) => return Err(PromptError::Failed { reason }),
            Err(err) => println!("Error viewing data: {err}"),
        }
    }
    Ok(())
}

fn print_rows(table: &str, rows: &ResultSet) {
    println!("-- {table} ({} rows)", rows.rows.len());
    println!("{}", format_rows(rows));
}

fn retry(session: &mut Session<'_>) -> Result<bool, PromptError> {
    match session.prompts.confirm("Would you like to try again?") {
        Ok(answer) => Ok(answer),
        Err(PromptError::Cancelled) => Ok(false),
        Err(err) => Err(err),
    }
}
