use tracing::{debug, warn};

use super::{
    CUSTOM_TYPE_CHOICE, ColumnDraft, ColumnSetBuilder, NameStep, TypeChoice,
    auto_increment_offered, nullability_asked, resolve_type, validate_table_name,
};
use crate::error::BuildError;
use crate::schema::{ColumnDefinition, TableDefinition};
use crate::session::PromptSource;
use crate::types::datatype::ENGINE_TYPES;

/// Type menu: the custom entry first, then the engine catalog.
pub fn type_choices() -> Vec<String> {
    std::iter::once(CUSTOM_TYPE_CHOICE)
        .chain(ENGINE_TYPES.iter().copied())
        .map(String::from)
        .collect()
}

/// Asks for a new table name and its columns.
///
/// Input violations are reported and asked again; only cancellation or a
/// failing prompt source ends the call early.
pub fn define_table(
    prompts: &mut dyn PromptSource,
    existing_tables: &[String],
) -> Result<TableDefinition, BuildError> {
    let name = loop {
        let raw = prompts.ask_text("Enter the name of the new table:")?;
        match validate_table_name(&raw, existing_tables) {
            Ok(name) => break name,
            Err(err) => reject(prompts, err)?,
        }
    };
    let columns = collect_columns(prompts)?;
    Ok(TableDefinition { name, columns })
}

pub fn collect_columns(
    prompts: &mut dyn PromptSource,
) -> Result<Vec<ColumnDefinition>, BuildError> {
    let mut builder = ColumnSetBuilder::new();
    let choices = type_choices();

    loop {
        let raw = prompts.ask_text("Enter the column name (or type 'done' to finish):")?;
        let name = match builder.offer_name(&raw) {
            Ok(NameStep::Column(name)) => name,
            Ok(NameStep::Done) => match builder.finish() {
                Ok(columns) => return Ok(columns),
                Err(err) => {
                    reject(prompts, err)?;
                    continue;
                }
            },
            Err(err) => {
                reject(prompts, err)?;
                continue;
            }
        };

        let data_type = match ask_type(prompts, &choices) {
            Ok(data_type) => data_type,
            Err(err) => {
                reject(prompts, err)?;
                continue;
            }
        };

        let primary_key =
            builder.primary_key_offered() && prompts.confirm("Is this column a Primary Key?")?;
        let auto_increment = auto_increment_offered(primary_key, &data_type)
            && prompts.confirm("Should this column auto-increment?")?;
        let nullable = nullability_asked(primary_key) && prompts.confirm("Allow NULL values?")?;

        let accepted = builder.accept(ColumnDraft {
            name,
            data_type,
            primary_key,
            auto_increment,
            nullable,
        })?;
        debug!(
            column = %accepted.name,
            data_type = %accepted.data_type,
            primary_key = accepted.is_primary_key,
            "column accepted"
        );
    }
}

fn ask_type(prompts: &mut dyn PromptSource, choices: &[String]) -> Result<String, BuildError> {
    let picked = prompts.select_one("Select the data type:", choices)?;
    let choice = match choices.get(picked) {
        Some(c) if c == CUSTOM_TYPE_CHOICE => {
            TypeChoice::Custom(prompts.ask_text("Enter the custom data type:")?)
        }
        Some(c) => TypeChoice::Catalog(c.clone()),
        None => {
            return Err(BuildError::PromptFailed {
                reason: format!("type selection {picked} is out of range"),
            });
        }
    };
    resolve_type(choice)
}

/// Reports a recoverable error so the caller can ask again; anything else is
/// handed back as the result.
fn reject(prompts: &mut dyn PromptSource, err: BuildError) -> Result<(), BuildError> {
    if !err.is_recoverable() {
        return Err(err);
    }
    warn!(error = %err, "definition input rejected");
    prompts.report(&err);
    Ok(())
}
