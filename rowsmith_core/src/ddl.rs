//! Statement text emitted by the core.
//!
//! Identifiers are bracket-quoted and only ever come from a definition the
//! builder validated or from a name list returned by the schema catalog.
//! Data values never appear here; they travel as named parameters.

use crate::schema::{ColumnDefinition, TableDefinition};

pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// `@p1`, `@p2`, ... for the zero-based entry index.
pub fn param_name(index: usize) -> String {
    format!("@p{}", index + 1)
}

pub fn column_sql(col: &ColumnDefinition) -> String {
    let mut sql = format!("{} {}", quote_ident(&col.name), col.data_type.trim());
    if col.is_primary_key {
        sql.push_str(" PRIMARY KEY");
    }
    if col.is_auto_increment {
        sql.push_str(" IDENTITY(1,1)");
    }
    if col.is_nullable && !col.is_primary_key {
        sql.push_str(" NULL");
    } else {
        sql.push_str(" NOT NULL");
    }
    sql
}

pub fn create_table_sql(def: &TableDefinition) -> String {
    let columns = def
        .columns
        .iter()
        .map(column_sql)
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!("CREATE TABLE {} (\n    {}\n);", quote_ident(&def.name), columns)
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE {};", quote_ident(table))
}

pub fn select_all_sql(table: &str) -> String {
    format!("SELECT * FROM {};", quote_ident(table))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

pub fn select_sorted_sql(table: &str, column: &str, order: SortOrder) -> String {
    format!(
        "SELECT * FROM {} ORDER BY {} {};",
        quote_ident(table),
        quote_ident(column),
        order.keyword()
    )
}

pub fn insert_sql<'a>(table: &str, columns: impl IntoIterator<Item = &'a str>) -> String {
    let columns: Vec<&str> = columns.into_iter().collect();
    let names = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let params = (0..columns.len())
        .map(param_name)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_ident(table),
        names,
        params
    )
}
