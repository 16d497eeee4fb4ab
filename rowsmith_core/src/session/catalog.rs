use crate::error::CatalogError;
use crate::schema::ColumnMetadata;

/// Schema introspection against the connected database.
///
/// Implementations must report a missing table as
/// [`CatalogError::NoSuchTable`] and every other failure (including a
/// cancelled or timed-out query) as [`CatalogError::Introspection`].
pub trait SchemaCatalog {
    /// Names of all base tables.
    fn list_tables(&mut self) -> Result<Vec<String>, CatalogError>;

    /// Columns of `table` in declaration order.
    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnMetadata>, CatalogError>;
}
