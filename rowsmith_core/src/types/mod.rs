pub mod coerce;
pub mod datatype;
pub mod value;

use value::TypedValue;

/// A stored row: one cell per column, `None` is SQL NULL.
pub type Row = Vec<Option<TypedValue>>;
