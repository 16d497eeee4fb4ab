use crate::session::ResultSet;
use crate::types::value::value_to_string;

/// Renders a result set as tab-separated lines, header first. Missing cells
/// print as `NULL`.
pub fn format_rows(result: &ResultSet) -> String {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(result.columns.join("\t"));
    for row in &result.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.as_ref().map_or_else(|| "NULL".to_string(), value_to_string))
            .collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}
