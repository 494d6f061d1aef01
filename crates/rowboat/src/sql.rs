//! Statement text builders for the relational persistence path.
//!
//! Placeholders use the named `:field` form; the executor binds them from
//! the parameter map it is handed alongside the text.

use std::fmt::Write;

/// Build an UPDATE scoped by primary-key equality.
///
/// `columns` become the assignment list, in order:
/// `UPDATE t SET a = :a, b = :b WHERE id = :id`.
pub fn update_by_key<'a>(
    table: &str,
    key: &str,
    columns: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut sql = format!("UPDATE {table} SET ");
    let mut first = true;
    for column in columns {
        if !std::mem::take(&mut first) {
            sql.push_str(", ");
        }
        let _ = write!(sql, "{column} = :{column}");
    }
    let _ = write!(sql, " WHERE {key} = :{key}");
    sql
}

/// Build a DELETE scoped by primary-key equality.
pub fn delete_by_key(table: &str, key: &str) -> String {
    format!("DELETE FROM {table} WHERE {key} = :{key}")
}
