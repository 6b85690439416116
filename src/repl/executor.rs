//! Statement execution against a [`Table`].

use std::io::Write;

use crate::common::Result;
use crate::table::Table;

use super::Statement;

/// Run a prepared statement.
///
/// `select` writes one `(id, username, email)` line per row to `out`.
///
/// # Errors
/// - `Error::TableFull` from an insert into a full table
/// - Fatal pager and output errors
pub fn execute<W: Write>(statement: &Statement, table: &mut Table, out: &mut W) -> Result<()> {
    match statement {
        Statement::Insert(row) => table.insert(row),
        Statement::Select => {
            for row in table.scan() {
                writeln!(out, "{}", row?)?;
            }
            Ok(())
        }
    }
}
