//! Interactive shell over a [`Table`].
//!
//! Reads one command per line, prints a `db > ` prompt before each, and
//! reports the outcome on the output stream:
//!
//! ```text
//! db > insert 1 user1 person1@example.com
//! Executed.
//! db > select
//! (1, user1, person1@example.com)
//! Executed.
//! db > .exit
//! ```
//!
//! User errors (bad statements, a full table) are printed and the loop
//! continues. Fatal storage errors end the loop and are returned.

mod executor;
mod statement;

use std::io::{BufRead, Write};

use tracing::debug;

use crate::common::{Error, Result};
use crate::table::Table;

pub use executor::execute;
pub use statement::{MetaCommand, PrepareError, Statement};

/// Prompt printed before every command.
pub const PROMPT: &str = "db > ";

/// Run the shell until `.exit` or end of input.
///
/// The table is left open; the caller closes it to persist the session.
///
/// # Errors
/// Fatal storage errors and I/O errors on `input` or `output`.
pub fn run<R: BufRead, W: Write>(table: &mut Table, mut input: R, mut output: W) -> Result<()> {
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(());
        }
        let command = line.trim();

        if let Some(meta) = MetaCommand::parse(command) {
            match meta {
                MetaCommand::Exit => return Ok(()),
                MetaCommand::Unrecognized(command) => {
                    writeln!(output, "Unrecognized command '{command}'")?;
                }
            }
            continue;
        }

        match Statement::prepare(command) {
            Ok(statement) => match execute(&statement, table, &mut output) {
                Ok(()) => writeln!(output, "Executed.")?,
                Err(Error::TableFull) => writeln!(output, "Error: Table full.")?,
                Err(e) => return Err(e),
            },
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
