//! Statement preparation.
//!
//! Turns one line of user input into either a [`MetaCommand`] (lines that
//! start with `.`) or a [`Statement`] ready to run against a table.

use thiserror::Error;

use crate::common;
use crate::table::Row;

/// Non-SQL commands such as `.exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized(String),
}

impl MetaCommand {
    /// Parse a meta command. Returns `None` if `input` is not one.
    pub fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized(input.to_string())),
            _ => None,
        }
    }
}

/// A prepared statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `insert <id> <username> <email>`
    Insert(Row),
    /// `select`
    Select,
}

/// Reasons a line could not be turned into a [`Statement`].
///
/// The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long.")]
    StringTooLong,

    #[error("ID must be positive.")]
    NegativeId,
}

impl Statement {
    /// Prepare a statement from a trimmed input line.
    ///
    /// Tokens are separated by whitespace; anything after the email is
    /// ignored.
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let mut tokens = input.split_whitespace();

        match tokens.next() {
            Some("insert") => {
                let (Some(id), Some(username), Some(email)) =
                    (tokens.next(), tokens.next(), tokens.next())
                else {
                    return Err(PrepareError::SyntaxError);
                };
                prepare_insert(id, username, email)
            }
            Some("select") => Ok(Statement::Select),
            _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
        }
    }
}

fn prepare_insert(id: &str, username: &str, email: &str) -> Result<Statement, PrepareError> {
    let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    match Row::new(id, username, email) {
        Ok(row) => Ok(Statement::Insert(row)),
        Err(common::Error::StringTooLong { .. }) => Err(PrepareError::StringTooLong),
        Err(_) => Err(PrepareError::SyntaxError),
    }
}
