//! Error types for pagedb.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagedb.
///
/// Errors fall into two tiers:
/// - **User-facing**: [`Error::TableFull`] and row validation errors. The
///   caller reports them and keeps going.
/// - **Fatal**: I/O faults and pager contract violations. The storage layer
///   cannot safely continue past these; see [`Error::is_fatal`].
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from open, seek, read, write or sync.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested page number is outside the pager's slot table.
    #[error("Page number out of bounds ({page_id} >= {max_pages})")]
    PageOutOfBounds { page_id: u32, max_pages: usize },

    /// Attempted to flush a page that was never materialized.
    ///
    /// This indicates a bug in the caller.
    #[error("Tried to flush absent page {0}")]
    FlushAbsentPage(u32),

    /// Attempted to flush more bytes than a page holds.
    #[error("Flush of {byte_count} bytes exceeds the page size")]
    FlushTooLarge { byte_count: usize },

    /// The table has reached its row capacity.
    #[error("Table full")]
    TableFull,

    /// A text column exceeds its fixed width.
    #[error("{column} is too long ({len} bytes, max {max})")]
    StringTooLong {
        column: &'static str,
        len: usize,
        max: usize,
    },

    /// A text column contains a NUL byte, which the encoding reserves as
    /// the terminator.
    #[error("{column} contains a NUL byte")]
    NulInString { column: &'static str },
}

impl Error {
    /// Whether the process should stop after reporting this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::PageOutOfBounds { .. }
                | Error::FlushAbsentPage(_)
                | Error::FlushTooLarge { .. }
        )
    }
}
