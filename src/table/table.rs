//! Table - the row store layered on top of the pager.
//!
//! The [`Table`] owns the row count and the [`Pager`]. Rows are appended at
//! the logical end and addressed purely by position: row `i` lives in page
//! `i / ROWS_PER_PAGE` at byte offset `(i % ROWS_PER_PAGE) * ROW_SIZE`.

use std::ops::Range;
use std::path::Path;

use tracing::debug;

use crate::common::config::{PAGE_SIZE, ROWS_PER_PAGE, ROW_SIZE, TABLE_MAX_PAGES};
use crate::common::{Error, PageId, Result};
use crate::storage::Pager;

use super::Row;

/// Where a row lives: a page and a byte offset within it.
///
/// # Example
/// ```
/// use pagedb::{PageId, RowLocation};
///
/// let loc = RowLocation::of(14);
/// assert_eq!(loc.page_id, PageId::new(1));
/// assert_eq!(loc.byte_offset, 293);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    pub page_id: PageId,
    pub byte_offset: usize,
}

impl RowLocation {
    /// Translate a row index into its page and in-page offset.
    #[inline]
    pub fn of(row_index: usize) -> Self {
        Self {
            page_id: PageId::from_index(row_index / ROWS_PER_PAGE),
            byte_offset: (row_index % ROWS_PER_PAGE) * ROW_SIZE,
        }
    }

    /// Byte range of the row within its page.
    #[inline]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset + ROW_SIZE
    }
}

/// A single append-only table of [`Row`]s stored in one file.
///
/// # Durability
/// Inserts only touch cached pages. Data reaches the file when the table is
/// [closed](Self::close); dropping a `Table` without closing it discards
/// everything inserted since it was opened.
///
/// # Usage
/// ```no_run
/// use pagedb::{Row, Table};
///
/// let mut table = Table::open("users.db")?;
/// table.insert(&Row::new(1, "alice", "alice@example.com")?)?;
///
/// for row in table.scan() {
///     println!("{}", row?);
/// }
///
/// table.close()?;
/// # Ok::<(), pagedb::Error>(())
/// ```
pub struct Table {
    pager: Pager,
    /// Authoritative number of rows; rows `0..row_count` are live.
    row_count: usize,
    max_rows: usize,
}

impl Table {
    /// Open a table with the default page budget.
    ///
    /// # Errors
    /// Returns an error if the database file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_capacity(path, TABLE_MAX_PAGES)
    }

    /// Open a table that may span at most `max_pages` pages.
    pub fn open_with_capacity<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let pager = Pager::open_with_capacity(path, max_pages)?;
        let row_count = rows_in_file(pager.file_length());
        let max_rows = max_pages * ROWS_PER_PAGE;

        debug!(row_count, max_rows, "opened table");

        Ok(Self {
            pager,
            row_count,
            max_rows,
        })
    }

    /// Number of rows in the table.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Maximum number of rows the table can hold.
    #[inline]
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.row_count >= self.max_rows
    }

    /// The underlying pager, for inspection.
    #[inline]
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Get the `ROW_SIZE` byte slot for a row, materializing its page.
    ///
    /// This is the only place row positions are turned into page addresses.
    ///
    /// # Errors
    /// Fatal pager errors from [`Pager::get_page`].
    pub fn row_slot(&mut self, row_index: usize) -> Result<&mut [u8]> {
        let location = RowLocation::of(row_index);
        let page = self.pager.get_page(location.page_id)?;
        Ok(&mut page.as_mut_slice()[location.byte_range()])
    }

    /// Append a row at the end of the table.
    ///
    /// # Errors
    /// - `Error::TableFull` if the table is at capacity; nothing is changed
    /// - Fatal pager errors
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            debug!(row_count = self.row_count, "table full, insert rejected");
            return Err(Error::TableFull);
        }

        row.encode(self.row_slot(self.row_count)?);
        self.row_count += 1;
        Ok(())
    }

    /// Iterate over every row in insertion order.
    ///
    /// Each item is a `Result` because reading a row may have to load its
    /// page from disk.
    pub fn scan(&mut self) -> Scan<'_> {
        Scan {
            table: self,
            next_row: 0,
        }
    }

    /// Flush every page holding rows, then close the pager.
    ///
    /// Full pages are written whole. The trailing partial page is written
    /// only up to its last row, so the file ends exactly after it. Pages
    /// that were never touched this session are already on disk and are
    /// skipped.
    ///
    /// # Errors
    /// Fatal pager errors from flushing or closing.
    pub fn close(mut self) -> Result<()> {
        let full_pages = self.row_count / ROWS_PER_PAGE;

        for index in 0..full_pages {
            let page_id = PageId::from_index(index);
            if self.pager.is_resident(page_id) {
                self.pager.flush(page_id, PAGE_SIZE)?;
            }
        }

        let trailing_rows = self.row_count % ROWS_PER_PAGE;
        if trailing_rows > 0 {
            let page_id = PageId::from_index(full_pages);
            if self.pager.is_resident(page_id) {
                self.pager.flush(page_id, trailing_rows * ROW_SIZE)?;
            }
        }

        debug!(row_count = self.row_count, "closing table");
        self.pager.close()
    }
}

/// Iterator over the rows of a [`Table`], created by [`Table::scan`].
pub struct Scan<'a> {
    table: &'a mut Table,
    next_row: usize,
}

impl Iterator for Scan<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.table.row_count {
            return None;
        }

        let row_index = self.next_row;
        self.next_row += 1;

        Some(self.table.row_slot(row_index).map(|slot| Row::decode(slot)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.row_count.saturating_sub(self.next_row);
        (remaining, Some(remaining))
    }
}

/// Number of rows stored in a file of `file_length` bytes.
///
/// Whole pages hold `ROWS_PER_PAGE` rows each (their tail is padding); the
/// trailing partial page holds as many whole rows as fit in its length. A
/// trailing partial row is dropped.
fn rows_in_file(file_length: u64) -> usize {
    let full_pages = (file_length / PAGE_SIZE as u64) as usize;
    let tail = (file_length % PAGE_SIZE as u64) as usize;

    full_pages * ROWS_PER_PAGE + tail / ROW_SIZE
}
