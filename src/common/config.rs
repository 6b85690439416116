//! Layout constants for pagedb.
//!
//! These values form the on-disk contract: changing any of them makes
//! existing database files unreadable.

/// Size of a page in bytes (4KB).
///
/// Pages are the unit of caching and of file I/O. Page N lives at file
/// offset `N × PAGE_SIZE`.
pub const PAGE_SIZE: usize = 4096;

/// Default number of page slots a pager may hold.
pub const TABLE_MAX_PAGES: usize = 100;

/// Maximum username length in bytes, excluding the NUL terminator.
pub const COLUMN_USERNAME_SIZE: usize = 32;

/// Maximum email length in bytes, excluding the NUL terminator.
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Encoded size of one row. Fields are packed with no alignment padding.
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// Whole rows that fit in one page. The remaining tail bytes are padding.
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;

/// Row capacity of a table using the default page budget.
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

const _: () = assert!(ROWS_PER_PAGE > 0, "a row must fit in a page");
const _: () = assert!(EMAIL_OFFSET + EMAIL_SIZE == ROW_SIZE);
