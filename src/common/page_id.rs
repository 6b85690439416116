//! Page identifier type.

use std::fmt;

use super::config::PAGE_SIZE;

/// Identifies a page within the database file and the page cache.
///
/// Page numbers are zero-based; page N starts at file offset
/// `N × PAGE_SIZE`.
///
/// # Example
/// ```
/// use pagedb::PageId;
///
/// let page_id = PageId::new(2);
/// assert_eq!(page_id.file_offset(), 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    /// Build a PageId from a computed page index.
    ///
    /// Indices that do not fit in a `u32` saturate, so they still fail the
    /// pager's bounds check instead of wrapping onto a valid page.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        PageId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Slot index of this page in the pager.
    #[inline]
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }

    /// Byte offset of this page in the database file.
    #[inline]
    pub fn file_offset(&self) -> u64 {
        u64::from(self.0) * PAGE_SIZE as u64
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}
