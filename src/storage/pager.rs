//! Pager - the page cache over a single database file.
//!
//! The [`Pager`] handles all direct file operations:
//! - Materializing pages from disk on first access
//! - Writing whole or partial pages back on demand
//! - Closing the database file

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::common::config::{PAGE_SIZE, TABLE_MAX_PAGES};
use crate::common::{Error, PageId, Result};
use crate::storage::page::Page;
use crate::storage::PagerStats;

/// Caches the pages of a single database file.
///
/// # File Layout
/// The database is stored as a single file with pages laid out sequentially:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬──────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N   │
/// │ (4KB)   │ (4KB)   │ (4KB)   │         │ (≤4KB)   │
/// └─────────┴─────────┴─────────┴─────────┴──────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// The last page may be short: only the bytes that were flushed exist.
///
/// # Residency
/// Each slot is either absent or holds a boxed [`Page`] owned by the pager.
/// A page becomes resident on its first [`get_page`](Self::get_page) and
/// stays resident until the pager is closed or dropped. Nothing is written
/// to disk except by an explicit [`flush`](Self::flush).
///
/// # Thread Safety
/// `Pager` is **single-threaded** and exclusively owned by one
/// [`Table`](crate::Table).
pub struct Pager {
    file: File,
    /// File length in bytes at open time. Never updated afterwards.
    file_length: u64,
    /// One slot per page number, `max_pages` long.
    pages: Vec<Option<Box<Page>>>,
    max_pages: usize,
    stats: PagerStats,
}

impl Pager {
    /// Open a database file with the default page budget, creating it if
    /// it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_capacity(path, TABLE_MAX_PAGES)
    }

    /// Open a database file that may hold at most `max_pages` pages.
    pub fn open_with_capacity<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let file_length = file.metadata()?.len();

        let mut pages = Vec::with_capacity(max_pages);
        pages.resize_with(max_pages, || None);

        debug!(
            path = %path.display(),
            file_length,
            max_pages,
            "opened pager"
        );

        Ok(Self {
            file,
            file_length,
            pages,
            max_pages,
            stats: PagerStats::default(),
        })
    }

    /// Get a page, materializing it on first access.
    ///
    /// A page that may hold persisted data is read from disk. A short read
    /// (including zero bytes past the end of the file) leaves the rest of
    /// the page zeroed. Later calls return the same buffer without touching
    /// the disk.
    ///
    /// # Errors
    /// - `Error::PageOutOfBounds` if `page_id` is not below `max_pages`
    /// - I/O errors from seek or read
    pub fn get_page(&mut self, page_id: PageId) -> Result<&mut Page> {
        let index = self.check_bounds(page_id)?;

        let page = match self.pages[index].take() {
            Some(page) => {
                self.stats.cache_hits += 1;
                page
            }
            None => {
                self.stats.cache_misses += 1;
                self.load_page(page_id)?
            }
        };

        let slot = self.pages[index].insert(page);
        Ok(&mut **slot)
    }

    /// Write the first `byte_count` bytes of a resident page to disk.
    ///
    /// `byte_count` may be less than `PAGE_SIZE` so that the unused tail of
    /// a partially filled page is never written.
    ///
    /// # Errors
    /// - `Error::PageOutOfBounds` if `page_id` is not below `max_pages`
    /// - `Error::FlushAbsentPage` if the page is not resident
    /// - `Error::FlushTooLarge` if `byte_count > PAGE_SIZE`
    /// - I/O errors from seek or write
    pub fn flush(&mut self, page_id: PageId, byte_count: usize) -> Result<()> {
        let index = self.check_bounds(page_id)?;

        if byte_count > PAGE_SIZE {
            return Err(Error::FlushTooLarge { byte_count });
        }

        let page = match self.pages[index].as_deref() {
            Some(page) => page,
            None => return Err(Error::FlushAbsentPage(page_id.0)),
        };

        self.file.seek(SeekFrom::Start(page_id.file_offset()))?;
        self.file.write_all(&page.as_slice()[..byte_count])?;

        self.stats.pages_written += 1;
        self.stats.bytes_written += byte_count as u64;

        debug!(page = page_id.0, byte_count, "flushed page");
        Ok(())
    }

    /// Close the database file and release every resident page.
    ///
    /// Does not flush: only the table knows which pages hold rows.
    ///
    /// # Errors
    /// Returns an error if the file cannot be synced.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;

        debug!(
            resident = self.resident_count(),
            stats = %self.stats,
            "closed pager"
        );
        // Dropping `self` releases the file handle and all page buffers
        Ok(())
    }

    /// Check whether a page is currently materialized.
    #[inline]
    pub fn is_resident(&self, page_id: PageId) -> bool {
        self.pages
            .get(page_id.as_index())
            .is_some_and(|slot| slot.is_some())
    }

    /// Number of pages currently materialized.
    pub fn resident_count(&self) -> usize {
        self.pages.iter().filter(|slot| slot.is_some()).count()
    }

    /// File length in bytes, as recorded at open.
    #[inline]
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Maximum number of pages this pager may hold.
    #[inline]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Snapshot of the pager's counters.
    #[inline]
    pub fn stats(&self) -> PagerStats {
        self.stats
    }

    fn check_bounds(&self, page_id: PageId) -> Result<usize> {
        let index = page_id.as_index();
        if index >= self.max_pages {
            return Err(Error::PageOutOfBounds {
                page_id: page_id.0,
                max_pages: self.max_pages,
            });
        }
        Ok(index)
    }

    /// Allocate a zeroed page and fill it from disk if it may be disk-backed.
    fn load_page(&mut self, page_id: PageId) -> Result<Box<Page>> {
        let mut page = Box::new(Page::new());

        // A partial trailing page still counts as on disk.
        let pages_on_disk = self.file_length.div_ceil(PAGE_SIZE as u64);

        // `<=` also reads the page just past the end; that read comes back
        // empty and leaves the page zeroed.
        if u64::from(page_id.0) <= pages_on_disk {
            self.file.seek(SeekFrom::Start(page_id.file_offset()))?;
            let bytes_read = read_up_to(&mut self.file, page.as_mut_slice())?;
            self.stats.pages_read += 1;
            trace!(page = page_id.0, bytes_read, "loaded page from disk");
        } else {
            trace!(page = page_id.0, "allocated fresh page");
        }

        Ok(page)
    }
}

/// Read until `buf` is full or the file ends. Returns the bytes read.
fn read_up_to(file: &mut File, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
