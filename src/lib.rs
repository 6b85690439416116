//! pagedb - a single-table record store backed by a paginated file cache.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          pagedb                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                Shell (repl/)                          │  │
//! │  │     MetaCommand / Statement → execute → output        │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │                            ↓                                │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                Row Store (table/)                     │  │
//! │  │   row index → (page, offset) → 293-byte row slot      │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │                            ↓                                │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │                Page Cache (storage/)                  │  │
//! │  │   100 page slots, lazy load, explicit partial flush   │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │                            ↓                                │
//! │                   single flat database file                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Error, layout constants)
//! - [`storage`] - The pager and page type
//! - [`table`] - Rows, their encoding, and the row store
//! - [`repl`] - Statement parsing and the interactive shell
//!
//! # Quick Start
//! ```no_run
//! use pagedb::{Row, Table};
//!
//! let mut table = Table::open("my_database.db").unwrap();
//! table.insert(&Row::new(1, "alice", "alice@example.com").unwrap()).unwrap();
//!
//! // Nothing reaches the file until the table is closed
//! table.close().unwrap();
//! ```

pub mod common;
pub mod repl;
pub mod storage;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use common::config::{PAGE_SIZE, ROWS_PER_PAGE, ROW_SIZE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};
pub use common::{Error, PageId, Result};

pub use storage::page::Page;
pub use storage::{Pager, PagerStats};
pub use table::{Row, RowLocation, Scan, Table};
