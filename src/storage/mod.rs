//! Storage layer - the page cache and page format.
//!
//! This module handles persistent storage:
//! - [`Pager`] - Page cache over the database file
//! - [`page`] - The raw page type
//! - [`PagerStats`] - Cache and I/O counters

pub mod page;
mod pager;
mod stats;

pub use pager::Pager;
pub use stats::PagerStats;
