//! Row store.
//!
//! - [`Row`] - The fixed-layout record and its byte encoding
//! - [`Table`] - Append-only row storage over a [`Pager`](crate::Pager)
//! - [`RowLocation`] - Row index to page/offset translation

mod row;
#[allow(clippy::module_inception)]
mod table;

pub use row::Row;
pub use table::{RowLocation, Scan, Table};
