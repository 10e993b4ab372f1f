//! Remote spreadsheet connector.
//!
//! [`SheetClient`] downloads a sheet export (Google Sheets links are rewritten
//! to their CSV export endpoint) through an optionally authenticated
//! [`HttpClient`](crate::fetch::HttpClient) and parses it into records.

mod client;

pub use client::{SheetAuth, SheetClient, export_url, is_remote};
