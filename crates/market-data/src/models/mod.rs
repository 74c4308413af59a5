//! Market data models
//!
//! - `quote` - Quote snapshot parsed from the text feed (QuoteRecord, BookLevel)
//! - `code_entry` - Instrument catalog row from the listing endpoint (CodeEntry)

mod code_entry;
mod quote;

pub use code_entry::CodeEntry;
pub use quote::{BookLevel, QuoteRecord, BOOK_DEPTH};
