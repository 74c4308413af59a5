//! lltrade Market Data Crate
//!
//! Real-time A-share quote snapshots and instrument catalogs from the Sina
//! finance endpoints.
//!
//! # Overview
//!
//! - Fetch the GBK text quote feed for a batch of instruments
//! - Parse `var hq_str_<market><code>="...";` assignments into [`QuoteRecord`]s
//! - Enumerate a market segment's instruments page by page into a catalog file
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |    SinaClient    | --> |   decode_gbk     | --> |  parse_quotes    |
//! | (HttpTransport)  |     |                  |     |  -> QuoteRecord  |
//! +------------------+     +------------------+     +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    CodeLister    | --> |  write_catalog   |  (<segment>_stock.txt)
//! |  count + pages   |     |                  |
//! +------------------+     +------------------+
//! ```
//!
//! All I/O is blocking and sequential. Per-element parse failures and
//! per-page listing failures are logged through `tracing` and left out of the
//! result; only fetch-level failures are returned as [`MarketDataError`].
//!
//! # Example
//!
//! ```
//! use lltrade_market_data::parse_quotes;
//!
//! let raw = concat!(
//!     r#"var hq_str_sh601360="三六零,9.070,9.060,9.110,9.180,9.030,9.100,9.110,33566391,305350917.000,"#,
//!     r#"10000,9.100,25300,9.090,41800,9.080,30200,9.070,18700,9.060,"#,
//!     r#"52100,9.110,36400,9.120,28900,9.130,47000,9.140,61500,9.150,"#,
//!     r#"2023-09-11,14:34:42,00";"#,
//! );
//! let quotes = parse_quotes(raw);
//! assert_eq!(quotes.len(), 1);
//! assert_eq!(quotes[0].market, "sh");
//! assert_eq!(quotes[0].code, "601360");
//! assert_eq!(quotes[0].current_price, 9.11);
//! ```

pub mod encoding;
pub mod errors;
pub mod lister;
pub mod models;
pub mod parser;
pub mod provider;

pub use encoding::decode_gbk;
pub use errors::MarketDataError;
pub use lister::{
    page_count, read_catalog, write_catalog, CatalogSummary, CodeLister, CodeListerConfig,
    CodePages, DEFAULT_PAGE_SIZE,
};
pub use models::{BookLevel, CodeEntry, QuoteRecord, BOOK_DEPTH};
pub use parser::{parse_quotes, parse_quotes_with_report, ParseReport, SkipReason, SkippedElement};
pub use provider::{HttpTransport, ReqwestTransport, SinaClient, SinaConfig};
