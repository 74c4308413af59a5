//! Instrument code catalog builder.
//!
//! Enumerates every instrument of a market segment through the paginated
//! listing endpoint and writes them to `<segment>_stock.txt`.
//!
//! # Page count
//!
//! Pages are computed as `total / page_size + 1`. When `total` is an exact
//! multiple of the page size this requests one trailing page that comes back
//! empty; the extra request is kept so the request sequence matches existing
//! deployments.

mod catalog;

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::errors::MarketDataError;
use crate::models::CodeEntry;
use crate::provider::sina::SinaClient;
use crate::provider::transport::HttpTransport;

pub use catalog::{catalog_file_name, read_catalog, write_catalog};

/// Page size accepted by the listing endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 80;

/// Number of listing pages requested for `total` instruments.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total / page_size.max(1) + 1
}

/// Settings for [`CodeLister`].
#[derive(Clone, Debug)]
pub struct CodeListerConfig {
    pub page_size: usize,
    /// Directory the catalog file is written into
    pub output_dir: PathBuf,
}

impl Default for CodeListerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of one catalog run.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogSummary {
    pub segment: String,
    /// Count reported by the count endpoint
    pub total_reported: usize,
    pub pages_requested: usize,
    pub pages_failed: usize,
    pub entries_written: usize,
    pub path: PathBuf,
}

/// Builds instrument catalogs for market segments.
pub struct CodeLister<'a, T> {
    client: &'a SinaClient<T>,
    config: CodeListerConfig,
}

/// Entries collected from the listing pages of one segment.
#[derive(Clone, Debug, Default)]
pub struct CodePages {
    pub total_reported: usize,
    pub pages_requested: usize,
    pub pages_failed: usize,
    pub entries: Vec<CodeEntry>,
}

impl<'a, T: HttpTransport> CodeLister<'a, T> {
    pub fn new(client: &'a SinaClient<T>, config: CodeListerConfig) -> Self {
        Self { client, config }
    }

    /// Fetch every page of `segment` and write the catalog file.
    ///
    /// A failing count request aborts before anything is written. Failing
    /// pages are logged and skipped.
    pub fn list_codes(&self, segment: &str) -> Result<CatalogSummary, MarketDataError> {
        let pages = self.fetch_codes(segment)?;

        let path = self.config.output_dir.join(catalog_file_name(segment));
        let entries_written = write_catalog(&path, &pages.entries)?;

        let summary = CatalogSummary {
            segment: segment.to_string(),
            total_reported: pages.total_reported,
            pages_requested: pages.pages_requested,
            pages_failed: pages.pages_failed,
            entries_written,
            path,
        };
        info!(
            "Catalog {} written to {}: {} entries ({} of {} pages failed)",
            summary.segment,
            summary.path.display(),
            summary.entries_written,
            summary.pages_failed,
            summary.pages_requested
        );
        Ok(summary)
    }

    /// Fetch every page of `segment` without writing anything.
    pub fn fetch_codes(&self, segment: &str) -> Result<CodePages, MarketDataError> {
        let page_size = self.config.page_size;
        if page_size == 0 {
            return Err(MarketDataError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }

        let total = self.client.fetch_code_count(segment)?;
        let pages = page_count(total, page_size);
        debug!(
            "Segment {} reports {} instruments, requesting {} page(s) of {}",
            segment, total, pages, page_size
        );

        let mut result = CodePages {
            total_reported: total,
            pages_requested: pages,
            ..Default::default()
        };

        for page in 1..=pages {
            match self.client.fetch_code_page(segment, page, page_size) {
                Ok(entries) => {
                    debug!("Segment {} page {}: {} entries", segment, page, entries.len());
                    result.entries.extend(entries);
                }
                Err(e) => {
                    warn!("Skipping page {} of segment {}: {}", page, segment, e);
                    result.pages_failed += 1;
                }
            }
        }

        Ok(result)
    }
}
