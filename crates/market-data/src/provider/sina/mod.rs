//! Sina finance quote feed and instrument listing client.
//!
//! Endpoints:
//! - `hq.sinajs.cn/list=<ids>` - text quote feed (GBK), parsed by [`crate::parser`]
//! - `Market_Center.getHQNodeStockCount?node=<segment>` - instrument count as a quoted integer
//! - `Market_Center.getHQNodeData?page=..&num=..&node=<segment>` - one page of [`CodeEntry`] JSON (GBK)
//!
//! All calls are blocking and issued one at a time. Nothing is retried.

mod headers;

use std::time::Duration;

use reqwest::header::HeaderMap;
use tracing::debug;

use crate::encoding::decode_gbk;
use crate::errors::MarketDataError;
use crate::models::{CodeEntry, QuoteRecord};
use crate::parser::{self, ParseReport};
use crate::provider::transport::{HttpTransport, ReqwestTransport};

pub use headers::DEFAULT_USER_AGENT;

pub const DEFAULT_QUOTE_URL: &str = "https://hq.sinajs.cn/list=";
pub const DEFAULT_LISTING_URL: &str =
    "https://vip.stock.finance.sina.com.cn/quotes_service/api/json_v2.php";
pub const DEFAULT_QUOTE_REFERER: &str = "https://finance.sina.com.cn";
pub const DEFAULT_LISTING_REFERER: &str = "https://vip.stock.finance.sina.com.cn/mkt/";

const ID_SEPARATOR: &str = ",";

/// Endpoint and request settings for [`SinaClient`].
#[derive(Clone, Debug)]
pub struct SinaConfig {
    /// Quote feed prefix; the comma-joined ids are appended as-is
    pub quote_url: String,

    /// Base of the `Market_Center.*` listing API
    pub listing_url: String,

    pub quote_referer: String,
    pub listing_referer: String,
    pub user_agent: String,

    /// No timeout when `None`
    pub request_timeout: Option<Duration>,
}

impl Default for SinaConfig {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            quote_referer: DEFAULT_QUOTE_REFERER.to_string(),
            listing_referer: DEFAULT_LISTING_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
        }
    }
}

/// Client for the Sina quote feed and listing endpoints.
pub struct SinaClient<T = ReqwestTransport> {
    transport: T,
    config: SinaConfig,
    quote_headers: HeaderMap,
    listing_headers: HeaderMap,
}

impl SinaClient<ReqwestTransport> {
    /// Create a client backed by a blocking `reqwest` transport.
    pub fn new(config: SinaConfig) -> Result<Self, MarketDataError> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> SinaClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: SinaConfig, transport: T) -> Result<Self, MarketDataError> {
        let quote_headers = headers::quote_headers(&config.quote_referer, &config.user_agent)?;
        let listing_headers =
            headers::listing_headers(&config.listing_referer, &config.user_agent)?;

        Ok(Self {
            transport,
            config,
            quote_headers,
            listing_headers,
        })
    }

    pub fn config(&self) -> &SinaConfig {
        &self.config
    }

    /// Fetch the raw quote feed for `ids` (e.g. `["sh601360", "sz000555"]`)
    /// and return it decoded.
    pub fn fetch_quotes<S: AsRef<str>>(&self, ids: &[S]) -> Result<String, MarketDataError> {
        let url = self.quote_url(ids)?;
        let body = self.transport.get(&url, &self.quote_headers)?;
        decode_gbk(&body, &url)
    }

    /// Fetch and parse quotes. Elements the parser rejects are left out, so
    /// the result may be shorter than `ids`.
    pub fn get_quotes<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<QuoteRecord>, MarketDataError> {
        Ok(self.get_quotes_with_report(ids)?.records)
    }

    /// Fetch and parse quotes, keeping the parser diagnostics.
    pub fn get_quotes_with_report<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<ParseReport, MarketDataError> {
        let text = self.fetch_quotes(ids)?;
        let report = parser::parse_quotes_with_report(&text);
        debug!(
            "Quotes for {} id(s): {}",
            ids.len(),
            report.summary()
        );
        Ok(report)
    }

    /// Total number of instruments in a market segment (e.g. `sz_a`).
    pub fn fetch_code_count(&self, segment: &str) -> Result<usize, MarketDataError> {
        let url = self.count_url(segment);
        let body = self.transport.get(&url, &self.listing_headers)?;
        let text = decode_gbk(&body, &url)?;
        parse_count(&text)
    }

    /// One page of the instrument listing for a segment. Pages start at 1.
    pub fn fetch_code_page(
        &self,
        segment: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<CodeEntry>, MarketDataError> {
        let url = self.page_url(segment, page, page_size);
        let body = self.transport.get(&url, &self.listing_headers)?;
        let text = decode_gbk(&body, &url)?;
        let entries: Vec<CodeEntry> = serde_json::from_str(&text)?;
        Ok(entries)
    }

    fn quote_url<S: AsRef<str>>(&self, ids: &[S]) -> Result<String, MarketDataError> {
        if ids.is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "no instrument ids given".to_string(),
            ));
        }
        let list = ids
            .iter()
            .map(|id| id.as_ref().trim())
            .collect::<Vec<_>>()
            .join(ID_SEPARATOR);
        Ok(format!("{}{}", self.config.quote_url, list))
    }

    fn count_url(&self, segment: &str) -> String {
        format!(
            "{}/Market_Center.getHQNodeStockCount?node={}",
            self.config.listing_url.trim_end_matches('/'),
            urlencoding::encode(segment)
        )
    }

    fn page_url(&self, segment: &str, page: usize, page_size: usize) -> String {
        format!(
            "{}/Market_Center.getHQNodeData?page={}&num={}&sort=symbol&asc=1&node={}&symbol=&_s_r_a=init",
            self.config.listing_url.trim_end_matches('/'),
            page,
            page_size,
            urlencoding::encode(segment)
        )
    }
}

/// The count endpoint answers with a JSON string such as `"165"`.
fn parse_count(text: &str) -> Result<usize, MarketDataError> {
    text.trim()
        .trim_matches('"')
        .trim()
        .parse::<usize>()
        .map_err(|_| MarketDataError::InvalidCount(text.to_string()))
}
