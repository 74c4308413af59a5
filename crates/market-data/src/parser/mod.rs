//! Parser for the `hq_str_` quote feed.
//!
//! The feed is a run of JavaScript assignments separated by `;`:
//!
//! ```text
//! var hq_str_sh601360="三六零,9.070,9.060,...,2023-09-11,14:34:42,00";
//! var hq_str_sz002603="以岭药业,21.970,21.970,...,2023-09-11,14:34:42,00";
//! ```
//!
//! Parsing never fails as a whole. Structurally broken elements are dropped
//! and listed in the [`ParseReport`]; an unparsable date/time keeps the
//! record but stamps it with the current time and flags it as degraded.

mod layout;
mod report;

use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::models::QuoteRecord;

pub use report::{ParseReport, SkipReason, SkippedElement};

use layout::{DATE_INDEX, LAYOUT, TIME_INDEX};

const ELEMENT_SEPARATOR: char = ';';
const ASSIGN_SEPARATOR: char = '=';
const FIELD_SEPARATOR: char = ',';
const TOKEN_SEPARATOR: char = '_';
const QUOTE_CHAR: char = '"';

/// Length of the market+code token, e.g. `sh601360`.
pub const MARKET_TOKEN_LEN: usize = 8;
const MARKET_LEN: usize = 2;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a decoded feed body into quote records.
///
/// Skipped elements are logged; use [`parse_quotes_with_report`] to inspect
/// them.
pub fn parse_quotes(raw: &str) -> Vec<QuoteRecord> {
    parse_quotes_with_report(raw).records
}

/// Parse a decoded feed body, keeping per-element diagnostics.
pub fn parse_quotes_with_report(raw: &str) -> ParseReport {
    let mut report = ParseReport::new();

    for (index, element) in raw.split(ELEMENT_SEPARATOR).enumerate() {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }

        match parse_element(element) {
            Ok(record) => report.record_success(record),
            Err(reason) => {
                warn!(
                    "Skipping quote element #{}: {} ({})",
                    index,
                    reason,
                    report::excerpt(element)
                );
                report.record_skip(index, element, reason);
            }
        }
    }

    debug!("Quote batch parsed: {}", report.summary());
    report
}

/// Parse a single `prefix="payload"` element.
pub fn parse_element(element: &str) -> Result<QuoteRecord, SkipReason> {
    let (prefix, payload) = split_assignment(element)?;
    let (market, code) = split_market_token(prefix)?;
    let payload = payload.trim_matches(QUOTE_CHAR);

    let mut record = QuoteRecord {
        market: market.to_string(),
        code: code.to_string(),
        ..Default::default()
    };

    // An empty body is what the feed sends for unknown or retired ids.
    if payload.is_empty() {
        record.timestamp = degraded_timestamp(&record, "", "");
        record.timestamp_degraded = true;
        return Ok(record);
    }

    let fields: Vec<&str> = payload.split(FIELD_SEPARATOR).collect();
    if fields.len() <= TIME_INDEX {
        return Err(SkipReason::MissingField {
            index: fields.len(),
        });
    }
    for &(index, slot) in LAYOUT.iter() {
        slot.apply(&mut record, index, fields[index])?;
    }

    let date = fields[DATE_INDEX];
    let time = fields[TIME_INDEX];
    match resolve_timestamp(date, time) {
        Some(timestamp) => record.timestamp = timestamp,
        None => {
            record.timestamp = degraded_timestamp(&record, date, time);
            record.timestamp_degraded = true;
        }
    }

    Ok(record)
}

fn degraded_timestamp(record: &QuoteRecord, date: &str, time: &str) -> i64 {
    warn!(
        "Unparsable date/time {:?} for {}, using current time",
        format!("{} {}", date, time),
        record.symbol()
    );
    Utc::now().timestamp()
}

fn split_assignment(element: &str) -> Result<(&str, &str), SkipReason> {
    let mut parts = element.split(ASSIGN_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(payload), None) => Ok((prefix, payload)),
        _ => Err(SkipReason::MissingSeparator {
            parts: element.split(ASSIGN_SEPARATOR).count(),
        }),
    }
}

/// Extracts `("sh", "601360")` from `var hq_str_sh601360`.
fn split_market_token(prefix: &str) -> Result<(&str, &str), SkipReason> {
    let token = match prefix.rfind(TOKEN_SEPARATOR) {
        Some(pos) => &prefix[pos + 1..],
        None => return Err(SkipReason::MissingPrefix),
    };
    if token.is_empty() {
        return Err(SkipReason::MissingPrefix);
    }
    if token.len() != MARKET_TOKEN_LEN {
        return Err(SkipReason::BadTokenLength { len: token.len() });
    }

    match (token.get(..MARKET_LEN), token.get(MARKET_LEN..)) {
        (Some(market), Some(code)) => Ok((market, code)),
        _ => Err(SkipReason::BadToken),
    }
}

/// Merges the feed's date and time slots into Unix seconds, local time.
fn resolve_timestamp(date: &str, time: &str) -> Option<i64> {
    let text = format!("{} {}", date.trim(), time.trim());
    let naive = NaiveDateTime::parse_from_str(&text, DATE_TIME_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
}
