//! Positional layout of a `hq_str_` payload.
//!
//! The feed publishes 33 comma-separated slots in a fixed order. Slots 0-29
//! map onto [`QuoteRecord`] fields through [`LAYOUT`]; slots 30 and 31 carry
//! the date and time and are merged separately. Anything after slot 31 is a
//! status marker and is ignored.

use crate::models::QuoteRecord;

use super::report::SkipReason;

pub const NAME_INDEX: usize = 0;
pub const DATE_INDEX: usize = 30;
pub const TIME_INDEX: usize = 31;

/// How one slot is written into the record.
#[derive(Clone, Copy)]
pub enum Slot {
    /// Display name, copied verbatim
    Name,
    /// Floating point price or amount
    Price(fn(&mut QuoteRecord) -> &mut f64),
    /// Integer share count
    Volume(fn(&mut QuoteRecord) -> &mut i64),
}

/// Slot index to field setter, in feed order.
pub static LAYOUT: [(usize, Slot); 30] = [
    (NAME_INDEX, Slot::Name),
    (1, Slot::Price(|q| &mut q.today_open_price)),
    (2, Slot::Price(|q| &mut q.yesterday_close_price)),
    (3, Slot::Price(|q| &mut q.current_price)),
    (4, Slot::Price(|q| &mut q.today_high_price)),
    (5, Slot::Price(|q| &mut q.today_low_price)),
    (6, Slot::Price(|q| &mut q.bid_price)),
    (7, Slot::Price(|q| &mut q.ask_price)),
    (8, Slot::Volume(|q| &mut q.volume)),
    (9, Slot::Price(|q| &mut q.amount)),
    // bid book: (volume, price) pairs, best first
    (10, Slot::Volume(|q| &mut q.bids[0].volume)),
    (11, Slot::Price(|q| &mut q.bids[0].price)),
    (12, Slot::Volume(|q| &mut q.bids[1].volume)),
    (13, Slot::Price(|q| &mut q.bids[1].price)),
    (14, Slot::Volume(|q| &mut q.bids[2].volume)),
    (15, Slot::Price(|q| &mut q.bids[2].price)),
    (16, Slot::Volume(|q| &mut q.bids[3].volume)),
    (17, Slot::Price(|q| &mut q.bids[3].price)),
    (18, Slot::Volume(|q| &mut q.bids[4].volume)),
    (19, Slot::Price(|q| &mut q.bids[4].price)),
    // ask book
    (20, Slot::Volume(|q| &mut q.asks[0].volume)),
    (21, Slot::Price(|q| &mut q.asks[0].price)),
    (22, Slot::Volume(|q| &mut q.asks[1].volume)),
    (23, Slot::Price(|q| &mut q.asks[1].price)),
    (24, Slot::Volume(|q| &mut q.asks[2].volume)),
    (25, Slot::Price(|q| &mut q.asks[2].price)),
    (26, Slot::Volume(|q| &mut q.asks[3].volume)),
    (27, Slot::Price(|q| &mut q.asks[3].price)),
    (28, Slot::Volume(|q| &mut q.asks[4].volume)),
    (29, Slot::Price(|q| &mut q.asks[4].price)),
];

impl Slot {
    /// Writes `raw` into the record. Numeric slots must hold a number; a
    /// blank one counts as missing.
    pub fn apply(
        self,
        record: &mut QuoteRecord,
        index: usize,
        raw: &str,
    ) -> Result<(), SkipReason> {
        let value = raw.trim();
        match self {
            Slot::Name => {
                record.name = raw.to_string();
                return Ok(());
            }
            _ if value.is_empty() => return Err(SkipReason::MissingField { index }),
            Slot::Price(field) => {
                if let Some(price) = parse_price(value) {
                    *field(record) = price;
                    return Ok(());
                }
            }
            Slot::Volume(field) => {
                if let Ok(volume) = value.parse::<i64>() {
                    *field(record) = volume;
                    return Ok(());
                }
            }
        }
        Err(SkipReason::MalformedField {
            index,
            value: raw.to_string(),
        })
    }
}

fn parse_price(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
