use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Number of order book levels published on each side.
pub const BOOK_DEPTH: usize = 5;

/// One price level of the order book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Shares bid or offered at this level
    pub volume: i64,
    /// Price of the level
    pub price: f64,
}

/// Quote snapshot of one instrument at one instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Two-letter exchange code ("sh", "sz", "bj")
    pub market: String,

    /// Instrument code within the exchange
    pub code: String,

    /// Display name
    pub name: String,

    pub today_open_price: f64,
    pub yesterday_close_price: f64,
    pub current_price: f64,
    pub today_high_price: f64,
    pub today_low_price: f64,

    /// Best bid
    pub bid_price: f64,

    /// Best ask
    pub ask_price: f64,

    /// Traded volume in shares
    pub volume: i64,

    /// Traded amount in currency units
    pub amount: f64,

    /// Bid levels, best first
    pub bids: [BookLevel; BOOK_DEPTH],

    /// Ask levels, best first
    pub asks: [BookLevel; BOOK_DEPTH],

    /// Snapshot time as Unix seconds
    pub timestamp: i64,

    /// Set when the feed's date/time could not be parsed and `timestamp`
    /// holds the wall clock at parse time instead.
    #[serde(default)]
    pub timestamp_degraded: bool,
}

impl QuoteRecord {
    /// Market and code joined back into the feed symbol, e.g. `sh601360`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.market, self.code)
    }

    /// Snapshot time in the local timezone.
    pub fn datetime(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.timestamp, 0).single()
    }

    /// True for halted or delisted instruments, which are published with
    /// every price and the volume set to zero.
    pub fn is_suspended(&self) -> bool {
        self.volume == 0
            && self.today_open_price == 0.0
            && self.current_price == 0.0
            && self.today_high_price == 0.0
            && self.today_low_price == 0.0
    }

    /// Absolute change against the previous close.
    pub fn change(&self) -> f64 {
        self.current_price - self.yesterday_close_price
    }

    /// Percentage change against the previous close.
    pub fn change_percent(&self) -> Option<f64> {
        if self.yesterday_close_price == 0.0 {
            return None;
        }
        Some(self.change() / self.yesterday_close_price * 100.0)
    }
}
