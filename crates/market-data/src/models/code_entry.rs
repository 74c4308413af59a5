use serde::{Deserialize, Deserializer, Serialize};

/// One row of the instrument catalog returned by the listing endpoint.
///
/// Price columns arrive as JSON strings and are kept verbatim so that a
/// written catalog reproduces what the provider sent. Missing or `null`
/// columns read as zero/empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// Market-qualified symbol, e.g. `sz000001`
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    /// Bare instrument code, e.g. `000001`
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Last trade price
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buy: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sell: String,
    /// Previous settlement (close) price
    #[serde(default, deserialize_with = "null_as_default")]
    pub settlement: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub high: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub low: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticktime: String,
    /// Price/earnings ratio
    #[serde(default, deserialize_with = "null_as_default")]
    pub per: f64,
    /// Price/book ratio
    #[serde(default, deserialize_with = "null_as_default")]
    pub pb: f64,
    /// Total market capitalisation
    #[serde(default, deserialize_with = "null_as_default")]
    pub mktcap: f64,
    /// Free-float market capitalisation
    #[serde(default, deserialize_with = "null_as_default")]
    pub nmc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub turnoverratio: f64,
}

impl CodeEntry {
    /// Exchange prefix of the symbol (`sh`, `sz`, `bj`).
    pub fn market(&self) -> Option<&str> {
        self.symbol.get(..2)
    }

    /// Last trade price, if the provider sent a number.
    pub fn trade_price(&self) -> Option<f64> {
        self.trade.trim().parse().ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"[{"symbol":"sz000001","code":"000001","name":"平安银行","trade":"11.280","pricechange":0.05,"changepercent":0.445,"buy":"11.270","sell":"11.280","settlement":"11.230","open":"11.230","high":"11.330","low":"11.190","volume":54113632,"amount":609772339,"ticktime":"15:00:03","per":4.405,"pb":0.549,"mktcap":21889708.49,"nmc":21889340.67,"turnoverratio":0.27886}]"#;

    #[test]
    fn test_deserialize_listing_page() {
        let entries: Vec<CodeEntry> = serde_json::from_str(PAGE).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.symbol, "sz000001");
        assert_eq!(entry.name, "平安银行");
        assert_eq!(entry.volume, 54113632);
        assert_eq!(entry.amount, 609772339);
        assert_eq!(entry.market(), Some("sz"));
        assert_eq!(entry.trade_price(), Some(11.28));
    }

    #[test]
    fn test_null_columns_keep_the_row() {
        let page = r#"[{"symbol":"sz000001","name":null,"trade":"11.280","volume":null,"per":null,"pb":null,"mktcap":null},{"symbol":"sz000002","per":7.5}]"#;
        let entries: Vec<CodeEntry> = serde_json::from_str(page).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "");
        assert_eq!(entries[0].volume, 0);
        assert_eq!(entries[0].per, 0.0);
        assert_eq!(entries[0].trade_price(), Some(11.28));
        assert_eq!(entries[1].symbol, "sz000002");
        assert_eq!(entries[1].per, 7.5);
    }

    #[test]
    fn test_serialize_keeps_key_order() {
        let entry = CodeEntry {
            symbol: "sh600000".to_string(),
            code: "600000".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.starts_with(r#"{"symbol":"sh600000","code":"600000","name":"""#));
        assert!(json.ends_with(r#""turnoverratio":0.0}"#));
    }

    #[test]
    fn test_trade_price_unparsable() {
        let entry = CodeEntry {
            trade: "--".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.trade_price(), None);
    }
}
