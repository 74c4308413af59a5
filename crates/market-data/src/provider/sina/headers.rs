//! HTTP headers for Sina finance endpoints

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};

use crate::errors::MarketDataError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

/// The quote feed rejects requests without a finance-site referer.
pub fn quote_headers(referer: &str, user_agent: &str) -> Result<HeaderMap, MarketDataError> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, header_value(referer)?);
    headers.insert(USER_AGENT, header_value(user_agent)?);
    Ok(headers)
}

/// Headers for the count and paginated listing endpoints.
pub fn listing_headers(referer: &str, user_agent: &str) -> Result<HeaderMap, MarketDataError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));
    headers.insert(REFERER, header_value(referer)?);
    headers.insert(USER_AGENT, header_value(user_agent)?);
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, MarketDataError> {
    HeaderValue::from_str(value)
        .map_err(|_| MarketDataError::InvalidRequest(format!("invalid header value: {:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_headers_has_referer() {
        let headers = quote_headers("https://finance.sina.com.cn", DEFAULT_USER_AGENT).unwrap();
        let referer = headers.get(REFERER).unwrap().to_str().unwrap();
        assert_eq!(referer, "https://finance.sina.com.cn");
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_listing_headers_has_required_fields() {
        let headers =
            listing_headers("https://vip.stock.finance.sina.com.cn/mkt/", DEFAULT_USER_AGENT)
                .unwrap();
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(REFERER));
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_rejects_control_characters() {
        let result = quote_headers("bad\nreferer", DEFAULT_USER_AGENT);
        assert!(matches!(result, Err(MarketDataError::InvalidRequest(_))));
    }
}
