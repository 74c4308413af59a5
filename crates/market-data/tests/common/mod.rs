//! Shared test fixtures: an in-memory transport and GBK helpers.

#![allow(dead_code)]

use std::cell::RefCell;

use encoding_rs::GBK;
use lltrade_market_data::{HttpTransport, MarketDataError};
use reqwest::header::HeaderMap;

pub const SAMPLE_QUOTE: &str = r#"var hq_str_sh601360="以岭药业,21.970,21.970,22.400,22.550,21.950,22.400,22.410,17909232,400172176.920,132200,22.400,17100,22.390,45600,22.380,59400,22.370,43700,22.360,9200,22.410,36900,22.420,25500,22.430,19700,22.440,54180,22.450,2023-09-11,14:34:42,00";"#;

pub const HALTED_QUOTE: &str = r#"var hq_str_sz002604="龙力退,0.000,0.000,0.000,0.000,0.000,0.000,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,0,0.000,2023-09-08,11:45:00,-3";"#;

pub fn gbk(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = GBK.encode(text);
    assert!(!had_errors, "text not representable in GBK: {text}");
    bytes.into_owned()
}

enum Reply {
    Body(Vec<u8>),
    Status(u16),
}

/// Answers requests by the first route whose pattern the URL contains.
/// Unmatched URLs get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, Reply)>,
    pub requests: RefCell<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, body: Vec<u8>) -> Self {
        self.routes.push((pattern.to_string(), Reply::Body(body)));
        self
    }

    pub fn fail(mut self, pattern: &str, status: u16) -> Self {
        self.routes.push((pattern.to_string(), Reply::Status(status)));
        self
    }

    pub fn request_count(&self, pattern: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|url| url.contains(pattern))
            .count()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str, _headers: &HeaderMap) -> Result<Vec<u8>, MarketDataError> {
        self.requests.borrow_mut().push(url.to_string());

        let reply = self
            .routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(MarketDataError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(MarketDataError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
