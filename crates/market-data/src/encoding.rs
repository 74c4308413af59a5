//! Legacy text decoding for provider responses.

use encoding_rs::GBK;

use crate::errors::MarketDataError;

/// Decode a GBK body into UTF-8.
///
/// Malformed sequences are an error rather than being replaced, so that a
/// corrupted response never reaches the parser with substituted characters.
pub fn decode_gbk(bytes: &[u8], context: &str) -> Result<String, MarketDataError> {
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| MarketDataError::Decode {
            encoding: GBK.name(),
            context: context.to_string(),
        })
}
