//! Property-based tests for the quote parser.

mod common;

use lltrade_market_data::{parse_quotes, parse_quotes_with_report, ParseReport, SkipReason};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// Prices as the feed prints them: at most three decimals.
fn arb_price() -> impl Strategy<Value = (u64, String)> {
    (0u64..10_000_000).prop_map(|thousandths| {
        let text = format!("{}.{:03}", thousandths / 1000, thousandths % 1000);
        (thousandths, text)
    })
}

fn arb_token() -> impl Strategy<Value = String> {
    ("(sh|sz|bj)", "[0-9]{6}").prop_map(|(market, code)| format!("{market}{code}"))
}

fn arb_element() -> impl Strategy<Value = (String, String, Vec<(u64, String)>, i64)> {
    (
        arb_token(),
        "[A-Za-z]{1,8}",
        proptest::collection::vec(arb_price(), 20),
        0i64..10_000_000_000,
    )
}

fn render(token: &str, name: &str, prices: &[(u64, String)], volume: i64) -> String {
    // slots 1-7 prices, 8 volume, 9 amount, 10-29 book with volumes set to 100
    let mut fields = vec![name.to_string()];
    fields.extend(prices[..7].iter().map(|(_, t)| t.clone()));
    fields.push(volume.to_string());
    fields.push(prices[7].1.clone());
    for (_, text) in &prices[8..18] {
        fields.push("100".to_string());
        fields.push(text.clone());
    }
    fields.push("2023-09-11".to_string());
    fields.push("14:34:42".to_string());
    fields.push("00".to_string());
    format!("var hq_str_{}=\"{}\";\n", token, fields.join(","))
}

/// Degraded records carry the wall clock, which may tick between two parses.
fn without_clock(mut report: ParseReport) -> ParseReport {
    for record in report.records.iter_mut().filter(|r| r.timestamp_degraded) {
        record.timestamp = 0;
    }
    report
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_three_decimal_prices_round_trip(
        (token, name, prices, volume) in arb_element()
    ) {
        let raw = render(&token, &name, &prices, volume);
        let quotes = parse_quotes(&raw);
        prop_assert_eq!(quotes.len(), 1);

        let q = &quotes[0];
        prop_assert_eq!(q.symbol(), token);
        prop_assert_eq!(&q.name, &name);
        prop_assert_eq!(q.volume, volume);
        prop_assert_eq!(q.today_open_price, prices[0].1.parse::<f64>().unwrap());
        prop_assert_eq!(q.ask_price, prices[6].1.parse::<f64>().unwrap());
        prop_assert_eq!(q.amount, prices[7].1.parse::<f64>().unwrap());
        prop_assert_eq!(q.asks[4].price, prices[17].1.parse::<f64>().unwrap());

        // printed back with three decimals the value is unchanged
        let printed = format!("{:.3}", q.current_price);
        prop_assert_eq!(printed, prices[2].1.clone());
    }

    #[test]
    fn prop_parse_is_idempotent(raw in ".{0,400}") {
        prop_assert_eq!(
            without_clock(parse_quotes_with_report(&raw)),
            without_clock(parse_quotes_with_report(&raw))
        );
    }

    #[test]
    fn prop_never_panics_and_tokens_are_eight_bytes(raw in "[a-z_=\",;0-9 .:-]{0,300}") {
        for q in parse_quotes(&raw) {
            prop_assert_eq!(q.market.len() + q.code.len(), 8);
        }
    }

    #[test]
    fn prop_one_bad_element_costs_one_record(
        elements in proptest::collection::vec(arb_element(), 1..8),
        bad_at in 0usize..8,
    ) {
        let mut rendered: Vec<String> = elements
            .iter()
            .map(|(t, n, p, v)| render(t, n, p, *v))
            .collect();
        let bad_at = bad_at % (rendered.len() + 1);
        rendered.insert(bad_at, "var hq_str_sh600000 missing separator;".to_string());

        let report = parse_quotes_with_report(&rendered.concat());
        prop_assert_eq!(report.records.len(), elements.len());
        prop_assert_eq!(report.skipped.len(), 1);
        prop_assert_eq!(
            &report.skipped[0].reason,
            &SkipReason::MissingSeparator { parts: 1 }
        );
    }
}
