use chrono::NaiveDateTime;
use ib_tax_report::{match_sales, Money, TaxError, Trade, TradeSide};
use rust_decimal_macros::dec;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

fn trade(timestamp: &str, side: TradeSide, symbol: &str, quantity: u32, price: Money) -> Trade {
    Trade::new(ts(timestamp), side, symbol, quantity, price).expect("valid trade")
}

fn voo_trades() -> Vec<Trade> {
    vec![
        trade("2018-11-08 09:33:38", TradeSide::Buy, "VOO", 5, dec!(257.72)),
        trade("2018-11-30 10:11:38", TradeSide::Buy, "VOO", 15, dec!(260.33)),
        trade("2019-01-15 10:11:38", TradeSide::Sell, "VOO", 7, dec!(270.11)),
        trade("2019-02-01 10:11:38", TradeSide::Sell, "VOO", 8, dec!(280.37)),
    ]
}

#[test]
fn matches_sales_fifo() {
    let trades = voo_trades();
    let (sales, remaining) = match_sales(&trades).expect("match");

    assert_eq!(sales.len(), 2);
    assert_eq!(remaining.len(), 1);

    let first = &sales[0];
    assert_eq!(first.sale.quantity, 7);
    assert_eq!(first.sold_buyings.len(), 2);
    assert_eq!(first.sold_buyings[0].acquired_at, ts("2018-11-08 09:33:38"));
    assert_eq!(first.sold_buyings[0].quantity, 5);
    assert_eq!(first.sold_buyings[0].unit_price, dec!(257.72));
    assert_eq!(first.sold_buyings[1].acquired_at, ts("2018-11-30 10:11:38"));
    assert_eq!(first.sold_buyings[1].quantity, 2);

    let second = &sales[1];
    assert_eq!(second.sold_buyings.len(), 1);
    assert_eq!(second.sold_buyings[0].acquired_at, ts("2018-11-30 10:11:38"));
    assert_eq!(second.sold_buyings[0].quantity, 8);

    assert_eq!(remaining[0].quantity, 5);
    assert_eq!(remaining[0].timestamp, ts("2018-11-30 10:11:38"));
    assert_eq!(remaining[0].unit_price, dec!(260.33));
}

#[test]
fn fragments_cover_each_sale_exactly() {
    let trades = voo_trades();
    let (sales, _) = match_sales(&trades).expect("match");
    for sale in &sales {
        let covered: u32 = sale.sold_buyings.iter().map(|f| f.quantity).sum();
        assert_eq!(covered, sale.sale.quantity);
    }
}

#[test]
fn fragments_drawn_in_fifo_order() {
    let trades = voo_trades();
    let (sales, _) = match_sales(&trades).expect("match");
    for sale in &sales {
        for pair in sale.sold_buyings.windows(2) {
            assert!(pair[0].acquired_at <= pair[1].acquired_at);
        }
    }
}

#[test]
fn conserves_quantity_per_symbol() {
    let trades = vec![
        trade("2019-01-10 10:00:00", TradeSide::Buy, "VOO", 12, dec!(250)),
        trade("2019-01-11 10:00:00", TradeSide::Buy, "AAPL", 4, dec!(150)),
        trade("2019-01-12 10:00:00", TradeSide::Buy, "VOO", 3, dec!(255)),
        trade("2019-02-01 10:00:00", TradeSide::Sell, "VOO", 9, dec!(260)),
        trade("2019-02-02 10:00:00", TradeSide::Sell, "AAPL", 1, dec!(170)),
    ];
    let (sales, remaining) = match_sales(&trades).expect("match");

    for symbol in ["VOO", "AAPL"] {
        let bought: u32 = trades
            .iter()
            .filter(|t| t.side == TradeSide::Buy && t.symbol == symbol)
            .map(|t| t.quantity)
            .sum();
        let sold: u32 = sales
            .iter()
            .filter(|s| s.sale.symbol == symbol)
            .flat_map(|s| s.sold_buyings.iter())
            .map(|f| f.quantity)
            .sum();
        let left: u32 = remaining
            .iter()
            .filter(|t| t.symbol == symbol)
            .map(|t| t.quantity)
            .sum();
        assert_eq!(bought, sold + left, "conservation for {symbol}");
    }
}

#[test]
fn remaining_lots_keep_input_order() {
    let trades = vec![
        trade("2019-01-10 10:00:00", TradeSide::Buy, "VOO", 5, dec!(250)),
        trade("2019-01-11 10:00:00", TradeSide::Buy, "AAPL", 4, dec!(150)),
        trade("2019-01-12 10:00:00", TradeSide::Buy, "VOO", 3, dec!(255)),
    ];
    let (sales, remaining) = match_sales(&trades).expect("match");

    assert!(sales.is_empty());
    let symbols: Vec<&str> = remaining.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, ["VOO", "AAPL", "VOO"]);
}

#[test]
fn sale_without_buys_fails() {
    let trades = vec![trade(
        "2019-01-15 10:00:00",
        TradeSide::Sell,
        "ANET",
        100,
        dec!(300),
    )];
    match match_sales(&trades) {
        Err(TaxError::InsufficientLots { symbol, shortfall }) => {
            assert_eq!(symbol, "ANET");
            assert_eq!(shortfall, 100);
        }
        other => panic!("expected InsufficientLots, got {other:?}"),
    }
}

#[test]
fn partial_shortfall_is_reported() {
    let trades = vec![
        trade("2019-01-10 10:00:00", TradeSide::Buy, "VOO", 3, dec!(250)),
        trade("2019-02-01 10:00:00", TradeSide::Sell, "VOO", 10, dec!(260)),
    ];
    match match_sales(&trades) {
        Err(TaxError::InsufficientLots { symbol, shortfall }) => {
            assert_eq!(symbol, "VOO");
            assert_eq!(shortfall, 7);
        }
        other => panic!("expected InsufficientLots, got {other:?}"),
    }
}

#[test]
fn symbols_match_case_sensitively() {
    let trades = vec![
        trade("2019-01-10 10:00:00", TradeSide::Buy, "voo", 5, dec!(250)),
        trade("2019-02-01 10:00:00", TradeSide::Sell, "VOO", 5, dec!(260)),
    ];
    assert!(matches!(
        match_sales(&trades),
        Err(TaxError::InsufficientLots { .. })
    ));
}

#[test]
fn same_timestamp_sales_processed_in_input_order() {
    let trades = vec![
        trade("2019-01-10 10:00:00", TradeSide::Buy, "VOO", 5, dec!(250)),
        trade("2019-01-11 10:00:00", TradeSide::Buy, "VOO", 5, dec!(255)),
        trade("2019-02-01 10:00:00", TradeSide::Sell, "VOO", 5, dec!(260)),
        trade("2019-02-01 10:00:00", TradeSide::Sell, "VOO", 5, dec!(261)),
    ];
    let (sales, remaining) = match_sales(&trades).expect("match");

    assert!(remaining.is_empty());
    assert_eq!(sales[0].sale.unit_price, dec!(260));
    assert_eq!(sales[0].sold_buyings[0].unit_price, dec!(250));
    assert_eq!(sales[1].sold_buyings[0].unit_price, dec!(255));
}

#[test]
fn input_trades_are_not_mutated() {
    let trades = voo_trades();
    let before = trades.clone();
    let _ = match_sales(&trades).expect("match");
    assert_eq!(trades, before);
}

#[test]
fn zero_quantity_trade_is_rejected_at_construction() {
    let result = Trade::new(
        ts("2019-01-10 10:00:00"),
        TradeSide::Buy,
        "VOO",
        0,
        dec!(250),
    );
    assert!(matches!(result, Err(TaxError::Quantity { .. })));
}
