use chrono::NaiveDate;
use ib_tax_report::{ExchangeRateTable, Money, TaxError};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn sample_table() -> ExchangeRateTable {
    let samples: Vec<(NaiveDate, Money)> = vec![
        (date(2018, 7, 27), dec!(62.9471)),
        (date(2018, 7, 30), dec!(62.3497)),
    ];
    ExchangeRateTable::from_samples(&samples)
}

#[test]
fn returns_rate_for_sample_date() {
    let table = sample_table();
    assert_eq!(table.rate_for(date(2018, 7, 27)).expect("rate"), dec!(62.9471));
    assert_eq!(table.rate_for(date(2018, 7, 30)).expect("rate"), dec!(62.3497));
}

#[test]
fn fills_gaps_with_earlier_rate() {
    let table = sample_table();
    // Выходные 28-29 июля: действует курс пятницы.
    assert_eq!(table.rate_for(date(2018, 7, 28)).expect("rate"), dec!(62.9471));
    assert_eq!(table.rate_for(date(2018, 7, 29)).expect("rate"), dec!(62.9471));
}

#[test]
fn fails_outside_known_range() {
    let table = sample_table();
    match table.rate_for(date(2018, 7, 26)) {
        Err(TaxError::RateNotFound { date: d }) => assert_eq!(d, date(2018, 7, 26)),
        other => panic!("expected RateNotFound, got {other:?}"),
    }
    assert!(matches!(
        table.rate_for(date(2018, 7, 31)),
        Err(TaxError::RateNotFound { .. })
    ));
}

#[test]
fn empty_table_has_no_rates() {
    let table = ExchangeRateTable::from_samples(&[]);
    assert!(table.coverage().is_none());
    assert!(matches!(
        table.rate_for(date(2018, 7, 27)),
        Err(TaxError::RateNotFound { .. })
    ));
}

#[test]
fn rebuild_from_same_samples_is_identical() {
    let first = sample_table();
    let second = sample_table();
    let (start, end) = first.coverage().expect("coverage");
    assert_eq!(second.coverage(), Some((start, end)));

    let mut day = start;
    loop {
        assert_eq!(
            first.rate_for(day).expect("rate"),
            second.rate_for(day).expect("rate")
        );
        if day == end {
            break;
        }
        day = day.succ_opt().expect("next day");
    }
}

#[test]
fn reads_cbr_feed_with_decimal_comma() {
    let feed = "27.07.2018\t62,9471\n30.07.2018\t62,3497\n";
    let table = ExchangeRateTable::from_reader(feed.as_bytes()).expect("parse feed");
    assert_eq!(table.rate_for(date(2018, 7, 27)).expect("rate"), dec!(62.9471));
    assert_eq!(table.rate_for(date(2018, 7, 29)).expect("rate"), dec!(62.9471));
    assert_eq!(table.rate_for(date(2018, 7, 30)).expect("rate"), dec!(62.3497));
}

#[test]
fn rejects_malformed_feed_line() {
    let feed = "27.07.2018 62,9471\n";
    assert!(matches!(
        ExchangeRateTable::from_reader(feed.as_bytes()),
        Err(TaxError::Number { .. })
    ));

    let feed = "2018-07-27\t62,9471\n";
    assert!(matches!(
        ExchangeRateTable::from_reader(feed.as_bytes()),
        Err(TaxError::Date { .. })
    ));
}

#[test]
fn reads_fixture_feed() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("usd_rub.dat");
    let file = std::fs::File::open(path).expect("open fixture");
    let table = ExchangeRateTable::from_reader(file).expect("parse fixture");

    assert_eq!(table.rate_for(date(2018, 7, 27)).expect("rate"), dec!(62.9471));
    // Новогодние праздники: действует последний курс декабря.
    assert_eq!(table.rate_for(date(2020, 1, 5)).expect("rate"), dec!(61.9057));
    assert_eq!(table.rate_for(date(2020, 1, 9)).expect("rate"), dec!(61.2632));
    assert!(matches!(
        table.rate_for(date(2020, 1, 10)),
        Err(TaxError::RateNotFound { .. })
    ));
}
