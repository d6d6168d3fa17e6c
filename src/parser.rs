//! Извлечение типизированных записей из секций выписки.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TaxError;
use crate::raw::{SectionRow, SectionedStatement};
use crate::types::{CashEvent, CashEventKind, Trade, TradeSide};
use crate::utils::{capture_text, parse_date, parse_datetime, parse_money, parse_signed_quantity};

/// Тикер — текст описания выплаты до открывающей скобки с ISIN:
/// `VOO(US9229083632) Cash Dividend ...`.
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]+?)\s*\(").expect("valid symbol regex"));

impl SectionedStatement {
    /// Извлекает сделки из секции `Trades`.
    ///
    /// Направление сделки определяется знаком количества: отрицательное —
    /// продажа. Нулевое количество — ошибка `Quantity`.
    pub fn parse_trades(&self) -> Result<Vec<Trade>, TaxError> {
        let mut trades = Vec::new();
        for row in self.section("Trades")? {
            let timestamp = parse_datetime(row.require("Date/Time")?)?;
            let symbol = row.require("Symbol")?;
            let raw_quantity = row.require("Quantity")?;
            let signed = parse_signed_quantity(raw_quantity, "Quantity")?;
            if signed == 0 {
                return Err(TaxError::Quantity {
                    value: raw_quantity.trim().to_string(),
                });
            }
            let side = if signed < 0 {
                TradeSide::Sell
            } else {
                TradeSide::Buy
            };
            let quantity =
                u32::try_from(signed.unsigned_abs()).map_err(|_| TaxError::Number {
                    value: raw_quantity.trim().to_string(),
                    column: "Quantity",
                })?;
            let unit_price = parse_money(row.require("T. Price")?, "T. Price")?;
            trades.push(Trade::new(timestamp, side, symbol, quantity, unit_price)?);
        }
        Ok(trades)
    }

    /// Извлекает дивиденды из секции `Dividends`.
    pub fn parse_dividends(&self) -> Result<Vec<CashEvent>, TaxError> {
        self.parse_cash_events("Dividends", CashEventKind::Dividend)
    }

    /// Извлекает удержанный налог из секции `Withholding Tax`.
    pub fn parse_withholdings(&self) -> Result<Vec<CashEvent>, TaxError> {
        self.parse_cash_events("Withholding Tax", CashEventKind::Withholding)
    }

    fn parse_cash_events(
        &self,
        section: &'static str,
        kind: CashEventKind,
    ) -> Result<Vec<CashEvent>, TaxError> {
        let mut events = Vec::new();
        for row in self.section(section)? {
            // Итоговые строки секции помечены «валютой» Total.
            if row.field("Currency") == Some("Total") {
                continue;
            }
            events.push(cash_event_from_row(row, kind)?);
        }
        Ok(events)
    }
}

/// Собирает денежную операцию из строки секции выплат.
fn cash_event_from_row(row: &SectionRow, kind: CashEventKind) -> Result<CashEvent, TaxError> {
    let date = parse_date(row.require("Date")?)?;
    let description = row.require("Description")?;
    // Описание без скобок с ISIN целиком считается тикером.
    let symbol = capture_text(description, &SYMBOL_RE)
        .map_or_else(|| description.trim().to_string(), |s| s.trim().to_string());
    let amount = parse_money(row.require("Amount")?, "Amount")?;
    Ok(CashEvent {
        date,
        symbol,
        amount,
        kind,
    })
}
