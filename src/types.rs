//! Доменные типы: сделки, лоты, дивиденды и результаты расчёта.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::TaxError;

/// Денежное значение, используем `Decimal` для точных расчётов.
pub type Money = Decimal;

/// Направление сделки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    /// Покупка бумаги.
    Buy,
    /// Продажа бумаги.
    Sell,
}

/// Сделка из отчёта брокера: покупка или продажа одной бумаги.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// Дата и время сделки.
    pub timestamp: NaiveDateTime,
    /// Направление сделки.
    pub side: TradeSide,
    /// Тикер бумаги.
    pub symbol: String,
    /// Количество бумаг, строго больше нуля.
    pub quantity: u32,
    /// Цена за одну бумагу в валюте торгов.
    pub unit_price: Money,
}

impl Trade {
    /// Создаёт сделку, отклоняя нулевое количество.
    pub fn new(
        timestamp: NaiveDateTime,
        side: TradeSide,
        symbol: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, TaxError> {
        if quantity == 0 {
            return Err(TaxError::Quantity {
                value: quantity.to_string(),
            });
        }
        Ok(Self {
            timestamp,
            side,
            symbol: symbol.into(),
            quantity,
            unit_price,
        })
    }
}

/// Фрагмент лота покупки, израсходованный конкретной продажей.
///
/// Исходный лот идентифицируется датой и ценой приобретения.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotFragment {
    /// Дата и время исходной покупки.
    pub acquired_at: NaiveDateTime,
    /// Сколько бумаг взято из лота.
    pub quantity: u32,
    /// Цена покупки за одну бумагу.
    pub unit_price: Money,
}

/// Продажа вместе с лотами покупок, которые её профинансировали.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSale {
    /// Исходная сделка продажи.
    pub sale: Trade,
    /// Фрагменты покупок в порядке FIFO; их количества в сумме
    /// равны количеству проданных бумаг.
    pub sold_buyings: Vec<LotFragment>,
}

/// Тип денежной операции по бумаге.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashEventKind {
    /// Выплата дивидендов.
    Dividend,
    /// Удержанный у источника налог.
    Withholding,
}

/// Денежная операция: дивиденд или удержанный налог.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashEvent {
    /// Дата операции.
    pub date: NaiveDate,
    /// Тикер бумаги.
    pub symbol: String,
    /// Сумма со знаком: удержания отрицательны.
    pub amount: Money,
    /// Тип операции.
    pub kind: CashEventKind,
}

/// Дивиденд вместе с удержаниями налога за ту же бумагу и дату.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledDividend {
    /// Исходная выплата дивидендов.
    pub dividend: CashEvent,
    /// Удержания с совпадающими тикером и датой; может быть пусто.
    pub withholdings: Vec<CashEvent>,
}

/// Итог по одной продаже в валюте торгов и в рублях.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleProfit {
    /// Продажа с фрагментами покупок.
    pub sale: MatchedSale,
    /// Выручка в валюте торгов.
    pub proceeds_usd: Money,
    /// Стоимость приобретения в валюте торгов.
    pub cost_usd: Money,
    /// Прибыль в валюте торгов.
    pub profit_usd: Money,
    /// Выручка в рублях по курсу на дату продажи.
    pub proceeds_rub: Money,
    /// Стоимость приобретения в рублях по курсам на даты покупок.
    pub cost_rub: Money,
    /// Прибыль в рублях.
    pub profit_rub: Money,
}
