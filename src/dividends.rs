//! Сопоставление дивидендов с удержанным у источника налогом.

use rust_decimal::Decimal;

use crate::types::{CashEvent, Money, ReconciledDividend};

impl ReconciledDividend {
    /// Суммарно удержанный налог по модулю; ноль, если удержаний нет.
    pub fn withheld_total(&self) -> Money {
        self.withholdings
            .iter()
            .fold(Decimal::ZERO, |acc, w| acc + w.amount)
            .abs()
    }

    /// Дивиденд за вычетом удержанного налога.
    pub fn net(&self) -> Money {
        self.dividend.amount - self.withheld_total()
    }
}

/// Для каждого дивиденда собирает удержания с теми же тикером и датой.
///
/// Сопоставление строго точное, без поиска ближайшей даты. Дивиденд без
/// единого удержания — нормальный случай: налог считается равным нулю.
/// Несколько удержаний на одну выплату суммируются. Входные списки
/// не изменяются.
pub fn reconcile_dividends(
    dividends: &[CashEvent],
    withholdings: &[CashEvent],
) -> Vec<ReconciledDividend> {
    dividends
        .iter()
        .map(|dividend| ReconciledDividend {
            dividend: dividend.clone(),
            withholdings: withholdings
                .iter()
                .filter(|w| w.symbol == dividend.symbol && w.date == dividend.date)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Возвращает удержания, к которым не нашлось дивиденда по тикеру и дате.
///
/// Такие записи не считаются ошибкой расчёта, но их стоит показать
/// пользователю: обычно это признак неполного набора отчётов.
pub fn orphan_withholdings(
    dividends: &[CashEvent],
    withholdings: &[CashEvent],
) -> Vec<CashEvent> {
    withholdings
        .iter()
        .filter(|w| {
            !dividends
                .iter()
                .any(|d| d.symbol == w.symbol && d.date == w.date)
        })
        .cloned()
        .collect()
}
