//! Итоговый налоговый отчёт: прибыль по продажам и дивиденды.

use rust_decimal::Decimal;

use crate::dividends::{orphan_withholdings, reconcile_dividends};
use crate::error::TaxError;
use crate::fifo::match_sales;
use crate::rates::ExchangeRateTable;
use crate::statement_set::StatementSet;
use crate::types::{CashEvent, MatchedSale, ReconciledDividend, SaleProfit, Trade};

/// Набор флагов, определяющий, какие разделы отчёта считать (внутренний тип).
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportOptions {
    pub compute_sales: bool,
    pub compute_dividends: bool,
}

impl ReportOptions {
    /// Считает все разделы отчёта.
    pub const fn everything() -> Self {
        Self {
            compute_sales: true,
            compute_dividends: true,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::everything()
    }
}

/// Итоговый налоговый отчёт по набору выписок.
#[derive(Debug, Clone)]
pub struct TaxReport {
    /// Прибыль по каждой продаже, в порядке продаж во входных данных.
    pub sales: Vec<SaleProfit>,
    /// Непроданные остатки лотов покупок.
    pub remaining_lots: Vec<Trade>,
    /// Дивиденды с удержанным налогом.
    pub dividends: Vec<ReconciledDividend>,
    /// Удержания, к которым не нашлось дивиденда.
    pub orphan_withholdings: Vec<CashEvent>,
}

impl TaxReport {
    /// Считает полный отчёт по набору выписок и таблице курсов.
    #[inline]
    pub fn build(set: &StatementSet, rates: &ExchangeRateTable) -> Result<Self, TaxError> {
        Self::build_with_options(set, rates, ReportOptions::everything())
    }

    /// Считает отчёт с внутренними опциями (используется билдером).
    pub(crate) fn build_with_options(
        set: &StatementSet,
        rates: &ExchangeRateTable,
        options: ReportOptions,
    ) -> Result<Self, TaxError> {
        let (sales, remaining_lots) = if options.compute_sales {
            let (matched, remaining) = match_sales(&set.trades)?;
            let profits = matched
                .into_iter()
                .map(|sale| sale_profit(sale, rates))
                .collect::<Result<Vec<_>, _>>()?;
            (profits, remaining)
        } else {
            (Vec::new(), Vec::new())
        };

        let (dividends, orphans) = if options.compute_dividends {
            (
                reconcile_dividends(&set.dividends, &set.withholdings),
                orphan_withholdings(&set.dividends, &set.withholdings),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self {
            sales,
            remaining_lots,
            dividends,
            orphan_withholdings: orphans,
        })
    }
}

/// Считает прибыль по одной продаже в валюте торгов и в рублях.
///
/// Выручка пересчитывается по курсу на дату продажи, а каждый фрагмент
/// покупки — по курсу на дату своей покупки: налоговая база считается
/// по курсу на момент каждого денежного потока.
fn sale_profit(sale: MatchedSale, rates: &ExchangeRateTable) -> Result<SaleProfit, TaxError> {
    let proceeds_usd = Decimal::from(sale.sale.quantity) * sale.sale.unit_price;
    let sale_rate = rates.rate_for(sale.sale.timestamp.date())?;
    let proceeds_rub = proceeds_usd * sale_rate;

    let mut cost_usd = Decimal::ZERO;
    let mut cost_rub = Decimal::ZERO;
    for fragment in &sale.sold_buyings {
        let amount = Decimal::from(fragment.quantity) * fragment.unit_price;
        cost_usd += amount;
        cost_rub += amount * rates.rate_for(fragment.acquired_at.date())?;
    }

    Ok(SaleProfit {
        profit_usd: proceeds_usd - cost_usd,
        profit_rub: proceeds_rub - cost_rub,
        sale,
        proceeds_usd,
        cost_usd,
        proceeds_rub,
        cost_rub,
    })
}

/// Builder для расчёта `TaxReport` с выбором разделов.
pub struct TaxReportBuilder<'a> {
    set: &'a StatementSet,
    rates: &'a ExchangeRateTable,
    options: ReportOptions,
}

impl<'a> TaxReportBuilder<'a> {
    /// Создаёт builder для указанного набора выписок.
    ///
    /// # Пример
    ///
    /// ```
    /// # use ib_tax_report::{ExchangeRateTable, StatementSet, TaxReportBuilder};
    /// # let set = StatementSet::default();
    /// # let rates = ExchangeRateTable::default();
    /// let report = TaxReportBuilder::new(&set, &rates)
    ///     .dividends(false)
    ///     .build();
    /// ```
    #[inline]
    pub fn new(set: &'a StatementSet, rates: &'a ExchangeRateTable) -> Self {
        Self {
            set,
            rates,
            options: ReportOptions::everything(),
        }
    }

    /// Включает или отключает расчёт прибыли по продажам.
    #[inline]
    pub const fn sales(mut self, enabled: bool) -> Self {
        self.options.compute_sales = enabled;
        self
    }

    /// Включает или отключает сверку дивидендов.
    #[inline]
    pub const fn dividends(mut self, enabled: bool) -> Self {
        self.options.compute_dividends = enabled;
        self
    }

    /// Выполняет расчёт с текущими настройками.
    #[inline]
    pub fn build(self) -> Result<TaxReport, TaxError> {
        TaxReport::build_with_options(self.set, self.rates, self.options)
    }
}
