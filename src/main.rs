//! Пример CLI: считает налоговый отчёт по каталогу выписок IB.

use std::env;
use std::fs::File;

use ib_tax_report::{ExchangeRateTable, StatementSet, TaxReport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (Some(dir), Some(rates_path)) = (env::args().nth(1), env::args().nth(2)) else {
        println!("Usage: ib-tax-report <statements-dir> <rates-file>");
        return Ok(());
    };

    let set = StatementSet::from_dir(&dir)?;
    let rates = ExchangeRateTable::from_reader(File::open(&rates_path)?)?;
    let report = TaxReport::build(&set, &rates)?;

    println!("Продажи: {}", report.sales.len());
    for sale in &report.sales {
        let t = &sale.sale.sale;
        println!(
            "{} {} {} x {} USD",
            t.timestamp.date(),
            t.symbol,
            t.quantity,
            t.unit_price
        );
        for fragment in &sale.sale.sold_buyings {
            println!(
                "    куплено {}: {} x {} USD",
                fragment.acquired_at.date(),
                fragment.quantity,
                fragment.unit_price
            );
        }
        println!(
            "    прибыль: {} USD / {} RUB ({} - {})",
            sale.profit_usd.round_dp(2),
            sale.profit_rub.round_dp(2),
            sale.proceeds_rub.round_dp(2),
            sale.cost_rub.round_dp(2)
        );
    }

    println!();
    println!("Остаток лотов: {}", report.remaining_lots.len());
    for lot in &report.remaining_lots {
        println!(
            "    {} {} {} x {} USD",
            lot.timestamp.date(),
            lot.symbol,
            lot.quantity,
            lot.unit_price
        );
    }

    println!();
    println!("Дивиденды: {}", report.dividends.len());
    for dividend in &report.dividends {
        println!(
            "    {} {}: выплачено {} USD, удержано {} USD, к получению {} USD",
            dividend.dividend.date,
            dividend.dividend.symbol,
            dividend.dividend.amount.round_dp(2),
            dividend.withheld_total().round_dp(2),
            dividend.net().round_dp(2)
        );
    }
    if !report.orphan_withholdings.is_empty() {
        println!();
        println!(
            "Удержания без дивидендов: {}",
            report.orphan_withholdings.len()
        );
        for withholding in &report.orphan_withholdings {
            println!(
                "    {} {}: {} USD",
                withholding.date,
                withholding.symbol,
                withholding.amount.round_dp(2)
            );
        }
    }

    Ok(())
}
