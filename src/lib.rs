#![warn(missing_docs)]
//! Библиотека расчёта налогов по выпискам брокера Interactive Brokers:
//! FIFO-сопоставление продаж с покупками, пересчёт в рубли по курсам
//! на даты операций и сверка дивидендов с удержанным налогом.

mod dividends;
mod error;
mod fifo;
mod parser;
mod rates;
mod raw;
mod report;
mod statement_set;
mod types;
mod utils;

pub use crate::dividends::{orphan_withholdings, reconcile_dividends};
pub use crate::error::TaxError;
pub use crate::fifo::match_sales;
pub use crate::rates::ExchangeRateTable;
pub use crate::raw::{RawStatement, SectionRow, SectionedStatement};
pub use crate::report::{TaxReport, TaxReportBuilder};
pub use crate::statement_set::StatementSet;
pub use crate::types::*;
