//! Набор выписок из каталога и их слияние в единые списки записей.

use crate::error::TaxError;
use crate::raw::{RawStatement, SectionedStatement};
use crate::types::{CashEvent, Trade};
use std::fs::{self, DirEntry};
use std::path::Path;

/// Нормализованные записи всех загруженных выписок.
#[derive(Debug, Clone, Default)]
pub struct StatementSet {
    /// Сделки в хронологическом порядке.
    pub trades: Vec<Trade>,
    /// Выплаты дивидендов.
    pub dividends: Vec<CashEvent>,
    /// Удержанный у источника налог.
    pub withholdings: Vec<CashEvent>,
}

impl StatementSet {
    /// Загружает и разбирает все CSV-файлы из каталога.
    ///
    /// Записи всех выписок сливаются и сортируются по дате и тикеру —
    /// этот порядок и определяет очерёдность FIFO при сопоставлении.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TaxError> {
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .collect();
        // Делаем порядок файлов детерминированным.
        entries.sort_by_key(DirEntry::path);

        let mut set = Self::default();
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
                if ext.to_ascii_lowercase() != "csv" {
                    continue;
                }
            } else {
                continue;
            }

            let file = fs::File::open(&path)?;
            let raw = RawStatement::from_reader(file)?;
            set.merge(&SectionedStatement::parse(&raw)?)?;
        }

        set.sort();
        Ok(set)
    }

    /// Добавляет записи одной выписки к набору.
    ///
    /// После добавления всех выписок вызовите [`Self::sort`].
    pub fn merge(&mut self, statement: &SectionedStatement) -> Result<(), TaxError> {
        self.trades
            .extend(parse_optional(statement.parse_trades())?);
        self.dividends
            .extend(parse_optional(statement.parse_dividends())?);
        self.withholdings
            .extend(parse_optional(statement.parse_withholdings())?);
        Ok(())
    }

    /// Сортирует записи по дате и тикеру, сохраняя исходный порядок
    /// одинаковых ключей.
    pub fn sort(&mut self) {
        self.trades
            .sort_by(|a, b| (a.timestamp, &a.symbol).cmp(&(b.timestamp, &b.symbol)));
        self.dividends
            .sort_by(|a, b| (a.date, &a.symbol).cmp(&(b.date, &b.symbol)));
        self.withholdings
            .sort_by(|a, b| (a.date, &a.symbol).cmp(&(b.date, &b.symbol)));
    }
}

/// Отсутствие секции в выписке — нормальный случай: записей просто нет.
fn parse_optional<T>(result: Result<Vec<T>, TaxError>) -> Result<Vec<T>, TaxError> {
    match result {
        Ok(values) => Ok(values),
        Err(TaxError::SectionNotFound { .. }) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}
