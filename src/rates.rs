//! Таблица курсов валют по датам с заполнением пропусков.

use crate::error::TaxError;
use crate::types::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

/// Таблица курсов валюты торгов к рублю, по одному курсу на каждый
/// календарный день покрываемого диапазона.
///
/// Строится один раз из упорядоченных по дате отсчётов и дальше не меняется,
/// поэтому её можно разделять между потоками по ссылке.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateTable {
    rates: BTreeMap<NaiveDate, Money>,
}

impl ExchangeRateTable {
    /// Строит таблицу из отсчётов `(дата, курс)` в хронологическом порядке.
    ///
    /// Пропуски между соседними отсчётами заполняются последним известным
    /// курсом: опубликованный курс действует до следующей публикации.
    pub fn from_samples(samples: &[(NaiveDate, Money)]) -> Self {
        let mut rates = BTreeMap::new();
        let mut prev: Option<(NaiveDate, Money)> = None;
        for &(date, rate) in samples {
            if let Some((prev_date, prev_rate)) = prev {
                let mut day = prev_date;
                while let Some(next) = day.succ_opt() {
                    if next >= date {
                        break;
                    }
                    rates.insert(next, prev_rate);
                    day = next;
                }
            }
            rates.insert(date, rate);
            prev = Some((date, rate));
        }
        Self { rates }
    }

    /// Читает таблицу из файла выгрузки ЦБ: строки `дд.мм.гггг<TAB>курс`,
    /// дробная часть курса отделена запятой.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaxError> {
        let mut samples = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (date_str, rate_str) =
                trimmed
                    .split_once('\t')
                    .ok_or_else(|| TaxError::Number {
                        value: trimmed.to_string(),
                        column: "rate line",
                    })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%d.%m.%Y").map_err(|_| {
                TaxError::Date {
                    value: date_str.trim().to_string(),
                }
            })?;
            let normalized: String = rate_str
                .chars()
                .filter(|ch| !matches!(*ch, ' ' | '\u{a0}'))
                .map(|ch| if ch == ',' { '.' } else { ch })
                .collect();
            let rate = Decimal::from_str(&normalized).map_err(|_| TaxError::Number {
                value: rate_str.trim().to_string(),
                column: "rate",
            })?;
            samples.push((date, rate));
        }
        Ok(Self::from_samples(&samples))
    }

    /// Возвращает курс на указанную дату.
    ///
    /// Дата раньше первого или позже последнего отсчёта — ошибка
    /// `RateNotFound`; экстраполяции и курса по умолчанию нет.
    pub fn rate_for(&self, date: NaiveDate) -> Result<Money, TaxError> {
        self.rates
            .get(&date)
            .copied()
            .ok_or(TaxError::RateNotFound { date })
    }

    /// Диапазон дат, покрытый таблицей, либо `None` для пустой таблицы.
    pub fn coverage(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rates.first_key_value()?.0;
        let last = self.rates.last_key_value()?.0;
        Some((*first, *last))
    }
}
