//! Вспомогательные парсеры чисел, дат и текста из отчётов.

use crate::error::TaxError;
use crate::types::Money;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Нормализует числовую строку, удаляя пробелы, разделители тысяч и знак плюса.
fn normalize_number(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !matches!(*ch, ' ' | '\u{a0}' | '\u{202f}' | ',' | '+'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Разбирает денежное значение в американской записи (точка как разделитель).
pub fn parse_money(value: &str, column: &'static str) -> Result<Money, TaxError> {
    let normalized = normalize_number(value);
    Decimal::from_str(&normalized).map_err(|_| TaxError::Number {
        value: value.trim().to_string(),
        column,
    })
}

/// Разбирает целое количество бумаг со знаком.
pub fn parse_signed_quantity(value: &str, column: &'static str) -> Result<i64, TaxError> {
    let normalized = normalize_number(value);
    normalized.parse::<i64>().map_err(|_| TaxError::Number {
        value: value.trim().to_string(),
        column,
    })
}

/// Разбирает дату в формате `yyyy-mm-dd`.
pub fn parse_date(value: &str) -> Result<NaiveDate, TaxError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| TaxError::Date {
        value: value.trim().to_string(),
    })
}

/// Разбирает дату и время сделки в формате `yyyy-mm-dd, HH:MM:SS`.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, TaxError> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d, %H:%M:%S").map_err(|_| {
        TaxError::Date {
            value: value.trim().to_string(),
        }
    })
}

/// Находит первый фрагмент текста, совпадающий с регулярным выражением.
pub fn capture_text(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
