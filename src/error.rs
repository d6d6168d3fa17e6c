//! Ошибки разбора отчётов и налоговых расчётов.

use chrono::NaiveDate;

/// Ошибка разбора отчёта брокера или расчёта налоговой базы.
#[derive(thiserror::Error, Debug)]
pub enum TaxError {
    /// Ошибка ввода-вывода при чтении исходного файла.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Ошибка чтения CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// В отчёте не удалось найти ожидаемую секцию.
    #[error("Section '{section}' not found")]
    SectionNotFound {
        /// Имя секции.
        section: &'static str,
    },
    /// Ошибка разбора числового значения.
    #[error("Invalid number '{value}' in column '{column}'")]
    Number {
        /// Некорректное исходное значение.
        value: String,
        /// Название столбца.
        column: &'static str,
    },
    /// Ошибка разбора даты.
    #[error("Invalid date '{value}'")]
    Date {
        /// Некорректная дата.
        value: String,
    },
    /// В записи отсутствует обязательное поле.
    #[error("Required field '{field}' missing")]
    MissingField {
        /// Имя пропавшего поля.
        field: &'static str,
    },
    /// Количество бумаг в сделке не является положительным числом.
    #[error("Trade quantity must be positive, got '{value}'")]
    Quantity {
        /// Исходное значение количества.
        value: String,
    },
    /// Для продажи не хватает ранее купленных лотов.
    #[error("Not enough buy lots for '{symbol}': short {shortfall} units")]
    InsufficientLots {
        /// Тикер бумаги.
        symbol: String,
        /// Непокрытое количество.
        shortfall: u32,
    },
    /// Нет курса валюты на запрошенную дату.
    #[error("No exchange rate for {date}")]
    RateNotFound {
        /// Дата вне диапазона таблицы курсов.
        date: NaiveDate,
    },
}
