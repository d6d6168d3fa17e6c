//! Работа с исходным CSV-файлом выписки и его секциями.

use crate::error::TaxError;
use std::collections::BTreeMap;
use std::io::Read;

/// Исходный CSV выписки Interactive Brokers без разбора на секции.
#[derive(Debug, Clone)]
pub struct RawStatement {
    /// Полный текст выписки.
    pub csv: String,
}

impl RawStatement {
    /// Читает выписку из произвольного `Read`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TaxError> {
        let mut csv = String::new();
        reader.read_to_string(&mut csv)?;
        Ok(Self { csv })
    }

    /// Создаёт выписку из готовой CSV-строки.
    #[inline]
    pub fn from_str(s: &str) -> Self {
        Self { csv: s.to_string() }
    }
}

/// Строка данных секции: значения, сопоставленные заголовкам своей секции.
#[derive(Debug, Clone)]
pub struct SectionRow {
    fields: BTreeMap<String, String>,
}

impl SectionRow {
    /// Возвращает значение поля по имени столбца.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Возвращает значение поля или ошибку `MissingField`.
    pub fn require(&self, name: &'static str) -> Result<&str, TaxError> {
        self.field(name)
            .ok_or(TaxError::MissingField { field: name })
    }
}

/// Выписка, разобранная на именованные секции.
///
/// Формат IB: первый столбец — имя секции, второй — маркер строки.
/// Строка `Header` открывает секцию и задаёт имена столбцов, строки `Data`
/// несут данные; промежуточные итоги (`SubTotal`, `Total`) пропускаются.
#[derive(Debug, Clone, Default)]
pub struct SectionedStatement {
    sections: BTreeMap<String, Vec<SectionRow>>,
}

impl SectionedStatement {
    /// Разбирает выписку на секции.
    pub fn parse(raw: &RawStatement) -> Result<Self, TaxError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(raw.csv.as_bytes());

        let mut sections: BTreeMap<String, Vec<SectionRow>> = BTreeMap::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for record in reader.records() {
            let record = record?;
            let Some(name) = record.get(0) else {
                continue;
            };
            match record.get(1) {
                Some("Header") => {
                    let columns = record.iter().map(str::to_string).collect();
                    current = Some((name.to_string(), columns));
                }
                Some("Data") => {
                    // Строки данных до первого заголовка игнорируются.
                    let Some((section, columns)) = &current else {
                        continue;
                    };
                    if section != name {
                        continue;
                    }
                    let fields = columns
                        .iter()
                        .zip(record.iter())
                        .map(|(column, value)| (column.clone(), value.to_string()))
                        .collect();
                    sections
                        .entry(section.clone())
                        .or_default()
                        .push(SectionRow { fields });
                }
                _ => {}
            }
        }

        Ok(Self { sections })
    }

    /// Возвращает строки данных секции по имени.
    pub fn section(&self, name: &'static str) -> Result<&[SectionRow], TaxError> {
        self.sections
            .get(name)
            .map(Vec::as_slice)
            .ok_or(TaxError::SectionNotFound { section: name })
    }

    /// Имена всех секций выписки.
    #[inline]
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}
