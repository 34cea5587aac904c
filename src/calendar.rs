use chrono::{Local, NaiveDate};

/// Формат, в котором дата вводится в форме и передаётся в АПИ.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Возвращает текущую дату в локальной временной зоне.
/// Время суток отбрасывается.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Разбирает дату из строки формата `YYYY-MM-DD`.
pub fn parse(value: &str) -> Result {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_owned()))
}

pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Длинное представление даты: день недели, месяц, число и год.
pub fn long_form(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub type Result = std::result::Result<NaiveDate, Error>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("invalid date \"{0}\"")]
    InvalidDate(String),
}
