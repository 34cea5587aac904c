use std::str::FromStr;

use anyhow::anyhow;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::newtype;

/// Минимальное количество гостей в одной брони.
pub const MIN_GUESTS: i32 = 1;

/// Максимальное количество гостей в одной брони.
pub const MAX_GUESTS: i32 = 10;

/// Бронь в процессе заполнения.
/// Принадлежит форме, пока пользователь вводит данные.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    /// Дата в формате `YYYY-MM-DD`, пустая пока не выбрана.
    pub date: String,

    /// Время из списка доступных слотов, пустое пока не выбрано.
    pub time: String,

    /// Количество гостей.
    pub guests: i32,

    /// Повод.
    pub occasion: Occasion,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            guests: MIN_GUESTS,
            occasion: Occasion::default(),
        }
    }
}

impl ReservationDraft {
    /// Применяет изменение одного поля.
    pub fn apply(&mut self, input: FieldInput) {
        match input {
            FieldInput::Date(v) => self.date = v,
            FieldInput::Time(v) => self.time = v,
            FieldInput::Guests(v) => self.guests = coerce_guests(&v),
            FieldInput::Occasion(v) => self.occasion = v,
        }
    }
}

/// Приводит введённое количество гостей к целому числу.
///
/// Дробная часть отбрасывается. Пустой или нечисловой ввод превращается в 0,
/// чтобы валидатор сообщил о недостатке гостей.
pub fn coerce_guests(value: &str) -> i32 {
    let value = value.trim();

    if let Ok(n) = value.parse::<i32>() {
        return n;
    }

    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i32,
        _ => 0,
    }
}

/// Поля формы бронирования.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum Field {
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "time")]
    Time,
    #[display(fmt = "guests")]
    Guests,
    #[display(fmt = "occasion")]
    Occasion,
}

/// Новое значение одного поля формы, как его ввёл пользователь.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Date(String),
    Time(String),
    Guests(String),
    Occasion(Occasion),
}

impl FieldInput {
    /// Возвращает поле, к которому относится ввод.
    pub fn field(&self) -> Field {
        match self {
            Self::Date(_) => Field::Date,
            Self::Time(_) => Field::Time,
            Self::Guests(_) => Field::Guests,
            Self::Occasion(_) => Field::Occasion,
        }
    }
}

/// Повод для брони. Носит исключительно информационный характер.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum Occasion {
    #[default]
    #[display(fmt = "Birthday")]
    Birthday,
    #[display(fmt = "Anniversary")]
    Anniversary,
    #[display(fmt = "Engagement")]
    Engagement,
    #[display(fmt = "Business")]
    Business,
    #[display(fmt = "Other")]
    Other,
}

impl FromStr for Occasion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<Occasion>()
            .find(|o| o.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or(anyhow!("unknown occasion \"{}\"", s))
    }
}

newtype!(TimeSlot, time_slot_validate);

fn time_slot_validate(value: &str) -> anyhow::Result<()> {
    // Строгий формат HH:MM нужен, чтобы строковый порядок совпадал с порядком
    // времени суток.
    if value.len() != 5 {
        return Err(anyhow!("should be in HH:MM format"));
    }

    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| anyhow!("should be a valid time of day"))?;

    Ok(())
}

/// Упорядоченный список доступных слотов на дату.
///
/// Слоты всегда идут по возрастанию времени и не повторяются.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTimes(Vec<TimeSlot>);

impl AvailableTimes {
    pub fn new<I: IntoIterator<Item = TimeSlot>>(slots: I) -> Self {
        let mut slots: Vec<TimeSlot> = slots.into_iter().collect();
        slots.sort();
        slots.dedup();
        Self(slots)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSlot> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, time: &str) -> bool {
        self.0.iter().any(|s| s.as_str() == time)
    }
}

#[cfg(test)]
impl AvailableTimes {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Подтверждённая бронь.
/// Неизменяемый снимок черновика, прошедшего валидацию.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedReservation {
    date: NaiveDate,
    time: String,
    guests: i32,
    occasion: Occasion,
}

impl ConfirmedReservation {
    /// Создаётся только валидатором, см. [`crate::validator::validate`].
    pub(crate) fn new(date: NaiveDate, time: String, guests: i32, occasion: Occasion) -> Self {
        Self {
            date,
            time,
            guests,
            occasion,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn guests(&self) -> i32 {
        self.guests
    }

    pub fn occasion(&self) -> Occasion {
        self.occasion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! coerce_guests_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (expected, input) = $value;
                assert_eq!(expected, coerce_guests(input));
            }
        )*
        }
    }

    coerce_guests_tests! {
        coerce_guests_integer: (4, "4"),
        coerce_guests_padded: (10, " 10 "),
        coerce_guests_negative: (-2, "-2"),
        coerce_guests_decimal: (3, "3.9"),
        coerce_guests_decimal_at_limit: (10, "10.5"),
        coerce_guests_empty: (0, ""),
        coerce_guests_garbage: (0, "four"),
    }

    #[test]
    fn draft_defaults() {
        let draft = ReservationDraft::default();

        assert_eq!("", draft.date);
        assert_eq!("", draft.time);
        assert_eq!(1, draft.guests);
        assert_eq!(Occasion::Birthday, draft.occasion);
    }

    #[test]
    fn draft_apply_guests_coerces() {
        let mut draft = ReservationDraft::default();

        draft.apply(FieldInput::Guests("7".to_owned()));
        assert_eq!(7, draft.guests);

        draft.apply(FieldInput::Guests(String::new()));
        assert_eq!(0, draft.guests);
    }

    #[test]
    fn occasion_from_str() {
        assert_eq!(Occasion::Anniversary, "Anniversary".parse().unwrap());
        assert_eq!(Occasion::Business, "business".parse().unwrap());
        assert!("Wedding".parse::<Occasion>().is_err());
    }

    #[test]
    fn occasion_all_in_order() {
        let all: Vec<String> = enum_iterator::all::<Occasion>()
            .map(|o| o.to_string())
            .collect();

        assert_eq!(
            vec!["Birthday", "Anniversary", "Engagement", "Business", "Other"],
            all
        );
    }

    #[test]
    fn time_slot_validation() {
        assert!(TimeSlot::new("17:00").is_ok());
        assert!(TimeSlot::new("7:00").is_err());
        assert!(TimeSlot::new("24:00").is_err());
        assert!(TimeSlot::new("17-00").is_err());
    }

    #[test]
    fn available_times_sorted_and_unique() {
        let slots = ["21:00", "17:00", "19:00", "17:00"]
            .into_iter()
            .map(|s| TimeSlot::new(s).unwrap());

        let times = AvailableTimes::new(slots);
        let actual: Vec<&str> = times.iter().map(|s| s.as_str()).collect();

        assert_eq!(vec!["17:00", "19:00", "21:00"], actual);
        assert!(times.contains("19:00"));
        assert!(!times.contains("18:00"));
    }

    #[test]
    fn confirmed_reservation_json_shape() {
        let reservation = ConfirmedReservation::new(
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            "18:00".to_owned(),
            4,
            Occasion::Anniversary,
        );

        assert_eq!(
            r#"{"date":"2026-10-20","time":"18:00","guests":4,"occasion":"Anniversary"}"#,
            serde_json::to_string(&reservation).unwrap()
        );
    }
}
