use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    calendar,
    model::{ConfirmedReservation, Field, ReservationDraft, MAX_GUESTS, MIN_GUESTS},
};

/// Ошибка одного поля формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Please select a date")]
    DateRequired,

    #[error("Please enter a valid date")]
    DateInvalid,

    #[error("Date must be today or in the future")]
    DateInPast,

    #[error("Please select a time")]
    TimeRequired,

    #[error("At least 1 guest is required")]
    TooFewGuests,

    #[error("Maximum 10 guests allowed")]
    TooManyGuests,
}

/// Ошибки валидации по полям формы.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    /// Убирает ошибку поля, не трогая остальные.
    /// Возвращает true, если ошибка была.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Поля с ошибками в порядке их следования в форме.
    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

#[cfg(test)]
impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Проверяет черновик относительно указанной даты.
///
/// Сравнение идёт по календарным дням, поэтому сегодняшняя дата валидна
/// в любое время суток. Если ошибок нет, возвращает подтверждённую бронь,
/// иначе ошибки всех полей сразу.
pub fn validate(
    draft: &ReservationDraft,
    today: NaiveDate,
) -> Result<ConfirmedReservation, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let date = match check_date(&draft.date, today) {
        Ok(date) => Some(date),
        Err(e) => {
            errors.insert(Field::Date, e);
            None
        }
    };

    if draft.time.is_empty() {
        errors.insert(Field::Time, FieldError::TimeRequired);
    }

    if draft.guests < MIN_GUESTS {
        errors.insert(Field::Guests, FieldError::TooFewGuests);
    } else if draft.guests > MAX_GUESTS {
        errors.insert(Field::Guests, FieldError::TooManyGuests);
    }

    match date {
        Some(date) if errors.is_empty() => Ok(ConfirmedReservation::new(
            date,
            draft.time.clone(),
            draft.guests,
            draft.occasion,
        )),
        _ => Err(errors),
    }
}

fn check_date(value: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    if value.is_empty() {
        return Err(FieldError::DateRequired);
    }

    let date = calendar::parse(value).map_err(|_| FieldError::DateInvalid)?;

    if date < today {
        return Err(FieldError::DateInPast);
    }

    Ok(date)
}
