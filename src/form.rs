use chrono::NaiveDate;
use log::debug;

use crate::{
    model::{ConfirmedReservation, FieldInput, ReservationDraft},
    validator::{self, ValidationErrors},
};

/// Форма бронирования столика.
/// Хранит черновик и ошибки последней попытки отправки.
#[derive(Debug, Default, Clone)]
pub struct ReservationForm {
    draft: ReservationDraft,
    errors: ValidationErrors,
}

/// Событие формы, на которое должен отреагировать её владелец.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Пользователь выбрал другую дату.
    DateChanged(String),
}

/// Результат попытки отправки формы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmit {
    /// В форме есть ошибки, они доступны через [`ReservationForm::errors`].
    Rejected,

    /// Черновик валиден.
    Ready(ConfirmedReservation),
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Обновляет значение поля.
    ///
    /// Ошибка изменённого поля сбрасывается без повторной валидации.
    /// Выбранное время при смене даты не сбрасывается.
    pub fn change(&mut self, input: FieldInput) -> Option<FormEvent> {
        let field = input.field();

        let event = match &input {
            FieldInput::Date(date) => Some(FormEvent::DateChanged(date.clone())),
            _ => None,
        };

        self.draft.apply(input);

        if self.errors.clear(field) {
            debug!("Сбросили ошибку поля {}", field);
        }

        event
    }

    /// Проверяет черновик целиком.
    /// Сам черновик при этом не меняется ни в каком случае.
    pub fn submit(&mut self, today: NaiveDate) -> FormSubmit {
        match validator::validate(&self.draft, today) {
            Ok(reservation) => FormSubmit::Ready(reservation),
            Err(errors) => {
                debug!("Форма не прошла валидацию: {:?}", errors);
                self.errors = errors;
                FormSubmit::Rejected
            }
        }
    }
}
