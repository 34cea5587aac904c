use log::info;

use crate::model::ConfirmedReservation;

/// Приём брони на стороне ресторана.
pub trait ReservationApi {
    /// Отправляет бронь. Успешный результат означает, что бронь принята.
    fn submit(&self, reservation: &ConfirmedReservation) -> SubmitResult;
}

pub type SubmitResult = std::result::Result<(), SubmitError>;

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("reservation rejected: {0}")]
    Rejected(String),

    #[error("reservation backend unavailable")]
    Transport(#[from] anyhow::Error),
}

/// Заглушка, которая принимает любую бронь.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubReservationApi;

impl ReservationApi for StubReservationApi {
    fn submit(&self, reservation: &ConfirmedReservation) -> SubmitResult {
        info!("Booking submitted: {:?}", reservation);
        Ok(())
    }
}
