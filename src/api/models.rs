use serde::{Deserialize, Serialize};

use crate::{calendar, model::ConfirmedReservation};

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub times: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub guests: i32,
    pub occasion: String,
}

impl From<&ConfirmedReservation> for BookingRequest {
    fn from(value: &ConfirmedReservation) -> Self {
        Self {
            date: calendar::format(value.date()),
            time: value.time().to_owned(),
            guests: value.guests(),
            occasion: value.occasion().to_string(),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}
