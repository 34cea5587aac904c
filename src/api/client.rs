use std::time::Duration;

use anyhow::anyhow;
use chrono::NaiveDate;
use log::debug;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    availability::AvailabilityProvider,
    calendar,
    model::{AvailableTimes, ConfirmedReservation, TimeSlot},
    newtype,
    submission::{ReservationApi, SubmitError, SubmitResult},
};

use super::models::{AvailabilityResponse, BookingRequest, BookingResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

newtype!(BaseUrl, base_url_validate);

fn base_url_validate(value: &str) -> anyhow::Result<()> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(anyhow!("should start with http:// or https://"));
    }

    Ok(())
}

/// Внутренний клиент.
#[derive(Clone)]
pub(super) struct InnerClient {
    client: reqwest::blocking::Client,
    base_url: BaseUrl,
}

impl InnerClient {
    /// Создаёт новый инстанс внутреннего клиента.
    pub(super) fn new(base_url: BaseUrl) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub(super) fn get<R: DeserializeOwned>(&self, api_method: &str) -> anyhow::Result<R> {
        self.request::<(), R>(Method::GET, api_method, None)
    }

    pub(super) fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        api_method: &str,
        payload: Option<&B>,
    ) -> anyhow::Result<R> {
        self.request(Method::POST, api_method, payload)
    }

    fn request<B: Serialize, R: DeserializeOwned>(
        &self,
        http_method: Method,
        api_method: &str,
        payload: Option<&B>,
    ) -> anyhow::Result<R> {
        let url = self.build_url(api_method);
        let mut req_builder = self.client.request(http_method.clone(), &url);

        if let Some(b) = payload {
            req_builder = req_builder.json(b)
        }

        debug!("Запрос в АПИ: {} {}", http_method, url);
        let resp = req_builder.send()?;

        if resp.status() != StatusCode::OK {
            let status = resp.status();
            let text = resp.text()?;
            return Err(anyhow!("got {}: {}", status, text));
        }

        let body = resp.text()?;

        debug!("Тело ответа на {}: {}", url, body);

        let data = serde_json::from_str(&body)?;

        Ok(data)
    }

    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            method.trim_start_matches('/')
        )
    }
}

/// Клиент к АПИ бронирования ресторана.
///
/// Отдаёт доступные слоты и принимает брони:
//  1. GET  /api/availability?date=YYYY-MM-DD
//  2. POST /api/bookings
#[derive(Clone)]
pub struct HttpBackend {
    client: InnerClient,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = BaseUrl::new(base_url).map_err(|e| e.context("backend base url"))?;

        Ok(Self {
            client: InnerClient::new(base_url)?,
        })
    }
}

impl AvailabilityProvider for HttpBackend {
    fn times_for_date(&self, date: NaiveDate) -> anyhow::Result<AvailableTimes> {
        let method = format!("/availability?date={}", calendar::format(date));

        let resp: AvailabilityResponse = self.client.get(&method)?;

        let slots = resp
            .times
            .iter()
            .map(|t| TimeSlot::new(t))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let times = AvailableTimes::new(slots);

        if times.is_empty() {
            return Err(anyhow!("no available times for {}", date));
        }

        Ok(times)
    }
}

impl ReservationApi for HttpBackend {
    fn submit(&self, reservation: &ConfirmedReservation) -> SubmitResult {
        let req = BookingRequest::from(reservation);

        debug!("Request {:?}", req);
        let resp: BookingResponse = self.client.post("/bookings", Some(&req))?;

        if !resp.success {
            return Err(SubmitError::Rejected(
                resp.message.unwrap_or_else(|| "no reason given".to_owned()),
            ));
        }

        Ok(())
    }
}
