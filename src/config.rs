use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    api::HttpBackend,
    availability::{AvailabilityProvider, FixedSchedule, DEFAULT_SLOTS},
    submission::{ReservationApi, StubReservationApi},
};

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Название ресторана для главной страницы.
    pub restaurant_name: String,

    /// Расписание, которое используется без внешнего АПИ.
    pub availability: AvailabilityConfig,

    /// Куда отправлять брони.
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restaurant_name: "Little Lemon".to_owned(),
            availability: AvailabilityConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Слоты в формате HH:MM.
    pub slots: Vec<String>,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Заглушка: слоты из конфига, любая бронь принимается.
    #[default]
    Stub,

    /// АПИ ресторана.
    Http { base_url: String },
}

/// Загружает конфигурацию.
/// Если файла нет, он будет создан со значениями по умолчанию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let cfg: Config = confy::load_path(path)?;

    Ok(cfg)
}

/// Собирает источник слотов и приём броней согласно конфигурации.
pub fn backends(
    cfg: &Config,
) -> anyhow::Result<(Box<dyn AvailabilityProvider>, Box<dyn ReservationApi>)> {
    match &cfg.backend {
        BackendConfig::Stub => {
            let schedule: Box<dyn AvailabilityProvider> =
                Box::new(FixedSchedule::new(cfg.availability.slots.as_slice())?);
            let api: Box<dyn ReservationApi> = Box::new(StubReservationApi);
            Ok((schedule, api))
        }
        BackendConfig::Http { base_url } => {
            let backend = HttpBackend::new(base_url)?;
            let schedule: Box<dyn AvailabilityProvider> = Box::new(backend.clone());
            let api: Box<dyn ReservationApi> = Box::new(backend);
            Ok((schedule, api))
        }
    }
}
