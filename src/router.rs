use std::str::FromStr;

use anyhow::anyhow;

use crate::model::ConfirmedReservation;

/// Страницы сайта.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, enum_iterator::Sequence)]
pub enum Route {
    #[display(fmt = "home")]
    Home,
    #[display(fmt = "booking")]
    Booking,
    #[display(fmt = "confirmation")]
    Confirmation,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Booking => "/booking",
            Self::Confirmation => "/confirmation",
        }
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<Route>()
            .find(|r| r.path() == s)
            .ok_or(anyhow!("unknown path \"{}\"", s))
    }
}

/// Один переход между страницами.
///
/// Подтверждённая бронь живёт только в состоянии перехода, который её создал.
/// Прямой переход на страницу подтверждения состояния не несёт.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<ConfirmedReservation>,
}

impl Navigation {
    /// Обычный переход без состояния.
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn with_state(route: Route, state: ConfirmedReservation) -> Self {
        Self {
            route,
            state: Some(state),
        }
    }
}
