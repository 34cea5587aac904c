use anyhow::anyhow;
use chrono::NaiveDate;
use log::debug;

use crate::model::{AvailableTimes, TimeSlot};

/// Слоты по умолчанию, доступные на любую дату.
pub const DEFAULT_SLOTS: [&str; 6] = ["17:00", "18:00", "19:00", "20:00", "21:00", "22:00"];

/// Источник доступных для брони слотов.
pub trait AvailabilityProvider {
    /// Возвращает доступные слоты на дату.
    /// Слоты идут по возрастанию и не повторяются.
    fn times_for_date(&self, date: NaiveDate) -> anyhow::Result<AvailableTimes>;
}

/// Фиксированное расписание.
/// Отдаёт один и тот же набор слотов независимо от даты.
#[derive(Debug, Clone)]
pub struct FixedSchedule {
    times: AvailableTimes,
}

impl FixedSchedule {
    pub fn new<S: AsRef<str>>(slots: &[S]) -> anyhow::Result<Self> {
        let slots = slots
            .iter()
            .map(|s| {
                TimeSlot::new(s.as_ref())
                    .map_err(|e| e.context(format!("slot \"{}\"", s.as_ref())))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let times = AvailableTimes::new(slots);

        if times.is_empty() {
            return Err(anyhow!("schedule should contain at least one slot"));
        }

        Ok(Self { times })
    }
}

impl AvailabilityProvider for FixedSchedule {
    fn times_for_date(&self, date: NaiveDate) -> anyhow::Result<AvailableTimes> {
        debug!("Отдаём фиксированное расписание на {}", date);
        Ok(self.times.clone())
    }
}
