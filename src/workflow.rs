use chrono::NaiveDate;
use log::{debug, error, info, warn};

use crate::{
    availability::AvailabilityProvider,
    calendar,
    form::{FormEvent, FormSubmit, ReservationForm},
    model::{AvailableTimes, FieldInput},
    router::{Navigation, Route},
    submission::ReservationApi,
    validator::ValidationErrors,
};

/// Сообщение пользователю о неудачной отправке брони.
pub const SUBMIT_FAILED_NOTICE: &str = "Booking failed. Please try again.";

/// Итог отправки брони.
#[derive(Debug)]
pub enum Submission {
    /// В форме есть ошибки, перехода не будет.
    Invalid,

    /// Бронь принята, нужно перейти на страницу подтверждения.
    Accepted(Navigation),

    /// Бронь не принята. Черновик остаётся для повторной попытки.
    Failed(&'static str),
}

/// Страница бронирования.
///
/// Связывает форму с источником доступных слотов и приёмом броней.
pub struct BookingWorkflow {
    form: ReservationForm,
    availability: Box<dyn AvailabilityProvider>,
    api: Box<dyn ReservationApi>,
    available_times: AvailableTimes,
    clock: fn() -> NaiveDate,
}

impl BookingWorkflow {
    /// Создаёт страницу и заполняет слоты на сегодня.
    pub fn new(
        availability: Box<dyn AvailabilityProvider>,
        api: Box<dyn ReservationApi>,
    ) -> anyhow::Result<Self> {
        Self::with_clock(availability, api, calendar::today)
    }

    pub fn with_clock(
        availability: Box<dyn AvailabilityProvider>,
        api: Box<dyn ReservationApi>,
        clock: fn() -> NaiveDate,
    ) -> anyhow::Result<Self> {
        let today = clock();

        debug!("Загружаем доступные слоты на {}", today);
        let available_times = availability.times_for_date(today)?;

        Ok(Self {
            form: ReservationForm::new(),
            availability,
            api,
            available_times,
            clock,
        })
    }

    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.form.errors()
    }

    pub fn available_times(&self) -> &AvailableTimes {
        &self.available_times
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Передаёт ввод пользователя в форму.
    pub fn change(&mut self, input: FieldInput) {
        if let Some(FormEvent::DateChanged(date)) = self.form.change(input) {
            self.refresh_times(&date);
        }
    }

    fn refresh_times(&mut self, date: &str) {
        // Пока дата не выбрана, показываем слоты на сегодня.
        let date = calendar::parse(date).unwrap_or_else(|_| self.today());

        debug!("Обновляем доступные слоты на {}", date);
        match self.availability.times_for_date(date) {
            Ok(times) => self.available_times = times,
            Err(e) => warn!("Не удалось получить слоты на {}: {:#}", date, e),
        }
    }

    /// Отправляет форму.
    pub fn submit(&mut self) -> Submission {
        let today = self.today();

        let reservation = match self.form.submit(today) {
            FormSubmit::Rejected => return Submission::Invalid,
            FormSubmit::Ready(r) => r,
        };

        match self.api.submit(&reservation) {
            Ok(()) => {
                info!("Бронь на {} {} принята", reservation.date(), reservation.time());
                Submission::Accepted(Navigation::with_state(Route::Confirmation, reservation))
            }
            Err(e) => {
                error!("Бронь не принята: {:#}", anyhow::Error::from(e));
                Submission::Failed(SUBMIT_FAILED_NOTICE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::anyhow;

    use super::*;
    use crate::{
        availability::{FixedSchedule, DEFAULT_SLOTS},
        model::{ConfirmedReservation, Field, Occasion, TimeSlot},
        submission::{StubReservationApi, SubmitError, SubmitResult},
        validator::FieldError,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    /// Запоминает все запрошенные даты и отдаёт слоты, зависящие от дня.
    struct RecordingSchedule {
        requested: Rc<RefCell<Vec<NaiveDate>>>,
    }

    impl AvailabilityProvider for RecordingSchedule {
        fn times_for_date(&self, date: NaiveDate) -> anyhow::Result<AvailableTimes> {
            self.requested.borrow_mut().push(date);
            let slot = if date == today() { "17:00" } else { "20:00" };
            Ok(AvailableTimes::new([TimeSlot::new(slot)?]))
        }
    }

    struct BrokenSchedule;

    impl AvailabilityProvider for BrokenSchedule {
        fn times_for_date(&self, _date: NaiveDate) -> anyhow::Result<AvailableTimes> {
            Err(anyhow!("schedule is down"))
        }
    }

    /// Запоминает все отправленные брони.
    struct RecordingApi {
        submitted: Rc<RefCell<Vec<ConfirmedReservation>>>,
    }

    impl ReservationApi for RecordingApi {
        fn submit(&self, reservation: &ConfirmedReservation) -> SubmitResult {
            self.submitted.borrow_mut().push(reservation.clone());
            Ok(())
        }
    }

    /// Отклоняет любую бронь.
    struct RejectingApi;

    impl ReservationApi for RejectingApi {
        fn submit(&self, _reservation: &ConfirmedReservation) -> SubmitResult {
            Err(SubmitError::Rejected("fully booked".to_owned()))
        }
    }

    fn stub_workflow() -> BookingWorkflow {
        BookingWorkflow::with_clock(
            Box::new(FixedSchedule::new(&DEFAULT_SLOTS).unwrap()),
            Box::new(StubReservationApi),
            today,
        )
        .unwrap()
    }

    fn fill(workflow: &mut BookingWorkflow) {
        workflow.change(FieldInput::Date("2026-10-20".to_owned()));
        workflow.change(FieldInput::Time("18:00".to_owned()));
        workflow.change(FieldInput::Guests("4".to_owned()));
        workflow.change(FieldInput::Occasion(Occasion::Anniversary));
    }

    #[test]
    fn seeds_times_for_today() {
        let requested = Rc::new(RefCell::new(Vec::new()));
        let workflow = BookingWorkflow::with_clock(
            Box::new(RecordingSchedule {
                requested: requested.clone(),
            }),
            Box::new(StubReservationApi),
            today,
        )
        .unwrap();

        assert_eq!(vec![today()], *requested.borrow());
        assert!(workflow.available_times().contains("17:00"));
    }

    #[test]
    fn seed_failure_is_an_error() {
        let res = BookingWorkflow::with_clock(
            Box::new(BrokenSchedule),
            Box::new(StubReservationApi),
            today,
        );

        assert!(res.is_err());
    }

    #[test]
    fn default_times() {
        let workflow = stub_workflow();
        let times: Vec<&str> = workflow
            .available_times()
            .iter()
            .map(|s| s.as_str())
            .collect();

        assert_eq!(DEFAULT_SLOTS.to_vec(), times);
    }

    #[test]
    fn date_change_refreshes_times() {
        let requested = Rc::new(RefCell::new(Vec::new()));
        let mut workflow = BookingWorkflow::with_clock(
            Box::new(RecordingSchedule {
                requested: requested.clone(),
            }),
            Box::new(StubReservationApi),
            today,
        )
        .unwrap();

        workflow.change(FieldInput::Time("17:00".to_owned()));
        workflow.change(FieldInput::Date("2026-10-25".to_owned()));

        assert_eq!(
            vec![today(), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap()],
            *requested.borrow()
        );
        assert!(workflow.available_times().contains("20:00"));
        // Ранее выбранное время остаётся, даже если его нет в новом списке.
        assert_eq!("17:00", workflow.form().draft().time);
    }

    #[test]
    fn cleared_date_refreshes_times_for_today() {
        let requested = Rc::new(RefCell::new(Vec::new()));
        let mut workflow = BookingWorkflow::with_clock(
            Box::new(RecordingSchedule {
                requested: requested.clone(),
            }),
            Box::new(StubReservationApi),
            today,
        )
        .unwrap();

        workflow.change(FieldInput::Date(String::new()));

        assert_eq!(vec![today(), today()], *requested.borrow());
    }

    #[test]
    fn submit_empty_form() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let mut workflow = BookingWorkflow::with_clock(
            Box::new(FixedSchedule::new(&DEFAULT_SLOTS).unwrap()),
            Box::new(RecordingApi {
                submitted: submitted.clone(),
            }),
            today,
        )
        .unwrap();

        assert!(matches!(workflow.submit(), Submission::Invalid));
        assert_eq!(vec![Field::Date, Field::Time], workflow.errors().fields());
        assert_eq!(
            Some(FieldError::DateRequired),
            workflow.errors().get(Field::Date)
        );
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn submit_valid_form_navigates_to_confirmation() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let mut workflow = BookingWorkflow::with_clock(
            Box::new(FixedSchedule::new(&DEFAULT_SLOTS).unwrap()),
            Box::new(RecordingApi {
                submitted: submitted.clone(),
            }),
            today,
        )
        .unwrap();
        fill(&mut workflow);

        let Submission::Accepted(nav) = workflow.submit() else {
            panic!("submission should be accepted");
        };

        assert_eq!(Route::Confirmation, nav.route);
        assert_eq!(1, submitted.borrow().len());
        assert_eq!(
            r#"{"date":"2026-10-20","time":"18:00","guests":4,"occasion":"Anniversary"}"#,
            serde_json::to_string(&submitted.borrow()[0]).unwrap()
        );
        assert_eq!(Some(&submitted.borrow()[0]), nav.state.as_ref());
    }

    #[test]
    fn rejected_submission_keeps_draft() {
        let mut workflow = BookingWorkflow::with_clock(
            Box::new(FixedSchedule::new(&DEFAULT_SLOTS).unwrap()),
            Box::new(RejectingApi),
            today,
        )
        .unwrap();
        fill(&mut workflow);

        let Submission::Failed(notice) = workflow.submit() else {
            panic!("submission should fail");
        };

        assert_eq!(SUBMIT_FAILED_NOTICE, notice);
        assert_eq!("2026-10-20", workflow.form().draft().date);
        assert!(workflow.errors().is_empty());
    }

    #[test]
    fn broken_refresh_keeps_previous_times() {
        let mut workflow = stub_workflow();
        workflow.availability = Box::new(BrokenSchedule);

        workflow.change(FieldInput::Date("2026-10-21".to_owned()));

        assert_eq!(DEFAULT_SLOTS.len(), workflow.available_times().len());
    }

    #[test]
    fn today_is_bookable_with_real_clock() {
        let mut workflow = BookingWorkflow::new(
            Box::new(FixedSchedule::new(&DEFAULT_SLOTS).unwrap()),
            Box::new(StubReservationApi),
        )
        .unwrap();

        workflow.change(FieldInput::Date(calendar::format(calendar::today())));
        workflow.change(FieldInput::Time("22:00".to_owned()));

        assert!(matches!(workflow.submit(), Submission::Accepted(_)));
    }
}
