use anyhow::anyhow;
use chrono::Weekday;
use enum_iterator::all;
use inquire::{Confirm, DateSelect, InquireError, Select, Text};
use log::debug;

use crate::{
    calendar,
    model::{Field, FieldInput, Occasion, MAX_GUESTS, MIN_GUESTS},
    router::{Navigation, Route},
    view,
    workflow::{BookingWorkflow, Submission},
};

/// Проводит пользователя через форму бронирования.
///
/// Сначала запрашиваются все поля, после неудачной отправки только поля
/// с ошибками. Возвращает переход, которым закончилась работа с формой.
pub fn book(workflow: &mut BookingWorkflow) -> anyhow::Result<Navigation> {
    let mut fields: Vec<Field> = all::<Field>().collect();

    println!("Reserve a Table");

    loop {
        for field in fields.iter() {
            match ask(workflow, *field) {
                Ok(Some(input)) => workflow.change(input),
                Ok(None) => {}
                Err(InquireError::OperationInterrupted) => {
                    debug!("Пользователь ушёл с формы, черновик отброшен");
                    return Ok(Navigation::to(Route::Home));
                }
                Err(e) => return Err(e.into()),
            }
        }

        match workflow.submit() {
            Submission::Invalid => {
                eprint!("{}", view::errors(workflow.errors()));
                fields = workflow.errors().fields();
            }
            Submission::Accepted(nav) => return Ok(nav),
            Submission::Failed(notice) => {
                eprintln!("{}", notice);

                let retry = Confirm::new("Try again?").with_default(true).prompt()?;
                if !retry {
                    return Ok(Navigation::to(Route::Home));
                }

                // Повторяем отправку того же черновика.
                fields = Vec::new();
            }
        }
    }
}

/// Применяет заранее заданные значения полей и отправляет форму один раз.
pub fn book_with(
    workflow: &mut BookingWorkflow,
    inputs: Vec<FieldInput>,
) -> anyhow::Result<Navigation> {
    for input in inputs {
        workflow.change(input);
    }

    // Флаг --time заменяет выбор из списка, поэтому время должно быть одним
    // из слотов на выбранную дату. Пустое значение оставляем валидатору.
    let time = &workflow.form().draft().time;
    if !time.is_empty() && !workflow.available_times().contains(time) {
        let offered: Vec<String> = workflow
            .available_times()
            .iter()
            .map(|s| s.to_string())
            .collect();

        return Err(anyhow!(
            "time \"{}\" is not available, choose one of: {}",
            time,
            offered.join(", ")
        ));
    }

    match workflow.submit() {
        Submission::Accepted(nav) => Ok(nav),
        Submission::Invalid => {
            eprint!("{}", view::errors(workflow.errors()));
            Err(anyhow!("reservation form has errors"))
        }
        Submission::Failed(notice) => Err(anyhow!(notice)),
    }
}

fn ask(workflow: &BookingWorkflow, field: Field) -> Result<Option<FieldInput>, InquireError> {
    let draft = workflow.form().draft();

    let input = match field {
        Field::Date => {
            let default = calendar::parse(&draft.date).unwrap_or_else(|_| workflow.today());

            let date = DateSelect::new("Choose date")
                .with_default(default)
                .with_week_start(Weekday::Sun)
                .with_help_message("Esc to leave empty")
                .prompt_skippable()?;

            Some(FieldInput::Date(
                date.map(calendar::format).unwrap_or_default(),
            ))
        }
        Field::Time => {
            let options: Vec<String> = workflow
                .available_times()
                .iter()
                .map(|s| s.to_string())
                .collect();

            let cursor = options.iter().position(|t| *t == draft.time).unwrap_or(0);

            let time = Select::new("Choose time", options)
                .with_starting_cursor(cursor)
                .with_help_message("Esc to leave empty")
                .prompt_skippable()?;

            Some(FieldInput::Time(time.unwrap_or_default()))
        }
        Field::Guests => {
            let current = draft.guests.to_string();
            let help = format!("From {} to {}", MIN_GUESTS, MAX_GUESTS);

            let guests = Text::new("Number of guests")
                .with_default(&current)
                .with_help_message(&help)
                .prompt_skippable()?;

            guests.map(FieldInput::Guests)
        }
        Field::Occasion => {
            let options: Vec<Occasion> = all::<Occasion>().collect();
            let cursor = options
                .iter()
                .position(|o| *o == draft.occasion)
                .unwrap_or(0);

            let occasion = Select::new("Occasion", options)
                .with_starting_cursor(cursor)
                .prompt_skippable()?;

            occasion.map(FieldInput::Occasion)
        }
    };

    Ok(input)
}
