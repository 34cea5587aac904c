use std::fmt::Write;

use crate::{
    calendar,
    model::ConfirmedReservation,
    router::{Navigation, Route},
    validator::ValidationErrors,
};

/// Рисует страницу, на которую ведёт переход.
pub fn render(nav: &Navigation, restaurant_name: &str) -> String {
    match nav.route {
        Route::Home => home(restaurant_name),
        Route::Booking => link("Reserve a Table", Route::Booking),
        Route::Confirmation => confirmation(nav.state.as_ref()),
    }
}

pub fn home(restaurant_name: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", restaurant_name);
    let _ = writeln!(out);
    let _ = write!(out, "{}", link("Reserve a Table", Route::Booking));

    out
}

/// Страница подтверждения.
///
/// Без брони показывает заглушку со ссылкой на форму. Это штатная ситуация
/// при прямом переходе на страницу.
pub fn confirmation(booking: Option<&ConfirmedReservation>) -> String {
    let mut out = String::new();

    let Some(booking) = booking else {
        let _ = writeln!(out, "No Booking Found");
        let _ = writeln!(out, "Please make a reservation first.");
        let _ = write!(out, "{}", link("Make a Reservation", Route::Booking));
        return out;
    };

    let _ = writeln!(out, "✓ Booking Confirmed!");
    let _ = writeln!(out, "Your table has been reserved successfully.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Reservation Details");
    let _ = writeln!(out, "  Date:     {}", calendar::long_form(booking.date()));
    let _ = writeln!(out, "  Time:     {}", booking.time());
    let _ = writeln!(out, "  Guests:   {}", guests(booking.guests()));
    let _ = writeln!(out, "  Occasion: {}", booking.occasion());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "A confirmation email has been sent to you. We look forward to seeing you!"
    );
    let _ = write!(out, "{}", link("Return to Home", Route::Home));

    out
}

/// Ошибки формы, по одной на строку.
pub fn errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();

    for (field, err) in errors.iter() {
        let _ = writeln!(out, "  {}: {}", field, err);
    }

    out
}

fn guests(count: i32) -> String {
    match count {
        1 => "1 person".to_owned(),
        n => format!("{} people", n),
    }
}

/// Ссылка на страницу в виде команды, которая её открывает.
fn link(title: &str, route: Route) -> String {
    let command = match route {
        Route::Home => "home",
        Route::Booking => "book",
        Route::Confirmation => "confirmation",
    };

    format!("→ {}: {} {}\n", title, env!("CARGO_PKG_NAME"), command)
}
