mod api;
mod availability;
mod calendar;
mod cli;
mod config;
mod form;
mod macros;
mod model;
mod router;
mod submission;
mod validator;
mod view;
mod workflow;

use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::debug;
use model::{FieldInput, Occasion};
use router::{Navigation, Route};
use workflow::BookingWorkflow;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Shows the home page")]
    #[command(long_about = None)]
    Home(PageArgs),

    #[command(about = "Reserve a table")]
    #[command(long_about = None)]
    Book(BookArgs),

    #[command(about = "Shows the booking confirmation page")]
    #[command(long_about = None)]
    Confirmation(PageArgs),
}

#[derive(clap::Args)]
struct PageArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,
}

#[derive(clap::Args)]
struct BookArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    /// Date in YYYY-MM-DD format.
    #[arg(long)]
    date: Option<String>,

    /// Time slot in HH:MM format.
    #[arg(long)]
    time: Option<String>,

    /// Number of guests.
    #[arg(long)]
    guests: Option<String>,

    /// Birthday, Anniversary, Engagement, Business or Other.
    #[arg(long)]
    occasion: Option<Occasion>,
}

impl BookArgs {
    /// Значения полей, переданные флагами.
    /// Пустой список означает, что форму нужно заполнить интерактивно.
    fn inputs(&self) -> Vec<FieldInput> {
        let mut inputs = Vec::new();

        if let Some(date) = &self.date {
            inputs.push(FieldInput::Date(date.clone()));
        }
        if let Some(time) = &self.time {
            inputs.push(FieldInput::Time(time.clone()));
        }
        if let Some(guests) = &self.guests {
            inputs.push(FieldInput::Guests(guests.clone()));
        }
        if let Some(occasion) = self.occasion {
            inputs.push(FieldInput::Occasion(occasion));
        }

        inputs
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Home(args) => {
            let cfg = load_config(args.config_path)?;

            print!("{}", view::render(&Navigation::to(Route::Home), &cfg.restaurant_name));
        }
        Cli::Book(args) => {
            let cfg = load_config(args.config_path.clone())?;

            let (availability, api) = config::backends(&cfg)?;
            let mut workflow = BookingWorkflow::new(availability, api)?;

            let inputs = args.inputs();

            let nav = if inputs.is_empty() {
                cli::book(&mut workflow)?
            } else {
                cli::book_with(&mut workflow, inputs)?
            };

            print!("{}", view::render(&nav, &cfg.restaurant_name));
        }
        Cli::Confirmation(args) => {
            let cfg = load_config(args.config_path)?;

            // Прямой переход: брони в состоянии нет.
            print!(
                "{}",
                view::render(&Navigation::to(Route::Confirmation), &cfg.restaurant_name)
            );
        }
    };

    Ok(())
}

fn load_config(path: PathBuf) -> anyhow::Result<config::Config> {
    debug!("Подгружаем конфиг из {:?}", path);
    config::load(path)
}
