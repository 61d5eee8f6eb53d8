//! TuneSearch: media search client for the iTunes catalog
//!
//! Usage:
//!   tunesearch                         - Open the search window
//!   tunesearch search [--json] <term>  - Search once and print results
//!   tunesearch help                    - Show help

mod app;
mod backend;
mod commands;
mod config;
mod error;
mod ui;

use std::env;
use std::process::ExitCode;

use app::TuneSearch;
use backend::{SearchClient, SearchOutcome};
use commands::Command;
use config::Config;
use iced::{window, Size};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Logs go to stderr so `search` output stays pipeable
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = Config::load();
    let args: Vec<String> = env::args().skip(1).collect();

    match Command::parse(&args) {
        Command::Window => match start_window(config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Window error: {}", e);
                ExitCode::FAILURE
            }
        },
        Command::Search { term, json } => run_search(&config, &term, json),
        Command::Help => {
            println!("{}", Command::help_text());
            ExitCode::SUCCESS
        }
        Command::Unknown(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'tunesearch help' for usage");
            ExitCode::from(2)
        }
    }
}

fn run_search(config: &Config, term: &str, json: bool) -> ExitCode {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = SearchClient::new(config);
    let outcome = match rt.block_on(client.search(term)) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if outcome.is_failure() {
        eprintln!("Error: {}", outcome.summary());
        return ExitCode::FAILURE;
    }
    if outcome == SearchOutcome::NoResults && !json {
        eprintln!("{}", outcome.summary());
    }

    let records = outcome.into_results();
    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", commands::render_plain(&records));
    }

    ExitCode::SUCCESS
}

fn start_window(config: Config) -> iced::Result {
    tracing::info!("Opening search window (endpoint {})", config.endpoint);

    iced::application("TuneSearch", TuneSearch::update, TuneSearch::view)
        .subscription(TuneSearch::subscription)
        .theme(TuneSearch::theme)
        .window(window::Settings {
            size: Size::new(720.0, 520.0),
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || TuneSearch::new(&config))
}
