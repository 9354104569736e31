//! tuido - a terminal todo client backed by a remote API

use std::process::ExitCode;

use clap::Parser;

mod app;
mod event;
mod transport;
mod ui;
mod views;

#[derive(Parser)]
#[command(name = "tuido")]
#[command(version, about = "A terminal todo client backed by a remote API")]
struct Args {
    /// Base URL of the todos API
    #[arg(long, env = "TUIDO_API_URL")]
    api_url: String,

    /// Numeric id of the user whose todos to manage
    #[arg(long, env = "TUIDO_USER")]
    user: Option<i64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let user = match args.user {
        Some(user) => user,
        None => {
            eprintln!("No user id configured.");
            eprintln!("Pass --user <ID> or set TUIDO_USER to open your todo list.");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app::run(&args.api_url, user) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
