use std::sync::Arc;

use clap::{CommandFactory, Parser};
use copa_app::{AppSettings, build_application};
use copa_notify_log::LogNotificationAdapter;
use copa_persistence_json::JsonFileStore;

use crate::{cli::Cli, config::Config};

mod cli;
mod config;
mod logs;

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if let Err(e) = logs::init_logger(&config.log) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Failed to print help: {}", e);
        }
        return;
    };

    log::debug!("Using data directory {:?}", config.data_dir);
    let store = Arc::new(JsonFileStore::new(config.data_dir));
    let notification_port = Arc::new(LogNotificationAdapter::new());
    let settings = AppSettings {
        organizer_email: config.organizer_email,
    };
    let app = build_application(store, notification_port, settings);

    match cli::run(&app, command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            println!("Erro: {}", e);
        }
    }
}
