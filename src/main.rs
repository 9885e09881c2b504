mod cli;
mod config;
mod countdown;
mod error;
mod logging;
mod paths;
mod plain;
mod tui;
mod util;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, EventArgs};
use config::AppConfig;
use countdown::{PhaseCountdown, RingScale, Schedule};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Command::Watch {
        event: EventArgs::default(),
        plain: false,
    }) {
        Command::Watch { event, plain } => {
            if plain {
                logging::init_stderr();
            } else {
                logging::init_file(&paths::log_file())?;
            }

            let config = load(config_path, event)?;
            let mut countdown = build_countdown(&config);

            if plain {
                let tick = Duration::from_millis(config.display.tick_ms);
                return plain::watch(&mut countdown, tick);
            }

            let mut terminal = tui::init().context("Failed to initialize terminal")?;
            let result = tui::screens::countdown::run(&mut terminal, &mut countdown, &config);
            tui::restore().context("Failed to restore terminal")?;
            result
        }

        Command::Status { event, at, json } => {
            logging::init_stderr();
            let config = load(config_path, event)?;
            let countdown = build_countdown(&config);
            let now = util::resolve_now(at.as_deref())?;
            let state = countdown.evaluate(now);

            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                plain::print_status(&config.event.name, countdown.schedule(), &state);
            }
            Ok(())
        }

        Command::Until { target } => {
            logging::init_stderr();
            let config = config::load_config(config_path)?;
            let target = countdown::schedule::parse_timestamp("target", &target)?;
            plain::until(target, Duration::from_millis(config.display.tick_ms))
        }

        Command::Init { force } => {
            let path = config_path
                .map(|p| p.to_path_buf())
                .unwrap_or_else(paths::config_file);
            config::write_default_config(&path, force)?;
            println!("Wrote {}", path.display());
            Ok(())
        }

        Command::Paths => {
            println!("Config: {}", paths::config_file().display());
            println!("Log:    {}", paths::log_file().display());
            Ok(())
        }
    }
}

fn load(path: Option<&std::path::Path>, event: EventArgs) -> Result<AppConfig> {
    let mut config = config::load_config(path)?;
    config.apply(event.into());
    Ok(config)
}

fn build_countdown(config: &AppConfig) -> PhaseCountdown {
    let schedule = Schedule::from_config(&config.event);
    PhaseCountdown::new(schedule, RingScale::from(&config.rings))
}
