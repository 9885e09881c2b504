use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::EventOverrides;

#[derive(Parser)]
#[command(name = "eventclock")]
#[command(about = "Phased countdown to registration close, event start and problem reveal")]
pub struct Cli {
    /// Config file (defaults to the XDG config location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Live countdown with dot rings (the default)
    Watch {
        #[command(flatten)]
        event: EventArgs,

        /// One line per tick on stdout instead of the full-screen view
        #[arg(long)]
        plain: bool,
    },

    /// Print the current phase and time remaining, then exit
    Status {
        #[command(flatten)]
        event: EventArgs,

        /// Evaluate at this instant instead of now
        #[arg(long)]
        at: Option<String>,

        /// Print the render state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count down to a single instant
    Until {
        /// Target time (RFC 3339, YYYY-MM-DD HH:MM[:SS] local, or YYYY-MM-DD)
        target: String,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show where config and log files are stored
    Paths,
}

/// Per-run overrides for the configured event boundaries.
#[derive(Args, Default)]
pub struct EventArgs {
    /// Registration close time
    #[arg(long)]
    pub registration_end: Option<String>,

    /// Event start time
    #[arg(long)]
    pub event_start: Option<String>,

    /// Problem statement reveal time
    #[arg(long)]
    pub reveal_time: Option<String>,
}

impl From<EventArgs> for EventOverrides {
    fn from(args: EventArgs) -> Self {
        EventOverrides {
            registration_end: args.registration_end,
            event_start: args.event_start,
            reveal_time: args.reveal_time,
        }
    }
}
