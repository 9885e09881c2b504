use std::path::PathBuf;
use std::sync::OnceLock;

// Where eventclock keeps its files. Only two things live on disk: the TOML
// config (`eventclock init` writes it, every command reads it) and the log
// file the TUI writes to while it owns the terminal. Both sit in a directory
// named after the program inside the platform's config/data roots, falling
// back to the working directory when the platform reports none.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Holds the TUI log file.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventclock")
    })
}

/// Holds `config.toml`.
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventclock")
    })
}

/// Read by every command unless `--config` points elsewhere.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Log file used while the terminal UI owns the screen.
pub fn log_file() -> PathBuf {
    data_dir().join("eventclock.log")
}
