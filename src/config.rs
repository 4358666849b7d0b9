use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::pages::DEFAULT_ITEMS_PER_PAGE;
use crate::sqlite::config::DEFAULT_SERVED_BY;
use crate::stats::{DEFAULT_LOG_CAPACITY, DEFAULT_MAX_SESSIONS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Northwind demo pages over SQLite with per-session query stats")]
pub struct Args {
    /// SQLite database file.
    #[arg(long, env = "NORTHWIND_DB", default_value = "northwind.db")]
    pub db: PathBuf,
    #[arg(long, env = "NORTHWIND_LISTEN", default_value = "127.0.0.1:8787")]
    pub listen: SocketAddr,
    /// Label reported as `served_by` for every statement.
    #[arg(long, env = "NORTHWIND_SERVED_BY", default_value = DEFAULT_SERVED_BY)]
    pub served_by: String,
    #[arg(long, env = "NORTHWIND_POOL_SIZE", default_value_t = 4)]
    pub pool_size: u32,
    #[arg(long, env = "NORTHWIND_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,
    #[arg(long, env = "NORTHWIND_ITEMS_PER_PAGE", default_value_t = DEFAULT_ITEMS_PER_PAGE)]
    pub items_per_page: u32,
    /// Activity log entries kept per session; 0 disables the log.
    #[arg(long, env = "NORTHWIND_LOG_CAPACITY", default_value_t = DEFAULT_LOG_CAPACITY)]
    pub log_capacity: usize,
    #[arg(long, env = "NORTHWIND_MAX_SESSIONS", default_value_t = DEFAULT_MAX_SESSIONS)]
    pub max_sessions: usize,
    /// Show database error text on error pages.
    #[arg(long, env = "NORTHWIND_EXPOSE_ERRORS")]
    pub expose_errors: bool,
    /// Create the schema and load demo rows into an empty database.
    #[arg(long, env = "NORTHWIND_SEED_DEMO")]
    pub seed_demo: bool,
    #[arg(long, env = "NORTHWIND_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Validated runtime settings.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub listen: SocketAddr,
    pub served_by: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
    pub items_per_page: u32,
    pub log_capacity: usize,
    pub max_sessions: usize,
    pub expose_errors: bool,
    pub seed_demo: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    #[must_use]
    pub fn from_args(args: Args) -> Self {
        Self {
            db_path: args.db,
            listen: args.listen,
            served_by: args.served_by,
            pool_size: args.pool_size.max(1),
            busy_timeout: Duration::from_millis(args.busy_timeout_ms),
            items_per_page: args.items_per_page.max(1),
            log_capacity: args.log_capacity,
            max_sessions: args.max_sessions.max(1),
            expose_errors: args.expose_errors,
            seed_demo: args.seed_demo,
            log_format: args.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let config = AppConfig::from_args(Args::parse_from(["northwind"]));
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.log_capacity, 100);
        assert_eq!(config.served_by, "primary");
        assert!(!config.expose_errors);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn zero_sizes_are_raised() {
        let args = Args::parse_from([
            "northwind",
            "--pool-size",
            "0",
            "--items-per-page",
            "0",
            "--max-sessions",
            "0",
            "--log-capacity",
            "0",
            "--log-format",
            "json",
            "--expose-errors",
        ]);
        let config = AppConfig::from_args(args);
        assert_eq!(config.pool_size, 1);
        assert_eq!(config.items_per_page, 1);
        assert_eq!(config.max_sessions, 1);
        assert_eq!(config.log_capacity, 0);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.expose_errors);
    }
}
