use std::net::SocketAddr;

use log::LevelFilter;

use super::logging::LogDestination;

const DEFAULT_BIND: &str = "0.0.0.0:5001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            log_destination: LogDestination::Terminal,
            log_level: LevelFilter::Info,
        }
    }
}

impl ServerConfig {
    /// Reads `SCANNER_BIND`, `SCANNER_LOG` and `SCANNER_LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or malformed values keep their defaults; the logger is not up yet,
    /// so problems go to stderr.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("SCANNER_BIND") {
            match raw.trim().parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(err) => eprintln!(
                    "Warning: ignoring SCANNER_BIND={raw:?} ({err}); using {DEFAULT_BIND}"
                ),
            }
        }

        if let Some(raw) = lookup("SCANNER_LOG") {
            match LogDestination::parse(&raw) {
                Some(destination) => config.log_destination = destination,
                None => eprintln!("Warning: ignoring SCANNER_LOG={raw:?}; using terminal"),
            }
        }

        if let Some(raw) = lookup("SCANNER_LOG_LEVEL") {
            match scanner_logging::parse_level(&raw) {
                Some(level) => config.log_level = level,
                None => eprintln!("Warning: ignoring SCANNER_LOG_LEVEL={raw:?}; using info"),
            }
        }

        config
    }
}
