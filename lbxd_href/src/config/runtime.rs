// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserPreferences {
    /// Fixed "current year" for the year-in-review range (otherwise the clock is read)
    pub current_year_override: Option<i32>,

    /// Whether filter values are checked against the known vocabularies
    pub strict_values: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            current_year_override: env::var(env_vars::PARSER_CURRENT_YEAR)
                .ok()
                .and_then(|v| v.parse().ok()),
            strict_values: env::var(env_vars::PARSER_STRICT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl ParserPreferences {
    /// Parser options honouring the year override
    pub fn parse_options(&self) -> crate::syntax::ParseOptions {
        match self.current_year_override {
            Some(year) => crate::syntax::ParseOptions::for_year(year),
            None => crate::syntax::ParseOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPreferences {
    /// Worker thread count override for parallel batches
    pub worker_threads: Option<usize>,

    /// Whether to print per-file progress lines
    pub progress_reporting: bool,
}

impl Default for BatchPreferences {
    fn default() -> Self {
        Self {
            worker_threads: env::var(env_vars::BATCH_THREADS)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|threads: &usize| *threads > 0),
            progress_reporting: env::var(env_vars::BATCH_PROGRESS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level, capped by the build profile
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub parser: ParserPreferences,
    pub batch: BatchPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Parser
    pub const PARSER_CURRENT_YEAR: &str = "LBXD_CURRENT_YEAR";
    pub const PARSER_STRICT: &str = "LBXD_STRICT";

    // Batch
    pub const BATCH_THREADS: &str = "LBXD_BATCH_THREADS";
    pub const BATCH_PROGRESS: &str = "LBXD_BATCH_PROGRESS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LBXD_LOG_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LBXD_LOG_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LBXD_LOG_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "LBXD_LOG_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "LBXD_LOG_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_year_override_feeds_parse_options() {
        let prefs = ParserPreferences {
            current_year_override: Some(2016),
            strict_values: false,
        };
        assert_eq!(prefs.parse_options().current_year, 2016);
    }

    #[test]
    fn test_env_var_names_are_namespaced() {
        for name in [
            env_vars::PARSER_CURRENT_YEAR,
            env_vars::BATCH_THREADS,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("LBXD_"));
        }
    }
}
