//! Runtime configuration loaded from environment variables.

/// Default SQLite database file.
pub const DEFAULT_DATABASE: &str = "vouchers.db";

/// Configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `VOUCHERS_DATABASE` — SQLite database path (default: `"vouchers.db"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database: lookup("VOUCHERS_DATABASE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database),
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Replaces the database path when one is given explicitly.
    pub fn with_database(mut self, database: Option<String>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            log_level: "info".to_string(),
        }
    }
}
