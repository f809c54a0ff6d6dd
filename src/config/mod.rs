//! Configuration management.
//!
//! Each service reads its settings from the process environment with
//! hardcoded local defaults; `.env` files are loaded by the binary before
//! configs are built. CLI flags override via the `with_*` builders.

use std::path::PathBuf;

/// Default port of the cast registry service.
const DEFAULT_CAST_PORT: u16 = 8002;

/// Default port of the movie catalog service.
const DEFAULT_MOVIE_PORT: u16 = 8001;

/// Default cast database path.
const DEFAULT_CAST_DATABASE: &str = "casts.db";

/// Default movie database path.
const DEFAULT_MOVIE_DATABASE: &str = "movies.db";

/// Default base URL of the cast service's read endpoint.
const DEFAULT_CAST_SERVICE_URL: &str = "http://localhost:8002/api/v1/casts/";

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Configuration for the cast registry service.
#[derive(Debug, Clone)]
pub struct CastServiceConfig {
    /// Port to bind on.
    pub port: u16,
    /// Path to the `SQLite` database. `:memory:` selects an ephemeral
    /// in-memory store.
    pub database_path: PathBuf,
}

impl Default for CastServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_CAST_PORT,
            database_path: PathBuf::from(DEFAULT_CAST_DATABASE),
        }
    }
}

impl CastServiceConfig {
    /// Creates config from environment variables.
    ///
    /// Reads `CAST_SERVICE_PORT` and `CAST_DATABASE_PATH`, falling back to
    /// the local defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("CAST_SERVICE_PORT").unwrap_or(DEFAULT_CAST_PORT),
            database_path: std::env::var("CAST_DATABASE_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_CAST_DATABASE), PathBuf::from),
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}

/// Configuration for the movie catalog service.
#[derive(Debug, Clone)]
pub struct MovieServiceConfig {
    /// Port to bind on.
    pub port: u16,
    /// Path to the `SQLite` database. `:memory:` selects an ephemeral
    /// in-memory store.
    pub database_path: PathBuf,
    /// Base URL of the cast service's read endpoint, trailing slash
    /// included.
    pub cast_service_url: String,
}

impl Default for MovieServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_MOVIE_PORT,
            database_path: PathBuf::from(DEFAULT_MOVIE_DATABASE),
            cast_service_url: DEFAULT_CAST_SERVICE_URL.to_string(),
        }
    }
}

impl MovieServiceConfig {
    /// Creates config from environment variables.
    ///
    /// Reads `MOVIE_SERVICE_PORT`, `MOVIE_DATABASE_PATH` and
    /// `CAST_SERVICE_HOST_URL`, falling back to the local defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("MOVIE_SERVICE_PORT").unwrap_or(DEFAULT_MOVIE_PORT),
            database_path: std::env::var("MOVIE_DATABASE_PATH")
                .map_or_else(|_| PathBuf::from(DEFAULT_MOVIE_DATABASE), PathBuf::from),
            cast_service_url: std::env::var("CAST_SERVICE_HOST_URL")
                .unwrap_or_else(|_| DEFAULT_CAST_SERVICE_URL.to_string()),
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Sets the cast service base URL.
    #[must_use]
    pub fn with_cast_service_url(mut self, url: impl Into<String>) -> Self {
        self.cast_service_url = url.into();
        self
    }
}
