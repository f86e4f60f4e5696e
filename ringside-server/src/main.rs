mod auth;
mod config;
mod http;
mod logger;
mod matchmaker;
mod signal;
mod state;
mod store;
mod sweeper;

use std::path::PathBuf;

use clap::Parser;
use hyper::StatusCode;
use thiserror::Error;

use config::Config;
use state::State;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config::from_file(&args.config).await?.with_environment();
    logger::init(config.loglevel);

    log::info!("Using config: {:?}", config);

    let state = State::new(config)?;

    create_tables(&state).await?;

    sweeper::spawn(state.clone());

    {
        let shutdown = state.shutdown.clone();
        tokio::task::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for interrupt: {}", err);
                return;
            }

            log::info!("Received interrupt, shutting down");
            shutdown.terminate();
        });
    }

    let bind = state.config.bind;
    http::bind(bind, state).await?;

    Ok(())
}

async fn create_tables(state: &State) -> Result<(), Error> {
    let p = &state.store.table_prefix;

    let tables = [
        format!(
            "CREATE TABLE IF NOT EXISTS {p}events (id BIGINT UNSIGNED PRIMARY KEY, name VARCHAR(255) NOT NULL UNIQUE, data BLOB NOT NULL)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}event_settings (event_id BIGINT UNSIGNED PRIMARY KEY, data BLOB NOT NULL)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}registrations (id BIGINT UNSIGNED PRIMARY KEY, event_id BIGINT UNSIGNED NOT NULL, email VARCHAR(255) NOT NULL, data BLOB NOT NULL, UNIQUE KEY uniq_event_email (event_id, email))"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}brackets (id BIGINT UNSIGNED PRIMARY KEY, event_id BIGINT UNSIGNED NOT NULL, bracket_number INT UNSIGNED NOT NULL, status TINYINT UNSIGNED NOT NULL, fighters INT UNSIGNED NOT NULL, data BLOB NOT NULL, UNIQUE KEY uniq_event_number (event_id, bracket_number))"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}bouts (id BIGINT UNSIGNED PRIMARY KEY, bracket_id BIGINT UNSIGNED NOT NULL, bout_number INT UNSIGNED NOT NULL, data BLOB NOT NULL)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}fights (id BIGINT UNSIGNED PRIMARY KEY, bracket_id BIGINT UNSIGNED NOT NULL, bout_id BIGINT UNSIGNED NOT NULL, data BLOB NOT NULL)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}suspensions (id BIGINT UNSIGNED PRIMARY KEY, status TINYINT UNSIGNED NOT NULL, data BLOB NOT NULL)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {p}users (id BIGINT UNSIGNED PRIMARY KEY, name VARCHAR(255) NOT NULL UNIQUE, password TEXT NOT NULL, role TINYINT UNSIGNED NOT NULL)"
        ),
    ];

    for sql in tables {
        sqlx::query(&sql).execute(&state.store.pool).await?;
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("not found")]
    NotFound,
    #[error("bad request")]
    BadRequest,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    StatusCodeError(#[from] StatusCodeError),
}

/// An error that maps directly onto an http response with the given
/// status code and message.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct StatusCodeError {
    pub code: StatusCode,
    pub message: String,
}

impl StatusCodeError {
    pub fn new<T>(code: StatusCode, message: T) -> Self
    where
        T: ToString,
    {
        Self {
            code,
            message: message.to_string(),
        }
    }

    /// Replaces the default message.
    pub fn message<T>(mut self, message: T) -> Self
    where
        T: ToString,
    {
        self.message = message.to_string();
        self
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request")
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }

    pub fn conflict() -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict")
    }

    pub fn length_required() -> Self {
        Self::new(StatusCode::LENGTH_REQUIRED, "Length Required")
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
    }

    pub fn request_timeout() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request Timeout")
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}
