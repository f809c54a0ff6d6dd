//! Service startup.
//!
//! One function per service: build the store and collaborators from config,
//! assemble the axum application, then bind and serve on a fresh tokio
//! runtime until ctrl-c.

use crate::api::{self, CastState, MovieState};
use crate::config::{CastServiceConfig, MovieServiceConfig};
use crate::services::{HttpCastClient, ReferentialValidator};
use crate::storage::{
    CastStore, MemoryCastStore, MemoryMovieStore, MovieStore, SqliteCastStore, SqliteMovieStore,
};
use crate::{Error, Result};
use axum::Router;
use std::path::Path;
use std::sync::Arc;

/// Runs the cast registry service until shutdown.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the port cannot be
/// bound.
pub fn run_cast_service(config: &CastServiceConfig) -> Result<()> {
    let store = open_cast_store(&config.database_path)?;
    let app = api::cast_app(CastState { store });
    serve("cast-service", app, config.port)
}

/// Runs the movie catalog service until shutdown.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the port cannot be
/// bound.
pub fn run_movie_service(config: &MovieServiceConfig) -> Result<()> {
    let store = open_movie_store(&config.database_path)?;
    let checker = Arc::new(HttpCastClient::new(config.cast_service_url.clone()));
    let validator = ReferentialValidator::new(checker);

    tracing::info!(cast_service_url = %config.cast_service_url, "validating cast references against");

    let app = api::movie_app(MovieState { store, validator });
    serve("movie-service", app, config.port)
}

fn open_cast_store(path: &Path) -> Result<Arc<dyn CastStore>> {
    if is_ephemeral(path) {
        Ok(Arc::new(MemoryCastStore::new()))
    } else {
        Ok(Arc::new(SqliteCastStore::new(path)?))
    }
}

fn open_movie_store(path: &Path) -> Result<Arc<dyn MovieStore>> {
    if is_ephemeral(path) {
        Ok(Arc::new(MemoryMovieStore::new()))
    } else {
        Ok(Arc::new(SqliteMovieStore::new(path)?))
    }
}

fn is_ephemeral(path: &Path) -> bool {
    path.as_os_str() == ":memory:"
}

/// Binds the port and serves the application until ctrl-c.
fn serve(service: &'static str, app: Router, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::operation_failed("create_runtime", e))?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    rt.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::operation_failed("bind", e))?;

        tracing::info!(service, port, "listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::operation_failed("serve", e))
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
