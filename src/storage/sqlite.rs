//! `SQLite` store backends.
//!
//! Durable storage for both services, one database file per service. Each
//! backend owns a `Mutex<Connection>` because `rusqlite::Connection` is not
//! `Sync`; WAL mode and the `busy_timeout` pragma handle concurrent access
//! gracefully. Sequence-valued columns (genres, cast ids) are stored as JSON
//! text.

use super::traits::{CastStore, MovieStore};
use crate::models::{Cast, CastId, Movie, MovieId, NewCast, NewMovie};
use crate::{Error, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::instrument;

/// Applies the pragmas both backends rely on.
///
/// `journal_mode` returns a string result, so the pragma results are ignored
/// rather than executed as a batch.
fn configure_connection(conn: &Connection) {
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    // Wait up to 5 seconds on lock contention instead of failing with
    // SQLITE_BUSY.
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}

/// Acquires the connection lock, recovering from poison.
///
/// A poisoned mutex means a previous critical section panicked; the
/// connection itself is still usable, so recover and log instead of
/// cascading the failure.
fn acquire_lock(mutex: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            poisoned.into_inner()
        },
    }
}

fn encode_json<T: serde::Serialize>(operation: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::operation_failed(operation, e))
}

fn decode_json<T: serde::de::DeserializeOwned>(operation: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::operation_failed(operation, e))
}

/// `SQLite`-backed cast store.
pub struct SqliteCastStore {
    conn: Mutex<Connection>,
}

impl SqliteCastStore {
    /// Opens (creating if needed) the cast database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::operation_failed("open_cast_db", e))?;
        Self::from_connection(conn)
    }

    /// Creates an in-memory cast store (useful for testing and ephemeral
    /// runs).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::operation_failed("open_cast_db_memory", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        configure_connection(&conn);
        conn.execute(
            "CREATE TABLE IF NOT EXISTS casts (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                nationality TEXT
            )",
            [],
        )
        .map_err(|e| Error::operation_failed("create_casts_table", e))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl CastStore for SqliteCastStore {
    #[instrument(skip(self, new))]
    async fn insert(&self, new: &NewCast) -> Result<CastId> {
        let conn = acquire_lock(&self.conn);
        conn.execute(
            "INSERT INTO casts (name, nationality) VALUES (?1, ?2)",
            params![new.name, new.nationality],
        )
        .map_err(|e| Error::operation_failed("insert_cast", e))?;

        Ok(CastId::new(conn.last_insert_rowid()))
    }

    async fn list(&self) -> Result<Vec<Cast>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare("SELECT id, name, nationality FROM casts ORDER BY id")
            .map_err(|e| Error::operation_failed("list_casts", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Cast {
                    id: CastId::new(row.get(0)?),
                    name: row.get(1)?,
                    nationality: row.get(2)?,
                })
            })
            .map_err(|e| Error::operation_failed("list_casts", e))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation_failed("list_casts", e))
    }

    async fn get(&self, id: CastId) -> Result<Option<Cast>> {
        let conn = acquire_lock(&self.conn);
        conn.query_row(
            "SELECT id, name, nationality FROM casts WHERE id = ?1",
            params![id.get()],
            |row| {
                Ok(Cast {
                    id: CastId::new(row.get(0)?),
                    name: row.get(1)?,
                    nationality: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(|e| Error::operation_failed("get_cast", e))
    }

    #[instrument(skip(self, cast))]
    async fn update(&self, id: CastId, cast: &Cast) -> Result<CastId> {
        let conn = acquire_lock(&self.conn);
        conn.execute(
            "UPDATE casts SET name = ?1, nationality = ?2 WHERE id = ?3",
            params![cast.name, cast.nationality, id.get()],
        )
        .map_err(|e| Error::operation_failed("update_cast", e))?;

        Ok(id)
    }
}

/// `SQLite`-backed movie store.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Opens (creating if needed) the movie database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::operation_failed("open_movie_db", e))?;
        Self::from_connection(conn)
    }

    /// Creates an in-memory movie store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::operation_failed("open_movie_db_memory", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        configure_connection(&conn);
        conn.execute(
            "CREATE TABLE IF NOT EXISTS movies (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                name     TEXT NOT NULL,
                plot     TEXT NOT NULL,
                genres   TEXT NOT NULL,
                cast_ids TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| Error::operation_failed("create_movies_table", e))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn movie_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, String, String)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    }

    fn decode_movie(raw: (i64, String, String, String, String)) -> Result<Movie> {
        let (id, name, plot, genres, cast_ids) = raw;
        Ok(Movie {
            id: MovieId::new(id),
            name,
            plot,
            genres: decode_json("decode_genres", &genres)?,
            cast_ids: decode_json("decode_cast_ids", &cast_ids)?,
        })
    }
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    #[instrument(skip(self, new))]
    async fn insert(&self, new: &NewMovie) -> Result<MovieId> {
        let genres = encode_json("encode_genres", &new.genres)?;
        let cast_ids = encode_json("encode_cast_ids", &new.cast_ids)?;

        let conn = acquire_lock(&self.conn);
        conn.execute(
            "INSERT INTO movies (name, plot, genres, cast_ids) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.plot, genres, cast_ids],
        )
        .map_err(|e| Error::operation_failed("insert_movie", e))?;

        Ok(MovieId::new(conn.last_insert_rowid()))
    }

    async fn list(&self) -> Result<Vec<Movie>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare("SELECT id, name, plot, genres, cast_ids FROM movies ORDER BY id")
            .map_err(|e| Error::operation_failed("list_movies", e))?;

        let rows = stmt
            .query_map([], Self::movie_from_row)
            .map_err(|e| Error::operation_failed("list_movies", e))?;

        let raw = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation_failed("list_movies", e))?;

        raw.into_iter().map(Self::decode_movie).collect()
    }

    async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        let conn = acquire_lock(&self.conn);
        let raw = conn
            .query_row(
                "SELECT id, name, plot, genres, cast_ids FROM movies WHERE id = ?1",
                params![id.get()],
                Self::movie_from_row,
            )
            .optional()
            .map_err(|e| Error::operation_failed("get_movie", e))?;

        raw.map(Self::decode_movie).transpose()
    }

    #[instrument(skip(self, movie))]
    async fn update(&self, id: MovieId, movie: &Movie) -> Result<MovieId> {
        let genres = encode_json("encode_genres", &movie.genres)?;
        let cast_ids = encode_json("encode_cast_ids", &movie.cast_ids)?;

        let conn = acquire_lock(&self.conn);
        conn.execute(
            "UPDATE movies SET name = ?1, plot = ?2, genres = ?3, cast_ids = ?4 WHERE id = ?5",
            params![movie.name, movie.plot, genres, cast_ids, id.get()],
        )
        .map_err(|e| Error::operation_failed("update_movie", e))?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MovieId) -> Result<bool> {
        let conn = acquire_lock(&self.conn);
        let affected = conn
            .execute("DELETE FROM movies WHERE id = ?1", params![id.get()])
            .map_err(|e| Error::operation_failed("delete_movie", e))?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie_payload() -> NewMovie {
        NewMovie {
            name: "The Rise of Skywalker".to_string(),
            plot: "The resistance faces the First Order once again.".to_string(),
            genres: vec!["Action".to_string(), "Sci-Fi, sort of".to_string()],
            cast_ids: vec![CastId::new(1), CastId::new(2)],
        }
    }

    #[tokio::test]
    async fn test_cast_roundtrip() {
        let store = SqliteCastStore::in_memory().unwrap();
        let id = store
            .insert(&NewCast {
                name: "Daisy Ridley".to_string(),
                nationality: Some("British".to_string()),
            })
            .await
            .unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Daisy Ridley");
        assert_eq!(fetched.nationality.as_deref(), Some("British"));

        let updated = Cast {
            nationality: None,
            ..fetched
        };
        store.update(id, &updated).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().unwrap().nationality, None);
    }

    #[tokio::test]
    async fn test_movie_roundtrip_preserves_sequences() {
        // A genre containing a comma survives the JSON column encoding.
        let store = SqliteMovieStore::in_memory().unwrap();
        let payload = sample_movie_payload();
        let id = store.insert(&payload).await.unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.genres, payload.genres);
        assert_eq!(fetched.cast_ids, payload.cast_ids);
    }

    #[tokio::test]
    async fn test_ids_autoincrement_from_one() {
        let store = SqliteMovieStore::in_memory().unwrap();
        let first = store.insert(&sample_movie_payload()).await.unwrap();
        let second = store.insert(&sample_movie_payload()).await.unwrap();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let store = SqliteMovieStore::in_memory().unwrap();
        let id = store.insert(&sample_movie_payload()).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_on_disk_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casts.db");

        let id = {
            let store = SqliteCastStore::new(&path).unwrap();
            store
                .insert(&NewCast {
                    name: "Adam Driver".to_string(),
                    nationality: None,
                })
                .await
                .unwrap()
        };

        let reopened = SqliteCastStore::new(&path).unwrap();
        let fetched = reopened.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Adam Driver");
    }
}
