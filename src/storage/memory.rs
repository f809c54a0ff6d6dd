//! In-memory store backends.
//!
//! Used by the test suites and by ephemeral service runs. Each store is an
//! explicit value handed to the handlers, never a module-level singleton, so
//! independent instances stay independent.

use super::traits::{CastStore, MovieStore};
use crate::models::{Cast, CastId, Movie, MovieId, NewCast, NewMovie};
use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Id-keyed table with a monotonically increasing id counter.
///
/// Ids start at 1 and are never reused, matching the autoincrement behavior
/// of the persistent backend.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Table<T> {
    const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory cast store.
pub struct MemoryCastStore {
    table: Mutex<Table<Cast>>,
}

impl MemoryCastStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for MemoryCastStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CastStore for MemoryCastStore {
    async fn insert(&self, new: &NewCast) -> Result<CastId> {
        let mut table = lock(&self.table);
        let id = CastId::new(table.allocate_id());
        table.rows.insert(id.get(), Cast::from_new(id, new.clone()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Cast>> {
        Ok(lock(&self.table).rows.values().cloned().collect())
    }

    async fn get(&self, id: CastId) -> Result<Option<Cast>> {
        Ok(lock(&self.table).rows.get(&id.get()).cloned())
    }

    async fn update(&self, id: CastId, cast: &Cast) -> Result<CastId> {
        lock(&self.table).rows.insert(id.get(), cast.clone());
        Ok(id)
    }
}

/// In-memory movie store.
pub struct MemoryMovieStore {
    table: Mutex<Table<Movie>>,
}

impl MemoryMovieStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for MemoryMovieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, new: &NewMovie) -> Result<MovieId> {
        let mut table = lock(&self.table);
        let id = MovieId::new(table.allocate_id());
        table
            .rows
            .insert(id.get(), Movie::from_new(id, new.clone()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Movie>> {
        Ok(lock(&self.table).rows.values().cloned().collect())
    }

    async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(lock(&self.table).rows.get(&id.get()).cloned())
    }

    async fn update(&self, id: MovieId, movie: &Movie) -> Result<MovieId> {
        lock(&self.table).rows.insert(id.get(), movie.clone());
        Ok(id)
    }

    async fn delete(&self, id: MovieId) -> Result<bool> {
        Ok(lock(&self.table).rows.remove(&id.get()).is_some())
    }
}

/// Acquires the table lock, recovering from poison.
fn lock<T>(mutex: &Mutex<Table<T>>) -> std::sync::MutexGuard<'_, Table<T>> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("in-memory table mutex was poisoned, recovering");
            poisoned.into_inner()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryCastStore::new();
        let first = store
            .insert(&NewCast {
                name: "Daisy Ridley".to_string(),
                nationality: Some("British".to_string()),
            })
            .await
            .unwrap();
        let second = store
            .insert(&NewCast {
                name: "Adam Driver".to_string(),
                nationality: None,
            })
            .await
            .unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryCastStore::new();
        assert_eq!(store.get(CastId::new(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_overwrites_row() {
        let store = MemoryCastStore::new();
        let id = store
            .insert(&NewCast {
                name: "Daisy Ridley".to_string(),
                nationality: None,
            })
            .await
            .unwrap();

        let updated = Cast {
            id,
            name: "Daisy Ridley".to_string(),
            nationality: Some("British".to_string()),
        };
        store.update(id, &updated).await.unwrap();

        assert_eq!(store.get(id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = MemoryMovieStore::new();
        let id = store
            .insert(&NewMovie {
                name: "Solo".to_string(),
                plot: "A heist.".to_string(),
                genres: vec![],
                cast_ids: vec![],
            })
            .await
            .unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert_eq!(store.get(id).await.unwrap(), None);
    }
}
