//! Referential validation against the cast registry.
//!
//! The movie service gates its writes on every referenced cast id resolving
//! to an existing cast. Existence is probed through the cast service's
//! read-by-id endpoint, one request per id, in the order supplied, stopping
//! at the first id that does not resolve.

use crate::models::CastId;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborator that can answer whether a cast id resolves.
///
/// The HTTP implementation is [`HttpCastClient`]; tests substitute fakes.
#[async_trait]
pub trait ReferenceChecker: Send + Sync {
    /// Returns whether the given cast id currently exists.
    async fn cast_exists(&self, id: CastId) -> Result<bool>;
}

/// Checks cast existence over HTTP against the cast service.
///
/// An id exists iff `GET {base_url}{id}/` answers a success status. Any
/// non-success status, and any transport-level failure, counts as "does
/// not exist", matching the historical behavior of the system; transport
/// failures are logged at `warn` so they remain distinguishable in the logs.
/// No request timeout is configured beyond the client's default.
pub struct HttpCastClient {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Base URL of the cast service's read endpoint, with trailing slash.
    base_url: String,
}

impl HttpCastClient {
    /// Creates a client probing the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReferenceChecker for HttpCastClient {
    async fn cast_exists(&self, id: CastId) -> Result<bool> {
        let url = format!("{}{}/", self.base_url, id);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(err) => {
                // The transport failure is collapsed into "does not exist"
                // for the caller; see DESIGN.md.
                tracing::warn!(%url, error = %err, "cast service request failed");
                Ok(false)
            },
        }
    }
}

/// Validates that referenced cast ids exist, fail-fast.
#[derive(Clone)]
pub struct ReferentialValidator {
    /// The existence probe.
    checker: Arc<dyn ReferenceChecker>,
}

impl ReferentialValidator {
    /// Creates a validator over the given checker.
    #[must_use]
    pub fn new(checker: Arc<dyn ReferenceChecker>) -> Self {
        Self { checker }
    }

    /// Returns the first id, in supplied order, that does not resolve.
    ///
    /// Ids after the first missing one are never probed.
    ///
    /// # Errors
    ///
    /// Propagates checker failures that are not expressible as "missing".
    pub async fn first_missing(&self, cast_ids: &[CastId]) -> Result<Option<CastId>> {
        for &id in cast_ids {
            if !self.checker.cast_exists(id).await? {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Returns whether every id resolves.
    ///
    /// # Errors
    ///
    /// Propagates checker failures that are not expressible as "missing".
    pub async fn all_exist(&self, cast_ids: &[CastId]) -> Result<bool> {
        Ok(self.first_missing(cast_ids).await?.is_none())
    }

    /// Errors with [`Error::NotFound`] naming the first missing id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if any id does not resolve, or propagates
    /// checker failures.
    pub async fn ensure_all_exist(&self, cast_ids: &[CastId]) -> Result<()> {
        match self.first_missing(cast_ids).await? {
            Some(id) => Err(Error::NotFound {
                entity: "Cast",
                id: id.get(),
            }),
            None => Ok(()),
        }
    }
}
