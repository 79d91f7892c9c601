//! Shared per-request state: repository, metrics, token signer, uploads.
//!
//! One `AppState` is built at startup and cloned into every handler via the
//! `State` extractor. All members are `Arc`-backed or otherwise cheap to
//! clone.

use crate::auth::TokenSigner;
use crate::domain::{MetricsPtr, RepositoryPtr};
use crate::uploads::UploadStore;

/// Handlers depend on the `Repository` and `Metrics` abstractions here,
/// never on the concrete PostgreSQL or Prometheus implementations.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Marketplace persistence, backed by the PostgreSQL pool.
    repository: RepositoryPtr,

    /// Prometheus-backed in production, no-op in tests.
    metrics: MetricsPtr,

    /// Signs and verifies bearer tokens with the server secret.
    tokens: TokenSigner,

    /// Writes uploaded listing images to the static uploads directory.
    uploads: UploadStore,
}

impl AppState {
    // ---

    pub fn new(
        repository: RepositoryPtr,
        metrics: MetricsPtr,
        tokens: TokenSigner,
        uploads: UploadStore,
    ) -> Self {
        // ---
        AppState {
            repository,
            metrics,
            tokens,
            uploads,
        }
    }

    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    pub(crate) fn tokens(&self) -> &TokenSigner {
        // ---
        &self.tokens
    }

    pub(crate) fn uploads(&self) -> &UploadStore {
        // ---
        &self.uploads
    }
}

#[cfg(test)]
mod tests {
    // ---

    use super::*;
    use crate::domain::{
        CartItem, CartLine, Genre, NewRecord, Record, RecordWithGenre, Repository, User,
    };
    use crate::infrastructure::create_noop_metrics;
    use anyhow::Result;
    use std::sync::Arc;

    // Satisfies the Repository bound; no method is ever called here.
    struct MockRepository;

    #[async_trait::async_trait]
    impl Repository for MockRepository {
        // ---

        async fn create_user(&self, _username: &str, _hashed_password: &str) -> Result<User> {
            unimplemented!()
        }
        async fn get_user_by_username(&self, _username: &str) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn list_genres(&self) -> Result<Vec<Genre>> {
            unimplemented!()
        }
        async fn get_genre_name(&self, _genre_id: i64) -> Result<Option<String>> {
            unimplemented!()
        }
        async fn create_record(&self, _new: NewRecord) -> Result<Record> {
            unimplemented!()
        }
        async fn list_records(&self) -> Result<Vec<Record>> {
            unimplemented!()
        }
        async fn get_record_with_genre(&self, _record_id: i64) -> Result<Option<RecordWithGenre>> {
            unimplemented!()
        }
        async fn add_cart_item(&self, _user_id: i64, _record_id: i64) -> Result<CartItem> {
            unimplemented!()
        }
        async fn cart_for_user(&self, _user_id: i64) -> Result<Vec<CartLine>> {
            unimplemented!()
        }
        async fn remove_cart_item(&self, _user_id: i64, _items_id: i64) -> Result<Option<CartItem>> {
            unimplemented!()
        }
        async fn ping(&self) -> Result<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation_and_clone() {
        // ---
        // Test basic creation and that Clone works
        let repository = Arc::new(MockRepository);
        let metrics = create_noop_metrics().unwrap();
        let tokens = TokenSigner::new("test-secret");
        let uploads = UploadStore::new("public/images");

        let app_state = AppState::new(repository, metrics, tokens, uploads);
        let _cloned = app_state.clone();

        // Verify accessors work
        let _repo_ref = app_state.repository();
        let _metrics_ref = app_state.metrics();
        let _uploads_ref = app_state.uploads();
        assert!(app_state
            .tokens()
            .verify("definitely-not-a-token")
            .is_err());
    }
}
