//! Shared handler state and the per-request persistence scope.

use crate::error::ApiError;
use inventory_core::db::open_db;
use inventory_core::{ItemService, ServiceResult, SqliteItemRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared application state.
///
/// Holds only the database location; no item data or connection outlives a
/// request.
#[derive(Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs one service operation on a request-scoped connection.
    ///
    /// The connection is opened on a blocking worker and dropped when
    /// `operation` returns, on success and failure alike.
    pub async fn with_service<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&ItemService<SqliteItemRepository<'conn>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        let outcome = tokio::task::spawn_blocking(move || -> ServiceResult<T> {
            let conn = open_db(db_path.as_path()).map_err(inventory_core::RepoError::from)?;
            let service = ItemService::new(SqliteItemRepository::try_new(&conn)?);
            operation(&service)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("request worker failed: {err}")))?;

        Ok(outcome?)
    }
}
