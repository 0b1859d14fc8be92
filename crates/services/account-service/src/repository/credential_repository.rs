//! Credential store gateway.
//!
//! Pure I/O boundary over the `registered_accounts` table: one keyed read and
//! one keyed delete. No business logic lives here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::debug;

use super::entities::registered_account::{self, Entity as AccountEntity};
use common::{AppError, AppResult};
use domain::CredentialRecord;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the record stored under a lowercase key
    async fn find_by_key(&self, lowercase_key: &str) -> AppResult<Option<CredentialRecord>>;

    /// Permanently delete the record stored under a lowercase key.
    ///
    /// Deleting a key that is already absent succeeds.
    async fn delete_by_key(&self, lowercase_key: &str) -> AppResult<()>;
}

/// Concrete implementation of CredentialRepository backed by SeaORM
pub struct CredentialStore {
    db: Arc<DatabaseConnection>,
    read_timeout: Duration,
}

impl CredentialStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>, read_timeout: Duration) -> Self {
        Self { db, read_timeout }
    }
}

#[async_trait]
impl CredentialRepository for CredentialStore {
    async fn find_by_key(&self, lowercase_key: &str) -> AppResult<Option<CredentialRecord>> {
        let query = AccountEntity::find()
            .filter(registered_account::Column::LowercaseKey.eq(lowercase_key))
            .one(self.db.as_ref());

        let result = tokio::time::timeout(self.read_timeout, query)
            .await
            .map_err(|_| AppError::timeout("credential lookup"))?
            .map_err(AppError::from)?;

        Ok(result.map(CredentialRecord::from))
    }

    async fn delete_by_key(&self, lowercase_key: &str) -> AppResult<()> {
        let result = AccountEntity::delete_many()
            .filter(registered_account::Column::LowercaseKey.eq(lowercase_key))
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            debug!(key = %lowercase_key, "Delete matched no credential record");
        }

        Ok(())
    }
}
