use crate::Result;

use idp_core::{NewUser, User};

use async_trait::async_trait;

/// User persistence as seen by the account services.
///
/// `insert` and `update_username` fail with `DbError::UniqueViolation` naming
/// the offending column when a uniqueness constraint rejects the write. Each
/// mutation commits or rolls back on its own.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: &NewUser) -> Result<User>;
    async fn update_username(&self, id: i64, username: &str) -> Result<User>;
}
