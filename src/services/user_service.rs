use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::user::{NewUser, User};
use crate::database::user_store::UserStore;
use crate::validation::UserPatch;

/// Orchestrates validated input with the user store.
///
/// Holds no state between calls; cloning shares the underlying store.
/// `Ok(None)` / `Ok(false)` mean "no live user with that id" and are kept
/// apart from store failures, which come back as `Err`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.store.list_live().await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.store.find_by_id(id).await
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let created = self.store.insert(&user).await?;
        tracing::info!("Created user {}", created.id);
        Ok(created)
    }

    pub async fn update_user(&self, id: i64, user: NewUser) -> Result<Option<User>, DatabaseError> {
        self.store.replace(id, &user).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<bool, DatabaseError> {
        let deleted = self.store.soft_delete(id).await?;
        if deleted {
            tracing::info!("Soft-deleted user {}", id);
        }
        Ok(deleted)
    }

    /// Read the live row, overlay the patch, write all five fields back.
    ///
    /// The read and the write are separate statements with no lock between
    /// them: two concurrent patches of the same user can each read the same
    /// pre-image, and the later write wins.
    pub async fn partial_update_user(
        &self,
        id: i64,
        patch: UserPatch,
    ) -> Result<Option<User>, DatabaseError> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        let merged = patch.apply_to(existing.fields());
        self.store.replace(id, &merged).await
    }
}
