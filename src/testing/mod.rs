//! Store implementations for tests and local runs without PostgreSQL.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::database::manager::DatabaseError;
use crate::database::models::user::{NewUser, User};
use crate::database::user_store::UserStore;

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<i64, User>,
    next_id: i64,
    writes: usize,
}

/// In-memory `UserStore` with the same live/deleted semantics as `PgUserStore`
#[derive(Default)]
pub struct MemoryUserStore {
    state: Mutex<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with rows; ids are assigned in order starting at 1
    pub fn with_users(users: impl IntoIterator<Item = NewUser>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for user in users {
                state.next_id += 1;
                let id = state.next_id;
                state.rows.insert(id, user.with_id(id));
            }
        }
        store
    }

    /// The stored row regardless of its deletion flag
    pub fn raw_row(&self, id: i64) -> Option<User> {
        self.lock().rows.get(&id).cloned()
    }

    /// Number of insert/replace/soft-delete statements that reached the store
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_live(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self
            .lock()
            .rows
            .values()
            .filter(|u| !u.is_deleted)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.lock().rows.get(&id).filter(|u| !u.is_deleted).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let mut state = self.lock();
        state.writes += 1;
        state.next_id += 1;
        let id = state.next_id;
        let created = user.clone().with_id(id);
        state.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn replace(&self, id: i64, user: &NewUser) -> Result<Option<User>, DatabaseError> {
        let mut state = self.lock();
        state.writes += 1;
        match state.rows.get_mut(&id) {
            Some(row) if !row.is_deleted => {
                *row = user.clone().with_id(id);
                Ok(Some(row.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut state = self.lock();
        state.writes += 1;
        match state.rows.get_mut(&id) {
            Some(row) => {
                row.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// A store whose every call fails as if the database were unreachable
pub struct FailingUserStore {
    message: String,
}

impl FailingUserStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> DatabaseError {
        DatabaseError::Sqlx(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            self.message.clone(),
        )))
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn list_live(&self) -> Result<Vec<User>, DatabaseError> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DatabaseError> {
        Err(self.error())
    }

    async fn insert(&self, _user: &NewUser) -> Result<User, DatabaseError> {
        Err(self.error())
    }

    async fn replace(&self, _id: i64, _user: &NewUser) -> Result<Option<User>, DatabaseError> {
        Err(self.error())
    }

    async fn soft_delete(&self, _id: i64) -> Result<bool, DatabaseError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(self.error())
    }
}
