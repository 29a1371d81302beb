use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{NewUser, User};

/// Persistence gateway for the `users` table.
///
/// Every read and update is scoped to live rows (`isDeleted = false`).
/// Soft delete is the one exception: it matches on id alone.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All live users, ordered by id
    async fn list_live(&self) -> Result<Vec<User>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// Insert a new row and return it with the generated id
    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError>;

    /// Overwrite the five business fields of a live row. `None` when no live row matched.
    async fn replace(&self, id: i64, user: &NewUser) -> Result<Option<User>, DatabaseError>;

    /// Set the deletion flag on the row with this id, live or not.
    /// Returns whether any row was affected.
    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError>;

    /// Round-trip to the store, used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;
}

const USER_COLUMNS: &str = r#"id, email, name, age, city, "zipCode", "isDeleted""#;

/// PostgreSQL-backed store sharing a connection pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_live(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE "isDeleted" = FALSE ORDER BY id"#
        );
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND "isDeleted" = FALSE"#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: &NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO users (email, name, age, city, "zipCode")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.city)
            .bind(&user.zip_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn replace(&self, id: i64, user: &NewUser) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            r#"UPDATE users
               SET email = $1, name = $2, age = $3, city = $4, "zipCode" = $5
               WHERE id = $6 AND "isDeleted" = FALSE
               RETURNING {USER_COLUMNS}"#
        );
        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.city)
            .bind(&user.zip_code)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"UPDATE users SET "isDeleted" = TRUE WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
