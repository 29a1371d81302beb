use serde::Serialize;
use sqlx::FromRow;

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    #[sqlx(rename = "zipCode")]
    pub zip_code: String,
    #[sqlx(rename = "isDeleted")]
    pub is_deleted: bool,
}

/// The five business fields of a user, without identity or deletion state.
///
/// Create and both update paths build one of these so that nothing outside
/// the business fields (an `id` in the payload, say) can reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub zip_code: String,
}

impl User {
    /// Business fields of this row
    pub fn fields(&self) -> NewUser {
        NewUser {
            email: self.email.clone(),
            name: self.name.clone(),
            age: self.age,
            city: self.city.clone(),
            zip_code: self.zip_code.clone(),
        }
    }
}

impl NewUser {
    /// Attach a store-assigned id; the row starts out live
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
            age: self.age,
            city: self.city,
            zip_code: self.zip_code,
            is_deleted: false,
        }
    }
}
