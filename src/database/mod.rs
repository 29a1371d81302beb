pub mod manager;
pub mod models;
pub mod user_store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewUser, User};
pub use user_store::{PgUserStore, UserStore};
