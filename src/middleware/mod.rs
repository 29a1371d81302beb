pub mod auth;
pub mod errors;
pub mod response;

pub use auth::{basic_auth_middleware, BasicAuth};
pub use errors::redact_internal_errors;
pub use response::{ApiResponse, ApiResult};
