use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::config::SecurityConfig;
use crate::error::ApiError;

pub const NO_CREDENTIALS: &str = "Access denied. No credentials sent.";
pub const INVALID_CREDENTIALS: &str = "Access denied. Invalid credentials.";

const REALM_CHALLENGE: &str = "Basic realm=\"users\"";

/// The single username/password pair allowed through the gate.
///
/// With either half unset, nothing is allowed through.
#[derive(Clone)]
pub struct BasicAuth {
    username: Option<String>,
    password: Option<String>,
}

impl BasicAuth {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.auth_user.clone(), security.auth_pass.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    fn allows(&self, username: &str, password: &str) -> bool {
        let (Some(expected_user), Some(expected_pass)) = (&self.username, &self.password) else {
            return false;
        };
        // Evaluate both halves so timing does not reveal which one differed
        let user_ok = expected_user.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = expected_pass.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Allow/deny gate in front of the protected routes
pub async fn basic_auth_middleware(
    State(auth): State<BasicAuth>,
    request: Request,
    next: Next,
) -> Response {
    match check_credentials(&auth, request.headers()) {
        Ok(()) => next.run(request).await,
        Err(message) => {
            tracing::warn!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                message
            );
            let mut response = ApiError::unauthorized(message).into_response();
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(REALM_CHALLENGE),
            );
            response
        }
    }
}

fn check_credentials(auth: &BasicAuth, headers: &HeaderMap) -> Result<(), &'static str> {
    let header = headers.get(header::AUTHORIZATION).ok_or(NO_CREDENTIALS)?;
    let (username, password) = decode_basic_credentials(header).ok_or(INVALID_CREDENTIALS)?;
    if auth.allows(&username, &password) {
        Ok(())
    } else {
        Err(INVALID_CREDENTIALS)
    }
}

/// Decode `Basic base64(username:password)`. The password may itself contain ':'.
fn decode_basic_credentials(header: &HeaderValue) -> Option<(String, String)> {
    let value = header.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
