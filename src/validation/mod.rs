//! Request payload and path id checks.
//!
//! Each check parses into a typed value on success, so nothing downstream
//! handles raw JSON. Messages follow the wording clients of this API already
//! rely on (`"email" is required`, `"age" must be an integer`, ...). Fields
//! are checked in a fixed order and the first violation is what gets
//! surfaced, though all of them are collected. Keys outside the five
//! business fields are violations too, reported after the field checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::models::user::NewUser;

/// Exact length a zip code must have, in characters
pub const ZIP_CODE_LENGTH: usize = 5;

/// Largest integer accepted for ids and ages (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Keys a user payload may carry
const USER_KEYS: [&str; 5] = ["email", "name", "age", "city", "zipCode"];

/// Decimal text that converts to a number: optional sign, digits, exponent
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?\s*$")
        .expect("numeric pattern compiles")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// One or more human-readable violations, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.first_message())]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    fn from_messages(messages: Vec<String>) -> Self {
        debug_assert!(!messages.is_empty());
        Self { messages }
    }

    /// The message surfaced to the caller
    pub fn first_message(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or("Invalid request")
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// A validated partial update: only the fields the client sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.age.is_none()
            && self.city.is_none()
            && self.zip_code.is_none()
    }

    /// Overlay the supplied fields onto `existing`; absent fields keep their value
    pub fn apply_to(self, existing: NewUser) -> NewUser {
        NewUser {
            email: self.email.unwrap_or(existing.email),
            name: self.name.unwrap_or(existing.name),
            age: self.age.unwrap_or(existing.age),
            city: self.city.unwrap_or(existing.city),
            zip_code: self.zip_code.unwrap_or(existing.zip_code),
        }
    }
}

/// Validate a create / full-update payload. All five business fields are required.
pub fn validate_full_user(payload: &Value) -> Result<NewUser, ValidationError> {
    let object = as_object(payload)?;
    let patch = check_fields(object, true)?;

    // check_fields with required = true reports every absent field
    match patch {
        UserPatch {
            email: Some(email),
            name: Some(name),
            age: Some(age),
            city: Some(city),
            zip_code: Some(zip_code),
        } => Ok(NewUser {
            email,
            name,
            age,
            city,
            zip_code,
        }),
        _ => Err(ValidationError::new("\"value\" is incomplete")),
    }
}

/// Validate a partial-update payload: every field optional, at least one present
pub fn validate_partial_user(payload: &Value) -> Result<UserPatch, ValidationError> {
    let object = as_object(payload)?;
    let patch = check_fields(object, false)?;
    if patch.is_empty() {
        return Err(ValidationError::new("\"value\" must contain at least 1 key"));
    }
    Ok(patch)
}

/// Validate a path identifier: must denote a safe integer
pub fn validate_id(value: &str) -> Result<i64, ValidationError> {
    let number = parse_numeric(value)
        .ok_or_else(|| ValidationError::new("\"value\" must be a number"))?;
    whole_number("value", number).map_err(ValidationError::new)
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::new("\"value\" must be of type object"))
}

fn check_fields(object: &Map<String, Value>, required: bool) -> Result<UserPatch, ValidationError> {
    let mut errors = Vec::new();
    let mut patch = UserPatch::default();

    patch.email = field(object, "email", required, &mut errors, email_rule);
    patch.name = field(object, "name", required, &mut errors, non_empty_string);
    patch.age = field(object, "age", required, &mut errors, age_rule);
    patch.city = field(object, "city", required, &mut errors, non_empty_string);
    patch.zip_code = field(object, "zipCode", required, &mut errors, zip_code_rule);

    errors.extend(
        object
            .keys()
            .filter(|key| !USER_KEYS.contains(&key.as_str()))
            .map(|key| format!("\"{}\" is not allowed", key)),
    );

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError::from_messages(errors))
    }
}

fn field<T>(
    object: &Map<String, Value>,
    key: &str,
    required: bool,
    errors: &mut Vec<String>,
    rule: fn(&str, &Value) -> Result<T, String>,
) -> Option<T> {
    match object.get(key) {
        Some(value) => match rule(key, value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(message);
                None
            }
        },
        None => {
            if required {
                errors.push(format!("\"{}\" is required", key));
            }
            None
        }
    }
}

fn non_empty_string(key: &str, value: &Value) -> Result<String, String> {
    match value.as_str() {
        Some("") => Err(format!("\"{}\" is not allowed to be empty", key)),
        Some(s) => Ok(s.to_string()),
        None => Err(format!("\"{}\" must be a string", key)),
    }
}

fn email_rule(key: &str, value: &Value) -> Result<String, String> {
    let email = non_empty_string(key, value)?;
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(format!("\"{}\" must be a valid email", key))
    }
}

/// Numbers pass through; numeric strings are converted
fn age_rule(key: &str, value: &Value) -> Result<i32, String> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric(text),
        _ => None,
    }
    .ok_or_else(|| format!("\"{}\" must be a number", key))?;

    let whole = whole_number(key, number)?;
    if whole < 0 {
        return Err(format!("\"{}\" must be greater than or equal to 0", key));
    }
    i32::try_from(whole).map_err(|_| format!("\"{}\" must be less than or equal to {}", key, i32::MAX))
}

/// Parse decimal text to a finite number
fn parse_numeric(text: &str) -> Option<f64> {
    if !NUMERIC_RE.is_match(text) {
        return None;
    }
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn whole_number(key: &str, number: f64) -> Result<i64, String> {
    if number.abs() > MAX_SAFE_INTEGER {
        Err(format!("\"{}\" must be a safe number", key))
    } else if number.fract() != 0.0 {
        Err(format!("\"{}\" must be an integer", key))
    } else {
        Ok(number as i64)
    }
}

fn zip_code_rule(key: &str, value: &Value) -> Result<String, String> {
    let zip = non_empty_string(key, value)?;
    if zip.chars().count() == ZIP_CODE_LENGTH {
        Ok(zip)
    } else {
        Err(format!(
            "\"{}\" length must be {} characters long",
            key, ZIP_CODE_LENGTH
        ))
    }
}

fn is_valid_email(email: &str) -> bool {
    if !EMAIL_RE.is_match(email) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") || local.len() > 64 {
        return false;
    }
    // Top-level label must be alphabetic, at least two characters
    domain
        .rsplit('.')
        .next()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
}
