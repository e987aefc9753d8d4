//! Browser history flags carried in the session.

use inertia_http::{Error, Request, Result, Session};
use serde_json::Value;

/// Session key holding the pending `clearHistory` flag.
pub const CLEAR_HISTORY_SESSION_KEY: &str = "_inertia_clear_history";

/// Ask the client to clear its history on the next page it receives.
///
/// The flag is kept in the session so it survives a redirect.
///
/// # Errors
///
/// Returns [`Error::ImproperlyConfigured`] when no session is attached to the request.
pub fn clear_history(request: &Request) -> Result<()> {
	let session = Session::from_request(request).ok_or_else(|| {
		Error::ImproperlyConfigured("clear_history requires a session middleware".to_string())
	})?;
	session.set(CLEAR_HISTORY_SESSION_KEY, true)
}

/// Read the pending `clearHistory` flag without consuming it, defaulting to `false`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the stored value is not a boolean;
/// the malformed value is removed from the session.
pub fn peek_clear_history(request: &Request) -> Result<bool> {
	let Some(session) = Session::from_request(request) else {
		return Ok(false);
	};
	match session.get_value(CLEAR_HISTORY_SESSION_KEY) {
		None => Ok(false),
		Some(Value::Bool(flag)) => Ok(flag),
		Some(other) => {
			session.pop(CLEAR_HISTORY_SESSION_KEY);
			Err(Error::expected_bool("clear_history", json_type_name(&other)))
		}
	}
}

/// Pop the pending `clearHistory` flag, defaulting to `false`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the stored value is not a boolean.
pub fn take_clear_history(request: &Request) -> Result<bool> {
	let flag = peek_clear_history(request)?;
	if let Some(session) = Session::from_request(request) {
		session.pop(CLEAR_HISTORY_SESSION_KEY);
	}
	Ok(flag)
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(n) if n.is_f64() => "float",
		Value::Number(_) => "integer",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
