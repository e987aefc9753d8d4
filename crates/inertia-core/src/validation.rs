//! Form validation that redirects back with field errors.
//!
//! A handler calls [`inertia_validate`]; on failure it returns
//! [`Error::Validation`], which the middleware turns into a session stash plus
//! the carried redirect. The next page built for that session exposes the
//! stash as the `errors` prop.

use indexmap::IndexMap;
use inertia_http::{
	Error, FieldErrors, InertiaValidationError, Request, Response, Result, Session,
};
use serde_json::{Map, Value};

use crate::history::json_type_name;

/// Session key holding field errors awaiting the next page.
pub const VALIDATION_ERRORS_SESSION_KEY: &str = "_inertia_validation_errors";

/// Prop name under which stashed errors are exposed.
pub const ERRORS_PROP: &str = "errors";

/// Anything that can check itself and yield cleaned data.
pub trait Form {
	type Cleaned;

	/// Cleaned data, or the errors reported per field.
	fn clean(&self) -> std::result::Result<Self::Cleaned, FieldErrors>;
}

/// Validate `form`, producing [`Error::Validation`] carrying `redirect` on failure.
///
/// # Examples
///
/// ```
/// use inertia_core::validation::{inertia_validate, Form};
/// use inertia_http::{Error, FieldErrors, Response};
///
/// struct Signup { name: String }
///
/// impl Form for Signup {
///     type Cleaned = String;
///
///     fn clean(&self) -> Result<String, FieldErrors> {
///         if self.name.is_empty() {
///             let mut errors = FieldErrors::new();
///             errors.insert("name".into(), vec!["This field is required.".into()]);
///             return Err(errors);
///         }
///         Ok(self.name.trim().to_string())
///     }
/// }
///
/// let ok = inertia_validate(&Signup { name: " Brandon ".into() }, Response::temporary_redirect("/"));
/// assert_eq!(ok.unwrap(), "Brandon");
///
/// let err = inertia_validate(&Signup { name: String::new() }, Response::temporary_redirect("/signup/"));
/// assert!(matches!(err, Err(Error::Validation(_))));
/// ```
pub fn inertia_validate<F: Form>(form: &F, redirect: Response) -> Result<F::Cleaned> {
	form.clean()
		.map_err(|errors| InertiaValidationError::new(errors, redirect).into())
}

/// Store the first message per field in the session.
pub fn stash_validation_errors(session: &Session, error: &InertiaValidationError) -> Result<()> {
	let first: IndexMap<String, String> = error.first_messages();
	session.set(VALIDATION_ERRORS_SESSION_KEY, first)
}

/// Read stashed errors without consuming them; `None` when nothing non-empty is stashed.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the stash is not a JSON object; the
/// malformed stash is removed from the session.
pub fn peek_validation_errors(request: &Request) -> Result<Option<Map<String, Value>>> {
	let Some(session) = Session::from_request(request) else {
		return Ok(None);
	};
	match session.get_value(VALIDATION_ERRORS_SESSION_KEY) {
		None => Ok(None),
		Some(Value::Object(errors)) if errors.is_empty() => Ok(None),
		Some(Value::Object(errors)) => Ok(Some(errors)),
		Some(other) => {
			session.pop(VALIDATION_ERRORS_SESSION_KEY);
			Err(Error::TypeMismatch {
				name: VALIDATION_ERRORS_SESSION_KEY.to_string(),
				expected: "object",
				actual: json_type_name(&other).to_string(),
			})
		}
	}
}

/// Pop stashed errors for the current request; `None` when nothing non-empty is stashed.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the stash is not a JSON object.
pub fn take_validation_errors(request: &Request) -> Result<Option<Map<String, Value>>> {
	let errors = peek_validation_errors(request)?;
	if let Some(session) = Session::from_request(request) {
		session.pop(VALIDATION_ERRORS_SESSION_KEY);
	}
	Ok(errors)
}
