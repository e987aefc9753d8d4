//! Error types shared across the workspace.

use indexmap::IndexMap;
use thiserror::Error;

use crate::Response;

/// Field name to the list of messages reported for that field.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Result type used by handlers, middleware and the page pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the page pipeline and its collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// Malformed request or response data.
	#[error("HTTP error: {0}")]
	Http(String),

	/// The requested resource does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// A value could not be serialized or deserialized.
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Required configuration is missing or inconsistent.
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// A setting that must hold a specific type held something else.
	#[error("expected {expected} for {name}, got {actual}")]
	TypeMismatch {
		/// Name of the offending setting.
		name: String,
		/// Type that was expected.
		expected: &'static str,
		/// Type that was found.
		actual: String,
	},

	/// Template lookup or rendering failed.
	#[error("Template error: {0}")]
	Template(String),

	/// Form validation failed; carries the field errors and the redirect to follow.
	#[error("Validation failed for {} field(s)", .0.errors.len())]
	Validation(Box<InertiaValidationError>),

	#[error("Internal error: {0}")]
	Internal(String),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl Error {
	/// HTTP status code used when the error is turned into a response.
	pub fn status_code(&self) -> u16 {
		match self {
			Error::Http(_) => 400,
			Error::NotFound(_) => 404,
			Error::Validation(_) => 422,
			Error::Serialization(_)
			| Error::ImproperlyConfigured(_)
			| Error::TypeMismatch { .. }
			| Error::Template(_)
			| Error::Internal(_)
			| Error::Other(_) => 500,
		}
	}

	/// Builds a [`Error::TypeMismatch`] for a boolean setting.
	pub fn expected_bool(name: impl Into<String>, actual: impl Into<String>) -> Self {
		Error::TypeMismatch {
			name: name.into(),
			expected: "bool",
			actual: actual.into(),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Self {
		Error::Serialization(error.to_string())
	}
}

/// A failed form validation together with where the client should be sent.
#[derive(Debug)]
pub struct InertiaValidationError {
	pub errors: FieldErrors,
	pub redirect: Response,
}

impl InertiaValidationError {
	pub fn new(errors: FieldErrors, redirect: Response) -> Self {
		Self { errors, redirect }
	}

	/// First message reported for each field, in field order.
	pub fn first_messages(&self) -> IndexMap<String, String> {
		self.errors
			.iter()
			.filter_map(|(field, messages)| {
				messages
					.first()
					.map(|message| (field.clone(), message.clone()))
			})
			.collect()
	}
}

impl From<InertiaValidationError> for Error {
	fn from(error: InertiaValidationError) -> Self {
		Error::Validation(Box::new(error))
	}
}
