//! CSRF cookie issuance.
//!
//! Protocol visits never render a form template, so the token is issued as a
//! cookie on every response for the client runtime to echo back.

use inertia_http::Request;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated tokens
pub const CSRF_TOKEN_LENGTH: usize = 32;

/// Token issued for the current request, readable from request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Token issued earlier in this request's middleware chain
	pub fn from_request(request: &Request) -> Option<Self> {
		request.extensions.get::<Self>()
	}
}

/// Whether a cookie value looks like a token this issuer produced
///
/// # Examples
///
/// ```
/// use inertia_middleware::csrf::is_well_formed;
///
/// assert!(is_well_formed("abcdefghijklmnopqrstuvwxyz012345"));
/// assert!(!is_well_formed("short"));
/// assert!(!is_well_formed("abcdefghijklmnopqrstuvwxyz01234-"));
/// ```
pub fn is_well_formed(token: &str) -> bool {
	token.len() == CSRF_TOKEN_LENGTH && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Generate a fresh random token
pub fn generate_token() -> String {
	rand::thread_rng()
		.sample_iter(&Alphanumeric)
		.take(CSRF_TOKEN_LENGTH)
		.map(char::from)
		.collect()
}

/// Reads, generates and serializes the CSRF cookie
#[derive(Debug, Clone)]
pub struct CsrfTokenIssuer {
	cookie_name: String,
	secure: bool,
	path: String,
	same_site: String,
}

impl CsrfTokenIssuer {
	pub fn new(cookie_name: impl Into<String>) -> Self {
		Self {
			cookie_name: cookie_name.into(),
			secure: false,
			path: "/".to_string(),
			same_site: "Lax".to_string(),
		}
	}

	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn cookie_name(&self) -> &str {
		&self.cookie_name
	}

	/// The request's token: its well-formed cookie, or a newly generated one
	///
	/// The token is stored in request extensions as [`CsrfToken`].
	pub fn ensure(&self, request: &Request) -> CsrfToken {
		if let Some(token) = CsrfToken::from_request(request) {
			return token;
		}

		let token = request
			.cookie(&self.cookie_name)
			.filter(|value| is_well_formed(value))
			.map(CsrfToken)
			.unwrap_or_else(|| CsrfToken(generate_token()));

		request.extensions.insert(token.clone());
		token
	}

	/// Build the Set-Cookie header value
	pub fn cookie_header(&self, token: &CsrfToken) -> String {
		let mut parts = vec![
			format!("{}={}", self.cookie_name, token.as_str()),
			format!("Path={}", self.path),
			format!("SameSite={}", self.same_site),
		];

		if self.secure {
			parts.push("Secure".to_string());
		}

		parts.join("; ")
	}
}

impl Default for CsrfTokenIssuer {
	fn default() -> Self {
		Self::new("csrftoken")
	}
}
