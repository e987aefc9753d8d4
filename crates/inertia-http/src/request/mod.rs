//! Owned HTTP request with request-scoped extensions.

mod methods;

use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri, Version};

use crate::{Error, Extensions, Result};

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Request-scoped values shared between middleware and handlers
	pub extensions: Extensions,
	is_secure: bool,
}

impl Request {
	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use inertia_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::DELETE)
	///     .uri("/users/1/?next=/users/")
	///     .header("X-Inertia", "true")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.method, Method::DELETE);
	/// assert_eq!(request.path(), "/users/1/");
	/// assert_eq!(request.header("x-inertia"), Some("true"));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}
}

/// Builder for [`Request`]
#[derive(Debug)]
pub struct RequestBuilder {
	method: Method,
	uri: String,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
	secure: bool,
	error: Option<Error>,
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self {
			method: Method::GET,
			uri: "/".to_string(),
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			secure: false,
			error: None,
		}
	}
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = version;
		self
	}

	/// Replace all headers
	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Add a single header; invalid names or values are reported by [`RequestBuilder::build`]
	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.append(name, value);
			}
			_ => {
				self.error
					.get_or_insert_with(|| Error::Http(format!("Invalid header: {}", name)));
			}
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Mark the request as received over TLS
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Build the request
	///
	/// # Errors
	///
	/// Returns [`Error::Http`] when the URI or a header is malformed.
	pub fn build(self) -> Result<Request> {
		if let Some(error) = self.error {
			return Err(error);
		}
		let uri: Uri = self
			.uri
			.parse()
			.map_err(|e| Error::Http(format!("Invalid URI '{}': {}", self.uri, e)))?;

		Ok(Request {
			method: self.method,
			uri,
			version: self.version,
			headers: self.headers,
			body: self.body,
			extensions: Extensions::new(),
			is_secure: self.secure,
		})
	}
}
