//! Request factory for building test requests
//!
//! Requests target host `testserver`. A factory created with
//! [`RequestFactory::inertia`] marks every request as a protocol visit.

use bytes::Bytes;
use inertia_core::protocol::{
	X_INERTIA, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA, X_INERTIA_RESET,
	X_INERTIA_VERSION,
};
use inertia_http::{Method, Request, RequestBuilder, Result};
use serde::Serialize;

/// Host used for every test request.
pub const TEST_HOST: &str = "testserver";

/// Creates requests with shared defaults
#[derive(Debug, Clone, Default)]
pub struct RequestFactory {
	inertia: bool,
	headers: Vec<(String, String)>,
}

impl RequestFactory {
	/// # Examples
	///
	/// ```
	/// use inertia_test::RequestFactory;
	///
	/// let request = RequestFactory::new().get("/props/").build().unwrap();
	/// assert_eq!(request.build_absolute_uri(None), "http://testserver/props/");
	/// assert!(!request.has_header("X-Inertia"));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Factory whose requests carry `X-Inertia: true`
	///
	/// # Examples
	///
	/// ```
	/// use inertia_test::RequestFactory;
	///
	/// let request = RequestFactory::inertia().get("/props/").build().unwrap();
	/// assert_eq!(request.header("X-Inertia"), Some("true"));
	/// ```
	pub fn inertia() -> Self {
		Self {
			inertia: true,
			headers: Vec::new(),
		}
	}

	/// Header added to every request
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn request(&self, method: Method, path: &str) -> TestRequestBuilder {
		let mut builder = Request::builder()
			.method(method)
			.uri(path)
			.header("Host", TEST_HOST);
		if self.inertia {
			builder = builder.header(X_INERTIA, "true");
		}
		for (name, value) in &self.headers {
			builder = builder.header(name, value);
		}
		TestRequestBuilder { inner: builder }
	}

	pub fn get(&self, path: &str) -> TestRequestBuilder {
		self.request(Method::GET, path)
	}

	pub fn post(&self, path: &str) -> TestRequestBuilder {
		self.request(Method::POST, path)
	}

	pub fn put(&self, path: &str) -> TestRequestBuilder {
		self.request(Method::PUT, path)
	}

	pub fn patch(&self, path: &str) -> TestRequestBuilder {
		self.request(Method::PATCH, path)
	}

	pub fn delete(&self, path: &str) -> TestRequestBuilder {
		self.request(Method::DELETE, path)
	}
}

/// Request under construction, with protocol header shortcuts
#[derive(Debug)]
pub struct TestRequestBuilder {
	inner: RequestBuilder,
}

impl TestRequestBuilder {
	pub fn header(mut self, name: &str, value: &str) -> Self {
		self.inner = self.inner.header(name, value);
		self
	}

	/// Ask for a partial reload of `keys` (comma separated) on `component`
	///
	/// # Examples
	///
	/// ```
	/// use inertia_test::RequestFactory;
	///
	/// let request = RequestFactory::inertia()
	///     .get("/props/")
	///     .partial("TestComponent", "sport,grit")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.header("X-Inertia-Partial-Data"), Some("sport,grit"));
	/// ```
	pub fn partial(self, component: &str, keys: &str) -> Self {
		self.header(X_INERTIA_PARTIAL_DATA, keys)
			.header(X_INERTIA_PARTIAL_COMPONENT, component)
	}

	/// Ask the server to stop merging `keys` (comma separated)
	pub fn reset(self, keys: &str) -> Self {
		self.header(X_INERTIA_RESET, keys)
	}

	/// Declare the client's asset version
	pub fn version(self, version: &str) -> Self {
		self.header(X_INERTIA_VERSION, version)
	}

	pub fn cookie(self, cookie: &str) -> Self {
		self.header("Cookie", cookie)
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.inner = self.inner.body(body);
		self
	}

	/// JSON body with the matching Content-Type
	pub fn json<T: Serialize>(self, data: &T) -> Result<Self> {
		let body = serde_json::to_vec(data)?;
		Ok(self
			.header("Content-Type", "application/json")
			.body(body))
	}

	pub fn build(self) -> Result<Request> {
		self.inner.build()
	}
}
