//! In-process test client
//!
//! Sends requests straight to a [`Handler`] (usually a middleware chain),
//! keeping cookies between requests like a browser would.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hyper::header::{COOKIE, HeaderValue, SET_COOKIE};
use inertia_http::{Error, Handler, Method, Request, Response, Result, StatusCode};
use serde_json::Value;
use url::Url;

use crate::factory::{RequestFactory, TEST_HOST, TestRequestBuilder};

/// Redirects followed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// Client with a cookie jar
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use inertia_http::{Handler, Request, Response, Result};
/// use inertia_test::TestClient;
///
/// struct Hello;
///
/// #[async_trait::async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok().with_body("hello"))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let client = TestClient::new(Arc::new(Hello));
/// let response = client.get("/").await.unwrap();
/// assert_eq!(response.text(), "hello");
/// # });
/// ```
pub struct TestClient {
	handler: Arc<dyn Handler>,
	factory: RequestFactory,
	cookies: Mutex<BTreeMap<String, String>>,
}

impl TestClient {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self::with_factory(handler, RequestFactory::new())
	}

	/// Client whose requests are protocol visits
	pub fn inertia(handler: Arc<dyn Handler>) -> Self {
		Self::with_factory(handler, RequestFactory::inertia())
	}

	pub fn with_factory(handler: Arc<dyn Handler>, factory: RequestFactory) -> Self {
		Self {
			handler,
			factory,
			cookies: Mutex::new(BTreeMap::new()),
		}
	}

	/// Start a request with this client's defaults
	pub fn request(&self, method: Method, path: &str) -> TestRequestBuilder {
		self.factory.request(method, path)
	}

	pub fn cookie(&self, name: &str) -> Option<String> {
		self.jar().get(name).cloned()
	}

	pub async fn get(&self, path: &str) -> Result<TestResponse> {
		self.send(self.request(Method::GET, path).build()?).await
	}

	pub async fn post(&self, path: &str) -> Result<TestResponse> {
		self.send(self.request(Method::POST, path).build()?).await
	}

	pub async fn put(&self, path: &str) -> Result<TestResponse> {
		self.send(self.request(Method::PUT, path).build()?).await
	}

	pub async fn patch(&self, path: &str) -> Result<TestResponse> {
		self.send(self.request(Method::PATCH, path).build()?).await
	}

	pub async fn delete(&self, path: &str) -> Result<TestResponse> {
		self.send(self.request(Method::DELETE, path).build()?).await
	}

	/// Send `request` with the jar's cookies, then store the cookies it sets
	///
	/// Handler errors are converted into their error responses.
	pub async fn send(&self, mut request: Request) -> Result<TestResponse> {
		let cookie_header = self.cookie_header();
		if !cookie_header.is_empty() {
			let value = HeaderValue::from_str(&cookie_header)
				.map_err(|e| Error::Http(format!("Invalid cookie header: {}", e)))?;
			request.headers.insert(COOKIE, value);
		}

		let response = match self.handler.handle(request).await {
			Ok(response) => response,
			Err(error) => Response::from(error),
		};
		self.store_cookies(&response);
		Ok(TestResponse { response })
	}

	/// GET the redirect targets of `response` until a non-redirect answer
	pub async fn follow(&self, mut response: TestResponse) -> Result<TestResponse> {
		for _ in 0..MAX_REDIRECTS {
			let Some(location) = response.redirect_target() else {
				return Ok(response);
			};
			response = self.get(&location).await?;
		}
		Err(Error::Internal(format!(
			"more than {} redirects",
			MAX_REDIRECTS
		)))
	}

	fn jar(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
		self.cookies.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn cookie_header(&self) -> String {
		self.jar()
			.iter()
			.map(|(name, value)| format!("{}={}", name, value))
			.collect::<Vec<_>>()
			.join("; ")
	}

	fn store_cookies(&self, response: &Response) {
		let mut jar = self.jar();
		for header in response.headers.get_all(SET_COOKIE) {
			let Ok(cookie) = header.to_str() else {
				continue;
			};
			if let Some((name, value)) = cookie
				.split(';')
				.next()
				.and_then(|pair| pair.trim().split_once('='))
			{
				jar.insert(name.to_string(), value.to_string());
			}
		}
	}
}

/// Response wrapper with decoding helpers
#[derive(Debug, Clone)]
pub struct TestResponse {
	pub response: Response,
}

impl TestResponse {
	pub fn status(&self) -> StatusCode {
		self.response.status
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.response.header(name)
	}

	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.response.body).into_owned()
	}

	pub fn json(&self) -> Result<Value> {
		Ok(serde_json::from_slice(&self.response.body)?)
	}

	/// Path to follow when this is a redirect to the test host
	pub fn redirect_target(&self) -> Option<String> {
		if !self.response.status.is_redirection() {
			return None;
		}
		let location = self.response.location()?;
		let base = Url::parse(&format!("http://{}/", TEST_HOST)).ok()?;
		let target = base.join(location).ok()?;
		if target.host_str() != Some(TEST_HOST) {
			return None;
		}
		Some(match target.query() {
			Some(query) => format!("{}?{}", target.path(), query),
			None => target.path().to_string(),
		})
	}
}

impl std::ops::Deref for TestResponse {
	type Target = Response;

	fn deref(&self) -> &Response {
		&self.response
	}
}
