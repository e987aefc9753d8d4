//! Session middleware
//!
//! Loads the session named by the session cookie (or starts a new one),
//! exposes it to handlers through request extensions, and persists it after
//! the handler ran. Validation error stashes and the `clearHistory` flag live
//! in this session.

use async_trait::async_trait;
use inertia_http::{Handler, Middleware, Request, Response, Result, Session, SessionData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// In-memory session store with lazy eviction of expired sessions
#[derive(Debug, Default)]
pub struct SessionStore {
	sessions: RwLock<HashMap<String, SessionData>>,
}

impl SessionStore {
	/// Expired sessions are swept once the store grows past this size
	const CLEANUP_THRESHOLD: usize = 10_000;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, id: &str) -> Option<SessionData> {
		let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
		sessions.get(id).cloned()
	}

	pub fn save(&self, session: SessionData) {
		let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
		sessions.insert(session.id.clone(), session);

		if sessions.len() > Self::CLEANUP_THRESHOLD {
			sessions.retain(|_, s| s.is_valid());
		}
	}

	pub fn delete(&self, id: &str) {
		let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
		sessions.remove(id);
	}

	pub fn len(&self) -> usize {
		let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
		sessions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Session cookie configuration
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct SessionConfig {
	pub cookie_name: String,
	pub ttl: Duration,
	pub secure: bool,
	pub http_only: bool,
	pub same_site: Option<String>,
	pub path: String,
}

impl SessionConfig {
	/// # Examples
	///
	/// ```
	/// use std::time::Duration;
	/// use inertia_middleware::session::SessionConfig;
	///
	/// let config = SessionConfig::new("sessionid", Duration::from_secs(3600));
	/// assert_eq!(config.cookie_name, "sessionid");
	/// assert!(config.http_only);
	/// ```
	pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
		Self {
			cookie_name: cookie_name.into(),
			ttl,
			secure: false,
			http_only: true,
			same_site: Some("Lax".to_string()),
			path: "/".to_string(),
		}
	}

	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn with_same_site(mut self, same_site: impl Into<String>) -> Self {
		self.same_site = Some(same_site.into());
		self
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self::new("sessionid", Duration::from_secs(1_209_600))
	}
}

/// Middleware attaching a [`Session`] to every request
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use inertia_http::{Handler, Middleware, Request, Response, Result, Session};
/// use inertia_middleware::SessionMiddleware;
///
/// struct Counter;
///
/// #[async_trait::async_trait]
/// impl Handler for Counter {
///     async fn handle(&self, request: Request) -> Result<Response> {
///         let session = Session::from_request(&request).unwrap();
///         let visits = session.get::<u32>("visits").unwrap_or(0) + 1;
///         session.set("visits", visits)?;
///         Ok(Response::ok().with_body(visits.to_string()))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let middleware = SessionMiddleware::default();
/// let response = middleware
///     .process(Request::builder().build().unwrap(), Arc::new(Counter))
///     .await
///     .unwrap();
/// assert_eq!(response.body, "1");
/// assert!(response.header("set-cookie").unwrap().starts_with("sessionid="));
/// # });
/// ```
pub struct SessionMiddleware {
	config: SessionConfig,
	store: Arc<SessionStore>,
}

impl SessionMiddleware {
	pub fn new(config: SessionConfig) -> Self {
		Self::with_store(config, Arc::new(SessionStore::new()))
	}

	/// Share a store between middleware instances
	pub fn with_store(config: SessionConfig, store: Arc<SessionStore>) -> Self {
		Self { config, store }
	}

	pub fn store(&self) -> &SessionStore {
		&self.store
	}

	fn load(&self, request: &Request) -> SessionData {
		let mut data = request
			.cookie(&self.config.cookie_name)
			.and_then(|id| self.store.get(&id))
			.filter(SessionData::is_valid)
			.unwrap_or_else(|| {
				debug!("Starting new session");
				SessionData::new(self.config.ttl)
			});
		data.touch(self.config.ttl);
		data
	}

	fn cookie_header(&self, session_id: &str) -> String {
		let mut parts = vec![
			format!("{}={}", self.config.cookie_name, session_id),
			format!("Path={}", self.config.path),
		];

		if self.config.http_only {
			parts.push("HttpOnly".to_string());
		}

		if self.config.secure {
			parts.push("Secure".to_string());
		}

		if let Some(same_site) = &self.config.same_site {
			parts.push(format!("SameSite={}", same_site));
		}

		parts.push(format!("Max-Age={}", self.config.ttl.as_secs()));

		parts.join("; ")
	}
}

impl Default for SessionMiddleware {
	fn default() -> Self {
		Self::new(SessionConfig::default())
	}
}

#[async_trait]
impl Middleware for SessionMiddleware {
	async fn process(&self, request: Request, handler: Arc<dyn Handler>) -> Result<Response> {
		let session = Session::new(self.load(&request));
		session.attach(&request);

		let result = handler.handle(request).await;

		// Saved before propagating handler errors.
		let snapshot = session.snapshot();
		let id = snapshot.id.clone();
		self.store.save(snapshot);

		let mut response = result?;
		response.append_cookie(&self.cookie_header(&id))?;
		Ok(response)
	}
}
