//! Request-scoped session access.
//!
//! A session middleware loads [`SessionData`] for the incoming request and
//! places a [`Session`] handle in the request extensions. Handlers and the
//! page pipeline read and write through that handle; the middleware persists
//! the data once the response has been produced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::{Request, Result};

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
	/// Session ID
	pub id: String,
	/// Data
	pub data: HashMap<String, serde_json::Value>,
	/// Last access timestamp
	pub last_accessed: SystemTime,
	/// Expiration timestamp
	pub expires_at: SystemTime,
}

impl SessionData {
	/// Create a new, empty session with a random ID
	pub fn new(ttl: Duration) -> Self {
		let now = SystemTime::now();
		Self {
			id: Uuid::new_v4().to_string(),
			data: HashMap::new(),
			last_accessed: now,
			expires_at: now + ttl,
		}
	}

	pub fn is_valid(&self) -> bool {
		SystemTime::now() < self.expires_at
	}

	/// Update last access timestamp and push the expiry forward
	pub fn touch(&mut self, ttl: Duration) {
		let now = SystemTime::now();
		self.last_accessed = now;
		self.expires_at = now + ttl;
	}
}

/// Shared handle onto the current request's session
#[derive(Debug, Clone)]
pub struct Session {
	inner: Arc<Mutex<SessionData>>,
}

impl Session {
	pub fn new(data: SessionData) -> Self {
		Self {
			inner: Arc::new(Mutex::new(data)),
		}
	}

	/// Session attached to the request by the session middleware, if any
	pub fn from_request(request: &Request) -> Option<Self> {
		request.extensions.get::<Session>()
	}

	/// Attach this session to a request
	pub fn attach(&self, request: &Request) {
		request.extensions.insert(self.clone());
	}

	pub fn id(&self) -> String {
		self.lock().id.clone()
	}

	/// Raw JSON value stored under `key`
	pub fn get_value(&self, key: &str) -> Option<serde_json::Value> {
		self.lock().data.get(key).cloned()
	}

	/// Typed value stored under `key`; `None` when absent or of another shape
	///
	/// # Examples
	///
	/// ```
	/// use inertia_http::{Session, SessionData};
	/// use std::time::Duration;
	///
	/// let session = Session::new(SessionData::new(Duration::from_secs(60)));
	/// session.set("visits", 3).unwrap();
	///
	/// assert_eq!(session.get::<u32>("visits"), Some(3));
	/// assert_eq!(session.get::<String>("visits"), None);
	/// ```
	pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		self.get_value(key)
			.and_then(|v| serde_json::from_value(v).ok())
	}

	/// Store a serializable value under `key`
	pub fn set<T: Serialize>(&self, key: impl Into<String>, value: T) -> Result<()> {
		let value = serde_json::to_value(value)?;
		self.lock().data.insert(key.into(), value);
		Ok(())
	}

	/// Remove and return the value stored under `key`
	pub fn pop(&self, key: &str) -> Option<serde_json::Value> {
		self.lock().data.remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.lock().data.contains_key(key)
	}

	/// Copy of the current session data
	pub fn snapshot(&self) -> SessionData {
		self.lock().clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, SessionData> {
		self.inner.lock().unwrap_or_else(|e| e.into_inner())
	}
}
