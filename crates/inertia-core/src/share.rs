//! Request-scoped shared props and per-request page flags.
//!
//! Middleware and handlers running before the page is built contribute props
//! through [`share`]. They live in an [`InertiaContext`] stored in the request
//! extensions, so every clone of the request sees the same values.

use inertia_http::Request;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::props::{Prop, Props};

#[derive(Debug, Default)]
struct ContextState {
	shared: Props,
	encrypt_history: Option<bool>,
}

/// Per-request state consumed by the page builder
#[derive(Debug, Clone, Default)]
pub struct InertiaContext {
	state: Arc<Mutex<ContextState>>,
}

impl InertiaContext {
	/// Context attached to `request`, created on first use
	pub fn for_request(request: &Request) -> Self {
		request.extensions.get_or_insert_with(InertiaContext::default)
	}

	/// Context attached to `request`, if anything was shared yet
	pub fn existing(request: &Request) -> Option<Self> {
		request.extensions.get::<InertiaContext>()
	}

	pub fn share(&self, key: impl Into<String>, prop: impl Into<Prop>) {
		self.lock().shared.insert(key, prop);
	}

	pub fn share_all(&self, props: Props) {
		self.lock().shared.extend(props);
	}

	/// Snapshot of everything shared so far
	pub fn shared(&self) -> Props {
		self.lock().shared.clone()
	}

	pub fn set_encrypt_history(&self, encrypt: bool) {
		self.lock().encrypt_history = Some(encrypt);
	}

	/// Per-request override of the configured `encryptHistory` default
	pub fn encrypt_history(&self) -> Option<bool> {
		self.lock().encrypt_history
	}

	fn lock(&self) -> MutexGuard<'_, ContextState> {
		self.state.lock().unwrap_or_else(|e| e.into_inner())
	}
}

/// Share a prop with whatever page this request ends up rendering.
///
/// Later calls replace earlier values for the same key; the handler's own props
/// replace shared ones.
///
/// # Examples
///
/// ```
/// use inertia_core::props::callable;
/// use inertia_core::share::{share, InertiaContext};
/// use inertia_http::Request;
///
/// let request = Request::builder().uri("/share/").build().unwrap();
/// share(&request, "position", callable(|| "goalie"));
/// share(&request, "number", 29);
///
/// let shared = InertiaContext::for_request(&request).shared();
/// assert_eq!(shared.keys().collect::<Vec<_>>(), vec!["position", "number"]);
/// ```
pub fn share(request: &Request, key: impl Into<String>, prop: impl Into<Prop>) {
	InertiaContext::for_request(request).share(key, prop);
}

/// Share several props at once.
pub fn share_all(request: &Request, props: Props) {
	InertiaContext::for_request(request).share_all(props);
}

/// Override whether the client should encrypt this page in its history.
pub fn encrypt_history(request: &Request, encrypt: bool) {
	InertiaContext::for_request(request).set_encrypt_history(encrypt);
}
