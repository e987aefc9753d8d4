//! Protocol headers and request classification.

use inertia_http::Request;

/// Marks a request from the client runtime, and a JSON page response.
pub const X_INERTIA: &str = "X-Inertia";
/// Asset version the client was built against.
pub const X_INERTIA_VERSION: &str = "X-Inertia-Version";
/// Comma-separated prop names requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: &str = "X-Inertia-Partial-Data";
/// Component a partial reload targets.
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "X-Inertia-Partial-Component";
/// Comma-separated prop names the client wants replaced instead of merged.
pub const X_INERTIA_RESET: &str = "X-Inertia-Reset";
/// Target of a forced full-page visit.
pub const X_INERTIA_LOCATION: &str = "X-Inertia-Location";

/// Split a comma-separated header value into trimmed, non-empty keys.
///
/// An absent or empty header yields no keys.
///
/// # Examples
///
/// ```
/// use inertia_core::protocol::split_header_list;
///
/// assert_eq!(split_header_list(Some("sport, grit")), vec!["sport", "grit"]);
/// assert!(split_header_list(Some("")).is_empty());
/// assert!(split_header_list(None).is_empty());
/// ```
pub fn split_header_list(value: Option<&str>) -> Vec<&str> {
	value
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|key| !key.is_empty())
		.collect()
}

/// Read-only view of the protocol headers of a request.
#[derive(Debug, Clone, Copy)]
pub struct InertiaRequest<'a> {
	request: &'a Request,
}

impl<'a> InertiaRequest<'a> {
	pub fn new(request: &'a Request) -> Self {
		Self { request }
	}

	/// Whether the client runtime sent this request.
	pub fn is_inertia(&self) -> bool {
		self.request.has_header(X_INERTIA)
	}

	pub fn version(&self) -> Option<&'a str> {
		self.request.header(X_INERTIA_VERSION)
	}

	pub fn partial_component(&self) -> Option<&'a str> {
		self.request.header(X_INERTIA_PARTIAL_COMPONENT)
	}

	pub fn partial_data(&self) -> Vec<&'a str> {
		split_header_list(self.request.header(X_INERTIA_PARTIAL_DATA))
	}

	pub fn reset_keys(&self) -> Vec<&'a str> {
		split_header_list(self.request.header(X_INERTIA_RESET))
	}

	/// A partial reload needs the data header and a component header naming `component`.
	pub fn is_partial_reload(&self, component: &str) -> bool {
		self.request.has_header(X_INERTIA_PARTIAL_DATA)
			&& self.partial_component() == Some(component)
	}

	/// Whether the client's declared version differs from `current`.
	///
	/// A missing version header counts as current.
	pub fn is_stale(&self, current: &str) -> bool {
		self.version().is_some_and(|version| version != current)
	}
}
