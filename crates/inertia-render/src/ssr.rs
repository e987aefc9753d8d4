//! Remote pre-rendering of first-load pages.
//!
//! The page descriptor is POSTed to `{ssr_url}/render`. A successful answer is
//! a JSON object (typically `head` and `body`) whose fields become template
//! context. Every failure is reported as an [`SsrOutcome::Failed`] value so the
//! caller can fall back to local rendering.

use async_trait::async_trait;
use inertia_core::Page;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a pre-render attempt produced no usable output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsrFailure {
	#[error("pre-render service unreachable: {0}")]
	Network(String),

	#[error("pre-render service answered with status {0}")]
	Status(u16),

	#[error("pre-render service returned malformed data: {0}")]
	Malformed(String),
}

/// Result of one pre-render attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SsrOutcome {
	Rendered(Map<String, Value>),
	Failed(SsrFailure),
}

impl SsrOutcome {
	/// Interpret a decoded response body
	pub fn from_body(body: Value) -> Self {
		match body {
			Value::Object(fields) => Self::Rendered(fields),
			other => Self::Failed(SsrFailure::Malformed(format!(
				"expected a JSON object, got {}",
				other
			))),
		}
	}
}

/// Client for a pre-render service
#[async_trait]
pub trait SsrClient: Send + Sync {
	async fn render(&self, page: &Page) -> SsrOutcome;
}

/// Path appended to the configured service URL.
pub const RENDER_PATH: &str = "/render";

/// Build the render endpoint from a base URL
///
/// # Examples
///
/// ```
/// use inertia_render::ssr::render_endpoint;
///
/// assert_eq!(render_endpoint("http://localhost:13714"), "http://localhost:13714/render");
/// assert_eq!(render_endpoint("http://localhost:13714/"), "http://localhost:13714/render");
/// ```
pub fn render_endpoint(base_url: &str) -> String {
	format!("{}{}", base_url.trim_end_matches('/'), RENDER_PATH)
}

#[cfg(feature = "ssr")]
pub use http_client::HttpSsrClient;

#[cfg(feature = "ssr")]
mod http_client {
	use super::{SsrClient, SsrFailure, SsrOutcome, render_endpoint};
	use async_trait::async_trait;
	use inertia_core::{InertiaConfig, Page};
	use inertia_http::{Error, Result};
	use serde_json::Value;
	use std::time::Duration;
	use tracing::debug;

	/// [`SsrClient`] speaking HTTP through reqwest
	#[derive(Debug, Clone)]
	pub struct HttpSsrClient {
		client: reqwest::Client,
		endpoint: String,
	}

	impl HttpSsrClient {
		/// Client for the service at `base_url`, with an optional request timeout
		///
		/// # Errors
		///
		/// Returns [`Error::ImproperlyConfigured`] when the HTTP client cannot be built.
		pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
			let mut builder = reqwest::Client::builder();
			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}
			let client = builder.build().map_err(|e| {
				Error::ImproperlyConfigured(format!("Cannot build pre-render client: {}", e))
			})?;

			Ok(Self {
				client,
				endpoint: render_endpoint(base_url),
			})
		}

		pub fn from_config(config: &InertiaConfig) -> Result<Self> {
			Self::new(&config.ssr_url, config.ssr_timeout())
		}

		pub fn endpoint(&self) -> &str {
			&self.endpoint
		}
	}

	#[async_trait]
	impl SsrClient for HttpSsrClient {
		async fn render(&self, page: &Page) -> SsrOutcome {
			debug!(endpoint = %self.endpoint, component = %page.component, "Requesting pre-render");

			let response = match self.client.post(&self.endpoint).json(page).send().await {
				Ok(response) => response,
				Err(e) => return SsrOutcome::Failed(SsrFailure::Network(e.to_string())),
			};

			let status = response.status();
			if !status.is_success() {
				return SsrOutcome::Failed(SsrFailure::Status(status.as_u16()));
			}

			match response.json::<Value>().await {
				Ok(body) => SsrOutcome::from_body(body),
				Err(e) => SsrOutcome::Failed(SsrFailure::Malformed(e.to_string())),
			}
		}
	}

}
