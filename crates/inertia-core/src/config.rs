//! Adapter configuration.
//!
//! [`InertiaConfig`] is an explicit value handed to the negotiator and the
//! middleware at construction time. It can be built in code, parsed from TOML,
//! or read from `INERTIA_*` environment variables.

use inertia_http::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Settings that may only hold booleans.
const BOOL_SETTINGS: &[&str] = &["ssr_enabled", "encrypt_history", "csrf_cookie_secure"];

/// Environment variable prefix read by [`InertiaConfig::from_env`].
pub const ENV_PREFIX: &str = "INERTIA_";

/// Inertia adapter configuration
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
	/// Asset version; clients holding another version are forced to reload
	pub version: String,
	/// Template rendered for first loads
	pub layout: Option<String>,
	/// Base URL of the pre-render service
	pub ssr_url: String,
	/// Whether first loads try the pre-render service
	pub ssr_enabled: bool,
	/// Template used with pre-rendered output (falls back to `layout`)
	pub ssr_template: Option<String>,
	/// Timeout for the pre-render request, in milliseconds
	pub ssr_timeout_ms: Option<u64>,
	/// Default for the page's `encryptHistory` flag
	pub encrypt_history: bool,
	/// Methods whose 301/302 responses are rewritten to 303
	pub redirect_methods: Vec<String>,
	/// Name of the anti-forgery cookie
	pub csrf_cookie_name: String,
	/// Mark the anti-forgery cookie `Secure`
	pub csrf_cookie_secure: bool,
}

impl Default for InertiaConfig {
	fn default() -> Self {
		Self {
			version: "1.0".to_string(),
			layout: None,
			ssr_url: "http://localhost:13714".to_string(),
			ssr_enabled: false,
			ssr_template: None,
			ssr_timeout_ms: None,
			encrypt_history: false,
			redirect_methods: vec!["PUT".to_string(), "PATCH".to_string(), "DELETE".to_string()],
			csrf_cookie_name: "csrftoken".to_string(),
			csrf_cookie_secure: false,
		}
	}
}

impl InertiaConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();
		self
	}

	pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
		self.layout = Some(layout.into());
		self
	}

	/// Enable pre-rendering against `url`
	pub fn with_ssr(mut self, url: impl Into<String>) -> Self {
		self.ssr_enabled = true;
		self.ssr_url = url.into();
		self
	}

	pub fn with_ssr_template(mut self, template: impl Into<String>) -> Self {
		self.ssr_template = Some(template.into());
		self
	}

	pub fn with_ssr_timeout(mut self, timeout: Duration) -> Self {
		self.ssr_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
		self
	}

	pub fn with_encrypt_history(mut self, encrypt: bool) -> Self {
		self.encrypt_history = encrypt;
		self
	}

	/// Replace the set of methods whose redirects become 303
	///
	/// # Examples
	///
	/// ```
	/// use inertia_core::InertiaConfig;
	///
	/// let config = InertiaConfig::new().with_redirect_methods(["post", "PUT"]);
	/// assert!(config.rewrites_redirect_for("POST"));
	/// assert!(!config.rewrites_redirect_for("DELETE"));
	/// ```
	pub fn with_redirect_methods<I, S>(mut self, methods: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.redirect_methods = methods
			.into_iter()
			.map(|m| m.as_ref().to_ascii_uppercase())
			.collect();
		self
	}

	pub fn with_csrf_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.csrf_cookie_name = name.into();
		self
	}

	pub fn with_csrf_cookie_secure(mut self, secure: bool) -> Self {
		self.csrf_cookie_secure = secure;
		self
	}

	/// Whether a redirect answering `method` is rewritten to 303
	pub fn rewrites_redirect_for(&self, method: &str) -> bool {
		self.redirect_methods
			.iter()
			.any(|m| m.eq_ignore_ascii_case(method))
	}

	pub fn ssr_timeout(&self) -> Option<Duration> {
		self.ssr_timeout_ms.map(Duration::from_millis)
	}

	/// Parse configuration from TOML; missing keys keep their defaults
	///
	/// # Errors
	///
	/// Boolean settings holding anything other than a boolean produce
	/// [`Error::TypeMismatch`]; other malformed input produces
	/// [`Error::ImproperlyConfigured`].
	///
	/// # Examples
	///
	/// ```
	/// use inertia_core::InertiaConfig;
	///
	/// let config = InertiaConfig::from_toml_str(r#"
	///     version = "2.1"
	///     layout = "base.html"
	///     encrypt_history = true
	/// "#).unwrap();
	/// assert_eq!(config.version, "2.1");
	/// assert!(config.encrypt_history);
	///
	/// let error = InertiaConfig::from_toml_str(r#"encrypt_history = "yes""#).unwrap_err();
	/// assert_eq!(error.to_string(), "expected bool for encrypt_history, got string");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let table: toml::Table = toml::from_str(source)
			.map_err(|e| Error::ImproperlyConfigured(format!("Invalid TOML: {}", e)))?;

		for name in BOOL_SETTINGS {
			if let Some(value) = table.get(*name)
				&& !value.is_bool()
			{
				return Err(Error::expected_bool(*name, toml_type_name(value)));
			}
		}

		toml::Value::Table(table)
			.try_into::<Self>()
			.map_err(|e| Error::ImproperlyConfigured(format!("Invalid configuration: {}", e)))
	}

	/// Read and parse a TOML configuration file
	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|e| {
			Error::ImproperlyConfigured(format!("Cannot read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&source)
	}

	/// Build configuration from `INERTIA_*` environment variables over the defaults
	///
	/// Recognized variables: `INERTIA_VERSION`, `INERTIA_LAYOUT`, `INERTIA_SSR_URL`,
	/// `INERTIA_SSR_ENABLED`, `INERTIA_SSR_TEMPLATE`, `INERTIA_SSR_TIMEOUT_MS`,
	/// `INERTIA_ENCRYPT_HISTORY`, `INERTIA_REDIRECT_METHODS` (comma separated),
	/// `INERTIA_CSRF_COOKIE_NAME`, `INERTIA_CSRF_COOKIE_SECURE`.
	pub fn from_env() -> Result<Self> {
		let mut config = Self::default();

		if let Some(version) = env_var("VERSION") {
			config.version = version;
		}
		if let Some(layout) = env_var("LAYOUT") {
			config.layout = Some(layout);
		}
		if let Some(url) = env_var("SSR_URL") {
			config.ssr_url = url;
		}
		if let Some(enabled) = env_bool("ssr_enabled")? {
			config.ssr_enabled = enabled;
		}
		if let Some(template) = env_var("SSR_TEMPLATE") {
			config.ssr_template = Some(template);
		}
		if let Some(timeout) = env_var("SSR_TIMEOUT_MS") {
			let millis = timeout.trim().parse::<u64>().map_err(|e| {
				Error::ImproperlyConfigured(format!("INERTIA_SSR_TIMEOUT_MS: {}", e))
			})?;
			config.ssr_timeout_ms = Some(millis);
		}
		if let Some(encrypt) = env_bool("encrypt_history")? {
			config.encrypt_history = encrypt;
		}
		if let Some(methods) = env_var("REDIRECT_METHODS") {
			config = config.with_redirect_methods(
				methods.split(',').map(str::trim).filter(|m| !m.is_empty()),
			);
		}
		if let Some(name) = env_var("CSRF_COOKIE_NAME") {
			config.csrf_cookie_name = name;
		}
		if let Some(secure) = env_bool("csrf_cookie_secure")? {
			config.csrf_cookie_secure = secure;
		}

		Ok(config)
	}
}

fn env_var(suffix: &str) -> Option<String> {
	env::var(format!("{}{}", ENV_PREFIX, suffix)).ok()
}

/// Parse a boolean environment variable named after `setting`; only `true` and `false` are accepted.
fn env_bool(setting: &str) -> Result<Option<bool>> {
	let Some(raw) = env_var(&setting.to_ascii_uppercase()) else {
		return Ok(None);
	};
	match raw.trim() {
		"true" => Ok(Some(true)),
		"false" => Ok(Some(false)),
		_ => Err(Error::expected_bool(setting, "string")),
	}
}

fn toml_type_name(value: &toml::Value) -> &'static str {
	match value {
		toml::Value::String(_) => "string",
		toml::Value::Integer(_) => "integer",
		toml::Value::Float(_) => "float",
		toml::Value::Boolean(_) => "bool",
		toml::Value::Datetime(_) => "datetime",
		toml::Value::Array(_) => "array",
		toml::Value::Table(_) => "table",
	}
}
