//! Choosing the response representation for a page.
//!
//! Protocol requests get the page as JSON. First loads are pre-rendered by the
//! remote service when enabled, and otherwise (or when pre-rendering fails)
//! rendered through the local layout template.

use std::sync::Arc;

use inertia_core::protocol::{X_INERTIA, X_INERTIA_LOCATION};
use inertia_core::{InertiaConfig, InertiaRequest, Page, PageBuilder, Prop, Props};
use inertia_http::{Error, Request, Response, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::ssr::{SsrClient, SsrOutcome};
use crate::template::{TemplateRenderer, root_element};

/// Template context key holding the page JSON.
pub const PAGE_CONTEXT_KEY: &str = "page";
/// Template context key holding the root element markup.
pub const ROOT_CONTEXT_KEY: &str = "inertia";

/// A component, its props and extra layout template data
#[derive(Debug, Clone)]
pub struct InertiaResponse {
	pub component: String,
	pub props: Props,
	pub template_data: Map<String, Value>,
}

impl InertiaResponse {
	pub fn new(component: impl Into<String>) -> Self {
		Self {
			component: component.into(),
			props: Props::new(),
			template_data: Map::new(),
		}
	}

	pub fn with_props(mut self, props: Props) -> Self {
		self.props.extend(props);
		self
	}

	pub fn with_prop(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
		self.props.insert(key, prop);
		self
	}

	/// Extra value exposed to the layout template only
	pub fn with_template_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.template_data.insert(key.into(), value.into());
		self
	}
}

/// Renders pages in the representation each request asks for
///
/// # Examples
///
/// ```
/// use inertia_core::{InertiaConfig, Props};
/// use inertia_http::Request;
/// use inertia_render::Inertia;
///
/// # tokio_test::block_on(async {
/// let inertia = Inertia::new(InertiaConfig::default()).unwrap();
/// let request = Request::builder()
///     .uri("/props/")
///     .header("X-Inertia", "true")
///     .build()
///     .unwrap();
///
/// let response = inertia
///     .render(&request, "TestComponent", Props::new().with("name", "Brandon"))
///     .await
///     .unwrap();
///
/// assert_eq!(response.header("X-Inertia"), Some("true"));
/// assert_eq!(response.header("Vary"), Some("X-Inertia"));
/// # });
/// ```
#[derive(Clone)]
pub struct Inertia {
	config: Arc<InertiaConfig>,
	templates: Option<Arc<dyn TemplateRenderer>>,
	ssr: Option<Arc<dyn SsrClient>>,
}

impl std::fmt::Debug for Inertia {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Inertia")
			.field("config", &self.config)
			.field("templates", &self.templates.is_some())
			.field("ssr", &self.ssr.is_some())
			.finish()
	}
}

impl Inertia {
	/// Negotiator for `config`
	///
	/// With the `ssr` feature an HTTP pre-render client is created when
	/// `config.ssr_enabled` is set.
	///
	/// # Errors
	///
	/// Returns [`Error::ImproperlyConfigured`] when the pre-render client cannot be built.
	pub fn new(config: InertiaConfig) -> Result<Self> {
		#[cfg(feature = "ssr")]
		let ssr: Option<Arc<dyn SsrClient>> = if config.ssr_enabled {
			Some(Arc::new(crate::ssr::HttpSsrClient::from_config(&config)?))
		} else {
			None
		};
		#[cfg(not(feature = "ssr"))]
		let ssr: Option<Arc<dyn SsrClient>> = None;

		Ok(Self {
			config: Arc::new(config),
			templates: None,
			ssr,
		})
	}

	pub fn with_templates(mut self, templates: Arc<dyn TemplateRenderer>) -> Self {
		self.templates = Some(templates);
		self
	}

	/// Replace the pre-render client
	pub fn with_ssr_client(mut self, client: Arc<dyn SsrClient>) -> Self {
		self.ssr = Some(client);
		self
	}

	pub fn config(&self) -> &InertiaConfig {
		&self.config
	}

	/// Build the page descriptor without rendering it
	pub fn page(&self, request: &Request, component: &str, props: &Props) -> Result<Page> {
		PageBuilder::new(request, component, props).build_page(&self.config)
	}

	/// Render `component` with `props`
	pub async fn render(
		&self,
		request: &Request,
		component: &str,
		props: Props,
	) -> Result<Response> {
		self.render_response(request, InertiaResponse::new(component).with_props(props))
			.await
	}

	/// Render a full [`InertiaResponse`]
	///
	/// # Errors
	///
	/// Propagates resolver errors, and returns [`Error::ImproperlyConfigured`]
	/// when a first load needs a layout or renderer that is not configured.
	pub async fn render_response(
		&self,
		request: &Request,
		response: InertiaResponse,
	) -> Result<Response> {
		let page = self.page(request, &response.component, &response.props)?;

		if InertiaRequest::new(request).is_inertia() {
			debug!(component = %page.component, url = %page.url, "Rendering page as JSON");
			return Ok(Response::ok()
				.with_json(&page)?
				.with_header("Vary", X_INERTIA)
				.with_header(X_INERTIA, "true"));
		}

		if self.config.ssr_enabled {
			match &self.ssr {
				Some(client) => match client.render(&page).await {
					SsrOutcome::Rendered(fields) => {
						debug!(component = %page.component, "Rendering pre-rendered page");
						return self.render_ssr(fields, response.template_data);
					}
					SsrOutcome::Failed(reason) => {
						warn!(
							component = %page.component,
							reason = %reason,
							"Pre-rendering failed, falling back to local template"
						);
					}
				},
				None => debug!("Pre-rendering enabled without a client, using local template"),
			}
		}

		self.render_local(&page, response.template_data)
	}

	fn render_ssr(
		&self,
		fields: Map<String, Value>,
		template_data: Map<String, Value>,
	) -> Result<Response> {
		let template = self
			.config
			.ssr_template
			.as_deref()
			.or(self.config.layout.as_deref())
			.ok_or_else(|| {
				Error::ImproperlyConfigured(
					"Pre-rendering needs `ssr_template` or `layout` to be configured".to_string(),
				)
			})?;

		let mut context = fields;
		context.extend(template_data);
		self.render_template(template, &context)
	}

	fn render_local(&self, page: &Page, template_data: Map<String, Value>) -> Result<Response> {
		let layout = self.config.layout.as_deref().ok_or_else(|| {
			Error::ImproperlyConfigured(
				"A `layout` template is required to render first loads".to_string(),
			)
		})?;

		let page_json = page.to_json()?;
		let mut context = Map::new();
		context.insert(ROOT_CONTEXT_KEY.to_string(), Value::String(root_element(&page_json)));
		context.insert(PAGE_CONTEXT_KEY.to_string(), Value::String(page_json));
		context.extend(template_data);

		debug!(component = %page.component, layout, "Rendering page through layout");
		self.render_template(layout, &context)
	}

	fn render_template(&self, name: &str, context: &Map<String, Value>) -> Result<Response> {
		let renderer = self.templates.as_ref().ok_or_else(|| {
			Error::ImproperlyConfigured("No template renderer configured".to_string())
		})?;
		Ok(Response::ok().with_html(renderer.render(name, context)?))
	}
}

/// Send the client to `url`
///
/// Protocol requests get an empty `409 Conflict` with `X-Inertia-Location`, so
/// the client performs a full visit; other requests get a plain `302`.
///
/// # Examples
///
/// ```
/// use inertia_http::{Request, StatusCode};
/// use inertia_render::location;
///
/// let request = Request::builder().header("X-Inertia", "true").build().unwrap();
/// let response = location(&request, "https://example.com/login");
/// assert_eq!(response.status, StatusCode::CONFLICT);
/// assert_eq!(response.header("X-Inertia-Location"), Some("https://example.com/login"));
/// ```
pub fn location(request: &Request, url: &str) -> Response {
	if InertiaRequest::new(request).is_inertia() {
		Response::conflict().with_header(X_INERTIA_LOCATION, url)
	} else {
		Response::temporary_redirect(url)
	}
}
