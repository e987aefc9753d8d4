//! Handlers that render a component.
//!
//! [`InertiaView`] adapts a [`PageHandler`] into an [`inertia_http::Handler`]:
//! the page handler returns props (or a full [`InertiaResponse`]) and the view
//! negotiates the representation. A page handler may also short-circuit with a
//! plain [`Response`], typically a redirect.
//!
//! [`InertiaListView`] renders a collection of records with a field allowlist.

use std::sync::Arc;

use async_trait::async_trait;
use inertia_core::Props;
use inertia_http::{Error, Handler, Request, Response, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::negotiator::{Inertia, InertiaResponse};

/// What a page handler produced
#[derive(Debug)]
pub enum ViewOutput {
	/// Props for the view's component
	Props(Props),
	/// A fully described page, possibly for another component
	Page(InertiaResponse),
	/// A response sent as-is
	Response(Response),
}

impl From<Props> for ViewOutput {
	fn from(props: Props) -> Self {
		Self::Props(props)
	}
}

impl From<InertiaResponse> for ViewOutput {
	fn from(page: InertiaResponse) -> Self {
		Self::Page(page)
	}
}

impl From<Response> for ViewOutput {
	fn from(response: Response) -> Self {
		Self::Response(response)
	}
}

/// Produces the props for one request
#[async_trait]
pub trait PageHandler: Send + Sync {
	async fn call(&self, request: &Request) -> Result<ViewOutput>;
}

#[async_trait]
impl<F> PageHandler for F
where
	F: Fn(&Request) -> Result<ViewOutput> + Send + Sync,
{
	async fn call(&self, request: &Request) -> Result<ViewOutput> {
		self(request)
	}
}

/// Renders a fixed component with props from a [`PageHandler`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use inertia_core::{InertiaConfig, Props};
/// use inertia_http::{Handler, Request};
/// use inertia_render::{Inertia, InertiaView, ViewOutput};
///
/// # tokio_test::block_on(async {
/// let inertia = Arc::new(Inertia::new(InertiaConfig::default()).unwrap());
/// let view = InertiaView::new(inertia, "Home", |_: &Request| {
///     Ok(ViewOutput::from(Props::new().with("name", "Brandon")))
/// });
///
/// let request = Request::builder().header("X-Inertia", "true").build().unwrap();
/// let response = view.handle(request).await.unwrap();
/// assert_eq!(response.header("X-Inertia"), Some("true"));
/// # });
/// ```
pub struct InertiaView<H> {
	inertia: Arc<Inertia>,
	component: String,
	handler: H,
}

impl<H: PageHandler> InertiaView<H> {
	pub fn new(inertia: Arc<Inertia>, component: impl Into<String>, handler: H) -> Self {
		Self {
			inertia,
			component: component.into(),
			handler,
		}
	}

	pub fn component(&self) -> &str {
		&self.component
	}
}

#[async_trait]
impl<H: PageHandler> Handler for InertiaView<H> {
	async fn handle(&self, request: Request) -> Result<Response> {
		match self.handler.call(&request).await? {
			ViewOutput::Props(props) => self.inertia.render(&request, &self.component, props).await,
			ViewOutput::Page(page) => self.inertia.render_response(&request, page).await,
			ViewOutput::Response(response) => Ok(response),
		}
	}
}

type Loader<M> = Arc<dyn Fn(&Request) -> Result<Vec<M>> + Send + Sync>;

/// Prop holding the encoded records.
pub const OBJECT_LIST_PROP: &str = "object_list";

/// Renders a list of records, each reduced to `fields`
///
/// The encoded list is sent as `object_list`, and also under the context
/// object name when one is set.
pub struct InertiaListView<M> {
	inertia: Arc<Inertia>,
	component: String,
	fields: Option<Vec<String>>,
	context_object_name: Option<String>,
	allow_empty: bool,
	loader: Loader<M>,
}

impl<M> InertiaListView<M>
where
	M: Serialize + Send + Sync + 'static,
{
	pub fn new<F>(inertia: Arc<Inertia>, component: impl Into<String>, loader: F) -> Self
	where
		F: Fn(&Request) -> Result<Vec<M>> + Send + Sync + 'static,
	{
		Self {
			inertia,
			component: component.into(),
			fields: None,
			context_object_name: None,
			allow_empty: true,
			loader: Arc::new(loader),
		}
	}

	pub fn with_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields = Some(fields.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_context_object_name(mut self, name: impl Into<String>) -> Self {
		self.context_object_name = Some(name.into());
		self
	}

	pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
		self.allow_empty = allow_empty;
		self
	}

	/// Encode one record as an object with exactly the configured fields
	///
	/// # Errors
	///
	/// Returns [`Error::ImproperlyConfigured`] when no fields are configured.
	pub fn object_value(&self, object: &M) -> Result<Value> {
		let fields = self.fields.as_ref().ok_or_else(|| {
			Error::ImproperlyConfigured(
				"Using InertiaListView without the 'fields' attribute is prohibited".to_string(),
			)
		})?;

		let Value::Object(mut encoded) = serde_json::to_value(object)? else {
			return Err(Error::Serialization(
				"InertiaListView records must serialize to JSON objects".to_string(),
			));
		};

		Ok(Value::Object(
			fields
				.iter()
				.map(|field| {
					let value = encoded.remove(field).unwrap_or(Value::Null);
					(field.clone(), value)
				})
				.collect::<Map<String, Value>>(),
		))
	}

	fn props(&self, objects: &[M]) -> Result<Props> {
		let list = objects
			.iter()
			.map(|object| self.object_value(object))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array)?;

		let mut props = Props::new();
		if let Some(name) = &self.context_object_name {
			props.insert(name.clone(), list.clone());
		}
		props.insert(OBJECT_LIST_PROP, list);
		Ok(props)
	}
}

#[async_trait]
impl<M> Handler for InertiaListView<M>
where
	M: Serialize + Send + Sync + 'static,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		let objects = (self.loader)(&request)?;
		if objects.is_empty() && !self.allow_empty {
			return Err(Error::NotFound(
				"Empty list and allow_empty is false".to_string(),
			));
		}

		let props = self.props(&objects)?;
		self.inertia.render(&request, &self.component, props).await
	}
}
