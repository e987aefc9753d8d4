//! A template renderer that remembers what it rendered.
//!
//! Install it on the negotiator to inspect first-load pages: the page handed
//! to the layout, its props, and the extra template data.

use std::sync::{Arc, Mutex};

use inertia_http::{Error, Result};
use inertia_render::TemplateRenderer;
use inertia_render::negotiator::{PAGE_CONTEXT_KEY, ROOT_CONTEXT_KEY};
use serde_json::{Map, Value};

/// One call to [`TemplateRenderer::render`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
	pub template: String,
	pub context: Map<String, Value>,
}

/// Records render calls, optionally delegating the actual rendering
///
/// Without an inner renderer the output is the root element when present,
/// otherwise the context serialized as JSON.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
	calls: Arc<Mutex<Vec<RenderCall>>>,
	inner: Option<Arc<dyn TemplateRenderer>>,
}

impl RecordingRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record calls and render through `inner`
	pub fn wrapping(inner: Arc<dyn TemplateRenderer>) -> Self {
		Self {
			calls: Arc::default(),
			inner: Some(inner),
		}
	}

	pub fn calls(&self) -> Vec<RenderCall> {
		self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
	}

	pub fn last_call(&self) -> Option<RenderCall> {
		self.calls
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.last()
			.cloned()
	}

	fn last_context(&self) -> Result<Map<String, Value>> {
		self.last_call()
			.map(|call| call.context)
			.ok_or_else(|| Error::Internal("nothing was rendered".to_string()))
	}

	/// Page descriptor of the last local render
	///
	/// # Errors
	///
	/// Fails when nothing was rendered or the last render carried no page.
	pub fn page(&self) -> Result<Value> {
		let context = self.last_context()?;
		let page = context
			.get(PAGE_CONTEXT_KEY)
			.and_then(Value::as_str)
			.ok_or_else(|| Error::Internal("last render carried no page".to_string()))?;
		Ok(serde_json::from_str(page)?)
	}

	pub fn props(&self) -> Result<Value> {
		Ok(self.page()?["props"].clone())
	}

	pub fn component(&self) -> Result<String> {
		self.page()?["component"]
			.as_str()
			.map(str::to_string)
			.ok_or_else(|| Error::Internal("page has no component".to_string()))
	}

	/// Context of the last render, minus the page and root element
	pub fn template_data(&self) -> Result<Value> {
		let mut context = self.last_context()?;
		context.remove(PAGE_CONTEXT_KEY);
		context.remove(ROOT_CONTEXT_KEY);
		Ok(Value::Object(context))
	}
}

impl TemplateRenderer for RecordingRenderer {
	fn render(&self, name: &str, context: &Map<String, Value>) -> Result<String> {
		self.calls
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push(RenderCall {
				template: name.to_string(),
				context: context.clone(),
			});

		match &self.inner {
			Some(inner) => inner.render(name, context),
			None => match context.get(ROOT_CONTEXT_KEY).and_then(Value::as_str) {
				Some(root) => Ok(root.to_string()),
				None => Ok(serde_json::to_string(context)?),
			},
		}
	}
}
