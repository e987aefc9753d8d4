//! Template rendering seam for first-load HTML.

use inertia_http::Result;
use serde_json::{Map, Value};

/// Renders a named template with a JSON context.
pub trait TemplateRenderer: Send + Sync {
	/// # Errors
	///
	/// Returns [`inertia_http::Error::Template`] when the template is missing or fails.
	fn render(&self, name: &str, context: &Map<String, Value>) -> Result<String>;
}

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use inertia_render::template::escape_html;
///
/// assert_eq!(escape_html(r#"{"a":"<b>"}"#), "{&quot;a&quot;:&quot;&lt;b&gt;&quot;}");
/// ```
pub fn escape_html(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for ch in input.chars() {
		match ch {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			'\'' => output.push_str("&#x27;"),
			_ => output.push(ch),
		}
	}
	output
}

/// The element the client runtime mounts on, carrying the page JSON.
///
/// # Examples
///
/// ```
/// use inertia_render::template::root_element;
///
/// assert_eq!(
///     root_element(r#"{"component":"Home"}"#),
///     r#"<div id="app" data-page="{&quot;component&quot;:&quot;Home&quot;}"></div>"#
/// );
/// ```
pub fn root_element(page_json: &str) -> String {
	format!(r#"<div id="app" data-page="{}"></div>"#, escape_html(page_json))
}

#[cfg(feature = "templates")]
pub use tera_renderer::TeraRenderer;

#[cfg(feature = "templates")]
mod tera_renderer {
	use super::TemplateRenderer;
	use inertia_http::{Error, Result};
	use serde_json::{Map, Value};
	use tera::{Context, Tera};

	/// [`TemplateRenderer`] backed by a Tera instance
	///
	/// # Examples
	///
	/// ```
	/// use inertia_render::template::{TemplateRenderer, TeraRenderer};
	/// use serde_json::{json, Map};
	///
	/// let renderer = TeraRenderer::from_templates([
	///     ("layout.html", "<main>{{ inertia | safe }}</main>"),
	/// ]).unwrap();
	///
	/// let context: Map<_, _> = json!({"inertia": "<div id=\"app\"></div>"})
	///     .as_object()
	///     .cloned()
	///     .unwrap();
	/// let html = renderer.render("layout.html", &context).unwrap();
	/// assert_eq!(html, "<main><div id=\"app\"></div></main>");
	/// ```
	pub struct TeraRenderer {
		tera: Tera,
	}

	impl TeraRenderer {
		pub fn new(tera: Tera) -> Self {
			Self { tera }
		}

		/// Load every template matching a glob such as `templates/**/*.html`
		pub fn from_glob(pattern: &str) -> Result<Self> {
			let tera = Tera::new(pattern).map_err(|e| Error::Template(describe(&e)))?;
			Ok(Self::new(tera))
		}

		/// Register templates from `(name, source)` pairs
		pub fn from_templates<I, N, S>(templates: I) -> Result<Self>
		where
			I: IntoIterator<Item = (N, S)>,
			N: AsRef<str>,
			S: AsRef<str>,
		{
			let mut tera = Tera::default();
			tera.add_raw_templates(templates)
				.map_err(|e| Error::Template(describe(&e)))?;
			Ok(Self::new(tera))
		}
	}

	impl TemplateRenderer for TeraRenderer {
		fn render(&self, name: &str, context: &Map<String, Value>) -> Result<String> {
			let context = Context::from_serialize(context)
				.map_err(|e| Error::Template(format!("{}: {}", name, describe(&e))))?;
			self.tera
				.render(name, &context)
				.map_err(|e| Error::Template(format!("{}: {}", name, describe(&e))))
		}
	}

	/// Flatten an error and its sources into one line
	fn describe(error: &tera::Error) -> String {
		let mut message = error.to_string();
		let mut source = std::error::Error::source(error);
		while let Some(cause) = source {
			message.push_str(": ");
			message.push_str(&cause.to_string());
			source = cause.source();
		}
		message
	}
}
