//! Expected payload builders

use inertia_core::InertiaConfig;
use inertia_render::root_element;
use serde_json::{Value, json};

/// The page a plain full load of `url` is expected to produce
///
/// `url` is the request path (plus query), and the version is the default
/// configuration's.
///
/// # Examples
///
/// ```
/// use inertia_test::inertia_page;
/// use serde_json::json;
///
/// let page = inertia_page("/props/", "TestComponent", json!({"name": "Brandon"}));
/// assert_eq!(page["url"], "/props/");
/// assert_eq!(page["encryptHistory"], false);
/// ```
pub fn inertia_page(url: &str, component: &str, props: Value) -> Value {
	json!({
		"component": component,
		"props": props,
		"url": url,
		"version": InertiaConfig::default().version,
		"encryptHistory": false,
		"clearHistory": false,
	})
}

/// The root element embedding `page`
///
/// # Examples
///
/// ```
/// use inertia_test::{inertia_div, inertia_page};
/// use serde_json::json;
///
/// let div = inertia_div(&inertia_page("/props/", "TestComponent", json!({})));
/// assert!(div.starts_with(r#"<div id="app" data-page="{&quot;component&quot;:&quot;TestComponent&quot;"#));
/// ```
pub fn inertia_div(page: &Value) -> String {
	root_element(&page.to_string())
}
