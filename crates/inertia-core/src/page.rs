//! The page object sent to the client.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page descriptor for one response
///
/// Field names and order are part of the wire format.
///
/// # Examples
///
/// ```
/// use inertia_core::Page;
/// use serde_json::json;
///
/// let page = Page {
///     component: "TestComponent".into(),
///     props: json!({"name": "Brandon"}).as_object().cloned().unwrap(),
///     url: "/props/".into(),
///     version: "1.0".into(),
///     encrypt_history: false,
///     clear_history: false,
///     deferred_props: None,
///     merge_props: None,
/// };
///
/// assert_eq!(
///     serde_json::to_string(&page).unwrap(),
///     r#"{"component":"TestComponent","props":{"name":"Brandon"},"url":"/props/","version":"1.0","encryptHistory":false,"clearHistory":false}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
	pub component: String,
	pub props: Map<String, Value>,
	pub url: String,
	pub version: String,
	pub encrypt_history: bool,
	pub clear_history: bool,
	/// Group name to deferred prop names, in declaration order
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deferred_props: Option<IndexMap<String, Vec<String>>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub merge_props: Option<Vec<String>>,
}

impl Page {
	/// Serialize to the JSON text embedded in HTML and sent to pre-rendering
	pub fn to_json(&self) -> inertia_http::Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}
