//! Deep resolution of props into plain JSON.

use inertia_http::Result;
use serde_json::{Map, Value};

use crate::props::Props;

/// Resolve every prop in `props`, recursing into nested mappings.
///
/// The input is only borrowed; a fresh map is returned. Nested [`Prop::Map`](crate::props::Prop::Map)
/// entries are walked, every other wrapper is invoked once, and its output is
/// taken as-is. Sequences are never inspected.
///
/// # Examples
///
/// ```
/// use inertia_core::props::{callable, Props};
/// use inertia_core::resolve::deep_transform;
/// use serde_json::json;
///
/// let props = Props::new().with(
///     "person",
///     Props::new().with("name", callable(|| "Brandon")),
/// );
///
/// let resolved = deep_transform(&props).unwrap();
/// assert_eq!(serde_json::Value::Object(resolved), json!({"person": {"name": "Brandon"}}));
/// ```
pub fn deep_transform(props: &Props) -> Result<Map<String, Value>> {
	props
		.iter()
		.map(|(key, prop)| Ok((key.to_string(), prop.resolve()?)))
		.collect()
}
