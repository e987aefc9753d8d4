//! JSON encoding of domain records for props.
//!
//! Records are serialized through serde, then reduced to their declared field
//! allowlist, or stripped of sensitive fields when no allowlist is declared.

use inertia_http::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A record that can be sent to the client as a prop.
///
/// # Examples
///
/// ```
/// use inertia_core::encoder::{model_to_value, InertiaModel};
/// use serde::Serialize;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct Sport { id: u32, name: String, season: String }
///
/// impl InertiaModel for Sport {
///     fn inertia_fields() -> Option<&'static [&'static str]> {
///         Some(&["id", "name"])
///     }
/// }
///
/// let sport = Sport { id: 3, name: "Hockey".into(), season: "Winter".into() };
/// assert_eq!(model_to_value(&sport).unwrap(), json!({"id": 3, "name": "Hockey"}));
/// ```
pub trait InertiaModel: Serialize {
	/// Fields to send, in order. `None` sends every field except [`InertiaModel::excluded_fields`].
	fn inertia_fields() -> Option<&'static [&'static str]> {
		None
	}

	/// Fields never sent when no allowlist is declared.
	fn excluded_fields() -> &'static [&'static str] {
		&["password"]
	}
}

/// Encode one record.
///
/// # Errors
///
/// Returns [`Error::Serialization`] when the record does not serialize to a JSON object.
pub fn model_to_value<M: InertiaModel>(model: &M) -> Result<Value> {
	let Value::Object(mut fields) = serde_json::to_value(model)? else {
		return Err(Error::Serialization(
			"InertiaModel must serialize to a JSON object".to_string(),
		));
	};

	let encoded = match M::inertia_fields() {
		Some(allowed) => allowed
			.iter()
			.map(|name| {
				let value = fields.remove(*name).unwrap_or(Value::Null);
				(name.to_string(), value)
			})
			.collect::<Map<String, Value>>(),
		None => {
			for name in M::excluded_fields() {
				fields.shift_remove(*name);
			}
			fields
		}
	};

	Ok(Value::Object(encoded))
}

/// Encode every record of a collection, in iteration order.
pub fn models_to_value<'a, M, I>(models: I) -> Result<Value>
where
	M: InertiaModel + 'a,
	I: IntoIterator<Item = &'a M>,
{
	models
		.into_iter()
		.map(model_to_value)
		.collect::<Result<Vec<_>>>()
		.map(Value::Array)
}
