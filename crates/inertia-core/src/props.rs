//! Property wrappers.
//!
//! A page's props are an ordered mapping from name to [`Prop`]. The variant
//! decides when a prop is evaluated and whether it is included in a given
//! response:
//!
//! | Variant | Full load | Partial reload | Deferred manifest | Merge manifest |
//! |---|---|---|---|---|
//! | `Value` / `Map` / `Callable` | included | if requested | - | - |
//! | `Optional` | excluded | if requested | - | - |
//! | `Deferred` | excluded | if requested | listed by group | if `merge` |
//! | `Merge` | included | always | - | unless reset |

use indexmap::IndexMap;
use inertia_http::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lazily produces a prop value.
pub type Resolver = Arc<dyn Fn() -> Result<Value> + Send + Sync>;

/// Group name used by [`defer`] when none is given.
pub const DEFAULT_DEFER_GROUP: &str = "default";

/// A single named property as declared by a handler or shared state.
#[derive(Clone)]
pub enum Prop {
	/// Plain data, included as-is.
	Value(Value),
	/// Nested mapping whose entries are resolved recursively.
	Map(Props),
	/// Always included; invoked at resolution time.
	Callable(Resolver),
	/// Only included when a partial reload asks for it by name.
	Optional(Resolver),
	/// Left out of the first load and fetched by the client afterwards.
	Deferred(Deferred),
	/// Always included; the client appends instead of replacing.
	Merge(Resolver),
}

/// Settings of a deferred prop.
#[derive(Clone)]
pub struct Deferred {
	resolver: Resolver,
	group: String,
	merge: bool,
}

impl Deferred {
	/// Fetch this prop together with the other props of `group`.
	pub fn group(mut self, group: impl Into<String>) -> Self {
		self.group = group.into();
		self
	}

	/// Ask the client to merge this prop once it arrives.
	pub fn merge(mut self, merge: bool) -> Self {
		self.merge = merge;
		self
	}

	pub fn group_name(&self) -> &str {
		&self.group
	}

	pub fn is_merge(&self) -> bool {
		self.merge
	}
}

impl From<Deferred> for Prop {
	fn from(deferred: Deferred) -> Self {
		Prop::Deferred(deferred)
	}
}

impl Prop {
	/// Wrap a fallible closure as an always-included prop.
	pub fn try_callable<F>(f: F) -> Self
	where
		F: Fn() -> Result<Value> + Send + Sync + 'static,
	{
		Prop::Callable(Arc::new(f))
	}

	/// Wrap a fallible closure as an optional prop.
	pub fn try_optional<F>(f: F) -> Self
	where
		F: Fn() -> Result<Value> + Send + Sync + 'static,
	{
		Prop::Optional(Arc::new(f))
	}

	/// Wrap a fallible closure as a merge prop.
	pub fn try_merge<F>(f: F) -> Self
	where
		F: Fn() -> Result<Value> + Send + Sync + 'static,
	{
		Prop::Merge(Arc::new(f))
	}

	/// Serialize any value into a plain prop.
	///
	/// # Errors
	///
	/// Returns [`Error::Serialization`] when `value` cannot be represented as JSON.
	pub fn serialize<T: Serialize>(value: &T) -> Result<Self> {
		Ok(Prop::from(serde_json::to_value(value)?))
	}

	/// Left out of first loads (`Optional` and `Deferred`).
	pub fn ignore_on_first_load(&self) -> bool {
		matches!(self, Prop::Optional(_) | Prop::Deferred(_))
	}

	/// Variants that may take part in client-side merging.
	pub fn is_mergeable(&self) -> bool {
		matches!(self, Prop::Merge(_) | Prop::Deferred(_))
	}

	pub fn should_merge(&self) -> bool {
		match self {
			Prop::Merge(_) => true,
			Prop::Deferred(deferred) => deferred.merge,
			_ => false,
		}
	}

	/// Deferred group of this prop, if it is deferred.
	pub fn deferred_group(&self) -> Option<&str> {
		match self {
			Prop::Deferred(deferred) => Some(&deferred.group),
			_ => None,
		}
	}

	/// Produce the value of this prop, invoking it and any nested props.
	///
	/// Errors raised by a wrapped closure are returned unchanged.
	pub fn resolve(&self) -> Result<Value> {
		match self {
			Prop::Value(value) => Ok(value.clone()),
			Prop::Map(props) => crate::resolve::deep_transform(props).map(Value::Object),
			Prop::Callable(resolver) | Prop::Optional(resolver) | Prop::Merge(resolver) => {
				resolver()
			}
			Prop::Deferred(deferred) => (deferred.resolver)(),
		}
	}
}

impl fmt::Debug for Prop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Prop::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Prop::Map(props) => f.debug_tuple("Map").field(props).finish(),
			Prop::Callable(_) => f.write_str("Callable(..)"),
			Prop::Optional(_) => f.write_str("Optional(..)"),
			Prop::Deferred(deferred) => f
				.debug_struct("Deferred")
				.field("group", &deferred.group)
				.field("merge", &deferred.merge)
				.finish(),
			Prop::Merge(_) => f.write_str("Merge(..)"),
		}
	}
}

impl From<Value> for Prop {
	fn from(value: Value) -> Self {
		Prop::Value(value)
	}
}

impl From<Props> for Prop {
	fn from(props: Props) -> Self {
		Prop::Map(props)
	}
}

impl From<&str> for Prop {
	fn from(value: &str) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<String> for Prop {
	fn from(value: String) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<bool> for Prop {
	fn from(value: bool) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<i64> for Prop {
	fn from(value: i64) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<i32> for Prop {
	fn from(value: i32) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<u64> for Prop {
	fn from(value: u64) -> Self {
		Prop::Value(Value::from(value))
	}
}

impl From<f64> for Prop {
	fn from(value: f64) -> Self {
		Prop::Value(Value::from(value))
	}
}

fn serializing<F, T>(f: F) -> Resolver
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	Arc::new(move || serde_json::to_value(f()).map_err(Error::from))
}

/// An always-included prop evaluated at resolution time.
///
/// # Examples
///
/// ```
/// use inertia_core::props::callable;
/// use serde_json::json;
///
/// let prop = callable(|| "goalie");
/// assert_eq!(prop.resolve().unwrap(), json!("goalie"));
/// assert!(!prop.ignore_on_first_load());
/// ```
pub fn callable<F, T>(f: F) -> Prop
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	Prop::Callable(serializing(f))
}

/// A prop only sent when a partial reload requests it.
///
/// # Examples
///
/// ```
/// use inertia_core::props::optional;
///
/// let prop = optional(|| vec![1, 2, 3]);
/// assert!(prop.ignore_on_first_load());
/// assert!(!prop.is_mergeable());
/// ```
pub fn optional<F, T>(f: F) -> Prop
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	Prop::Optional(serializing(f))
}

/// Older name for [`optional`].
pub fn lazy<F, T>(f: F) -> Prop
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	optional(f)
}

/// A prop fetched by the client after the first load, in the `"default"` group.
///
/// # Examples
///
/// ```
/// use inertia_core::props::{defer, Prop};
///
/// let prop: Prop = defer(|| "Penguins").group("teams").merge(true).into();
/// assert_eq!(prop.deferred_group(), Some("teams"));
/// assert!(prop.should_merge());
/// ```
pub fn defer<F, T>(f: F) -> Deferred
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	Deferred {
		resolver: serializing(f),
		group: DEFAULT_DEFER_GROUP.to_string(),
		merge: false,
	}
}

/// A prop whose value the client merges into what it already holds.
pub fn merge<F, T>(f: F) -> Prop
where
	F: Fn() -> T + Send + Sync + 'static,
	T: Serialize,
{
	Prop::Merge(serializing(f))
}

/// Ordered mapping of prop names to wrappers.
#[derive(Clone, Default, Debug)]
pub struct Props {
	entries: IndexMap<String, Prop>,
}

impl Props {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a prop, builder style.
	///
	/// # Examples
	///
	/// ```
	/// use inertia_core::props::{Props, lazy};
	///
	/// let props = Props::new()
	///     .with("name", "Brian")
	///     .with("sport", lazy(|| "Basketball"));
	///
	/// assert_eq!(props.keys().collect::<Vec<_>>(), vec!["name", "sport"]);
	/// ```
	pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
		self.insert(key, prop);
		self
	}

	/// Insert a prop, returning the one it replaced.
	pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Option<Prop> {
		self.entries.insert(key.into(), prop.into())
	}

	pub fn get(&self, key: &str) -> Option<&Prop> {
		self.entries.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Prop> {
		self.entries.shift_remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Add every entry of `other`; entries of `other` win on collision.
	pub fn extend(&mut self, other: Props) {
		self.entries.extend(other.entries);
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Wrap every field of a JSON object as a plain prop.
	///
	/// Non-object values produce an empty set of props.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(map) => map.into_iter().map(|(k, v)| (k, Prop::Value(v))).collect(),
			_ => Self::new(),
		}
	}
}

impl<K: Into<String>, P: Into<Prop>> FromIterator<(K, P)> for Props {
	fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, p)| (k.into(), p.into()))
				.collect(),
		}
	}
}

impl IntoIterator for Props {
	type Item = (String, Prop);
	type IntoIter = indexmap::map::IntoIter<String, Prop>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
