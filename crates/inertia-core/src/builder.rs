//! Page payload construction.
//!
//! [`PageBuilder`] combines shared props with the handler's props, applies the
//! inclusion rules for full loads and partial reloads, resolves what remains,
//! and computes the deferred and merge manifests.

use indexmap::IndexMap;
use inertia_http::{Request, Result, Session};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::InertiaConfig;
use crate::history::{CLEAR_HISTORY_SESSION_KEY, peek_clear_history};
use crate::page::Page;
use crate::props::{Prop, Props};
use crate::protocol::InertiaRequest;
use crate::resolve::deep_transform;
use crate::share::InertiaContext;
use crate::validation::{ERRORS_PROP, VALIDATION_ERRORS_SESSION_KEY, peek_validation_errors};

/// Builds the page for one request and component
pub struct PageBuilder<'a> {
	request: &'a Request,
	component: &'a str,
	props: &'a Props,
	shared: Props,
}

impl<'a> PageBuilder<'a> {
	/// Prepare a page for `component`, picking up props shared on `request`
	pub fn new(request: &'a Request, component: &'a str, props: &'a Props) -> Self {
		let shared = InertiaContext::existing(request)
			.map(|context| context.shared())
			.unwrap_or_default();
		Self {
			request,
			component,
			props,
			shared,
		}
	}

	/// Add shared props on top of those found on the request
	pub fn with_shared(mut self, props: Props) -> Self {
		self.shared.extend(props);
		self
	}

	fn inertia(&self) -> InertiaRequest<'a> {
		InertiaRequest::new(self.request)
	}

	/// Whether the request reloads a subset of this component's props
	pub fn is_partial_reload(&self) -> bool {
		self.inertia().is_partial_reload(self.component)
	}

	/// Resolve the props to send
	///
	/// Handler props replace shared props with the same key. On a partial
	/// reload only requested keys and merge props survive; on a full load
	/// optional and deferred props are dropped.
	pub fn build_props(&self) -> Result<Map<String, Value>> {
		let mut all = self.shared.clone();
		all.extend(self.props.clone());

		let selected: Props = if self.is_partial_reload() {
			let requested = self.inertia().partial_data();
			debug!(
				component = self.component,
				requested = ?requested,
				"Building props for partial reload"
			);
			all.into_iter()
				.filter(|(key, prop)| {
					requested.contains(&key.as_str()) || matches!(prop, Prop::Merge(_))
				})
				.collect()
		} else {
			all.into_iter()
				.filter(|(_, prop)| !prop.ignore_on_first_load())
				.collect()
		};

		deep_transform(&selected)
	}

	/// Deferred prop names by group, for full loads only
	///
	/// Returns `None` on partial reloads and when nothing is deferred.
	pub fn build_deferred_props(&self) -> Option<IndexMap<String, Vec<String>>> {
		if self.is_partial_reload() {
			return None;
		}

		let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
		for (key, prop) in self.props.iter() {
			if let Some(group) = prop.deferred_group() {
				groups
					.entry(group.to_string())
					.or_default()
					.push(key.to_string());
			}
		}

		(!groups.is_empty()).then_some(groups)
	}

	/// Names of props the client should merge, minus any it asked to reset
	pub fn build_merge_props(&self) -> Option<Vec<String>> {
		let reset = self.inertia().reset_keys();
		let keys: Vec<String> = self
			.props
			.iter()
			.filter(|(key, prop)| {
				prop.is_mergeable() && prop.should_merge() && !reset.contains(key)
			})
			.map(|(key, _)| key.to_string())
			.collect();

		(!keys.is_empty()).then_some(keys)
	}

	/// Assemble the full page descriptor
	///
	/// Consumes the pending `clearHistory` flag and any stashed validation
	/// errors from the session once the page is built; stashed errors become
	/// the shared `errors` prop. When building fails both stay in the session.
	pub fn build_page(self, config: &InertiaConfig) -> Result<Page> {
		let request = self.request;
		let page = self.assemble(config)?;

		if let Some(session) = Session::from_request(request) {
			session.pop(VALIDATION_ERRORS_SESSION_KEY);
			session.pop(CLEAR_HISTORY_SESSION_KEY);
		}
		Ok(page)
	}

	fn assemble(self, config: &InertiaConfig) -> Result<Page> {
		let clear_history = peek_clear_history(self.request)?;
		let builder = match peek_validation_errors(self.request)? {
			Some(errors) => self.with_shared(Props::new().with(ERRORS_PROP, Value::Object(errors))),
			None => self,
		};

		let encrypt_history = InertiaContext::existing(builder.request)
			.and_then(|context| context.encrypt_history())
			.unwrap_or(config.encrypt_history);

		Ok(Page {
			component: builder.component.to_string(),
			props: builder.build_props()?,
			url: builder.request.get_full_path(),
			version: config.version.clone(),
			encrypt_history,
			clear_history,
			deferred_props: builder.build_deferred_props(),
			merge_props: builder.build_merge_props(),
		})
	}
}
