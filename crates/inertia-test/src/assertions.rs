//! Payload assertions
//!
//! Inclusion checks accept extra keys on the actual side; exact checks do not.
//! All of them panic with a JSON diff on mismatch.

use assert_json_diff::{assert_json_eq, assert_json_include};
use inertia_http::Response;
use serde_json::Value;

use crate::renderer::RecordingRenderer;

fn expect<T>(result: inertia_http::Result<T>, what: &str) -> T {
	match result {
		Ok(value) => value,
		Err(error) => panic!("cannot read {}: {}", what, error),
	}
}

/// The last rendered page's props contain `expected`
pub fn assert_includes_props(renderer: &RecordingRenderer, expected: Value) {
	let actual = expect(renderer.props(), "props");
	assert_json_include!(actual: actual, expected: expected);
}

/// The last rendered page's props equal `expected`
pub fn assert_has_exact_props(renderer: &RecordingRenderer, expected: Value) {
	let actual = expect(renderer.props(), "props");
	assert_json_eq!(actual, expected);
}

pub fn assert_includes_template_data(renderer: &RecordingRenderer, expected: Value) {
	let actual = expect(renderer.template_data(), "template data");
	assert_json_include!(actual: actual, expected: expected);
}

pub fn assert_has_exact_template_data(renderer: &RecordingRenderer, expected: Value) {
	let actual = expect(renderer.template_data(), "template data");
	assert_json_eq!(actual, expected);
}

pub fn assert_component_used(renderer: &RecordingRenderer, component: &str) {
	assert_eq!(expect(renderer.component(), "component"), component);
}

/// `response` is a JSON response whose body equals `expected`
pub fn assert_json_response(response: &Response, expected: Value) {
	assert_eq!(
		response.header("content-type"),
		Some("application/json"),
		"not a JSON response"
	);
	let actual: Value = match serde_json::from_slice(&response.body) {
		Ok(value) => value,
		Err(error) => panic!("response body is not JSON: {}", error),
	};
	assert_json_eq!(actual, expected);
}
