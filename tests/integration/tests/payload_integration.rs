//! Page payload integration tests
//!
//! Drives the test application through the full middleware chain and checks
//! the JSON page objects returned to protocol visits.

use inertia::StatusCode;
use inertia::test::assertions::assert_json_response;
use inertia::test::{init_test_logging, inertia_page};
use inertia_integration_tests::app::{build_app, test_config};
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn test_props_page_is_exact_json() {
	init_test_logging();
	let app = build_app(test_config());

	let response = app.inertia_client().get("/props/").await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.header("X-Inertia"), Some("true"));
	assert_eq!(response.header("Vary"), Some("X-Inertia"));
	assert_eq!(
		response.text(),
		r#"{"component":"TestComponent","props":{"name":"Brandon","sport":"Hockey"},"url":"/props/","version":"1.0","encryptHistory":false,"clearHistory":false}"#
	);
}

#[tokio::test]
async fn test_empty_props() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/empty/").await.unwrap();

	assert_json_response(&response, inertia_page("/empty/", "TestComponent", json!({})));
}

#[tokio::test]
async fn test_template_data_stays_out_of_json() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/template_data/").await.unwrap();

	assert_json_response(
		&response,
		inertia_page("/template_data/", "TestComponent", json!({})),
	);
}

#[tokio::test]
async fn test_query_string_is_part_of_url() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/props/?page=2").await.unwrap();

	assert_eq!(response.json().unwrap()["url"], "/props/?page=2");
}

#[rstest]
#[case::lazy("/lazy/")]
#[case::optional("/optional/")]
#[tokio::test]
async fn test_optional_props_skipped_on_first_load(#[case] path: &str) {
	let app = build_app(test_config());

	let response = app.inertia_client().get(path).await.unwrap();

	assert_json_response(
		&response,
		inertia_page(path, "TestComponent", json!({"name": "Brian"})),
	);
}

#[rstest]
#[case::lazy("/lazy/")]
#[case::optional("/optional/")]
#[tokio::test]
async fn test_partial_reload_returns_only_requested(#[case] path: &str) {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(inertia::http::Method::GET, path)
		.partial("TestComponent", "sport")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_json_response(
		&response,
		inertia_page(path, "TestComponent", json!({"sport": "Basketball"})),
	);
}

#[tokio::test]
async fn test_partial_reload_for_another_component_is_a_full_load() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(inertia::http::Method::GET, "/optional/")
		.partial("OtherComponent", "sport")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.json().unwrap()["props"], json!({"name": "Brian"}));
}

#[tokio::test]
async fn test_partial_reload_keeps_header_order_out_of_payload() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(inertia::http::Method::GET, "/optional/")
		.partial("TestComponent", " grit , sport ")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	// Declaration order wins over header order.
	assert_eq!(
		response.json().unwrap()["props"].to_string(),
		r#"{"sport":"Basketball","grit":"intense"}"#
	);
}

#[tokio::test]
async fn test_deferred_props_are_announced() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/defer/").await.unwrap();

	let mut expected = inertia_page("/defer/", "TestComponent", json!({"name": "Brian"}));
	expected["deferredProps"] = json!({"default": ["sport"]});
	assert_json_response(&response, expected);
}

#[tokio::test]
async fn test_deferred_props_resolve_on_partial_reload() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(inertia::http::Method::GET, "/defer/")
		.partial("TestComponent", "sport")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	let body = response.json().unwrap();
	assert_eq!(body["props"], json!({"sport": "Basketball"}));
	assert!(body.get("deferredProps").is_none());
}

#[tokio::test]
async fn test_deferred_groups() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/defer-group/").await.unwrap();

	let body = response.json().unwrap();
	assert_eq!(body["props"], json!({"name": "Brian"}));
	assert_eq!(
		body["deferredProps"],
		json!({"group": ["sport", "team"], "default": ["grit"]})
	);
}

#[tokio::test]
async fn test_merge_props() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/merge/").await.unwrap();

	let mut expected = inertia_page(
		"/merge/",
		"TestComponent",
		json!({"name": "Brandon", "sport": "Hockey"}),
	);
	expected["deferredProps"] = json!({"default": ["team"]});
	expected["mergeProps"] = json!(["sport", "team"]);
	assert_json_response(&response, expected);
}

#[rstest]
#[case::reset_one("sport", json!(["team"]))]
#[case::reset_all("sport,team", json!(null))]
#[tokio::test]
async fn test_reset_keys_suppress_merging(
	#[case] reset: &str,
	#[case] expected: serde_json::Value,
) {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(inertia::http::Method::GET, "/merge/")
		.reset(reset)
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	let body = response.json().unwrap();
	assert_eq!(body.get("mergeProps").cloned().unwrap_or(json!(null)), expected);
}

#[tokio::test]
async fn test_callables_resolve_inside_nested_props() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/complex-props/").await.unwrap();

	assert_eq!(
		response.json().unwrap()["props"],
		json!({"person": {"name": "Brandon"}})
	);
}

#[tokio::test]
async fn test_shared_props_come_first() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/share/").await.unwrap();

	assert_eq!(
		response.json().unwrap()["props"].to_string(),
		r#"{"position":"goalie","number":29,"name":"Brandon"}"#
	);
}

#[tokio::test]
async fn test_list_view_serializes_selected_fields() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/sports/").await.unwrap();

	let body = response.json().unwrap();
	assert_eq!(body["component"], "Sports");
	let expected = json!([
		{"id": 1, "name": "Hockey"},
		{"id": 2, "name": "Baseball"},
	]);
	assert_eq!(body["props"]["object_list"], expected);
	assert_eq!(body["props"]["sports"], expected);
}

#[tokio::test]
async fn test_empty_list_view_is_not_found() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/no-sports/").await.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
	let app = build_app(test_config());

	let response = app.client().get("/nowhere/").await.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
