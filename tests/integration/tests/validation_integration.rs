//! Form validation integration tests
//!
//! Failed submissions redirect back; the next page carries the first message
//! per field as the `errors` prop.

use inertia::StatusCode;
use inertia::http::Method;
use inertia_integration_tests::app::{build_app, test_config};
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn test_invalid_form_redirects_back_with_errors() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::POST, "/form/")
		.json(&json!({"name": "", "email": "nope"}))
		.unwrap()
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(response.header("Location"), Some("/form/"));

	let response = client.follow(response).await.unwrap();
	let body = response.json().unwrap();
	assert_eq!(body["url"], "/form/");
	assert_eq!(
		body["props"],
		json!({
			"errors": {
				"name": "This field is required.",
				"email": "Enter a valid email address.",
			}
		})
	);
}

#[tokio::test]
async fn test_errors_are_shown_once() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::POST, "/form/")
		.json(&json!({"name": "Brandon"}))
		.unwrap()
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();
	let response = client.follow(response).await.unwrap();
	assert_eq!(
		response.json().unwrap()["props"]["errors"],
		json!({"email": "Enter a valid email address."})
	);

	let response = client.get("/form/").await.unwrap();
	assert_eq!(response.json().unwrap()["props"], json!({}));
}

#[tokio::test]
async fn test_valid_form_redirects_onward() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::POST, "/form/")
		.json(&json!({"name": "Brandon", "email": "brandon@example.com"}))
		.unwrap()
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.header("Location"), Some("/empty/"));
	let response = client.follow(response).await.unwrap();
	assert!(response.json().unwrap().get("props").unwrap().get("errors").is_none());
}

#[rstest]
#[case::put(Method::PUT)]
#[case::patch(Method::PATCH)]
#[tokio::test]
async fn test_validation_redirect_is_rewritten_for_updates(#[case] method: Method) {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(method, "/form/")
		.json(&json!({"name": ""}))
		.unwrap()
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_errors_reach_the_embedded_page() {
	let app = build_app(test_config());
	let client = app.client();

	let request = client
		.request(Method::POST, "/form/")
		.json(&json!({"name": "", "email": "brandon@example.com"}))
		.unwrap()
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();
	client.follow(response).await.unwrap();

	assert_eq!(
		app.renderer.props().unwrap(),
		json!({"errors": {"name": "This field is required."}})
	);
}

#[tokio::test]
async fn test_malformed_body_is_a_server_error() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::POST, "/form/")
		.body("not json")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
