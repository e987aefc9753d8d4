//! Middleware integration tests: redirects, asset versions, CSRF and sessions

use inertia::StatusCode;
use inertia::http::Method;
use inertia::test::assertions::assert_json_response;
use inertia::test::{TestClient, inertia_page};
use inertia_integration_tests::app::{build_app, test_config};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::put(Method::PUT, StatusCode::SEE_OTHER)]
#[case::patch(Method::PATCH, StatusCode::SEE_OTHER)]
#[case::delete(Method::DELETE, StatusCode::SEE_OTHER)]
#[case::post(Method::POST, StatusCode::FOUND)]
#[case::get(Method::GET, StatusCode::FOUND)]
#[tokio::test]
async fn test_protocol_redirect_status(#[case] method: Method, #[case] expected: StatusCode) {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client.request(method, "/redirect/").build().unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), expected);
	assert_eq!(response.header("Location"), Some("/empty/"));
}

#[rstest]
#[case::put(Method::PUT)]
#[case::patch(Method::PATCH)]
#[case::delete(Method::DELETE)]
#[tokio::test]
async fn test_browser_redirects_are_untouched(#[case] method: Method) {
	let app = build_app(test_config());
	let client = app.client();

	let request = client.request(method, "/redirect/").build().unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_configured_methods_extend_rewriting() {
	let app = build_app(test_config().with_redirect_methods(["POST", "PUT", "PATCH", "DELETE"]));
	let client = app.inertia_client();

	let response = client.post("/redirect/").await.unwrap();

	assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_stale_version_forces_full_visit() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::GET, "/empty/")
		.version("some-nonsense")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::CONFLICT);
	assert_eq!(
		response.header("X-Inertia-Location"),
		Some("http://testserver/empty/")
	);
	assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_matching_version_is_served() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::GET, "/empty/")
		.version("1.0")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_json_response(&response, inertia_page("/empty/", "TestComponent", json!({})));
}

#[tokio::test]
async fn test_stale_version_ignored_for_browser_visits() {
	let app = build_app(test_config());
	let client = app.client();

	let request = client
		.request(Method::GET, "/empty/")
		.version("some-nonsense")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_csrf_cookie_is_issued_once() {
	let app = build_app(test_config());
	let client = app.client();

	client.get("/test/").await.unwrap();
	let first = client.cookie("csrftoken").unwrap();
	assert_eq!(first.len(), 32);
	assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));

	client.get("/empty/").await.unwrap();
	assert_eq!(client.cookie("csrftoken").unwrap(), first);
}

#[tokio::test]
async fn test_csrf_cookie_survives_conflict() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let request = client
		.request(Method::GET, "/empty/")
		.version("stale")
		.build()
		.unwrap();
	let response = client.send(request).await.unwrap();

	assert_eq!(response.status(), StatusCode::CONFLICT);
	assert!(
		response
			.headers
			.get_all("set-cookie")
			.iter()
			.any(|cookie| cookie.to_str().unwrap_or_default().starts_with("csrftoken="))
	);
}

#[tokio::test]
async fn test_custom_csrf_cookie_name() {
	let app = build_app(test_config().with_csrf_cookie_name("XSRF-TOKEN"));
	let client = app.client();

	client.get("/test/").await.unwrap();

	assert!(client.cookie("XSRF-TOKEN").is_some());
	assert!(client.cookie("csrftoken").is_none());
}

#[tokio::test]
async fn test_session_cookie_is_issued() {
	let app = build_app(test_config());
	let client: TestClient = app.client();

	client.get("/empty/").await.unwrap();

	assert!(client.cookie("sessionid").is_some());
}
