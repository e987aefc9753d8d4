//! History encryption and clearing integration tests

use inertia::StatusCode;
use inertia_integration_tests::app::{build_app, test_config};
use rstest::rstest;
use serde_json::json;
use serial_test::serial;

#[rstest]
#[case::default_off(false, "/empty/", false)]
#[case::default_on(true, "/empty/", true)]
#[case::view_enables(false, "/encrypt-history/", true)]
#[case::view_disables(true, "/no-encrypt-history/", false)]
#[tokio::test]
async fn test_encrypt_history(
	#[case] configured: bool,
	#[case] path: &str,
	#[case] expected: bool,
) {
	let app = build_app(test_config().with_encrypt_history(configured));

	let response = app.inertia_client().get(path).await.unwrap();

	assert_eq!(response.json().unwrap()["encryptHistory"], json!(expected));
}

#[tokio::test]
async fn test_clear_history_on_same_request() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/clear-history/").await.unwrap();

	assert_eq!(response.json().unwrap()["clearHistory"], json!(true));
}

#[tokio::test]
async fn test_clear_history_survives_redirect_once() {
	let app = build_app(test_config());
	let client = app.inertia_client();

	let response = client.get("/clear-history-redirect/").await.unwrap();
	assert_eq!(response.status(), StatusCode::FOUND);

	let response = client.follow(response).await.unwrap();
	assert_eq!(response.json().unwrap()["url"], "/empty/");
	assert_eq!(response.json().unwrap()["clearHistory"], json!(true));

	let response = client.get("/empty/").await.unwrap();
	assert_eq!(response.json().unwrap()["clearHistory"], json!(false));
}

#[tokio::test]
async fn test_clear_history_in_embedded_page() {
	let app = build_app(test_config());

	app.client().get("/clear-history/").await.unwrap();

	assert_eq!(app.renderer.page().unwrap()["clearHistory"], json!(true));
}

#[tokio::test]
async fn test_non_boolean_clear_history_is_an_error() {
	let app = build_app(test_config());

	let response = app.inertia_client().get("/clear-history-type-error/").await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert!(
		response
			.text()
			.contains("expected bool for clear_history, got string")
	);
}

#[tokio::test]
#[serial(env)]
async fn test_encrypt_history_from_environment() {
	// SAFETY: env-mutating tests are serialized with `#[serial(env)]`
	unsafe {
		std::env::set_var("INERTIA_ENCRYPT_HISTORY", "true");
	}
	let config = inertia::InertiaConfig::from_env();
	// SAFETY: as above
	unsafe {
		std::env::remove_var("INERTIA_ENCRYPT_HISTORY");
	}

	let app = build_app(config.unwrap().with_layout("layout.html"));
	let response = app.inertia_client().get("/empty/").await.unwrap();

	assert_eq!(response.json().unwrap()["encryptHistory"], json!(true));
}
