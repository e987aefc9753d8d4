//! Model encoding and configuration loading integration tests

use inertia::core::encoder::{model_to_value, models_to_value};
use inertia::{InertiaConfig, Props};
use inertia_integration_tests::app::{build_app, test_config};
use inertia_integration_tests::models::{brandon, sports};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_model_without_allowlist_drops_password() {
	let encoded = model_to_value(&brandon()).unwrap();

	assert_eq!(
		encoded.to_string(),
		r#"{"id":null,"name":"Brandon","birthdate":"1987-02-15","registered_at":"2022-10-31T10:13:01"}"#
	);
}

#[rstest]
fn test_model_allowlist_sets_fields_and_order() {
	let encoded = models_to_value(&sports()).unwrap();

	assert_eq!(
		encoded,
		json!([
			{"id": 1, "name": "Hockey", "created_at": "2022-10-31T10:13:01"},
			{"id": 2, "name": "Baseball", "created_at": "2022-10-31T10:13:01"},
		])
	);
	assert!(encoded[0].get("season").is_none());
}

#[tokio::test]
async fn test_encoded_models_as_props() {
	let inertia = build_app(test_config()).inertia;
	let request = inertia::test::RequestFactory::inertia()
		.get("/users/")
		.build()
		.unwrap();
	let props = Props::new().with("user", model_to_value(&brandon()).unwrap());

	let response = inertia.render(&request, "Users/Show", props).await.unwrap();

	let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
	assert_eq!(body["props"]["user"]["name"], "Brandon");
	assert!(body["props"]["user"].get("password").is_none());
}

#[rstest]
fn test_config_from_toml_file() {
	let path = std::env::temp_dir().join(format!("inertia-config-{}.toml", std::process::id()));
	std::fs::write(
		&path,
		"version = \"2.0\"\nlayout = \"base.html\"\nredirect_methods = [\"post\", \"put\"]\n",
	)
	.unwrap();

	let config = InertiaConfig::from_toml_file(&path);
	std::fs::remove_file(&path).unwrap();
	let config = config.unwrap();

	assert_eq!(config.version, "2.0");
	assert_eq!(config.layout.as_deref(), Some("base.html"));
	assert!(config.rewrites_redirect_for("POST"));
	assert!(!config.rewrites_redirect_for("DELETE"));
}

#[rstest]
#[case::string(r#"encrypt_history = "yes""#, "expected bool for encrypt_history, got string")]
#[case::integer("ssr_enabled = 1", "expected bool for ssr_enabled, got integer")]
fn test_config_rejects_non_boolean_flags(#[case] source: &str, #[case] message: &str) {
	let error = InertiaConfig::from_toml_str(source).unwrap_err();

	assert_eq!(error.to_string(), message);
}

#[tokio::test]
async fn test_configured_version_is_sent() {
	let app = build_app(test_config().with_version("2024-10-18"));

	let response = app.inertia_client().get("/empty/").await.unwrap();

	assert_eq!(response.json().unwrap()["version"], "2024-10-18");
}
