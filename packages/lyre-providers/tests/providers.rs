use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use lyre_config::EmbeddingProviderConfig;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		lyre_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");
	assert_eq!(value, "Bearer secret");
}

#[test]
fn forwards_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-tenant".to_string(), Value::String("speakle".to_string()));

	let headers =
		lyre_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("x-tenant").expect("Missing default header."), "speakle");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), Value::from(3));

	let err = lyre_providers::auth_headers("secret", &defaults)
		.expect_err("Expected non-string header rejection.");

	assert!(matches!(err, lyre_providers::Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn unreachable_provider_surfaces_transport_error() {
	let cfg = EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/embeddings".to_string(),
		model: "test".to_string(),
		dimensions: 4,
		timeout_ms: Some(1_000),
		default_headers: Map::new(),
	};
	let err = lyre_providers::embedding::embed(&cfg, &["hello".to_string()])
		.await
		.expect_err("Expected connection failure.");

	assert!(matches!(err, lyre_providers::Error::Reqwest(_)));
}
