use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use lyre_api::{routes, state::AppState};
use lyre_config::{
	Config, EmbeddingProviderConfig, Providers as ProviderSettings, Qdrant, Random, Recommend,
	Service, Stats, Storage,
};
use lyre_domain::vector::StoredVector;
use lyre_service::{BoxFuture, EmbeddingProvider, LyreService, Providers, Result};
use lyre_testkit::{InMemoryCatalog, song};

struct UnitEmbedding;
impl EmbeddingProvider for UnitEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		let vectors = vec![vec![1.0, 0.0]; texts.len()];

		Box::pin(async move { Ok(vectors) })
	}
}

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:6334".to_string(),
				api_key: None,
				lyric_collection: "LyricChunk".to_string(),
				song_collection: "Song".to_string(),
				vector_dim: 2,
			},
		},
		providers: ProviderSettings {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/".to_string(),
				model: "test".to_string(),
				dimensions: 2,
				timeout_ms: None,
				default_headers: Map::new(),
			},
		},
		recommend: Recommend { candidate_limit: 50, advanced_multiplier: 3 },
		random: Random { fetch_limit: 500, similarity_pool: 10 },
		stats: Stats { algorithm_version: "hybrid-v1".to_string() },
	}
}

fn test_app(catalog: InMemoryCatalog) -> Router {
	let service = LyreService::with_providers(
		test_config(),
		Arc::new(catalog),
		Providers::new(Arc::new(UnitEmbedding)),
	);

	routes::router(AppState::from_service(service))
}

fn sample_catalog() -> InMemoryCatalog {
	InMemoryCatalog::new()
		.with_chunk("s1", 0, Some("yours truly"), Some(StoredVector::Dense(vec![1.0, 0.0])))
		.with_chunk("s2", 2, Some("forever yours"), Some(StoredVector::Dense(vec![0.6, 0.8])))
		.with_song(song("s1", "Truly", 90))
		.with_song(song("s2", "Forever Rain", 85))
}

async fn send(
	app: Router,
	method: &str,
	uri: &str,
	payload: Option<Value>,
) -> (StatusCode, Value) {
	let mut builder = Request::builder().method(method).uri(uri);
	let body = match payload {
		Some(payload) => {
			builder = builder.header("content-type", "application/json");

			Body::from(payload.to_string())
		},
		None => Body::empty(),
	};
	let response = app
		.oneshot(builder.body(body).expect("Failed to build request."))
		.await
		.expect("Failed to call the router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes)
			.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (status, _) = send(test_app(InMemoryCatalog::new()), "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recommend_returns_ranked_results() {
	let payload = serde_json::json!({ "words": ["yours"], "phrases": [], "top_k": 1 });
	let (status, json) = send(test_app(sample_catalog()), "POST", "/recommend", Some(payload)).await;

	assert_eq!(status, StatusCode::OK);

	let results = json["results"].as_array().expect("results array");

	assert_eq!(results.len(), 1);
	assert_eq!(results[0]["song_id"], "s1");
	assert_eq!(results[0]["chunk_idx"], 0);
	assert_eq!(results[0]["words"], "yours truly");
	assert_eq!(results[0]["source"], "bm25+rerank+popularity");
	assert_eq!(results[0]["score"], results[0]["final_score"]);
}

#[tokio::test]
async fn recommend_advanced_truncates_to_top_k() {
	let payload = serde_json::json!({ "words": ["yours"], "phrases": ["truly"], "top_k": 3 });
	let (status, json) =
		send(test_app(sample_catalog()), "POST", "/recommend/advanced", Some(payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["results"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn recommend_rejects_negative_top_k() {
	let payload = serde_json::json!({ "words": ["yours"], "phrases": [], "top_k": -1 });
	let (status, json) =
		send(test_app(sample_catalog()), "POST", "/recommend", Some(payload)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
	assert!(json["message"].as_str().is_some_and(|message| !message.is_empty()));
}

#[tokio::test]
async fn recommend_requires_words_and_phrases() {
	let payload = serde_json::json!({ "words": ["yours"] });
	let (status, json) =
		send(test_app(sample_catalog()), "POST", "/recommend/advanced", Some(payload)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn random_rejects_malformed_json() {
	let app = test_app(sample_catalog());
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/recommend/random")
				.header("content-type", "application/json")
				.body(Body::from("{\"userId\": "))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call the router.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(json["error_code"], "INVALID_REQUEST");
	assert!(json.get("fields").is_none());
}

#[tokio::test]
async fn random_returns_camel_case_song() {
	let payload = serde_json::json!({
		"userId": "u1",
		"weatherData": { "condition": "Rain" },
		"minPopularity": 80
	});
	let (status, json) =
		send(test_app(sample_catalog()), "POST", "/recommend/random", Some(payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["songId"], "s2");
	assert_eq!(json["title"], "Forever Rain");
	assert_eq!(json["popularity"], 85);
	assert!(json.get("albumImageUrl").is_none());
}

#[tokio::test]
async fn random_without_songs_is_a_server_error() {
	let payload = serde_json::json!({ "userId": "u1", "minPopularity": 101 });
	let (status, json) =
		send(test_app(sample_catalog()), "POST", "/recommend/random", Some(payload)).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "NO_SONGS_FOUND");
}

#[tokio::test]
async fn random_storage_failure_is_a_server_error() {
	let payload = serde_json::json!({ "userId": "u1" });
	let app = test_app(sample_catalog().failing_song_queries());
	let (status, json) = send(app, "POST", "/recommend/random", Some(payload)).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(json["error_code"], "STORAGE_ERROR");
}

#[tokio::test]
async fn stats_reports_counts() {
	let (status, json) = send(test_app(sample_catalog()), "GET", "/recommend/stats", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total_songs"], 2);
	assert_eq!(json["total_lyric_chunks"], 2);
	assert_eq!(json["algorithm_version"], "hybrid-v1");
	assert_eq!(json["features"].as_array().map(Vec::len), Some(5));
}
