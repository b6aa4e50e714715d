use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub recommend: Recommend,
	pub random: Random,
	pub stats: Stats,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	/// Optional. Blank values are treated as absent.
	#[serde(default)]
	pub api_key: Option<String>,
	/// Lyric chunks: `song_id`, `chunk_idx`, `words`, plus the chunk vector.
	pub lyric_collection: String,
	/// Song metadata: `song_id`, `title`, `artists`, `popularity`, `level`,
	/// `album_img_url`, plus the song vector.
	pub song_collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	/// Optional. When absent the embedding call blocks until the provider answers.
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Recommend {
	/// Chunks fetched per query term before deduplication.
	#[serde(default = "default_candidate_limit")]
	pub candidate_limit: u32,
	/// The advanced endpoint ranks `top_k * advanced_multiplier` rows before truncating.
	#[serde(default = "default_advanced_multiplier")]
	pub advanced_multiplier: u32,
}

#[derive(Debug, Deserialize)]
pub struct Random {
	#[serde(default = "default_random_fetch_limit")]
	pub fetch_limit: u32,
	/// Size of the top slice drawn from after playlist feature re-ranking.
	#[serde(default = "default_similarity_pool")]
	pub similarity_pool: u32,
}

#[derive(Debug, Deserialize)]
pub struct Stats {
	pub algorithm_version: String,
}

fn default_candidate_limit() -> u32 {
	50
}

fn default_advanced_multiplier() -> u32 {
	3
}

fn default_random_fetch_limit() -> u32 {
	500
}

fn default_similarity_pool() -> u32 {
	10
}
