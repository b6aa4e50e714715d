use serde::{Deserialize, Serialize};

use crate::{LyreService, Result};
use lyre_storage::catalog::CatalogSession;

pub const FEATURES: [&str; 5] = [
	"keyword_retrieval",
	"semantic_rerank",
	"popularity_boost",
	"weather_filter",
	"playlist_feature_similarity",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
	pub total_songs: u64,
	pub total_lyric_chunks: u64,
	pub algorithm_version: String,
	pub features: Vec<String>,
}

impl LyreService {
	pub async fn stats(&self) -> Result<StatsResponse> {
		let catalog = CatalogSession::open(self.catalog.as_ref(), "stats");
		let total_songs = catalog.count_songs().await?;
		let total_lyric_chunks = catalog.count_lyric_chunks().await?;

		Ok(StatsResponse {
			total_songs,
			total_lyric_chunks,
			algorithm_version: self.cfg.stats.algorithm_version.clone(),
			features: FEATURES.iter().map(|feature| feature.to_string()).collect(),
		})
	}
}
