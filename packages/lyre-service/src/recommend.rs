mod popularity;
mod ranking;
mod retrieval;

use serde::{Deserialize, Serialize};

use crate::{Error, LyreService, Result};
use lyre_storage::catalog::{CatalogSession, CatalogStore};
use popularity::PopularityResolver;
use ranking::Weights;

/// Tag attached to every ranked row.
pub const SOURCE_TAG: &str = "bm25+rerank+popularity";

const DEFAULT_TOP_K: u32 = 50;
const DEFAULT_SIMILARITY_WEIGHT: f32 = 0.7;
const DEFAULT_POPULARITY_WEIGHT: f32 = 0.3;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendRequest {
	pub words: Vec<String>,
	pub phrases: Vec<String>,
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	#[serde(default = "default_similarity_weight")]
	pub similarity_weight: f32,
	#[serde(default = "default_popularity_weight")]
	pub popularity_weight: f32,
	/// Chunks whose first occurrence resolves below this popularity are dropped.
	#[serde(default)]
	pub min_popularity: Option<i64>,
}
impl RecommendRequest {
	/// `words` then `phrases`, duplicates kept.
	pub fn terms(&self) -> Vec<&str> {
		self.words.iter().chain(&self.phrases).map(String::as_str).collect()
	}

	fn validate(&self) -> Result<()> {
		for (label, weight) in [
			("similarity_weight", self.similarity_weight),
			("popularity_weight", self.popularity_weight),
		] {
			if !weight.is_finite() {
				return Err(Error::InvalidRequest {
					message: format!("{label} must be a finite number."),
				});
			}
		}

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendItem {
	pub song_id: String,
	pub chunk_idx: i64,
	pub words: String,
	/// Same value as `final_score`.
	pub score: f32,
	pub similarity_score: f32,
	pub popularity_score: f32,
	pub final_score: f32,
	pub source: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
	pub results: Vec<RecommendItem>,
}

impl LyreService {
	/// Keyword retrieval, deduplication, then hybrid ranking of every
	/// (query term, candidate) pair, truncated to `top_k`.
	pub async fn recommend(&self, req: RecommendRequest) -> Result<RecommendResponse> {
		req.validate()?;

		let catalog = CatalogSession::open(self.catalog.as_ref(), "recommend");
		let results = self.rank(&*catalog, &req, req.top_k as usize).await?;

		Ok(RecommendResponse { results })
	}

	/// Ranks a `top_k * advanced_multiplier` pool, passes it through artist
	/// diversification, then truncates to `top_k`.
	pub async fn recommend_advanced(&self, req: RecommendRequest) -> Result<RecommendResponse> {
		req.validate()?;

		let catalog = CatalogSession::open(self.catalog.as_ref(), "recommend_advanced");
		let pool_size =
			(req.top_k as usize).saturating_mul(self.cfg.recommend.advanced_multiplier as usize);
		let mut results = diversify_by_artist(self.rank(&*catalog, &req, pool_size).await?);

		results.truncate(req.top_k as usize);

		Ok(RecommendResponse { results })
	}

	async fn rank(
		&self,
		catalog: &dyn CatalogStore,
		req: &RecommendRequest,
		top_k: usize,
	) -> Result<Vec<RecommendItem>> {
		let terms = req.terms();
		let raw =
			retrieval::retrieve(catalog, &terms, self.cfg.recommend.candidate_limit).await?;
		let raw_count = raw.len();
		let mut resolver = PopularityResolver::new(catalog);
		let candidates = retrieval::dedupe(raw, req.min_popularity, &mut resolver).await;

		tracing::info!(
			terms = terms.len(),
			raw = raw_count,
			unique = candidates.len(),
			popularity_lookups = resolver.lookups(),
			"Collected lyric candidates."
		);

		let weights =
			Weights { similarity: req.similarity_weight, popularity: req.popularity_weight };
		let mut scored = Vec::new();

		for term in &terms {
			let query_vec = self.embed_one(term).await?;

			ranking::score_term(&query_vec, &candidates, weights, &mut scored);
		}

		Ok(ranking::take_top(scored, top_k))
	}
}

// Artist balancing is not applied yet; the advanced pool passes through in score order.
fn diversify_by_artist(results: Vec<RecommendItem>) -> Vec<RecommendItem> {
	results
}

fn default_top_k() -> u32 {
	DEFAULT_TOP_K
}

fn default_similarity_weight() -> f32 {
	DEFAULT_SIMILARITY_WEIGHT
}

fn default_popularity_weight() -> f32 {
	DEFAULT_POPULARITY_WEIGHT
}
