pub mod random;
pub mod recommend;
pub mod stats;

mod error;

pub use error::{Error, Result};
pub use random::{RandomSongRequest, RandomSongResponse, WeatherData};
pub use recommend::{RecommendItem, RecommendRequest, RecommendResponse};
pub use stats::StatsResponse;

use std::{future::Future, pin::Pin, sync::Arc};

use lyre_config::{Config, EmbeddingProviderConfig};
use lyre_providers::embedding;
use lyre_storage::catalog::CatalogStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Text to unit-length vector.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

/// Built once at startup and shared by every request.
pub struct LyreService {
	pub cfg: Config,
	pub catalog: Arc<dyn CatalogStore>,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl LyreService {
	pub fn new(cfg: Config, catalog: Arc<dyn CatalogStore>) -> Self {
		Self { cfg, catalog, providers: Providers::default() }
	}

	pub fn with_providers(
		cfg: Config,
		catalog: Arc<dyn CatalogStore>,
		providers: Providers,
	) -> Self {
		Self { cfg, catalog, providers }
	}

	pub(crate) async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
		let texts = [text.to_string()];
		let vectors = self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		vectors.into_iter().next().ok_or_else(|| Error::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})
	}
}
