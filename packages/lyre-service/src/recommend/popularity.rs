use std::collections::HashMap;

use lyre_storage::catalog::CatalogStore;

/// Per-request memo of `song_id -> popularity`.
///
/// Missing songs and failed lookups resolve to 0 and are memoized like any other answer.
pub(super) struct PopularityResolver<'a> {
	catalog: &'a dyn CatalogStore,
	cache: HashMap<String, i64>,
	lookups: usize,
}
impl<'a> PopularityResolver<'a> {
	pub(super) fn new(catalog: &'a dyn CatalogStore) -> Self {
		Self { catalog, cache: HashMap::new(), lookups: 0 }
	}

	pub(super) async fn resolve(&mut self, song_id: &str) -> i64 {
		if let Some(popularity) = self.cache.get(song_id) {
			return *popularity;
		}

		self.lookups += 1;

		let popularity = match self.catalog.song_popularity(song_id).await {
			Ok(Some(popularity)) => popularity,
			Ok(None) => 0,
			Err(err) => {
				tracing::warn!(
					song_id = %song_id,
					error = %err,
					"Popularity lookup failed; defaulting to 0."
				);

				0
			},
		};

		self.cache.insert(song_id.to_string(), popularity);

		popularity
	}

	pub(super) fn lookups(&self) -> usize {
		self.lookups
	}
}
