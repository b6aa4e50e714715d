use std::{future::Future, ops::Deref, pin::Pin};

use crate::{
	Result,
	models::{LyricChunk, SongFilter, SongRecord},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the lyric chunk and song metadata collections.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	/// Up to `limit` chunks whose `words` contain `term` as a case-sensitive substring,
	/// vectors included.
	fn lyric_chunks_containing<'a>(
		&'a self,
		term: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<LyricChunk>>>;

	/// Popularity of one song, `None` when the song is not in the catalog.
	fn song_popularity<'a>(&'a self, song_id: &'a str) -> BoxFuture<'a, Result<Option<i64>>>;

	fn songs_matching<'a>(&'a self, filter: &'a SongFilter)
	-> BoxFuture<'a, Result<Vec<SongRecord>>>;

	fn count_songs(&self) -> BoxFuture<'_, Result<u64>>;

	fn count_lyric_chunks(&self) -> BoxFuture<'_, Result<u64>>;

	/// Called when a request starts using the store.
	fn acquire(&self) {}

	/// Called exactly once for every `acquire`, whichever way the request ends.
	fn release(&self) {}
}

/// Request-scoped handle on a [`CatalogStore`].
///
/// Opening acquires the store and dropping releases it, so every exit path of the
/// request, early returns and `?` included, gives the store back.
pub struct CatalogSession<'a> {
	store: &'a dyn CatalogStore,
	label: &'static str,
}
impl<'a> CatalogSession<'a> {
	pub fn open(store: &'a dyn CatalogStore, label: &'static str) -> Self {
		store.acquire();

		tracing::debug!(request = label, "Catalog session acquired.");

		Self { store, label }
	}
}

impl<'a> Deref for CatalogSession<'a> {
	type Target = dyn CatalogStore + 'a;

	fn deref(&self) -> &Self::Target {
		self.store
	}
}

impl Drop for CatalogSession<'_> {
	fn drop(&mut self) {
		self.store.release();

		tracing::debug!(request = self.label, "Catalog session released.");
	}
}
