//! In-memory stand-in for the Qdrant catalog.

use std::{
	collections::HashSet,
	sync::atomic::{AtomicUsize, Ordering},
};

use lyre_domain::vector::StoredVector;
use lyre_storage::{
	Error, Result,
	catalog::{BoxFuture, CatalogStore},
	models::{LyricChunk, SongFilter, SongRecord},
};

#[derive(Default)]
pub struct InMemoryCatalog {
	chunks: Vec<LyricChunk>,
	songs: Vec<SongRecord>,
	failing_songs: HashSet<String>,
	fail_song_queries: bool,
	acquired: AtomicUsize,
	released: AtomicUsize,
	popularity_lookups: AtomicUsize,
}
impl InMemoryCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_chunk(
		mut self,
		song_id: &str,
		chunk_idx: i64,
		words: Option<&str>,
		vector: Option<StoredVector>,
	) -> Self {
		self.chunks.push(LyricChunk {
			song_id: song_id.to_string(),
			chunk_idx,
			words: words.map(str::to_string),
			vector,
		});

		self
	}

	pub fn with_song(mut self, song: SongRecord) -> Self {
		self.songs.push(song);

		self
	}

	/// Popularity lookups for `song_id` fail instead of answering.
	pub fn failing_popularity_for(mut self, song_id: &str) -> Self {
		self.failing_songs.insert(song_id.to_string());

		self
	}

	/// Metadata queries fail instead of answering.
	pub fn failing_song_queries(mut self) -> Self {
		self.fail_song_queries = true;

		self
	}

	pub fn acquired(&self) -> usize {
		self.acquired.load(Ordering::SeqCst)
	}

	pub fn released(&self) -> usize {
		self.released.load(Ordering::SeqCst)
	}

	pub fn popularity_lookups(&self) -> usize {
		self.popularity_lookups.load(Ordering::SeqCst)
	}
}

impl CatalogStore for InMemoryCatalog {
	fn lyric_chunks_containing<'a>(
		&'a self,
		term: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<LyricChunk>>> {
		let chunks = self
			.chunks
			.iter()
			.filter(|chunk| chunk.words.as_deref().map(|words| words.contains(term)).unwrap_or(false))
			.take(limit as usize)
			.cloned()
			.collect();

		Box::pin(async move { Ok(chunks) })
	}

	fn song_popularity<'a>(&'a self, song_id: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		self.popularity_lookups.fetch_add(1, Ordering::SeqCst);

		let result = if self.failing_songs.contains(song_id) {
			Err(Error::Unavailable(format!("Popularity lookup failed for {song_id}.")))
		} else {
			Ok(self.songs.iter().find(|song| song.song_id == song_id).map(|song| song.popularity))
		};

		Box::pin(async move { result })
	}

	fn songs_matching<'a>(
		&'a self,
		filter: &'a SongFilter,
	) -> BoxFuture<'a, Result<Vec<SongRecord>>> {
		let result = if self.fail_song_queries {
			Err(Error::Unavailable("Song collection is unreachable.".to_string()))
		} else {
			Ok(self
				.songs
				.iter()
				.filter(|song| filter.matches(song))
				.take(filter.limit as usize)
				.cloned()
				.collect())
		};

		Box::pin(async move { result })
	}

	fn count_songs(&self) -> BoxFuture<'_, Result<u64>> {
		let count = self.songs.len() as u64;

		Box::pin(async move { Ok(count) })
	}

	fn count_lyric_chunks(&self) -> BoxFuture<'_, Result<u64>> {
		let count = self.chunks.len() as u64;

		Box::pin(async move { Ok(count) })
	}

	fn acquire(&self) {
		self.acquired.fetch_add(1, Ordering::SeqCst);
	}

	fn release(&self) {
		self.released.fetch_add(1, Ordering::SeqCst);
	}
}

/// A song row with the given popularity and no optional metadata.
pub fn song(song_id: &str, title: &str, popularity: i64) -> SongRecord {
	SongRecord {
		song_id: song_id.to_string(),
		title: title.to_string(),
		artists: Vec::new(),
		popularity,
		level: None,
		album_img_url: None,
		vector: None,
	}
}
