use std::collections::HashSet;

use super::popularity::PopularityResolver;
use crate::Result;
use lyre_domain::{text::dedup_key, vector::StoredVector};
use lyre_storage::{catalog::CatalogStore, models::LyricChunk};

/// A deduplicated lyric chunk ready for scoring.
#[derive(Clone, Debug)]
pub(super) struct Candidate {
	pub(super) song_id: String,
	pub(super) chunk_idx: i64,
	pub(super) words: Option<String>,
	/// Canonical dense vector; `None` when the stored shape was missing or undecodable.
	pub(super) vector: Option<Vec<f32>>,
	pub(super) popularity: i64,
}

/// One substring fetch per term, results concatenated in term order.
pub(super) async fn retrieve(
	catalog: &dyn CatalogStore,
	terms: &[&str],
	limit: u32,
) -> Result<Vec<LyricChunk>> {
	let mut out = Vec::new();

	for term in terms {
		let chunks = catalog.lyric_chunks_containing(term, limit).await?;

		tracing::debug!(term = %term, matched = chunks.len(), "Fetched lyric chunks.");

		out.extend(chunks);
	}

	Ok(out)
}

/// Collapses chunks by normalized text, first occurrence wins.
///
/// Every raw chunk has its popularity resolved before its key is checked. The floor is
/// applied once, to the first occurrence of each key; a key whose first occurrence falls
/// below it stays rejected even if a later duplicate belongs to a more popular song.
pub(super) async fn dedupe(
	raw: Vec<LyricChunk>,
	min_popularity: Option<i64>,
	resolver: &mut PopularityResolver<'_>,
) -> Vec<Candidate> {
	let mut decided = HashSet::new();
	let mut out = Vec::new();

	for chunk in raw {
		let popularity = resolver.resolve(&chunk.song_id).await;

		if !decided.insert(dedup_key(chunk.words.as_deref())) {
			continue;
		}

		if let Some(min) = min_popularity
			&& popularity < min
		{
			tracing::debug!(
				song_id = %chunk.song_id,
				popularity,
				min_popularity = min,
				"Dropped chunk below popularity floor."
			);

			continue;
		}

		out.push(Candidate {
			song_id: chunk.song_id,
			chunk_idx: chunk.chunk_idx,
			words: chunk.words,
			vector: chunk.vector.and_then(StoredVector::into_dense),
			popularity,
		});
	}

	out
}
