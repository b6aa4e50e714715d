use super::{RecommendItem, SOURCE_TAG, retrieval::Candidate};
use lyre_domain::{
	scoring::{cmp_score_desc, hybrid_score, popularity_boost},
	vector::similarity,
};

#[derive(Clone, Copy, Debug)]
pub(super) struct Weights {
	pub(super) similarity: f32,
	pub(super) popularity: f32,
}

/// Scores every candidate against one query vector and appends the rows to `out`.
///
/// Candidates without a vector, or with a different dimension, are skipped.
pub(super) fn score_term(
	query_vec: &[f32],
	candidates: &[Candidate],
	weights: Weights,
	out: &mut Vec<RecommendItem>,
) {
	for candidate in candidates {
		let Some(vector) = candidate.vector.as_deref() else { continue };
		let Some(similarity_score) = similarity(query_vec, vector) else { continue };
		let popularity_score = popularity_boost(candidate.popularity);
		let final_score = hybrid_score(
			similarity_score,
			popularity_score,
			weights.similarity,
			weights.popularity,
		);

		out.push(RecommendItem {
			song_id: candidate.song_id.clone(),
			chunk_idx: candidate.chunk_idx,
			words: candidate.words.clone().unwrap_or_default(),
			score: final_score,
			similarity_score,
			popularity_score,
			final_score,
			source: SOURCE_TAG.to_string(),
		});
	}
}

/// Stable descending sort on `final_score`, then truncation. Rows for the same chunk under
/// different terms stay separate.
pub(super) fn take_top(mut scored: Vec<RecommendItem>, top_k: usize) -> Vec<RecommendItem> {
	scored.sort_by(|left, right| cmp_score_desc(left.final_score, right.final_score));
	scored.truncate(top_k);

	scored
}
