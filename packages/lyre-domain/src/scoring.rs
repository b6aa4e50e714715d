use std::cmp::Ordering;

/// Popularity at or above this value saturates the boost at 1.0.
pub const POPULARITY_SATURATION: i64 = 100;

/// Log-scaled popularity in `[0, 1]`: `min(1, ln(p + 1) / ln(101))`, and 0 for `p <= 0`.
pub fn popularity_boost(popularity: i64) -> f32 {
	if popularity <= 0 {
		return 0.0;
	}

	let scaled = ((popularity as f64) + 1.0).ln() / ((POPULARITY_SATURATION as f64) + 1.0).ln();

	scaled.min(1.0) as f32
}

/// Weighted mean of similarity and popularity.
///
/// Weights are renormalized by their sum. A non-positive sum falls back to the
/// similarity score alone.
pub fn hybrid_score(
	similarity: f32,
	popularity: f32,
	similarity_weight: f32,
	popularity_weight: f32,
) -> f32 {
	let total = similarity_weight + popularity_weight;

	if total <= 0.0 {
		return similarity;
	}

	(similarity_weight * similarity + popularity_weight * popularity) / total
}

/// Descending order for scores; NaN sorts last.
pub fn cmp_score_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
