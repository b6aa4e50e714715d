use std::collections::HashMap;

/// Added to the candidate norm so zero vectors score 0 instead of NaN.
pub const SIMILARITY_EPSILON: f32 = 1e-10;

/// A vector as the catalog stores it.
///
/// Collections hand back either a bare dense vector or a map of named vectors. The
/// catalog only ever writes one name per point, so the map form carries a single entry.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredVector {
	Dense(Vec<f32>),
	KeyedSingle(HashMap<String, Vec<f32>>),
}
impl StoredVector {
	/// Canonical dense view, or `None` when the shape cannot be decoded.
	///
	/// Keyed maps must hold exactly one entry. Empty vectors and vectors carrying
	/// non-finite components are rejected.
	pub fn as_dense(&self) -> Option<&[f32]> {
		let dense = match self {
			Self::Dense(values) => values.as_slice(),
			Self::KeyedSingle(map) => {
				if map.len() != 1 {
					return None;
				}

				map.values().next()?.as_slice()
			},
		};

		if dense.is_empty() || dense.iter().any(|value| !value.is_finite()) {
			return None;
		}

		Some(dense)
	}

	pub fn into_dense(self) -> Option<Vec<f32>> {
		self.as_dense().map(<[f32]>::to_vec)
	}
}

pub fn dot(left: &[f32], right: &[f32]) -> f32 {
	left.iter().zip(right).map(|(l, r)| l * r).sum()
}

pub fn l2_norm(values: &[f32]) -> f32 {
	dot(values, values).sqrt()
}

/// Scales `values` to unit length. Zero vectors are returned unchanged.
pub fn normalize_unit(mut values: Vec<f32>) -> Vec<f32> {
	let norm = l2_norm(&values);

	if norm > 0.0 && norm.is_finite() {
		for value in &mut values {
			*value /= norm;
		}
	}

	values
}

/// `dot(query, candidate) / (|candidate| + eps)`.
///
/// Only the candidate side is normalized; the query is expected to be unit length
/// already. Returns `None` when the dimensions differ.
pub fn similarity(query: &[f32], candidate: &[f32]) -> Option<f32> {
	if query.len() != candidate.len() {
		return None;
	}

	Some(dot(query, candidate) / (l2_norm(candidate) + SIMILARITY_EPSILON))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyed_single_and_dense_canonicalize_to_the_same_vector() {
		let dense = StoredVector::Dense(vec![0.1, 0.2, 0.3]);
		let keyed =
			StoredVector::KeyedSingle(HashMap::from([("default".to_string(), vec![0.1, 0.2, 0.3])]));

		assert_eq!(dense.into_dense(), keyed.into_dense());
	}

	#[test]
	fn multi_key_maps_are_undecodable() {
		let keyed = StoredVector::KeyedSingle(HashMap::from([
			("a".to_string(), vec![1.0]),
			("b".to_string(), vec![2.0]),
		]));

		assert_eq!(keyed.into_dense(), None);
		assert_eq!(StoredVector::KeyedSingle(HashMap::new()).into_dense(), None);
	}

	#[test]
	fn empty_and_non_finite_vectors_are_undecodable() {
		assert_eq!(StoredVector::Dense(Vec::new()).into_dense(), None);
		assert_eq!(StoredVector::Dense(vec![1.0, f32::NAN]).into_dense(), None);
	}

	#[test]
	fn similarity_normalizes_only_the_candidate() {
		let query = [2.0, 0.0];
		let candidate = [3.0, 4.0];
		let score = similarity(&query, &candidate).expect("dimensions match");

		// 6 / 5, not the cosine 0.6.
		assert!((score - 1.2).abs() < 1e-6, "score = {score}");
	}

	#[test]
	fn similarity_of_zero_candidate_is_zero() {
		let score = similarity(&[1.0, 0.0], &[0.0, 0.0]).expect("dimensions match");

		assert_eq!(score, 0.0);
	}

	#[test]
	fn similarity_rejects_dimension_mismatch() {
		assert_eq!(similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), None);
	}

	#[test]
	fn normalize_unit_handles_zero_vectors() {
		assert_eq!(normalize_unit(vec![0.0, 0.0]), vec![0.0, 0.0]);

		let unit = normalize_unit(vec![3.0, 4.0]);

		assert!((l2_norm(&unit) - 1.0).abs() < 1e-6);
	}
}
