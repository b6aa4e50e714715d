use std::collections::HashMap;

use qdrant_client::{
	Qdrant,
	qdrant::{
		Condition, CountPointsBuilder, DenseVector, Filter, Range, RetrievedPoint,
		ScrollPointsBuilder, Value, VectorOutput, VectorsOutput, value::Kind, vector_output,
		vectors_output::VectorsOptions,
	},
};

use crate::{
	Error, Result,
	catalog::{BoxFuture, CatalogStore},
	models::{LyricChunk, SongFilter, SongRecord},
};
use lyre_domain::vector::StoredVector;

pub struct QdrantStore {
	pub client: Qdrant,
	pub lyric_collection: String,
	pub song_collection: String,
}
impl QdrantStore {
	pub fn new(cfg: &lyre_config::Qdrant) -> Result<Self> {
		if cfg.lyric_collection == cfg.song_collection {
			return Err(Error::InvalidArgument(
				"Lyric and song collections must be distinct.".to_string(),
			));
		}

		let mut builder = Qdrant::from_url(&cfg.url);

		if let Some(api_key) = cfg.api_key.as_deref() {
			builder = builder.api_key(api_key.to_string());
		}

		let client = builder.build()?;

		Ok(Self {
			client,
			lyric_collection: cfg.lyric_collection.clone(),
			song_collection: cfg.song_collection.clone(),
		})
	}

	/// Case sensitivity follows the collection's payload index on `words`: without a
	/// full-text index the match is an exact, case-sensitive substring test; a full-text
	/// index tokenizes and lowercases by default, which makes matching case-insensitive.
	pub async fn lyric_chunks_containing(&self, term: &str, limit: u32) -> Result<Vec<LyricChunk>> {
		let request = ScrollPointsBuilder::new(self.lyric_collection.clone())
			.filter(Filter::must([Condition::matches_text("words", term.to_string())]))
			.limit(limit)
			.with_payload(true)
			.with_vectors(true);
		let response = self.client.scroll(request).await?;

		Ok(response.result.into_iter().filter_map(point_to_chunk).collect())
	}

	pub async fn song_popularity(&self, song_id: &str) -> Result<Option<i64>> {
		let request = ScrollPointsBuilder::new(self.song_collection.clone())
			.filter(Filter::must([Condition::matches("song_id", song_id.to_string())]))
			.limit(1)
			.with_payload(true)
			.with_vectors(false);
		let response = self.client.scroll(request).await?;

		Ok(response.result.first().and_then(|point| payload_i64(&point.payload, "popularity")))
	}

	pub async fn songs_matching(&self, filter: &SongFilter) -> Result<Vec<SongRecord>> {
		let mut must = vec![Condition::range(
			"popularity",
			Range { gte: Some(filter.min_popularity as f64), ..Default::default() },
		)];

		if !filter.levels.is_empty() {
			must.push(Condition::matches("level", filter.levels.clone()));
		}

		let request = ScrollPointsBuilder::new(self.song_collection.clone())
			.filter(Filter::must(must))
			.limit(filter.limit)
			.with_payload(true)
			.with_vectors(true);
		let response = self.client.scroll(request).await?;

		Ok(response.result.into_iter().filter_map(point_to_song).collect())
	}

	pub async fn count(&self, collection: &str) -> Result<u64> {
		let response =
			self.client.count(CountPointsBuilder::new(collection.to_string()).exact(true)).await?;

		Ok(response.result.map(|result| result.count).unwrap_or(0))
	}
}

impl CatalogStore for QdrantStore {
	fn lyric_chunks_containing<'a>(
		&'a self,
		term: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<LyricChunk>>> {
		Box::pin(QdrantStore::lyric_chunks_containing(self, term, limit))
	}

	fn song_popularity<'a>(&'a self, song_id: &'a str) -> BoxFuture<'a, Result<Option<i64>>> {
		Box::pin(QdrantStore::song_popularity(self, song_id))
	}

	fn songs_matching<'a>(
		&'a self,
		filter: &'a SongFilter,
	) -> BoxFuture<'a, Result<Vec<SongRecord>>> {
		Box::pin(QdrantStore::songs_matching(self, filter))
	}

	fn count_songs(&self) -> BoxFuture<'_, Result<u64>> {
		Box::pin(self.count(&self.song_collection))
	}

	fn count_lyric_chunks(&self) -> BoxFuture<'_, Result<u64>> {
		Box::pin(self.count(&self.lyric_collection))
	}
}

fn point_to_chunk(point: RetrievedPoint) -> Option<LyricChunk> {
	let Some(song_id) = payload_string(&point.payload, "song_id") else {
		tracing::warn!("Lyric chunk missing song_id.");

		return None;
	};
	let Some(chunk_idx) = payload_i64(&point.payload, "chunk_idx") else {
		tracing::warn!(song_id = %song_id, "Lyric chunk missing chunk_idx.");

		return None;
	};
	let words = payload_string(&point.payload, "words");
	let vector = point.vectors.and_then(stored_vector);

	Some(LyricChunk { song_id, chunk_idx, words, vector })
}

fn point_to_song(point: RetrievedPoint) -> Option<SongRecord> {
	let Some(song_id) = payload_string(&point.payload, "song_id") else {
		tracing::warn!("Song missing song_id.");

		return None;
	};
	let title = payload_string(&point.payload, "title").unwrap_or_default();
	let artists = payload_strings(&point.payload, "artists");
	let popularity = payload_i64(&point.payload, "popularity").unwrap_or(0);
	let level = payload_string(&point.payload, "level");
	let album_img_url = payload_string(&point.payload, "album_img_url");
	let vector = point.vectors.and_then(stored_vector);

	Some(SongRecord { song_id, title, artists, popularity, level, album_img_url, vector })
}

fn stored_vector(vectors: VectorsOutput) -> Option<StoredVector> {
	match vectors.vectors_options? {
		VectorsOptions::Vector(output) => dense_output(output).map(StoredVector::Dense),
		VectorsOptions::Vectors(named) => {
			let map: HashMap<String, Vec<f32>> = named
				.vectors
				.into_iter()
				.filter_map(|(name, output)| dense_output(output).map(|dense| (name, dense)))
				.collect();

			Some(StoredVector::KeyedSingle(map))
		},
	}
}

#[allow(deprecated)]
fn dense_output(output: VectorOutput) -> Option<Vec<f32>> {
	match output.vector {
		Some(vector_output::Vector::Dense(DenseVector { data, .. })) => Some(data),
		Some(_) => None,
		// Older servers only fill the flat `data` field.
		None if !output.data.is_empty() => Some(output.data),
		None => None,
	}
}

pub fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.to_string()),
		_ => None,
	}
}

pub fn payload_strings(payload: &HashMap<String, Value>, key: &str) -> Vec<String> {
	let Some(value) = payload.get(key) else { return Vec::new() };

	match &value.kind {
		Some(Kind::ListValue(list)) => list
			.values
			.iter()
			.filter_map(|item| match &item.kind {
				Some(Kind::StringValue(text)) => Some(text.to_string()),
				_ => None,
			})
			.collect(),
		Some(Kind::StringValue(text)) => vec![text.to_string()],
		_ => Vec::new(),
	}
}

pub fn payload_i64(payload: &HashMap<String, Value>, key: &str) -> Option<i64> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(value)) => Some(*value),
		Some(Kind::DoubleValue(value)) =>
			if value.fract() == 0.0 && value.is_finite() {
				Some(*value as i64)
			} else {
				None
			},
		_ => None,
	}
}
