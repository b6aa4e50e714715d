use lyre_domain::vector::StoredVector;

/// One row of the lyric chunk collection.
#[derive(Clone, Debug, PartialEq)]
pub struct LyricChunk {
	pub song_id: String,
	pub chunk_idx: i64,
	pub words: Option<String>,
	pub vector: Option<StoredVector>,
}

/// One row of the song metadata collection.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRecord {
	pub song_id: String,
	pub title: String,
	pub artists: Vec<String>,
	pub popularity: i64,
	pub level: Option<String>,
	pub album_img_url: Option<String>,
	pub vector: Option<StoredVector>,
}

/// Metadata filter: `popularity >= min_popularity`, and `level` in `levels` when non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongFilter {
	pub min_popularity: i64,
	pub levels: Vec<String>,
	pub limit: u32,
}
impl SongFilter {
	pub fn matches(&self, song: &SongRecord) -> bool {
		if song.popularity < self.min_popularity {
			return false;
		}
		if self.levels.is_empty() {
			return true;
		}

		song.level.as_ref().map(|level| self.levels.contains(level)).unwrap_or(false)
	}
}
