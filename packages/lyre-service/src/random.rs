use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, LyreService, Result};
use lyre_domain::{
	features::feature_text,
	scoring::cmp_score_desc,
	vector::similarity,
	weather::{WeatherKeyword, weather_keyword},
};
use lyre_storage::{
	catalog::{CatalogSession, CatalogStore},
	models::{SongFilter, SongRecord},
};

pub const DEFAULT_MIN_POPULARITY: i64 = 80;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomSongRequest {
	#[serde(default)]
	pub user_id: Option<String>,
	/// Audio features summarizing the user's playlist, e.g. `energy` or `valence`.
	#[serde(default)]
	pub user_playlist_features: Option<Map<String, Value>>,
	#[serde(default)]
	pub weather_data: Option<WeatherData>,
	/// Defaults to [`DEFAULT_MIN_POPULARITY`] when absent or null.
	#[serde(default)]
	pub min_popularity: Option<i64>,
	#[serde(default)]
	pub difficulty_levels: Option<Vec<String>>,
}
impl RandomSongRequest {
	pub fn min_popularity(&self) -> i64 {
		self.min_popularity.unwrap_or(DEFAULT_MIN_POPULARITY)
	}

	fn weather_keyword(&self) -> Option<WeatherKeyword> {
		self.weather_data.as_ref()?.condition.as_deref().and_then(weather_keyword)
	}

	fn feature_text(&self) -> Option<String> {
		self.user_playlist_features.as_ref().map(feature_text).filter(|text| !text.is_empty())
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WeatherData {
	#[serde(default)]
	pub condition: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub temperature: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomSongResponse {
	pub song_id: String,
	pub title: String,
	pub artist: String,
	pub popularity: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub difficulty: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub album_image_url: Option<String>,
}
impl From<&SongRecord> for RandomSongResponse {
	fn from(song: &SongRecord) -> Self {
		Self {
			song_id: song.song_id.clone(),
			title: song.title.clone(),
			artist: song.artists.join(", "),
			popularity: song.popularity,
			difficulty: song.level.clone(),
			album_image_url: song.album_img_url.clone(),
		}
	}
}

impl LyreService {
	/// Picks one song at random from the popularity/difficulty filtered catalog, preferring
	/// titles that match the weather and, when playlist features are given, the songs
	/// closest to those features.
	pub async fn random_song(&self, req: RandomSongRequest) -> Result<RandomSongResponse> {
		let catalog = CatalogSession::open(self.catalog.as_ref(), "random_song");

		self.select_random_song(&*catalog, &req).await.inspect_err(|err| match err {
			Error::NotFound { .. } => tracing::warn!(
				user_id = ?req.user_id,
				min_popularity = req.min_popularity(),
				"No songs matched the random selection filters."
			),
			_ => tracing::error!(
				user_id = ?req.user_id,
				error = %err,
				"Random song selection failed."
			),
		})
	}

	async fn select_random_song(
		&self,
		catalog: &dyn CatalogStore,
		req: &RandomSongRequest,
	) -> Result<RandomSongResponse> {
		let filter = SongFilter {
			min_popularity: req.min_popularity(),
			levels: req.difficulty_levels.clone().unwrap_or_default(),
			limit: self.cfg.random.fetch_limit,
		};
		let songs = catalog.songs_matching(&filter).await?;

		if songs.is_empty() {
			return Err(no_songs_found());
		}

		let keyword = req.weather_keyword();
		let (matched, others): (Vec<&SongRecord>, Vec<&SongRecord>) = songs
			.iter()
			.partition(|song| keyword.map(|kw| kw.matches_title(&song.title)).unwrap_or(false));

		tracing::debug!(
			total = songs.len(),
			weather = ?keyword,
			matched = matched.len(),
			others = others.len(),
			"Classified songs by weather keyword."
		);

		let pool: Vec<&SongRecord> =
			if matched.is_empty() { songs.iter().collect() } else { matched };
		let chosen = match req.feature_text() {
			Some(text) => {
				let target = self.embed_one(&text).await?;
				let nearest =
					nearest_songs(&pool, &target, self.cfg.random.similarity_pool as usize);

				if nearest.is_empty() {
					tracing::debug!("No song vectors comparable to playlist features.");

					pick_random(&pool)
				} else {
					pick_random(&nearest)
				}
			},
			None => pick_random(&pool),
		};
		let song = chosen.ok_or_else(no_songs_found)?;

		Ok(RandomSongResponse::from(song))
	}
}

/// The `limit` songs most similar to `target`, best first. Songs without a comparable
/// vector are left out.
fn nearest_songs<'a>(pool: &[&'a SongRecord], target: &[f32], limit: usize) -> Vec<&'a SongRecord> {
	let mut scored: Vec<(f32, &SongRecord)> = pool
		.iter()
		.filter_map(|song| {
			let vector = song.vector.as_ref()?.as_dense()?;

			similarity(target, vector).map(|score| (score, *song))
		})
		.collect();

	scored.sort_by(|(left, _), (right, _)| cmp_score_desc(*left, *right));
	scored.truncate(limit);

	scored.into_iter().map(|(_, song)| song).collect()
}

fn pick_random<'a>(pool: &[&'a SongRecord]) -> Option<&'a SongRecord> {
	pool.choose(&mut rand::rng()).copied()
}

fn no_songs_found() -> Error {
	Error::NotFound { message: "No songs found matching the given filters.".to_string() }
}
