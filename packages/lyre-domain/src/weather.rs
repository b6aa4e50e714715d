#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherKeyword {
	Rain,
	Snow,
	Sun,
	Cloud,
}
impl WeatherKeyword {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Rain => "rain",
			Self::Snow => "snow",
			Self::Sun => "sun",
			Self::Cloud => "cloud",
		}
	}

	/// Whether a song title mentions this keyword, ignoring case.
	pub fn matches_title(self, title: &str) -> bool {
		title.to_lowercase().contains(self.as_str())
	}
}

// Checked in order; the first entry with a matching pattern wins.
const WEATHER_TABLE: [(WeatherKeyword, &[&str]); 4] = [
	(WeatherKeyword::Rain, &["rain", "drizzle", "shower", "thunder", "storm"]),
	(WeatherKeyword::Snow, &["snow", "sleet", "blizzard"]),
	(WeatherKeyword::Sun, &["clear", "sun"]),
	(WeatherKeyword::Cloud, &["cloud", "overcast", "fog", "mist", "haze"]),
];

/// Maps a free-text condition such as `"Light Rain"` or `"Clouds"` to a keyword.
pub fn weather_keyword(condition: &str) -> Option<WeatherKeyword> {
	let condition = condition.trim().to_lowercase();

	if condition.is_empty() {
		return None;
	}

	WEATHER_TABLE
		.iter()
		.find(|(_, patterns)| patterns.iter().any(|pattern| condition.contains(pattern)))
		.map(|(keyword, _)| *keyword)
}
