/// Key used to collapse lyric chunks that carry the same text.
pub fn dedup_key(words: Option<&str>) -> String {
	words.map(|text| text.trim().to_lowercase()).unwrap_or_default()
}
