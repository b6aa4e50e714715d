use std::sync::Arc;

use lyre_service::LyreService;
use lyre_storage::qdrant::QdrantStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LyreService>,
}
impl AppState {
	pub fn new(config: lyre_config::Config) -> color_eyre::Result<Self> {
		let qdrant = QdrantStore::new(&config.storage.qdrant)?;
		let service = LyreService::new(config, Arc::new(qdrant));

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: LyreService) -> Self {
		Self { service: Arc::new(service) }
	}
}
