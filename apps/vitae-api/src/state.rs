use std::sync::Arc;

use vitae_index::QdrantIndex;
use vitae_service::{EmbeddingProvider, LiveEmbedder, VectorIndex, VitaeService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VitaeService>,
}
impl AppState {
	pub async fn new(config: vitae_config::Config) -> color_eyre::Result<Self> {
		let index = QdrantIndex::new(&config.storage.qdrant)?;

		index.ensure_collection().await?;

		Ok(Self::with_parts(config, Arc::new(LiveEmbedder), Arc::new(index)))
	}

	/// Assembles the state from explicit collaborators so tests can swap in
	/// doubles for the embedder and the index.
	pub fn with_parts(
		config: vitae_config::Config,
		embedder: Arc<dyn EmbeddingProvider>,
		index: Arc<dyn VectorIndex>,
	) -> Self {
		Self { service: Arc::new(VitaeService::new(config, embedder, index)) }
	}
}
