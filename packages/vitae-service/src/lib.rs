pub mod ingest;
pub mod live;
pub mod search;

mod error;

pub use error::{ServiceError, ServiceResult};
pub use ingest::{IngestRequest, IngestResponse, ResumeInput};
pub use live::LiveEmbedder;
pub use search::{RankedCandidate, SearchRequest, SearchResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use vitae_config::{Config, EmbeddingProviderConfig};
use vitae_domain::{ChunkHit, ChunkPoint, MetadataPredicate};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn query<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
		predicates: &'a [MetadataPredicate],
	) -> BoxFuture<'a, color_eyre::Result<Vec<ChunkHit>>>;

	fn upsert<'a>(&'a self, chunks: &'a [ChunkPoint]) -> BoxFuture<'a, color_eyre::Result<()>>;
}

pub struct VitaeService {
	pub cfg: Config,
	pub embedder: Arc<dyn EmbeddingProvider>,
	pub index: Arc<dyn VectorIndex>,
}
impl VitaeService {
	pub fn new(
		cfg: Config,
		embedder: Arc<dyn EmbeddingProvider>,
		index: Arc<dyn VectorIndex>,
	) -> Self {
		Self { cfg, embedder, index }
	}

	pub(crate) async fn embed_texts(&self, texts: &[String]) -> ServiceResult<Vec<Vec<f32>>> {
		let vectors = self
			.embedder
			.embed(&self.cfg.providers.embedding, texts)
			.await
			.map_err(|err| ServiceError::Provider { message: err.to_string() })?;

		if vectors.len() != texts.len() {
			return Err(ServiceError::Provider {
				message: "Embedding response length does not match input.".to_string(),
			});
		}

		let expected = self.cfg.storage.qdrant.vector_dim as usize;

		for vector in &vectors {
			if vector.len() != expected {
				return Err(ServiceError::Provider {
					message: "Embedding vector dimension mismatch.".to_string(),
				});
			}
		}

		Ok(vectors)
	}
}
