use vitae_config::EmbeddingProviderConfig;
use vitae_domain::{ChunkHit, ChunkPoint, MetadataPredicate};
use vitae_index::QdrantIndex;

use crate::{BoxFuture, EmbeddingProvider, VectorIndex};

/// Production embedder backed by the HTTP embeddings endpoint.
pub struct LiveEmbedder;

impl EmbeddingProvider for LiveEmbedder {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			let client = vitae_providers::EmbeddingClient::new(cfg)?;

			Ok(client.embed(texts).await?)
		})
	}
}

impl VectorIndex for QdrantIndex {
	fn query<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
		predicates: &'a [MetadataPredicate],
	) -> BoxFuture<'a, color_eyre::Result<Vec<ChunkHit>>> {
		Box::pin(async move { Ok(QdrantIndex::query(self, vector, limit, predicates).await?) })
	}

	fn upsert<'a>(&'a self, chunks: &'a [ChunkPoint]) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { Ok(QdrantIndex::upsert_chunks(self, chunks).await?) })
	}
}
