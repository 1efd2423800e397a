mod error;
mod payload;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

use qdrant_client::qdrant::{
	Condition, CreateCollectionBuilder, Distance, Filter, PointStruct, Query, QueryPointsBuilder,
	Range, UpsertPointsBuilder, VectorParamsBuilder,
};
use vitae_domain::{ChunkHit, ChunkPoint, MetadataPredicate};

pub struct QdrantIndex {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantIndex {
	pub fn new(cfg: &vitae_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Creates the cosine-distance collection if it does not exist yet.
	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(&self.collection).await? {
			return Ok(());
		}

		let builder = CreateCollectionBuilder::new(self.collection.clone())
			.vectors_config(VectorParamsBuilder::new(self.vector_dim as u64, Distance::Cosine));

		self.client.create_collection(builder).await?;

		Ok(())
	}

	pub async fn upsert_chunks(&self, chunks: &[ChunkPoint]) -> Result<()> {
		if chunks.is_empty() {
			return Ok(());
		}

		let points: Vec<PointStruct> = chunks
			.iter()
			.map(|chunk| {
				PointStruct::new(
					chunk.chunk_id.to_string(),
					chunk.vector.clone(),
					payload::chunk_payload(chunk),
				)
			})
			.collect();
		let upsert = UpsertPointsBuilder::new(self.collection.clone(), points).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	/// Nearest-neighbor query over chunks. `limit` bounds chunks, not
	/// resumes. Results come back in ascending cosine distance.
	pub async fn query(
		&self,
		vector: Vec<f32>,
		limit: u64,
		predicates: &[MetadataPredicate],
	) -> Result<Vec<ChunkHit>> {
		let mut search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.with_payload(true)
			.limit(limit);

		if !predicates.is_empty() {
			search = search.filter(Filter::all(predicates.iter().map(predicate_condition)));
		}

		let response = self.client.query(search).await?;
		let hits = response.result.into_iter().filter_map(payload::hit_from_point).collect();

		Ok(hits)
	}
}

fn predicate_condition(predicate: &MetadataPredicate) -> Condition {
	match predicate {
		MetadataPredicate::Eq { field, value } => Condition::matches(field.clone(), value.clone()),
		MetadataPredicate::Gte { field, value } =>
			Condition::range(field.clone(), Range { gte: Some(*value), ..Default::default() }),
	}
}
