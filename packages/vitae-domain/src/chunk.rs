use uuid::Uuid;

use crate::metadata::CandidateMetadata;

/// A chunk as written to the index.
#[derive(Debug, Clone)]
pub struct ChunkPoint {
	pub chunk_id: Uuid,
	pub text: String,
	pub vector: Vec<f32>,
	pub metadata: CandidateMetadata,
}

/// A chunk as returned from a nearest-neighbor query. `distance` is cosine
/// distance: zero for identical direction, larger for more dissimilar, and
/// can exceed 1.0 for opposed vectors.
#[derive(Debug, Clone)]
pub struct ChunkHit {
	pub text: String,
	pub distance: f32,
	pub metadata: CandidateMetadata,
}
