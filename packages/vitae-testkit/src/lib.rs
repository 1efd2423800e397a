use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicU32, Ordering},
	},
};

use color_eyre::eyre;
use vitae_config::{Config, EmbeddingProviderConfig};
use vitae_domain::{ChunkHit, ChunkPoint, MetadataPredicate};
use vitae_service::{BoxFuture, EmbeddingProvider, VectorIndex};

/// Deterministic embedder. Unknown texts hash to a stable unit vector;
/// tests that need controlled similarities plant exact vectors per text.
pub struct FakeEmbedder {
	dimensions: usize,
	planted: Mutex<HashMap<String, Vec<f32>>>,
}
impl FakeEmbedder {
	pub fn new(dimensions: usize) -> Self {
		Self { dimensions, planted: Mutex::new(HashMap::new()) }
	}

	pub fn plant(&self, text: &str, vector: Vec<f32>) {
		let mut planted = self.planted.lock().unwrap_or_else(|err| err.into_inner());

		planted.insert(text.to_string(), vector);
	}

	fn vector_for(&self, text: &str) -> Vec<f32> {
		{
			let planted = self.planted.lock().unwrap_or_else(|err| err.into_inner());

			if let Some(vector) = planted.get(text) {
				return vector.clone();
			}
		}

		hash_unit_vector(text, self.dimensions)
	}
}
impl EmbeddingProvider for FakeEmbedder {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let vectors = texts.iter().map(|text| self.vector_for(text)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

/// Embedder that always fails, for provider-error propagation tests.
pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Err(eyre::eyre!("embedding endpoint unavailable")) })
	}
}

/// In-memory stand-in for the qdrant index: real cosine distance, real
/// predicate filtering, ascending-distance ordering.
#[derive(Default)]
pub struct InMemoryIndex {
	chunks: Mutex<Vec<ChunkPoint>>,
	upsert_calls: AtomicU32,
}
impl InMemoryIndex {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, chunk: ChunkPoint) {
		let mut chunks = self.chunks.lock().unwrap_or_else(|err| err.into_inner());

		chunks.push(chunk);
	}

	pub fn len(&self) -> usize {
		self.chunks.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn upsert_calls(&self) -> u32 {
		self.upsert_calls.load(Ordering::SeqCst)
	}
}
impl VectorIndex for InMemoryIndex {
	fn query<'a>(
		&'a self,
		vector: Vec<f32>,
		limit: u64,
		predicates: &'a [MetadataPredicate],
	) -> BoxFuture<'a, color_eyre::Result<Vec<ChunkHit>>> {
		let chunks = self.chunks.lock().unwrap_or_else(|err| err.into_inner());
		let mut hits: Vec<ChunkHit> = chunks
			.iter()
			.filter(|chunk| predicates.iter().all(|predicate| predicate.matches(&chunk.metadata)))
			.map(|chunk| ChunkHit {
				text: chunk.text.clone(),
				distance: cosine_distance(&vector, &chunk.vector),
				metadata: chunk.metadata.clone(),
			})
			.collect();

		hits.sort_by(|left, right| {
			left.distance.partial_cmp(&right.distance).unwrap_or(std::cmp::Ordering::Equal)
		});
		hits.truncate(limit as usize);

		Box::pin(async move { Ok(hits) })
	}

	fn upsert<'a>(&'a self, new_chunks: &'a [ChunkPoint]) -> BoxFuture<'a, color_eyre::Result<()>> {
		{
			let mut chunks = self.chunks.lock().unwrap_or_else(|err| err.into_inner());

			chunks.extend_from_slice(new_chunks);
		}

		self.upsert_calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move { Ok(()) })
	}
}

/// Index that always fails, for index-error propagation tests.
pub struct FailingIndex;

impl VectorIndex for FailingIndex {
	fn query<'a>(
		&'a self,
		_vector: Vec<f32>,
		_limit: u64,
		_predicates: &'a [MetadataPredicate],
	) -> BoxFuture<'a, color_eyre::Result<Vec<ChunkHit>>> {
		Box::pin(async move { Err(eyre::eyre!("index unreachable")) })
	}

	fn upsert<'a>(&'a self, _chunks: &'a [ChunkPoint]) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { Err(eyre::eyre!("index unreachable")) })
	}
}

pub fn cosine_distance(left: &[f32], right: &[f32]) -> f32 {
	let dot: f32 = left.iter().zip(right).map(|(a, b)| a * b).sum();
	let left_norm: f32 = left.iter().map(|a| a * a).sum::<f32>().sqrt();
	let right_norm: f32 = right.iter().map(|b| b * b).sum::<f32>().sqrt();

	if left_norm == 0.0 || right_norm == 0.0 {
		return 1.0;
	}

	1.0 - dot / (left_norm * right_norm)
}

fn hash_unit_vector(text: &str, dimensions: usize) -> Vec<f32> {
	let mut reader = blake3::Hasher::new().update(text.as_bytes()).finalize_xof();
	let mut bytes = vec![0_u8; dimensions];

	reader.fill(&mut bytes);

	let mut vector: Vec<f32> = bytes.into_iter().map(|b| f32::from(b) / 127.5 - 1.0).collect();
	let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();

	if norm > 0.0 {
		for value in &mut vector {
			*value /= norm;
		}
	}

	vector
}

/// A minimal valid config for tests, with the embedding dimension (and the
/// matching collection dimension) swapped in.
pub fn test_config(dimensions: u32) -> Config {
	let payload = format!(
		r#"
[service]
http_bind = "127.0.0.1:0"
log_level = "info"

[storage.qdrant]
url        = "http://127.0.0.1:6334"
collection = "resumes_test"
vector_dim = {dimensions}

[providers.embedding]
api_base   = "http://127.0.0.1:1"
api_key    = "test-key"
path       = "/v1/embeddings"
model      = "test-embedding"
dimensions = {dimensions}
timeout_ms = 1000

[search]
default_top_k        = 10
overfetch_multiplier = 5

[ingest]
max_batch_size    = 100
max_resume_length = 20000

[chunking]
max_words     = 200
overlap_words = 20
"#
	);

	toml::from_str(&payload).expect("Test config must parse.")
}
