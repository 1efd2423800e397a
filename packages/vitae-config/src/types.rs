use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	pub ingest: Ingest,
	pub chunking: Chunking,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_top_k")]
	pub default_top_k: u32,
	/// Chunk over-fetch factor applied to `top_k` before resume-level
	/// grouping collapses chunk hits.
	#[serde(default = "default_overfetch_multiplier")]
	pub overfetch_multiplier: u32,
}

#[derive(Debug, Deserialize)]
pub struct Ingest {
	#[serde(default = "default_max_batch_size")]
	pub max_batch_size: usize,
	#[serde(default = "default_max_resume_length")]
	pub max_resume_length: usize,
}

#[derive(Debug, Deserialize)]
pub struct Chunking {
	pub max_words: u32,
	pub overlap_words: u32,
}

fn default_top_k() -> u32 {
	10
}

fn default_overfetch_multiplier() -> u32 {
	5
}

fn default_max_batch_size() -> usize {
	100
}

fn default_max_resume_length() -> usize {
	20_000
}
