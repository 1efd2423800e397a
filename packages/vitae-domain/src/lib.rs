pub mod chunk;
pub mod filter;
pub mod metadata;

pub use chunk::{ChunkHit, ChunkPoint};
pub use filter::MetadataPredicate;
pub use metadata::CandidateMetadata;
