mod embedding;

pub use embedding::EmbeddingClient;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Embedding request failed.")]
	Http(#[from] reqwest::Error),
	#[error("Embedding header {name:?} is not a valid HTTP header.")]
	InvalidHeader { name: String },
	#[error("Embedding response malformed: {message}")]
	MalformedResponse { message: String },
}
