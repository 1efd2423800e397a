use uuid::Uuid;
use vitae_chunking::ChunkingConfig;
use vitae_domain::{CandidateMetadata, ChunkPoint};

use crate::{ServiceError, ServiceResult, VitaeService};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResumeInput {
	pub resume_text: String,
	pub metadata: CandidateMetadata,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IngestRequest {
	pub resumes: Vec<ResumeInput>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IngestResponse {
	pub ingested_resumes: u32,
	pub ingested_chunks: u32,
}

impl VitaeService {
	/// Chunks each resume, embeds the chunks, and upserts them to the index
	/// in batches. One fresh resume_id is assigned per resume and stamped
	/// on every chunk; per-chunk ids stay unique. Inputs are validated
	/// up front so a bad resume fails the request before any write.
	pub async fn ingest(&self, request: IngestRequest) -> ServiceResult<IngestResponse> {
		for (position, resume) in request.resumes.iter().enumerate() {
			if resume.resume_text.trim().is_empty() {
				return Err(ServiceError::InvalidRequest {
					message: format!("resumes[{position}].resume_text must be non-empty."),
				});
			}
			if resume.resume_text.len() > self.cfg.ingest.max_resume_length {
				return Err(ServiceError::InvalidRequest {
					message: format!(
						"resumes[{position}].resume_text exceeds {} bytes.",
						self.cfg.ingest.max_resume_length
					),
				});
			}
		}

		let chunking = ChunkingConfig {
			max_words: self.cfg.chunking.max_words,
			overlap_words: self.cfg.chunking.overlap_words,
		};
		let mut batch: Vec<ChunkPoint> = Vec::new();
		let mut ingested_resumes = 0_u32;
		let mut ingested_chunks = 0_u32;

		for resume in &request.resumes {
			let resume_id = Uuid::new_v4();
			let chunks = vitae_chunking::split_text(&resume.resume_text, &chunking);
			let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
			let vectors = self.embed_texts(&texts).await?;
			let metadata = resume.metadata.clone().with_resume_id(resume_id);

			for (chunk, vector) in chunks.into_iter().zip(vectors) {
				batch.push(ChunkPoint {
					chunk_id: Uuid::new_v4(),
					text: chunk.text,
					vector,
					metadata: metadata.clone(),
				});

				ingested_chunks += 1;

				if batch.len() >= self.cfg.ingest.max_batch_size {
					self.flush(&mut batch).await?;
				}
			}

			ingested_resumes += 1;

			tracing::debug!(resume_id = %resume_id, "Resume chunked and embedded.");
		}

		self.flush(&mut batch).await?;

		tracing::info!(
			resumes = ingested_resumes,
			chunks = ingested_chunks,
			"Resume ingestion finished."
		);

		Ok(IngestResponse { ingested_resumes, ingested_chunks })
	}

	async fn flush(&self, batch: &mut Vec<ChunkPoint>) -> ServiceResult<()> {
		if batch.is_empty() {
			return Ok(());
		}

		self.index
			.upsert(batch)
			.await
			.map_err(|err| ServiceError::Index { message: err.to_string() })?;

		batch.clear();

		Ok(())
	}
}
