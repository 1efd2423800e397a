use std::{cmp::Ordering, collections::HashMap};

use uuid::Uuid;
use vitae_domain::{
	CandidateMetadata, ChunkHit, MetadataPredicate,
	filter::{FIELD_EXPERIENCE, FIELD_LOCATION},
};

use crate::{ServiceError, ServiceResult, VitaeService};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub job_description: String,
	pub min_experience: Option<u32>,
	pub location: Option<String>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RankedCandidate {
	/// `None` marks the sentinel group of chunks that reached the index
	/// without a resume_id.
	pub resume_id: Option<Uuid>,
	/// `1 - distance` of the representative chunk. Can be negative for very
	/// dissimilar vectors; deliberately not clamped.
	pub score: f32,
	pub metadata: CandidateMetadata,
	pub resume_excerpt: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	/// Distinct resumes surfaced by the chunk query, counted before the
	/// top_k truncation.
	pub retrieved_count: u32,
	pub candidates: Vec<RankedCandidate>,
}

impl VitaeService {
	/// Turns chunk-level nearest-neighbor hits into resume-level ranked
	/// candidates: embed once, over-fetch chunks, group per resume, keep
	/// each resume's best chunk, sort by score descending, truncate.
	pub async fn search(&self, request: SearchRequest) -> ServiceResult<SearchResponse> {
		if request.job_description.trim().is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "job_description must be non-empty.".to_string(),
			});
		}

		let top_k = request.top_k.unwrap_or(self.cfg.search.default_top_k);

		if top_k == 0 {
			return Ok(SearchResponse { retrieved_count: 0, candidates: Vec::new() });
		}

		let texts = vec![request.job_description.clone()];
		let mut vectors = self.embed_texts(&texts).await?;
		let vector = vectors.pop().ok_or_else(|| ServiceError::Provider {
			message: "Embedding response was empty.".to_string(),
		})?;

		let mut predicates = Vec::new();

		if let Some(min_experience) = request.min_experience {
			predicates.push(MetadataPredicate::gte(FIELD_EXPERIENCE, f64::from(min_experience)));
		}
		if let Some(location) = request.location.as_ref() {
			predicates.push(MetadataPredicate::eq(FIELD_LOCATION, location.clone()));
		}

		// Chunk-level over-fetch so grouping still has enough distinct
		// resumes to fill top_k. Not a guarantee: fewer survivors simply
		// yield a shorter list.
		let limit = u64::from(top_k) * u64::from(self.cfg.search.overfetch_multiplier);
		let hits = self
			.index
			.query(vector, limit, &predicates)
			.await
			.map_err(|err| ServiceError::Index { message: err.to_string() })?;
		let representatives = best_chunk_per_resume(hits);
		let retrieved_count = representatives.len() as u32;
		let candidates = rank_candidates(representatives, top_k as usize);

		Ok(SearchResponse { retrieved_count, candidates })
	}
}

/// Collapses chunk hits to one representative per resume_id, keeping the
/// minimum-distance chunk. Ties keep the first chunk encountered. Hits
/// without a resume_id all share the `None` sentinel group. First-seen
/// order of groups is preserved.
fn best_chunk_per_resume(hits: Vec<ChunkHit>) -> Vec<ChunkHit> {
	let mut order: Vec<Option<Uuid>> = Vec::new();
	let mut best: HashMap<Option<Uuid>, ChunkHit> = HashMap::new();

	for hit in hits {
		let key = hit.metadata.resume_id;

		match best.get(&key) {
			Some(existing) if existing.distance <= hit.distance => {},
			Some(_) => {
				best.insert(key, hit);
			},
			None => {
				order.push(key);
				best.insert(key, hit);
			},
		}
	}

	order.into_iter().filter_map(|key| best.remove(&key)).collect()
}

fn rank_candidates(representatives: Vec<ChunkHit>, top_k: usize) -> Vec<RankedCandidate> {
	let mut candidates: Vec<RankedCandidate> = representatives
		.into_iter()
		.map(|hit| RankedCandidate {
			resume_id: hit.metadata.resume_id,
			score: 1.0 - hit.distance,
			metadata: hit.metadata,
			resume_excerpt: hit.text,
		})
		.collect();

	// Stable sort: equal scores keep their first-seen order.
	candidates.sort_by(|left, right| cmp_f32_desc(left.score, right.score));
	candidates.truncate(top_k);

	candidates
}

fn cmp_f32_desc(left: f32, right: f32) -> Ordering {
	right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hit(resume_id: Option<Uuid>, distance: f32, text: &str) -> ChunkHit {
		ChunkHit {
			text: text.to_string(),
			distance,
			metadata: CandidateMetadata {
				resume_id,
				candidate_name: None,
				skills: Vec::new(),
				experience: 0,
				location: String::new(),
				source: None,
			},
		}
	}

	#[test]
	fn grouping_keeps_one_representative_per_resume() {
		let r1 = Some(Uuid::new_v4());
		let r2 = Some(Uuid::new_v4());
		let hits = vec![hit(r1, 0.1, "a"), hit(r2, 0.2, "b"), hit(r1, 0.3, "c")];
		let representatives = best_chunk_per_resume(hits);

		assert_eq!(representatives.len(), 2);
		assert_eq!(representatives[0].metadata.resume_id, r1);
		assert_eq!(representatives[0].text, "a");
		assert_eq!(representatives[1].metadata.resume_id, r2);
	}

	#[test]
	fn grouping_picks_minimum_distance_chunk() {
		let r1 = Some(Uuid::new_v4());
		let hits = vec![hit(r1, 0.4, "worse"), hit(r1, 0.05, "best"), hit(r1, 0.2, "middle")];
		let representatives = best_chunk_per_resume(hits);

		assert_eq!(representatives.len(), 1);
		assert_eq!(representatives[0].text, "best");
	}

	#[test]
	fn tied_distances_keep_first_encountered_chunk() {
		let r1 = Some(Uuid::new_v4());
		let hits = vec![hit(r1, 0.2, "first"), hit(r1, 0.2, "second")];
		let representatives = best_chunk_per_resume(hits);

		assert_eq!(representatives[0].text, "first");
	}

	#[test]
	fn missing_resume_ids_share_one_sentinel_group() {
		let hits = vec![hit(None, 0.3, "a"), hit(None, 0.1, "b"), hit(Some(Uuid::new_v4()), 0.2, "c")];
		let representatives = best_chunk_per_resume(hits);

		assert_eq!(representatives.len(), 2);
		assert_eq!(representatives[0].metadata.resume_id, None);
		assert_eq!(representatives[0].text, "b");
	}

	#[test]
	fn ranking_sorts_by_score_descending_and_truncates() {
		let hits = vec![
			hit(Some(Uuid::new_v4()), 0.5, "far"),
			hit(Some(Uuid::new_v4()), 0.1, "near"),
			hit(Some(Uuid::new_v4()), 0.3, "middle"),
		];
		let candidates = rank_candidates(hits, 2);

		assert_eq!(candidates.len(), 2);
		assert_eq!(candidates[0].resume_excerpt, "near");
		assert_eq!(candidates[1].resume_excerpt, "middle");

		for pair in candidates.windows(2) {
			assert!(pair[0].score >= pair[1].score);
		}
	}

	#[test]
	fn score_is_one_minus_distance() {
		let candidates = rank_candidates(vec![hit(Some(Uuid::new_v4()), 0.1, "a")], 5);

		assert!((candidates[0].score - 0.9).abs() < 1e-6);
	}

	#[test]
	fn negative_scores_are_not_clamped() {
		// Cosine distance above 1 means opposed vectors; the score goes
		// negative and stays that way.
		let candidates = rank_candidates(vec![hit(Some(Uuid::new_v4()), 1.4, "opposed")], 5);

		assert!((candidates[0].score - (-0.4)).abs() < 1e-6);
	}

	#[test]
	fn equal_scores_keep_insertion_order() {
		let r1 = Some(Uuid::new_v4());
		let r2 = Some(Uuid::new_v4());
		let candidates = rank_candidates(vec![hit(r1, 0.2, "a"), hit(r2, 0.2, "b")], 5);

		assert_eq!(candidates[0].resume_id, r1);
		assert_eq!(candidates[1].resume_id, r2);
	}
}
