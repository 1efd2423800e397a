use std::collections::HashMap;

use qdrant_client::{
	client::Payload,
	qdrant::{ScoredPoint, Value, value::Kind},
};
use uuid::Uuid;
use vitae_domain::{CandidateMetadata, ChunkHit, ChunkPoint};

const KEY_TEXT: &str = "text";
const KEY_RESUME_ID: &str = "resume_id";
const KEY_CANDIDATE_NAME: &str = "candidate_name";
const KEY_SKILLS: &str = "skills";
const KEY_EXPERIENCE: &str = "experience";
const KEY_LOCATION: &str = "location";
const KEY_SOURCE: &str = "source";

pub(crate) fn chunk_payload(chunk: &ChunkPoint) -> Payload {
	let meta = &chunk.metadata;
	let mut payload_map = HashMap::new();

	payload_map.insert(KEY_TEXT.to_string(), Value::from(chunk.text.clone()));
	if let Some(resume_id) = meta.resume_id {
		payload_map.insert(KEY_RESUME_ID.to_string(), Value::from(resume_id.to_string()));
	}
	if let Some(name) = meta.candidate_name.as_ref() {
		payload_map.insert(KEY_CANDIDATE_NAME.to_string(), Value::from(name.clone()));
	}
	if !meta.skills.is_empty() {
		payload_map.insert(KEY_SKILLS.to_string(), Value::from(meta.skills.join(", ")));
	}
	payload_map.insert(KEY_EXPERIENCE.to_string(), Value::from(i64::from(meta.experience)));
	payload_map.insert(KEY_LOCATION.to_string(), Value::from(meta.location.clone()));
	if let Some(source) = meta.source.as_ref() {
		payload_map.insert(KEY_SOURCE.to_string(), Value::from(source.clone()));
	}

	Payload::from(payload_map)
}

/// Rebuilds a [`ChunkHit`] from a scored point. Qdrant reports cosine
/// similarity; callers work in cosine distance, so the score is flipped
/// here. A point without text is dropped; a point without a parseable
/// resume_id degrades to `resume_id: None` and stays in the result.
pub(crate) fn hit_from_point(point: ScoredPoint) -> Option<ChunkHit> {
	let Some(text) = payload_str(&point.payload, KEY_TEXT) else {
		tracing::warn!("Chunk hit missing text payload, dropping point.");

		return None;
	};
	let resume_id = match payload_str(&point.payload, KEY_RESUME_ID) {
		Some(raw) => match Uuid::parse_str(raw) {
			Ok(id) => Some(id),
			Err(_) => {
				tracing::warn!(
					resume_id = raw,
					"Chunk hit carries unparseable resume_id, grouping under sentinel."
				);

				None
			},
		},
		None => {
			tracing::warn!("Chunk hit missing resume_id, grouping under sentinel.");

			None
		},
	};

	let metadata = CandidateMetadata {
		resume_id,
		candidate_name: payload_str(&point.payload, KEY_CANDIDATE_NAME).map(str::to_string),
		skills: payload_str(&point.payload, KEY_SKILLS)
			.map(|raw| raw.split(", ").map(str::to_string).collect())
			.unwrap_or_default(),
		experience: payload_i64(&point.payload, KEY_EXPERIENCE)
			.and_then(|value| u32::try_from(value).ok())
			.unwrap_or(0),
		location: payload_str(&point.payload, KEY_LOCATION).unwrap_or_default().to_string(),
		source: payload_str(&point.payload, KEY_SOURCE).map(str::to_string),
	};

	Some(ChunkHit { text: text.to_string(), distance: 1.0 - point.score, metadata })
}

fn payload_str<'a>(payload: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
	payload.get(key).and_then(|value| match value.kind.as_ref() {
		Some(Kind::StringValue(raw)) => Some(raw.as_str()),
		_ => None,
	})
}

fn payload_i64(payload: &HashMap<String, Value>, key: &str) -> Option<i64> {
	payload.get(key).and_then(|value| match value.kind.as_ref() {
		Some(Kind::IntegerValue(raw)) => Some(*raw),
		_ => None,
	})
}
