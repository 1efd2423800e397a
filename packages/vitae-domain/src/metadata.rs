use uuid::Uuid;

/// Typed chunk metadata. The grouping key and every filterable field is a
/// named field here; free-form metadata maps are rejected at the ingestion
/// boundary instead of being interpreted at query time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateMetadata {
	/// Shared by every chunk of one source resume. Assigned at ingestion;
	/// a hit whose payload lacks it degrades to `None`.
	#[serde(default)]
	pub resume_id: Option<Uuid>,
	#[serde(default)]
	pub candidate_name: Option<String>,
	#[serde(default)]
	pub skills: Vec<String>,
	/// Years, inclusive lower bound under the `experience >= n` filter.
	#[serde(default)]
	pub experience: u32,
	#[serde(default)]
	pub location: String,
	#[serde(default)]
	pub source: Option<String>,
}

impl CandidateMetadata {
	pub fn with_resume_id(mut self, resume_id: Uuid) -> Self {
		self.resume_id = Some(resume_id);

		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_with_missing_optional_fields() {
		let meta: CandidateMetadata =
			serde_json::from_value(serde_json::json!({ "location": "NYC" }))
				.expect("deserialize failed");

		assert_eq!(meta.resume_id, None);
		assert_eq!(meta.experience, 0);
		assert_eq!(meta.location, "NYC");
		assert!(meta.skills.is_empty());
	}
}
