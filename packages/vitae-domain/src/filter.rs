use crate::metadata::CandidateMetadata;

pub const FIELD_EXPERIENCE: &str = "experience";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_SOURCE: &str = "source";

/// One conjunct of an index filter. The index contract supports exactly two
/// predicate kinds: exact equality and a numeric inclusive lower bound.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MetadataPredicate {
	Eq { field: String, value: String },
	Gte { field: String, value: f64 },
}

impl MetadataPredicate {
	pub fn eq(field: &str, value: impl Into<String>) -> Self {
		Self::Eq { field: field.to_string(), value: value.into() }
	}

	pub fn gte(field: &str, value: f64) -> Self {
		Self::Gte { field: field.to_string(), value }
	}

	/// In-memory evaluation against a typed metadata record. Equality is
	/// exact and case-sensitive; unknown fields never match.
	pub fn matches(&self, metadata: &CandidateMetadata) -> bool {
		match self {
			Self::Eq { field, value } => match field.as_str() {
				FIELD_LOCATION => metadata.location == *value,
				FIELD_SOURCE => metadata.source.as_deref() == Some(value.as_str()),
				_ => false,
			},
			Self::Gte { field, value } => match field.as_str() {
				FIELD_EXPERIENCE => f64::from(metadata.experience) >= *value,
				_ => false,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn meta(experience: u32, location: &str) -> CandidateMetadata {
		CandidateMetadata {
			resume_id: None,
			candidate_name: None,
			skills: Vec::new(),
			experience,
			location: location.to_string(),
			source: None,
		}
	}

	#[test]
	fn location_equality_is_exact_and_case_sensitive() {
		let predicate = MetadataPredicate::eq(FIELD_LOCATION, "NYC");

		assert!(predicate.matches(&meta(0, "NYC")));
		assert!(!predicate.matches(&meta(0, "nyc")));
		assert!(!predicate.matches(&meta(0, "NYC, USA")));
	}

	#[test]
	fn experience_lower_bound_is_inclusive() {
		let predicate = MetadataPredicate::gte(FIELD_EXPERIENCE, 3.0);

		assert!(predicate.matches(&meta(3, "")));
		assert!(predicate.matches(&meta(5, "")));
		assert!(!predicate.matches(&meta(2, "")));
	}

	#[test]
	fn unknown_fields_never_match() {
		assert!(!MetadataPredicate::eq("salary", "high").matches(&meta(1, "NYC")));
		assert!(!MetadataPredicate::gte(FIELD_LOCATION, 1.0).matches(&meta(1, "NYC")));
	}
}
