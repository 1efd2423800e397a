use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Deserialize, Serialize};
use vitae_config::EmbeddingProviderConfig;

use crate::{Error, Result};

/// Client for an OpenAI-compatible embeddings endpoint. Failures propagate
/// to the caller unmodified; there is no retry here.
pub struct EmbeddingClient {
	http: Client,
	url: String,
	model: String,
	dimensions: u32,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
	model: &'a str,
	input: &'a [String],
	dimensions: u32,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
	index: usize,
	embedding: Vec<f32>,
}

impl EmbeddingClient {
	pub fn new(cfg: &EmbeddingProviderConfig) -> Result<Self> {
		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(request_headers(cfg)?)
			.build()?;

		Ok(Self {
			http,
			url: format!("{}{}", cfg.api_base, cfg.path),
			model: cfg.model.clone(),
			dimensions: cfg.dimensions,
		})
	}

	/// One vector per input text, in input order regardless of the order the
	/// endpoint returned them in.
	pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
		let request =
			EmbeddingRequest { model: &self.model, input: texts, dimensions: self.dimensions };
		let response = self.http.post(&self.url).json(&request).send().await?;
		let response: EmbeddingResponse = response.error_for_status()?.json().await?;

		into_vectors(response, texts.len())
	}
}

fn into_vectors(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
	if response.data.len() != expected {
		return Err(Error::MalformedResponse {
			message: format!("expected {expected} embeddings, got {}", response.data.len()),
		});
	}

	let mut items = response.data;

	items.sort_by_key(|item| item.index);

	Ok(items.into_iter().map(|item| item.embedding).collect())
}

fn request_headers(cfg: &EmbeddingProviderConfig) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let bearer = format!("Bearer {}", cfg.api_key);

	headers.insert(AUTHORIZATION, header_value(AUTHORIZATION.as_str(), &bearer)?);

	for (name, value) in &cfg.default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidHeader { name: name.clone() });
		};
		let parsed = HeaderName::from_bytes(name.as_bytes())
			.map_err(|_| Error::InvalidHeader { name: name.clone() })?;

		headers.insert(parsed, header_value(name, raw)?);
	}

	Ok(headers)
}

fn header_value(name: &str, raw: &str) -> Result<HeaderValue> {
	HeaderValue::from_str(raw).map_err(|_| Error::InvalidHeader { name: name.to_string() })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(index: usize, embedding: Vec<f32>) -> EmbeddingItem {
		EmbeddingItem { index, embedding }
	}

	#[test]
	fn vectors_come_back_in_input_order() {
		let response = EmbeddingResponse {
			data: vec![item(1, vec![2.0, 3.0]), item(0, vec![0.5, 1.5])],
		};
		let vectors = into_vectors(response, 2).expect("conversion failed");

		assert_eq!(vectors[0], vec![0.5, 1.5]);
		assert_eq!(vectors[1], vec![2.0, 3.0]);
	}

	#[test]
	fn embedding_count_mismatch_is_rejected() {
		let response = EmbeddingResponse { data: vec![item(0, vec![1.0])] };
		let err = into_vectors(response, 2).expect_err("Expected count mismatch error.");

		assert!(matches!(err, Error::MalformedResponse { .. }), "Unexpected error: {err}");
	}

	#[test]
	fn response_without_data_array_does_not_deserialize() {
		let raw = r#"{ "error": { "message": "rate limited" } }"#;

		assert!(serde_json::from_str::<EmbeddingResponse>(raw).is_err());
	}

	#[test]
	fn non_string_default_header_is_rejected() {
		let mut cfg = test_cfg();

		cfg.default_headers.insert("x-retries".to_string(), serde_json::json!(3));

		let err = request_headers(&cfg).expect_err("Expected invalid header error.");

		assert!(
			matches!(err, Error::InvalidHeader { ref name } if name == "x-retries"),
			"Unexpected error: {err}"
		);
	}

	#[test]
	fn bearer_and_default_headers_are_set() {
		let mut cfg = test_cfg();

		cfg.default_headers.insert("x-tenant".to_string(), serde_json::json!("acme"));

		let headers = request_headers(&cfg).expect("header build failed");

		assert_eq!(headers.get(AUTHORIZATION).map(|v| v.as_bytes()), Some(&b"Bearer sk-test"[..]));
		assert_eq!(headers.get("x-tenant").map(|v| v.as_bytes()), Some(&b"acme"[..]));
	}

	fn test_cfg() -> EmbeddingProviderConfig {
		EmbeddingProviderConfig {
			api_base: "http://127.0.0.1:1".to_string(),
			api_key: "sk-test".to_string(),
			path: "/v1/embeddings".to_string(),
			model: "test-embedding".to_string(),
			dimensions: 2,
			timeout_ms: 1000,
			default_headers: serde_json::Map::new(),
		}
	}
}
