use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Debug)]
pub struct ChunkingConfig {
	pub max_words: u32,
	pub overlap_words: u32,
}

#[derive(Clone, Debug)]
pub struct Chunk {
	pub chunk_index: i32,
	pub start_offset: usize,
	pub end_offset: usize,
	pub text: String,
}

/// Splits text on sentence boundaries, packing sentences into chunks of at
/// most `max_words` words. Consecutive chunks share an `overlap_words` tail
/// so a match near a boundary is not lost to either side.
pub fn split_text(text: &str, cfg: &ChunkingConfig) -> Vec<Chunk> {
	let sentences: Vec<(usize, &str)> = text.split_sentence_bound_indices().collect();
	let mut chunks = Vec::new();
	let mut current = String::new();
	let mut current_start = 0_usize;
	let mut last_end = 0_usize;
	let mut chunk_index = 0_i32;

	for (idx, sentence) in sentences {
		let candidate_words = word_count(&current) + word_count(sentence);

		if candidate_words as u32 > cfg.max_words && !current.is_empty() {
			chunks.push(Chunk {
				chunk_index,
				start_offset: current_start,
				end_offset: last_end,
				text: current.clone(),
			});

			chunk_index += 1;

			let overlap = overlap_tail(&current, cfg.overlap_words);

			current_start = last_end.saturating_sub(overlap.len());
			current = overlap;
		}
		if current.is_empty() {
			current_start = idx;
		}

		current.push_str(sentence);

		last_end = idx + sentence.len();
	}

	if !current.trim().is_empty() {
		chunks.push(Chunk {
			chunk_index,
			start_offset: current_start,
			end_offset: last_end,
			text: current,
		});
	}

	chunks
}

fn word_count(text: &str) -> usize {
	text.unicode_words().count()
}

fn overlap_tail(text: &str, overlap_words: u32) -> String {
	if overlap_words == 0 {
		return String::new();
	}

	let bounds: Vec<usize> = text.unicode_word_indices().map(|(idx, _)| idx).collect();
	let start = bounds.len().saturating_sub(overlap_words as usize);

	match bounds.get(start) {
		Some(&offset) => text[offset..].to_string(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_text_yields_a_single_chunk() {
		let cfg = ChunkingConfig { max_words: 50, overlap_words: 5 };
		let chunks = split_text("One sentence. Another sentence.", &cfg);

		assert_eq!(chunks.len(), 1);
		assert_eq!(chunks[0].chunk_index, 0);
		assert_eq!(chunks[0].text, "One sentence. Another sentence.");
	}

	#[test]
	fn splits_into_chunks_with_overlap() {
		let cfg = ChunkingConfig { max_words: 4, overlap_words: 1 };
		let chunks = split_text("One two three. Four five six. Seven eight nine.", &cfg);

		assert!(chunks.len() >= 2);
		assert!(chunks[0].text.contains("One"));
		// The overlap carries the previous chunk's tail forward.
		assert!(chunks[1].text.contains("three") || chunks[1].text.contains("six"));

		for pair in chunks.windows(2) {
			assert_eq!(pair[0].chunk_index + 1, pair[1].chunk_index);
		}
	}

	#[test]
	fn empty_text_yields_no_chunks() {
		let cfg = ChunkingConfig { max_words: 10, overlap_words: 0 };

		assert!(split_text("", &cfg).is_empty());
		assert!(split_text("   ", &cfg).is_empty());
	}

	#[test]
	fn offsets_cover_the_source_text() {
		let cfg = ChunkingConfig { max_words: 3, overlap_words: 0 };
		let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
		let chunks = split_text(text, &cfg);

		for chunk in &chunks {
			assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.text);
		}
		assert_eq!(chunks.last().map(|chunk| chunk.end_offset), Some(text.len()));
	}
}
