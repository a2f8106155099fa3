use rand::Rng;
use rand::rngs::SmallRng;
use serde::Deserialize;

use crate::assets;
use crate::error::Result;

const MIN_SENTENCE_WORDS: usize = 6;
const MAX_SENTENCE_WORDS: usize = 14;

#[derive(Deserialize)]
struct CommonWordsFile {
    words: Vec<String>,
}

pub fn bundled_common_words() -> Result<Vec<String>> {
    let file: CommonWordsFile = assets::load_json(assets::COMMON_WORDS)?;
    Ok(file.words)
}

/// `total_words` random words cut into sentences of 6 to 14 words, each
/// closed with `" ."`.
pub fn build_common_paragraph(words: &[String], total_words: usize, rng: &mut SmallRng) -> String {
    if words.is_empty() {
        return String::new();
    }
    let picked: Vec<&str> = (0..total_words)
        .map(|_| words[rng.gen_range(0..words.len())].as_str())
        .collect();

    let mut sentences = Vec::new();
    let mut i = 0;
    while i < picked.len() {
        let want = rng.gen_range(MIN_SENTENCE_WORDS..=MAX_SENTENCE_WORDS);
        let len = want.min(picked.len() - i);
        sentences.push(format!("{} .", picked[i..i + len].join(" ")));
        i += len;
    }
    sentences.join(" ")
}
