use rand::Rng;
use rand::rngs::SmallRng;
use serde::Deserialize;

use crate::assets;
use crate::error::Result;

#[derive(Deserialize)]
struct LettersFile {
    letters: Vec<String>,
}

/// Letters offered for the letters drill, in keyboard-teaching order.
pub fn bundled_letters() -> Result<Vec<String>> {
    let file: LettersFile = assets::load_json(assets::LETTERS)?;
    Ok(file.letters)
}

/// `length` random picks from `letters`, with a space after every fourth.
pub fn build_letter_string(letters: &[String], length: usize, rng: &mut SmallRng) -> String {
    if letters.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for i in 0..length {
        out.push_str(&letters[rng.gen_range(0..letters.len())]);
        if (i + 1) % 4 == 0 && i + 1 != length {
            out.push(' ');
        }
    }
    out
}

/// Each key twice, space separated.
pub fn build_pre_lesson_drill(keys: &[String]) -> String {
    keys.iter()
        .chain(keys.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
