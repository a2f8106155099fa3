use icu_normalizer::ComposingNormalizerBorrowed;

pub const VIRAMA: char = '\u{0D4D}';
pub const ZWJ: char = '\u{200D}';

/// A consonant whose `consonant + virama + ZWJ` spelling has a dedicated
/// chillu code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChilluRule {
    pub consonant: char,
    pub chillu: char,
}

pub const CHILLU_RULES: [ChilluRule; 6] = [
    ChilluRule {
        consonant: '\u{0D23}', // ണ
        chillu: '\u{0D7A}',
    },
    ChilluRule {
        consonant: '\u{0D28}', // ന
        chillu: '\u{0D7B}',
    },
    ChilluRule {
        consonant: '\u{0D30}', // ര
        chillu: '\u{0D7C}',
    },
    ChilluRule {
        consonant: '\u{0D32}', // ല
        chillu: '\u{0D7D}',
    },
    ChilluRule {
        consonant: '\u{0D33}', // ള
        chillu: '\u{0D7E}',
    },
    ChilluRule {
        consonant: '\u{0D15}', // ക
        chillu: '\u{0D7F}',
    },
];

pub fn chillu_for(consonant: char) -> Option<char> {
    CHILLU_RULES
        .iter()
        .find(|rule| rule.consonant == consonant)
        .map(|rule| rule.chillu)
}

/// Canonical form used for every comparison: NFC, then each
/// `consonant + virama + ZWJ` triplet collapsed to its atomic chillu.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(text);
    collapse_chillus(&composed)
}

fn collapse_chillus(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == VIRAMA && chars[i + 2] == ZWJ {
            if let Some(chillu) = chillu_for(chars[i]) {
                out.push(chillu);
                i += 3;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}
