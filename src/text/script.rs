/// True for code points in the Malayalam block (U+0D00..=U+0D7F).
pub fn is_malayalam_char(ch: char) -> bool {
    ('\u{0D00}'..='\u{0D7F}').contains(&ch)
}

pub fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_scripts() {
        assert!(is_malayalam_char('ക'));
        assert!(is_malayalam_char('ൿ'));
        assert!(!is_malayalam_char('k'));
        assert!(is_latin_letter('K'));
        assert!(!is_latin_letter('ക'));
        assert!(!is_latin_letter(';'));
    }
}
