// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns a raw ticket string into the word tokens the TF-IDF
// vectorizer counts.
//
// Ticket text arrives from CSV files and HTTP bodies, so it can
// carry non-breaking spaces, zero-width spaces, byte order marks
// and stray control characters. Those are mapped to plain spaces
// before tokenising so they never glue two words together.
//
// Tokenising rules:
//   1. Lowercase (Unicode-aware: "SESIÓN" → "sesión")
//   2. A token is a maximal run of word characters
//      (alphanumeric or '_')
//   3. Tokens shorter than 2 characters are dropped
//      ("a", "y", "2" carry almost no signal)
//
// Example:
//   "No puedo iniciar sesión. Ticket #42"
//   → ["no", "puedo", "iniciar", "sesión", "ticket", "42"]

/// Minimum token length in characters
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalise invisible / control characters to spaces and lowercase.
    pub fn clean(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect::<String>()
            .to_lowercase()
    }

    /// Split cleaned text into word tokens of at least two characters.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        cleaned
            .split(|c: char| !is_word_char(c))
            .filter(|tok| tok.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
