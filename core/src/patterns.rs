// Morse symbol table: code string -> decoded text.
// Resolution is a linear scan; the table is small and fixed.

/// Marker emitted for a code that is not in the table.
pub const UNKNOWN_MARKER: &str = "?";

/// Number of populated entries in [`SYMBOL_TABLE`].
pub const TABLE_SIZE: usize = 47;

pub static SYMBOL_TABLE: [(&str, &str); TABLE_SIZE] = [
    // Letters
    (".-", "a"),
    ("-...", "b"),
    ("-.-.", "c"),
    ("-..", "d"),
    (".", "e"),
    ("..-.", "f"),
    ("--.", "g"),
    ("....", "h"),
    ("..", "i"),
    (".---", "j"),
    ("-.-", "k"),
    (".-..", "l"),
    ("--", "m"),
    ("-.", "n"),
    ("---", "o"),
    (".--.", "p"),
    ("--.-", "q"),
    (".-.", "r"),
    ("...", "s"),
    ("-", "t"),
    ("..-", "u"),
    ("...-", "v"),
    (".--", "w"),
    ("-..-", "x"),
    ("-.--", "y"),
    ("--..", "z"),
    // Numbers
    ("-----", "0"),
    (".----", "1"),
    ("..---", "2"),
    ("...--", "3"),
    ("....-", "4"),
    (".....", "5"),
    ("-....", "6"),
    ("--...", "7"),
    ("---..", "8"),
    ("----.", "9"),
    // Punctuation
    ("-.-.--", "!"),
    ("-.--.", "("),
    ("-.--.-", ")"),
    (".-.-.", "+"),
    ("--..--", ","),
    ("-....-", "-"),
    (".-.-.-", "."),
    ("-..-.", "/"),
    ("-...-", "="),
    ("..--..", "?"),
    ("..--.-", "_"),
];

/// Exact-match lookup of a code string (`.`/`-`).
pub fn lookup_code(code: &str) -> Option<&'static str> {
    SYMBOL_TABLE
        .iter()
        .find(|(pattern, _)| *pattern == code)
        .map(|(_, text)| *text)
}

/// Resolve a code string to its decoded text, or [`UNKNOWN_MARKER`].
pub fn resolve_code(code: &str) -> &'static str {
    lookup_code(code).unwrap_or(UNKNOWN_MARKER)
}

/// Reverse lookup used for keying synthesis. Letters match in either case.
pub fn code_for_char(ch: char) -> Option<&'static str> {
    let ch = ch.to_ascii_lowercase();
    SYMBOL_TABLE
        .iter()
        .find(|(_, text)| text.chars().eq(std::iter::once(ch)))
        .map(|(pattern, _)| *pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_code_resolves_to_its_own_entry() {
        for (code, text) in SYMBOL_TABLE.iter() {
            assert_eq!(resolve_code(code), *text, "code {}", code);
        }
    }

    #[test]
    fn test_codes_and_characters_are_unique() {
        let codes: HashSet<_> = SYMBOL_TABLE.iter().map(|(code, _)| *code).collect();
        let texts: HashSet<_> = SYMBOL_TABLE.iter().map(|(_, text)| *text).collect();
        assert_eq!(codes.len(), TABLE_SIZE);
        assert_eq!(texts.len(), TABLE_SIZE);
        assert!(SYMBOL_TABLE
            .iter()
            .all(|(code, _)| !code.is_empty() && code.bytes().all(|b| b == b'.' || b == b'-')));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(resolve_code("...-."), UNKNOWN_MARKER);
        assert_eq!(resolve_code("--------"), UNKNOWN_MARKER);
        assert_eq!(resolve_code(""), UNKNOWN_MARKER);
        assert_eq!(lookup_code("...-."), None);
    }

    #[test]
    fn test_question_mark_is_a_real_entry() {
        // "?" is both a table character and the unknown marker
        assert_eq!(resolve_code("..--.."), "?");
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(code_for_char('S'), Some("..."));
        assert_eq!(code_for_char('s'), Some("..."));
        assert_eq!(code_for_char('0'), Some("-----"));
        assert_eq!(code_for_char('_'), Some("..--.-"));
        assert_eq!(code_for_char('@'), None);
        assert_eq!(code_for_char(' '), None);
    }
}
