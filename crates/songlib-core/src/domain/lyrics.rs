//! Lyric verses and the text splitting rules.

use serde::{Deserialize, Serialize};

/// One line of a song's lyrics.
///
/// `verse_number` is 1-based and dense within a song: the verses of a song
/// are always numbered `1..=N` in text order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsVerse {
    pub verse_number: u32,
    pub verse: String,
}

impl LyricsVerse {
    pub fn new(verse_number: u32, verse: impl Into<String>) -> Self {
        Self {
            verse_number,
            verse: verse.into(),
        }
    }
}

/// Split raw lyric text into numbered verses.
///
/// Text that is empty after trimming whitespace yields no verses. Otherwise
/// the text is split on `\n` and every line becomes a verse, empty lines
/// included, numbered from 1 in order. A trailing `\r` is dropped from each
/// line so CRLF input produces the same verses as LF input.
pub fn split_verses(text: &str) -> Vec<LyricsVerse> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .zip(1u32..)
        .map(|(line, number)| LyricsVerse::new(number, line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Join verses back into a single lyrics text, in the order given.
pub fn join_verses(verses: &[LyricsVerse]) -> String {
    verses
        .iter()
        .map(|v| v.verse.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_numbers_lines_in_order() {
        let verses = split_verses("a\nb\nc");
        assert_eq!(
            verses,
            vec![
                LyricsVerse::new(1, "a"),
                LyricsVerse::new(2, "b"),
                LyricsVerse::new(3, "c"),
            ]
        );
    }

    #[test]
    fn test_split_empty_and_blank_text_yields_nothing() {
        assert!(split_verses("").is_empty());
        assert!(split_verses("   ").is_empty());
        assert!(split_verses(" \n\t\n ").is_empty());
    }

    #[test]
    fn test_split_keeps_empty_lines() {
        let verses = split_verses("first\n\nsecond");
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[1], LyricsVerse::new(2, ""));
        assert_eq!(verses[2], LyricsVerse::new(3, "second"));
    }

    #[test]
    fn test_split_strips_carriage_returns() {
        let verses = split_verses("one\r\ntwo\r\n");
        assert_eq!(verses[0].verse, "one");
        assert_eq!(verses[1].verse, "two");
        assert_eq!(verses[2].verse, "");
    }

    #[test]
    fn test_join_reverses_split() {
        let text = "Ooh baby, don't you know I suffer?\n\nOoh baby, can you hear me moan?";
        assert_eq!(join_verses(&split_verses(text)), text);
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_verses(&[]), "");
    }

    #[test]
    fn test_verse_serializes_camel_case() {
        let json = serde_json::to_value(LyricsVerse::new(4, "la")).unwrap();
        assert_eq!(json, serde_json::json!({"verseNumber": 4, "verse": "la"}));
    }
}
