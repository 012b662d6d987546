// Text Processing Service
// Normalization, line splitting and rule-based sentence splitting

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Abbreviations whose trailing dot never ends a sentence
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "ms.", "dr.", "prof.", "approx.", "no.", "inc.",
    "ltd.", "jr.", "sr.", "st.", "dept.", "est.", "fig.", "jan.", "feb.", "mar.", "apr.", "aug.",
    "sep.", "sept.", "oct.", "nov.", "dec.",
];

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2007}\u{202F}]").expect("valid space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("valid whitespace regex"))
}

/// Normalize punctuation and whitespace in pasted notes
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text
        .replace(&['\u{201c}', '\u{201d}'][..], "\"")
        .replace(&['\u{2018}', '\u{2019}'][..], "'")
        .replace(&['\u{2014}', '\u{2013}'][..], "-")
        .replace('\u{2026}', "...");

    s = space_re().replace_all(&s, " ").to_string();

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s = horizontal_ws_re().replace_all(&s, " ").to_string();

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split text into trimmed, non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceOffset {
    pub text: String,
    /// Byte offsets of the trimmed sentence in the source text
    pub start: usize,
    pub end: usize,
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(last_word) = segment.split_whitespace().last() else {
        return false;
    };
    let lower = last_word.to_lowercase();
    if ABBREVIATIONS.iter().any(|abbr| lower.ends_with(abbr) && lower.len() <= abbr.len() + 1) {
        return true;
    }

    // Initials such as "J." in "J. Smith"
    let mut chars = last_word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_ascii_uppercase()
    )
}

fn is_decimal_point(chars: &[(usize, char)], i: usize) -> bool {
    i > 0
        && i + 1 < chars.len()
        && chars[i - 1].1.is_ascii_digit()
        && chars[i + 1].1.is_ascii_digit()
}

fn is_closing(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn push_sentence(text: &str, start: usize, end: usize, out: &mut Vec<SentenceOffset>) {
    let Some(raw) = text.get(start..end) else {
        return;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let leading = raw.len() - raw.trim_start().len();
    let s = start + leading;
    out.push(SentenceOffset {
        text: trimmed.to_string(),
        start: s,
        end: s + trimmed.len(),
    });
}

/// Sentence splitting with offset tracking.
///
/// Line breaks always end a sentence. Terminal punctuation ends a sentence
/// when it is followed by whitespace or the end of text, and is not a
/// decimal point, an abbreviation or inside a quotation.
pub fn split_sentences_advanced(text: &str) -> Vec<SentenceOffset> {
    let mut sentences = Vec::new();
    if text.is_empty() {
        return sentences;
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, ch) = chars[i];

        if matches!(ch, '"' | '\u{201c}' | '\u{201d}') {
            in_quote = !in_quote;
        }

        let mut boundary: Option<usize> = None;
        if ch == '\n' {
            boundary = Some(pos);
            in_quote = false;
        } else if matches!(ch, '.' | '!' | '?' | '\u{2026}') && !in_quote {
            let is_soft_dot = ch == '.'
                && (is_decimal_point(&chars, i) || ends_with_abbreviation(&text[start..pos + 1]));
            if !is_soft_dot {
                let mut j = i;
                while j + 1 < chars.len() && is_closing(chars[j + 1].1) {
                    j += 1;
                }
                let followed_by_space = j + 1 >= chars.len() || chars[j + 1].1.is_whitespace();
                if followed_by_space {
                    boundary = Some(chars[j].0 + chars[j].1.len_utf8());
                    i = j;
                }
            }
        }

        if let Some(end) = boundary {
            push_sentence(text, start, end, &mut sentences);
            start = end;
        }

        i += 1;
    }

    push_sentence(text, start, text.len(), &mut sentences);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "Hello\u{201c}World\u{201d}";
        let output = normalize_punctuation(input);
        assert_eq!(output, "Hello\"World\"");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_line_endings() {
        let input = "  We   decided\u{00A0}to ship.\r\n\r\n\tAction:  update wiki  ";
        assert_eq!(
            normalize_punctuation(input),
            "We decided to ship.\n\nAction: update wiki"
        );
    }

    #[test]
    fn test_split_lines_drops_blank_lines() {
        let lines = split_lines("first\n\n   \n  second  \r\nthird");
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_split_lines_empty_input() {
        assert!(split_lines("").is_empty());
        assert!(split_lines(" \n\t\n").is_empty());
    }

    #[test]
    fn test_split_sentences_basic() {
        let text = "We decided to ship. What is the budget? John will send it!";
        let sentences: Vec<String> = split_sentences_advanced(text).into_iter().map(|s| s.text).collect();
        assert_eq!(
            sentences,
            vec!["We decided to ship.", "What is the budget?", "John will send it!"]
        );
    }

    #[test]
    fn test_split_sentences_keeps_decimals_and_abbreviations() {
        let text = "Budget grows 2.5 percent, e.g. for travel. Dr. Smith agreed.";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Budget grows 2.5 percent, e.g. for travel.");
        assert_eq!(sentences[1].text, "Dr. Smith agreed.");
    }

    #[test]
    fn test_split_sentences_breaks_on_newlines() {
        let text = "Action: update the wiki\nAction: update the wiki";
        let sentences = split_sentences_advanced(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, sentences[1].text);
    }

    #[test]
    fn test_split_sentences_offsets_point_into_source() {
        let text = "  First one.   Second one?  ";
        for s in split_sentences_advanced(text) {
            assert_eq!(&text[s.start..s.end], s.text);
        }
    }

    #[test]
    fn test_split_sentences_does_not_split_inside_quotes() {
        let text = "She said \"stop. now\" and left.";
        assert_eq!(split_sentences_advanced(text).len(), 1);
    }
}
