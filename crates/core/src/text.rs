//! Text transforms for Key Points output.
//!
//! Handles sentence casing, terminal punctuation (closing-quote aware),
//! paragraph text cleanup, and output filename derivation.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse whitespace runs (including line breaks) into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Characters that count as terminal punctuation.
const TERMINAL_CHARS: &[char] = &['.', '!', '?'];

/// Closing quote characters that may trail terminal punctuation.
const CLOSING_QUOTE_CHARS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}'];

/// Convert text to sentence case.
///
/// Everything is lowercased, then the first letter and every letter
/// following `.`, `!`, `?`, or `:` is capitalized.
pub fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cap_next = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if cap_next {
                out.extend(c.to_uppercase());
                cap_next = false;
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            out.push(c);
            if matches!(c, '.' | '!' | '?' | ':') {
                cap_next = true;
            }
        }
    }

    out
}

/// Ensure the text ends with terminal punctuation.
///
/// Text already ending in `.`, `!`, or `?` is left unchanged. When the last
/// character is a closing quote, the period is inserted before the quote
/// unless the character before the quote is already terminal. Otherwise a
/// period is appended.
pub fn ensure_terminal_period(text: &str) -> String {
    let trimmed = text.trim_end();
    let chars: Vec<char> = trimmed.chars().collect();

    let Some((&last, rest)) = chars.split_last() else {
        return String::new();
    };

    if TERMINAL_CHARS.contains(&last) {
        return trimmed.to_string();
    }

    if CLOSING_QUOTE_CHARS.contains(&last) {
        if let Some(&prev) = rest.last() {
            if TERMINAL_CHARS.contains(&prev) {
                return trimmed.to_string();
            }
        }
        let mut out: String = rest.iter().collect();
        out.push('.');
        out.push(last);
        return out;
    }

    format!("{}.", trimmed)
}

/// Clean raw paragraph text extracted from the document.
///
/// Applies Unicode NFC normalization, collapses whitespace runs (tabs and
/// line breaks included) to single spaces, and trims the ends.
pub fn clean_paragraph_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    let collapsed = WHITESPACE_COLLAPSE_REGEX.replace_all(&normalized, " ");
    collapsed.trim().to_string()
}

/// Derive the output filename from the input filename.
///
/// If the stem ends with "INPUT" (any case) that suffix becomes "OUTPUT";
/// otherwise "_OUTPUT" is appended. The extension is always `.docx`.
pub fn output_filename(input_filename: &str) -> String {
    let stem = input_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(input_filename)
        .trim_end();

    match strip_input_suffix(stem) {
        Some(prefix) => format!("{}OUTPUT.docx", prefix),
        None => format!("{}_OUTPUT.docx", stem),
    }
}

/// Strip a trailing "INPUT" (any case) from the stem, comparing char by
/// char so uppercasing never moves byte boundaries (e.g. dotless 'ı'
/// uppercases to ASCII 'I' but is two bytes in the stem).
fn strip_input_suffix(stem: &str) -> Option<&str> {
    let mut end = stem.len();

    for expected in "INPUT".chars().rev() {
        let (idx, c) = stem[..end].char_indices().next_back()?;
        if !c.to_uppercase().eq(std::iter::once(expected)) {
            return None;
        }
        end = idx;
    }

    Some(&stem[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_case_basic() {
        assert_eq!(sentence_case("HELLO WORLD"), "Hello world");
        assert_eq!(sentence_case("hello world"), "Hello world");
        assert_eq!(sentence_case("hELLO wORLD"), "Hello world");
    }

    #[test]
    fn test_sentence_case_capitalizes_after_terminal() {
        assert_eq!(
            sentence_case("first point. second point"),
            "First point. Second point"
        );
        assert_eq!(sentence_case("really? yes! ok"), "Really? Yes! Ok");
        assert_eq!(sentence_case("note: IMPORTANT"), "Note: Important");
    }

    #[test]
    fn test_sentence_case_leading_nonletters() {
        // Capitalization lands on the first letter, not the first char
        assert_eq!(sentence_case("  3rd item"), "  3Rd item");
        assert_eq!(sentence_case("(hello)"), "(Hello)");
    }

    #[test]
    fn test_sentence_case_empty() {
        assert_eq!(sentence_case(""), "");
    }

    #[test]
    fn test_ensure_terminal_period_appends() {
        assert_eq!(ensure_terminal_period("Hello"), "Hello.");
        assert_eq!(ensure_terminal_period("Hello  "), "Hello.");
    }

    #[test]
    fn test_ensure_terminal_period_keeps_existing() {
        assert_eq!(ensure_terminal_period("Hello."), "Hello.");
        assert_eq!(ensure_terminal_period("Hello!"), "Hello!");
        assert_eq!(ensure_terminal_period("Hello?"), "Hello?");
    }

    #[test]
    fn test_ensure_terminal_period_closing_quote() {
        // Period goes inside the quote
        assert_eq!(ensure_terminal_period("He said \"go\""), "He said \"go.\"");
        assert_eq!(ensure_terminal_period("it's 'fine'"), "it's 'fine.'");
        assert_eq!(
            ensure_terminal_period("smart \u{201C}quote\u{201D}"),
            "smart \u{201C}quote.\u{201D}"
        );
    }

    #[test]
    fn test_ensure_terminal_period_quote_already_terminated() {
        assert_eq!(ensure_terminal_period("He said \"go.\""), "He said \"go.\"");
        assert_eq!(ensure_terminal_period("\"Done!\""), "\"Done!\"");
    }

    #[test]
    fn test_ensure_terminal_period_empty() {
        assert_eq!(ensure_terminal_period(""), "");
        assert_eq!(ensure_terminal_period("   "), "");
    }

    #[test]
    fn test_clean_paragraph_text() {
        assert_eq!(clean_paragraph_text("  Hello   world  "), "Hello world");
        assert_eq!(clean_paragraph_text("Line one\nLine two"), "Line one Line two");
        assert_eq!(clean_paragraph_text("tabs\t\there"), "tabs here");
        assert_eq!(clean_paragraph_text("\n\t "), "");
    }

    #[test]
    fn test_output_filename_appends_suffix() {
        assert_eq!(output_filename("notes.docx"), "notes_OUTPUT.docx");
        assert_eq!(output_filename("no-extension"), "no-extension_OUTPUT.docx");
    }

    #[test]
    fn test_output_filename_replaces_input_suffix() {
        assert_eq!(output_filename("Weekly INPUT.docx"), "Weekly OUTPUT.docx");
        assert_eq!(output_filename("weekly input.docx"), "weekly OUTPUT.docx");
        assert_eq!(output_filename("MYINPUT.docx"), "MYOUTPUT.docx");
    }

    #[test]
    fn test_output_filename_trims_stem() {
        assert_eq!(output_filename("notes .docx"), "notes_OUTPUT.docx");
    }

    #[test]
    fn test_output_filename_non_ascii_input_suffix() {
        // Dotless 'ı' uppercases to ASCII 'I'; the suffix is wider than
        // five bytes in the stem and must not be sliced blindly
        assert_eq!(
            output_filename("weekly \u{131}nput.docx"),
            "weekly OUTPUT.docx"
        );
    }

    #[test]
    fn test_output_filename_non_ascii_stem_without_suffix() {
        assert_eq!(output_filename("wöchentlich.docx"), "wöchentlich_OUTPUT.docx");
        // Stem shorter than the suffix
        assert_eq!(output_filename("in.docx"), "in_OUTPUT.docx");
    }
}
