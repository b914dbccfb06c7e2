//! Language heuristic for translation suppression.
//!
//! When a primary lyric line is already in the target language, overlaying
//! a same-language translation caption is redundant. [`is_target_language_text`]
//! is the ASCII-ratio classifier behind that decision. It is a heuristic,
//! not a language detector — false classifications on mixed-script lines
//! are expected and acceptable; it only needs to bias toward "don't show a
//! redundant caption".

use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace, decimal digits, and Unicode punctuation — stripped before
/// counting letters.
static STRIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s0-9\p{P}]").expect("strip regex is valid"));

const HANGUL_SYLLABLES: std::ops::RangeInclusive<u32> = 0xAC00..=0xD7AF;
const HANGUL_JAMO: std::ops::RangeInclusive<u32> = 0x1100..=0x11FF;
const HANGUL_COMPATIBILITY_JAMO: std::ops::RangeInclusive<u32> = 0x3130..=0x318F;

/// Classify text as target-language (English).
///
/// Whitespace, digits, and punctuation are stripped first; a line that
/// strips to nothing is trivially target-language — punctuation-only lines
/// need no translation. Otherwise ASCII letters count toward the target
/// side, Hangul characters and everything else above the ASCII range count
/// against it, and the text is target-language iff the ASCII-letter share
/// exceeds 0.8.
///
/// # Example
///
/// ```
/// use lyrsync::is_target_language_text;
///
/// assert!(is_target_language_text("Hello world"));
/// assert!(!is_target_language_text("안녕하세요"));
/// assert!(is_target_language_text("...!?"));
/// ```
pub fn is_target_language_text(text: &str) -> bool {
    let clean = STRIP_REGEX.replace_all(text, "");

    if clean.is_empty() {
        return true;
    }

    let mut target_count = 0_usize;
    let mut non_target_count = 0_usize;

    for character in clean.chars() {
        let code = character as u32;
        if character.is_ascii_alphabetic() {
            target_count += 1;
        } else if HANGUL_SYLLABLES.contains(&code)
            || HANGUL_JAMO.contains(&code)
            || HANGUL_COMPATIBILITY_JAMO.contains(&code)
        {
            non_target_count += 1;
        } else if code > 127 {
            non_target_count += 1;
        }
    }

    let total = target_count + non_target_count;
    if total == 0 {
        return true;
    }

    target_count as f64 / total as f64 > 0.8
}

/// Returns `true` if the text contains any Hangul character.
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|character| {
        let code = character as u32;
        HANGUL_SYLLABLES.contains(&code)
            || HANGUL_JAMO.contains(&code)
            || HANGUL_COMPATIBILITY_JAMO.contains(&code)
    })
}
