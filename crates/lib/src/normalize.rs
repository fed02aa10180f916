//! # Text Normalizer
//!
//! Cleans raw strings scraped out of page markup and embedded JSON. Source
//! pages mix several escaping and encoding regimes, so every step here is
//! permissive: a step that cannot make sense of its input hands the text on
//! unchanged instead of failing.

use crate::errors::ExtractError;
use regex::Regex;
use std::panic;
use std::sync::LazyLock;
use tracing::{debug, error};

/// Maximum number of characters kept before the ellipsis marker is appended.
pub const MAX_LENGTH: usize = 2000;
pub const ELLIPSIS: &str = "...";

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static newline pattern"));

/// Normalizes a scraped string.
///
/// This function is total: if a step panics on some pathological input, the
/// panic is caught and a diagnostic string is returned in place of the text so
/// the failure stays visible downstream.
pub fn normalize(raw: &str) -> String {
    match panic::catch_unwind(|| clean(raw)) {
        Ok(text) => text,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown failure".to_string());
            error!("Error in normalize: {reason}");
            format!("Error cleaning text: {reason}")
        }
    }
}

fn clean(raw: &str) -> String {
    let text = decode_unicode_escapes(raw).unwrap_or_else(|e| {
        debug!("Leaving unicode escapes undecoded: {e}");
        raw.to_string()
    });
    let text = unescape_sequences(&text);
    let text = repair_encoding(&text);

    let text = text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");

    // Lossy round trip; a no-op for anything that is already valid UTF-8.
    let text = String::from_utf8_lossy(text.as_bytes()).into_owned();

    truncate(&text, MAX_LENGTH).trim().to_string()
}

/// Decodes literal `\uXXXX` sequences, including UTF-16 surrogate pairs.
///
/// An escaped backslash is passed through untouched so that `\\u0041` stays a
/// literal. Any malformed sequence fails the whole step.
pub fn decode_unicode_escapes(text: &str) -> Result<String, ExtractError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("\\\\") {
            out.push_str("\\\\");
            rest = &tail[2..];
            continue;
        }

        let Some(hex) = tail.strip_prefix("\\u") else {
            out.push('\\');
            rest = &tail[1..];
            continue;
        };

        let unit = parse_hex4(hex)?;
        rest = &hex[4..];

        let code_point = if (0xD800..0xDC00).contains(&unit) {
            let low = rest
                .strip_prefix("\\u")
                .and_then(|h| parse_hex4(h).ok())
                .filter(|low| (0xDC00..0xE000).contains(low))
                .ok_or_else(|| {
                    ExtractError::EncodingRepair(format!("unpaired high surrogate {unit:04x}"))
                })?;
            rest = &rest[6..];
            0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
        } else {
            unit
        };

        let ch = char::from_u32(code_point).ok_or_else(|| {
            ExtractError::EncodingRepair(format!("invalid code point {code_point:04x}"))
        })?;
        out.push(ch);
    }

    out.push_str(rest);
    Ok(out)
}

fn parse_hex4(s: &str) -> Result<u32, ExtractError> {
    let digits = s
        .get(..4)
        .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| ExtractError::EncodingRepair(format!("bad unicode escape near '{s:.6}'")))?;
    u32::from_str_radix(digits, 16).map_err(|e| ExtractError::EncodingRepair(e.to_string()))
}

/// Replaces two-character escape sequences with the characters they stand for.
/// Unknown escapes are kept as-is.
pub fn unescape_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('/') => '/',
            _ => {
                out.push('\\');
                continue;
            }
        };
        chars.next();
        out.push(replacement);
    }

    out
}

/// Repairs text that was decoded from UTF-8 bytes as a single-byte encoding.
///
/// Only runs when the text carries the `ð` lead character (the first byte of
/// every four-byte UTF-8 sequence, emoji included) or anything outside the
/// single-byte range.
pub fn repair_encoding(text: &str) -> String {
    let suspicious = text.contains('ð') || text.chars().any(|c| u32::from(c) > 0xFF);
    if !suspicious {
        return text.to_string();
    }

    repair_mojibake(text)
        .or_else(|e| {
            debug!("Mojibake repair failed, stripping encoding errors: {e}");
            strip_encoding_errors(text)
        })
        .unwrap_or_else(|e| {
            debug!("Stripping encoding errors failed, keeping ASCII only: {e}");
            text.chars().filter(char::is_ascii).collect()
        })
}

fn repair_mojibake(text: &str) -> Result<String, ExtractError> {
    let bytes = text
        .chars()
        .map(|c| {
            windows_1252_byte(c).ok_or_else(|| {
                ExtractError::EncodingRepair(format!("'{c}' has no single-byte form"))
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    String::from_utf8(bytes).map_err(|e| ExtractError::EncodingRepair(e.to_string()))
}

fn strip_encoding_errors(text: &str) -> Result<String, ExtractError> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER && !is_c1_control(*c))
        .collect();
    if cleaned.trim().is_empty() && !text.trim().is_empty() {
        return Err(ExtractError::EncodingRepair(
            "nothing but encoding debris left".to_string(),
        ));
    }
    Ok(cleaned)
}

fn is_c1_control(c: char) -> bool {
    ('\u{80}'..='\u{9f}').contains(&c)
}

/// Maps a character back to the Windows-1252 byte it was decoded from.
/// C1 controls map to themselves, like a Latin-1 decoder would produce.
fn windows_1252_byte(c: char) -> Option<u8> {
    let code = u32::from(c);
    if code <= 0xFF {
        return Some(code as u8);
    }
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_decodes_unicode_escapes() {
        assert_eq!(normalize(r"\u00e9t\u00e9"), "été");
        assert_eq!(normalize(r"\ud83c\udf89 party"), "🎉 party");
    }

    #[test]
    fn test_normalize_replaces_escape_sequences() {
        assert_eq!(normalize(r"Line 1\nLine 2"), "Line 1\nLine 2");
        assert_eq!(normalize(r#"He said \"hi\""#), "He said \"hi\"");
        assert_eq!(normalize(r"https:\/\/example.com"), "https://example.com");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_unicode_escape() {
        assert_eq!(normalize(r"C:\\u0041"), r"C:\u0041");
    }

    #[test]
    fn test_malformed_unicode_escape_still_unescapes_the_rest() {
        assert_eq!(normalize(r"\uZZZZ and\nmore"), "\\uZZZZ and\nmore");
        assert!(decode_unicode_escapes(r"\uZZZZ").is_err());
        assert!(decode_unicode_escapes(r"\ud83c alone").is_err());
    }

    #[test]
    fn test_repairs_mojibake() {
        assert_eq!(normalize("CafÃ© ðŸŽ‰"), "Café 🎉");
    }

    #[test]
    fn test_genuine_text_survives_repair() {
        assert_eq!(normalize("Guðrún — 🎉"), "Guðrún — 🎉");
        assert_eq!(normalize("日本語のタイトル"), "日本語のタイトル");
    }

    #[test]
    fn test_debris_only_falls_back_to_ascii() {
        assert_eq!(repair_encoding("\u{fffd}\u{81}\u{fffd}"), "");
    }

    #[test]
    fn test_trims_lines_and_collapses_newlines() {
        assert_eq!(normalize("  hello  \n   world  "), "hello\nworld");
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n  \n \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_truncates_long_text() {
        let out = normalize(&"a".repeat(2500));
        assert_eq!(out.chars().count(), MAX_LENGTH + ELLIPSIS.len());
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let out = normalize(&"é".repeat(2001));
        assert_eq!(out.chars().count(), 2003);
    }
}
