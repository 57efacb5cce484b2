//! `.properties` text parsing and rendering for decrypted configuration.
//!
//! Supports the subset of the Java properties format that shows up in
//! configuration secrets: `#`/`!` comments, `=`, `:` or whitespace separators,
//! backslash line continuations and the usual escapes including `\uXXXX`.

use std::collections::BTreeMap;
use std::str::Chars;

use thiserror::Error;

/// Errors produced while parsing properties text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropsError {
    /// A `\u` escape is not followed by four hex digits, or names an invalid
    /// code point.
    #[error("line {line}: malformed \\uXXXX escape")]
    MalformedUnicodeEscape { line: usize },
}

/// Parse properties text into a sorted key/value map. Later keys win.
///
/// # Errors
///
/// Returns [`PropsError::MalformedUnicodeEscape`] on a bad `\u` escape.
pub fn parse(text: &str) -> Result<BTreeMap<String, String>, PropsError> {
    let mut map = BTreeMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let trimmed = line.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_owned();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_entry(&logical);
        let err = || PropsError::MalformedUnicodeEscape { line: idx + 1 };
        let key = unescape(raw_key).ok_or_else(err)?;
        let value = unescape(raw_value).ok_or_else(err)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Render a map as `key=value` lines, escaping so that [`parse`] reads it back.
pub fn render(map: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in map {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// An odd number of trailing backslashes continues the line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(read_unicode(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Some(out)
}

/// Read the digits after `\u`, combining a UTF-16 surrogate pair if present.
fn read_unicode(chars: &mut Chars<'_>) -> Option<char> {
    let unit = read_hex4(chars)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit);
    }
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = read_hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
}

fn read_hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

fn escape_into(out: &mut String, s: &str, is_key: bool) {
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}
