//! # Properties Text Codec (`common::archive::properties`)
//!
//! File: cli/src/common/archive/properties.rs
//!
//! ## Overview
//!
//! The container's bootstrap code reads its default command line options from
//! `embedded.properties` using the `java.util.Properties` text format. This
//! module writes that format and reads it back (the reader is used by
//! `warembed inspect` and by tests).
//!
//! ## Format
//!
//! ```text
//! #embedded command line options for winstone
//! #Fri Oct 16 10:21:00 UTC 2026
//! httpPort=8080
//! prefix=/my app
//! ```
//!
//! - Output is pure ASCII: characters outside `0x20..=0x7e` become `\uXXXX`
//!   (UTF-16 code units).
//! - `=`, `:`, `#`, `!` and `\` are backslash escaped in keys and values.
//!   Spaces are escaped everywhere in keys and only in leading position in values.
//! - Comments are written as given, except that line breaks start a new `#`
//!   line and non-ASCII characters become `\uXXXX`. The timestamp zone is the
//!   offset's name (`UTC`, or `+02:00` for a local offset).
//! - The reader accepts `=`, `:` or whitespace separators, `#`/`!` comments and
//!   backslash line continuations.
//!
use crate::core::error::{Result, WarembedError};
use chrono::{DateTime, TimeZone};
use std::collections::BTreeMap;
use std::fmt;

const WHITESPACE: &[char] = &[' ', '\t', '\x0c'];

/// Serializes `options` with a header comment and a timestamp comment.
pub fn store<Tz>(options: &BTreeMap<String, String>, comment: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    write_comment(&mut out, comment);
    write_comment(&mut out, &timestamp.format("%a %b %d %H:%M:%S %Z %Y").to_string());
    for (key, value) in options {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

/// Parses properties text into a key/value map. Later duplicates win.
pub fn load(text: &str) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    let mut lines = text.lines();
    while let Some(raw) = lines.next() {
        let line = raw.trim_start_matches(WHITESPACE);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }
        let (key, value) = split_key_value(&logical);
        map.insert(unescape(key)?, unescape(value)?);
    }
    Ok(map)
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' if index == 0 || is_key => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}

/// Writes `text` as comment lines. Only line breaks and non-ASCII characters
/// are altered; a line break starts a new `#` line unless the text already
/// carries a comment marker there.
fn write_comment(out: &mut String, text: &str) {
    out.push('#');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                if !matches!(chars.peek(), Some('#') | Some('!')) {
                    out.push('#');
                }
            }
            '\x20'..='\x7e' | '\t' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out.push('\n');
}

/// A line continues when it ends with an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                value_start = index + 1;
                has_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = index;
                value_start = index + 1;
                break;
            }
            _ => {}
        }
    }
    let mut value = line[value_start..].trim_start_matches(WHITESPACE);
    if !has_separator {
        if let Some(rest) = value.strip_prefix(&['=', ':'][..]) {
            value = rest.trim_start_matches(WHITESPACE);
        }
    }
    (&line[..key_end], value)
}

fn unescape(text: &str) -> Result<String> {
    let malformed = || {
        WarembedError::Config(format!("Malformed \\uxxxx encoding in properties text '{}'", text))
    };
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut buf = [0u16; 2];
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let decoded = match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    anyhow::bail!(malformed());
                }
                units.push(u16::from_str_radix(&hex, 16).map_err(|_| malformed())?);
                continue;
            }
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            Some(other) => other,
            None => break,
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }
    String::from_utf16(&units).map_err(|_| anyhow::anyhow!(malformed()))
}
