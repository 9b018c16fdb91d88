//! Release-drafter style pattern strings.
//!
//! A pattern written as `/body/flags`, with a non-empty body and letter-only
//! flags, is a regular expression; any other string matches literally.

use std::borrow::Cow;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::PatternError;

/// A compiled pattern from the configuration file.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    global: bool,
}

impl Pattern {
    /// Parses and compiles a pattern string.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        match split_delimited(text) {
            Some((body, flags)) => Self::compile_delimited(text, body, flags),
            None => {
                let regex = Regex::new(&regex::escape(text)).map_err(|source| {
                    PatternError::InvalidRegex {
                        pattern: text.to_string(),
                        source,
                    }
                })?;
                Ok(Self {
                    source: text.to_string(),
                    regex,
                    global: false,
                })
            }
        }
    }

    fn compile_delimited(text: &str, body: &str, flags: &str) -> Result<Self, PatternError> {
        let mut builder = RegexBuilder::new(body);
        let mut global = false;

        for flag in flags.chars() {
            match flag {
                'g' => global = true,
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                // Unicode is always on for the regex crate
                'u' => {}
                other => {
                    return Err(PatternError::UnsupportedFlag {
                        pattern: text.to_string(),
                        flag: other,
                    })
                }
            }
        }

        let regex = builder
            .build()
            .map_err(|source| PatternError::InvalidRegex {
                pattern: text.to_string(),
                source,
            })?;

        Ok(Self {
            source: text.to_string(),
            regex,
            global,
        })
    }

    /// Returns the pattern exactly as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests the pattern against `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Replaces the first match, or every match for global patterns.
    ///
    /// `replacement` must already be in regex-crate syntax, see
    /// [`translate_replacement`].
    pub fn replace<'h>(&self, haystack: &'h str, replacement: &str) -> Cow<'h, str> {
        if self.global {
            self.regex.replace_all(haystack, replacement)
        } else {
            self.regex.replace(haystack, replacement)
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits `/body/flags` into its body and flags.
///
/// Returns `None` for an empty body or flags containing anything but ASCII
/// letters, so strings like `/api/v1` stay literal.
fn split_delimited(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let (body, flags) = (&rest[..end], &rest[end + 1..]);
    if body.is_empty() || !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((body, flags))
}

/// Converts a JavaScript-style replacement string into regex-crate syntax.
///
/// `$1` and `$<name>` become `${1}` and `${name}`, `$&` becomes `${0}` and
/// `$$` stays a literal dollar. `$0` names no group and is literal, as is
/// any other `$`.
pub fn translate_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some('&') => {
                chars.next();
                out.push_str("${0}");
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied() {
                    if !d.is_ascii_digit() || digits.len() == 2 {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                if digits.chars().all(|d| d == '0') {
                    out.push_str("$$");
                    out.push_str(&digits);
                } else {
                    out.push_str(&format!("${{{digits}}}"));
                }
            }
            Some('<') => {
                let rest: String = chars.clone().skip(1).collect();
                if let Some(close) = rest.find('>') {
                    let name = &rest[..close];
                    out.push_str(&format!("${{{name}}}"));
                    // '<', the name and '>'
                    for _ in 0..name.chars().count() + 2 {
                        chars.next();
                    }
                } else {
                    out.push_str("$$");
                }
            }
            _ => out.push_str("$$"),
        }
    }

    out
}
