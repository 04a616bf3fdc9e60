//! Variant names and output file names

use crate::error::GenerationError;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Directory, relative to the user's game folder, variants are written to
pub const OUTPUT_DIRECTORY: &str = "Maps/Envimix";

/// File extension of a saved map
pub const MAP_EXTENSION: &str = ".Map.Gbx";

/// Default template: the original name kept in its own formatting scope, then the vehicle.
pub const DEFAULT_NAME_FORMAT: &str = "$<{0}$>.{1}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    OriginalName,
    Vehicle,
}

/// Parsed map name template.
///
/// `{0}` is replaced by the original map name, `{1}` by the vehicle id and
/// `{{`/`}}` produce literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NameTemplate {
    pub fn parse(template: &str) -> Result<Self, GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => placeholder.push(ch),
                            None => return Err(invalid("unterminated placeholder".to_string())),
                        }
                    }
                    let segment = match placeholder.trim() {
                        "0" => Segment::OriginalName,
                        "1" => Segment::Vehicle,
                        other => {
                            return Err(invalid(format!(
                                "unknown placeholder {{{}}} (use {{0}} or {{1}})",
                                other
                            )))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => return Err(invalid("unmatched '}'".to_string())),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, original_name: &str, vehicle: &str) -> String {
        let mut out =
            String::with_capacity(self.source.len() + original_name.len() + vehicle.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::OriginalName => out.push_str(original_name),
                Segment::Vehicle => out.push_str(vehicle),
            }
        }
        out
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_NAME_FORMAT.to_string(),
            segments: vec![
                Segment::Literal("$<".to_string()),
                Segment::OriginalName,
                Segment::Literal("$>.".to_string()),
                Segment::Vehicle,
            ],
        }
    }
}

impl FromStr for NameTemplate {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Strip `$` formatting codes from a map name, leaving the plain text.
///
/// `$$` is an escaped dollar, `$` followed by up to three hex digits is a
/// colour, `$l`/`$h`/`$p` may carry a `[target]` and any other `$x` is a
/// single-character style code.
pub fn deformat(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => break,
            Some('$') => out.push('$'),
            Some(code) if code.is_ascii_hexdigit() => {
                for _ in 0..2 {
                    if chars.next_if(|ch| ch.is_ascii_hexdigit()).is_none() {
                        break;
                    }
                }
            }
            Some('l' | 'L' | 'h' | 'H' | 'p' | 'P') => {
                if chars.next_if_eq(&'[').is_some() {
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            break;
                        }
                    }
                }
            }
            Some(_) => {}
        }
    }

    out
}

fn is_invalid_file_name_char(c: char) -> bool {
    (c as u32) < 0x20 || matches!(c, '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/')
}

/// Replace every character that is not allowed in a file name with `_`.
pub fn sanitize_filename(text: &str) -> String {
    text.nfc()
        .map(|c| if is_invalid_file_name_char(c) { '_' } else { c })
        .collect()
}

/// Relative output path of a variant with the given (formatted) map name
pub fn output_path(map_name: &str) -> String {
    let file_name = sanitize_filename(&format!("{}{}", deformat(map_name), MAP_EXTENSION));
    format!("{}/{}", OUTPUT_DIRECTORY, file_name)
}
