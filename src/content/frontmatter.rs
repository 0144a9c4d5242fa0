//! Front-matter parsing
//!
//! Articles carry an optional header block of `key: value` lines fenced by
//! `---` lines. The block is deliberately not YAML: values are untyped
//! scalars and every malformed line is skipped rather than reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

/// Delimiter line that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Coerce a raw value: `true`/`false` become booleans, a quoted value
    /// loses its quotes, anything else is kept as trimmed text
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            _ => {}
        }

        let quoted = trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')));
        if quoted {
            Scalar::Text(trimmed[1..trimmed.len() - 1].to_string())
        } else {
            Scalar::Text(trimmed.to_string())
        }
    }

    /// Text form of the value; booleans render as `true`/`false`
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            Scalar::Text(_) => None,
        }
    }
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    fields: IndexMap<String, Scalar>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without a complete `---` block comes back untouched with
    /// empty front-matter.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(rest) = strip_opening_delimiter(content) else {
            return (FrontMatter::default(), content);
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            let bare = line.trim_end_matches('\n').trim_end_matches('\r');
            if bare == DELIMITER {
                let block = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start();
                return (Self::parse_block(block), body);
            }
            offset += line.len();
        }

        // No closing ---, treat as no front-matter
        tracing::debug!("Front-matter block is not closed, ignoring it");
        (FrontMatter::default(), content)
    }

    /// Parse the lines between the delimiters
    fn parse_block(block: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in block.lines() {
            let clean = line.trim();
            if clean.is_empty() || clean.starts_with('#') {
                continue;
            }

            let Some((key, value)) = clean.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            fields.insert(key.to_string(), Scalar::coerce(value));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.get(key)
    }

    /// Text value of a key, if present
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(Scalar::as_text)
    }

    /// Boolean value of a key; text values are never booleans
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Scalar::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    rest.strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
}

/// Parse a date string into milliseconds since the Unix epoch.
///
/// Zone-less values are read as UTC. Anything unparseable yields 0, which
/// sorts as the oldest possible date.
pub fn parse_timestamp(s: &str) -> i64 {
    parse_date_string(s)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let date_formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%b %d, %Y",
        "%B %d, %Y",
        "%b %d %Y",
        "%B %d %Y",
        "%d %b %Y",
        "%d %B %Y",
    ];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
