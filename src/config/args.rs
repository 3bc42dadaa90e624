//! Deserializers for list-valued settings.
//!
//! Environment variables only carry strings, so list settings accept either a
//! real sequence (defaults, JSON sources) or a single string. A string that
//! looks like a JSON array is parsed as one, anything else is split.

use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    List(Vec<String>),
    Line(String),
}

/// Splits a command line on whitespace, or parses it as a JSON array of strings.
///
/// No shell quoting is interpreted: `--port {{ port }}` yields four items,
/// write templates without inner spaces (`{{port}}`) when passing them this way.
pub fn parse_arg_line(line: &str) -> Result<Vec<String>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }
    Ok(trimmed.split_whitespace().map(str::to_string).collect())
}

/// Splits a list of names on commas and whitespace, dropping empty items.
pub fn parse_name_list(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn deserialize_args<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawList::deserialize(deserializer)? {
        RawList::List(items) => Ok(items),
        RawList::Line(line) => parse_arg_line(&line).map_err(D::Error::custom),
    }
}

pub fn deserialize_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawList::deserialize(deserializer)? {
        RawList::List(items) => Ok(items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()),
        RawList::Line(line) => Ok(parse_name_list(&line)),
    }
}

/// Treats an empty or blank string as "not set".
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}
