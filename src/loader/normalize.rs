//! Free-text normalization shared by every source adapter

use crate::{Result, SeedError};
use deunicode::deunicode;
use std::str::FromStr;

/// Suffix every effect model name carries
pub const EFFECT_SUFFIX: &str = "Effect";

/// Trim, lowercase, then uppercase the first letter
///
/// "EPIC" -> "Epic", " minion " -> "Minion".
pub fn normalize_label(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a free-text effect name into its model token
///
/// "life steal" -> "LifeStealEffect", "Mana-Gain" -> "ManaGainEffect".
/// Each run of non-alphanumerics starts a new word; leading and trailing
/// punctuation is dropped. Names already ending in "effect" are not
/// suffixed twice.
pub fn effect_token(name: &str) -> String {
    let folded = deunicode(name.trim()).to_lowercase();

    let mut token: String = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize_ascii)
        .collect();

    if token.is_empty() {
        return token;
    }
    if !token.to_ascii_lowercase().ends_with("effect") {
        token.push_str(EFFECT_SUFFIX);
    }
    token
}

fn capitalize_ascii(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.extend(chars);
    }
    out
}

/// Empty cell -> `None`; anything else must be an integer
pub fn parse_optional_int(field: &'static str, raw: &str) -> Result<Option<i32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|e| SeedError::malformed(field, raw, e.to_string()))
}

/// Like `parse_optional_int` but the value must be present
pub fn parse_required_int(field: &'static str, raw: &str) -> Result<i32> {
    parse_optional_int(field, raw)?
        .ok_or_else(|| SeedError::malformed(field, raw, "value is required"))
}

/// Normalize then parse a label enum; empty input is an error
pub fn parse_label<T>(field: &'static str, raw: &str) -> Result<T>
where
    T: FromStr<Err = SeedError>,
{
    parse_optional_label(raw)?
        .ok_or_else(|| SeedError::malformed(field, raw, "value is required"))
}

/// Normalize then parse a label enum; empty input is `None`
pub fn parse_optional_label<T>(raw: &str) -> Result<Option<T>>
where
    T: FromStr<Err = SeedError>,
{
    let normalized = normalize_label(raw);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some)
}
