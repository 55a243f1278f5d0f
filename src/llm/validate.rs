//! Turns untrusted model output into typed suggestions.
//!
//! The envelope is strict: text that is not JSON, or JSON without a
//! `hashtags` array, fails the whole response. Elements are lenient: a
//! malformed entry is dropped and the rest are kept.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::HashtagSuggestion;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("model output is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),
    #[error("model output has no `hashtags` array")]
    MissingHashtags,
}

pub fn parse_suggestions(raw: &str) -> Result<Vec<HashtagSuggestion>, ValidateError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Model returned invalid JSON: {}", raw);
        ValidateError::NotJson(e)
    })?;

    let Some(items) = parsed.get("hashtags").and_then(Value::as_array) else {
        tracing::error!("Model response missing 'hashtags': {}", parsed);
        return Err(ValidateError::MissingHashtags);
    };

    let hashtags: Vec<HashtagSuggestion> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let suggestion = item.as_object().and_then(normalize_entry);
            if suggestion.is_none() {
                tracing::debug!("Dropping malformed hashtag entry {}: {}", index, item);
            }
            suggestion
        })
        .collect();

    tracing::debug!(
        "Kept {} of {} hashtag entries",
        hashtags.len(),
        items.len()
    );
    Ok(hashtags)
}

fn normalize_entry(entry: &Map<String, Value>) -> Option<HashtagSuggestion> {
    let tag = entry.get("tag")?.as_str()?;
    let explanation = entry.get("explanation")?.as_str()?;

    if tag.is_empty() || explanation.is_empty() {
        return None;
    }

    let tag = if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{}", tag)
    };

    Some(HashtagSuggestion {
        tag,
        explanation: explanation.to_string(),
        viral_score: clamp_score(coerce_number(entry.get("viralScore"))),
    })
}

/// Loose numeric coercion: numbers pass through, numeric strings (decimal,
/// `0x`/`0o`/`0b`) are parsed, booleans count as 1/0, null and blank strings
/// as 0, a one-element array as its element. Anything else is NaN.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_text(s),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [single] => coerce_array_element(single),
            _ => f64::NAN,
        },
        Some(Value::Object(_)) | None => f64::NAN,
    }
}

// An array coerces through its text form, so `[true]` is "true" and not 1.
fn coerce_array_element(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(_) | Value::Object(_) => f64::NAN,
        other => coerce_number(Some(other)),
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Only decimal literals; Rust also accepts "inf"/"nan" spellings
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Rounds half up, then clamps into 0..=100. Non-finite input scores 0.
fn clamp_score(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score + 0.5).floor().clamp(0.0, 100.0) as u8
}
