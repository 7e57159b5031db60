use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::AppError;

/// Why a model response could not be turned into titles
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("no ```json block in model output")]
    MissingJsonBlock,

    #[error("json block is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("`recommendations` is missing or not an array")]
    NotASequence,
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

fn json_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)```json\n(.*?)\n```").expect("static regex"))
}

/// Returns the contents of the first ```` ```json ```` fenced block
pub fn extract_json_block(raw: &str) -> Result<&str, ParseError> {
    json_block_pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingJsonBlock)
}

/// Decodes `{"recommendations": [...]}` into titles, in order
///
/// Any number of titles is accepted. Non-string entries can never match a
/// podcast title and are skipped.
pub fn decode_recommendations(block: &str) -> Result<Vec<String>, ParseError> {
    let value: Value =
        serde_json::from_str(block).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let titles = value
        .get("recommendations")
        .and_then(Value::as_array)
        .ok_or(ParseError::NotASequence)?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    Ok(titles)
}

/// Extracts and decodes recommended titles from raw model output
pub fn parse(raw: &str) -> Result<Vec<String>, ParseError> {
    extract_json_block(raw).and_then(decode_recommendations)
}
