//! Structured-reply extraction for the armor optimizer.
//!
//! The model is asked (see [`crate::prompt`]) to answer with a fenced json
//! block. Extraction is best-effort, validation is strict: a reply either
//! yields a complete [`OptimizationSuggestion`] or a [`ReplyError`], never a
//! partially populated result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::armor::StatBlock;
use crate::prompt::MAX_FRAGMENTS;
use crate::types::ItemHash;

/// Top-level keys every reply must carry.
pub const REQUIRED_KEYS: [&str; 5] = [
    "armor_pieces",
    "fragments",
    "mods",
    "total_stats",
    "explanation",
];

/// Matches a fenced code block whose body is a JSON object.
static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*\s*(\{.*?\})\s*```").expect("valid regex")
});

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("no structured block found in reply")]
    NoStructuredBlock,

    #[error("structured block is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("structured block is missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("structured block does not match the schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("reply recommends {0} fragments, at most {max} are allowed", max = MAX_FRAGMENTS)]
    TooManyFragments(usize),
}

/// One recommended armor piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedArmorPiece {
    /// Item instance id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub slot: Option<String>,
    /// Catalog hash, filled in locally after parsing.
    #[serde(default)]
    pub hash: Option<ItemHash>,
    /// Display name, filled in locally after parsing.
    #[serde(default)]
    pub name: Option<String>,
}

/// One recommended fragment or armor mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedModifier {
    pub name: String,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub hash: Option<ItemHash>,
}

/// Validated optimizer answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub armor_pieces: Vec<SuggestedArmorPiece>,
    pub fragments: Vec<SuggestedModifier>,
    pub mods: Vec<SuggestedModifier>,
    pub total_stats: StatBlock,
    pub explanation: String,
}

/// Pull the JSON text of the structured block out of a free-text reply.
///
/// Prefers a fenced block; falls back to the outermost `{ ... }` span for
/// replies that dropped the fence.
pub fn extract_structured_block(reply: &str) -> Option<&str> {
    if let Some(caps) = FENCED_BLOCK_RE.captures(reply) {
        return caps.get(1).map(|m| m.as_str());
    }
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Extract, decode, and validate an optimizer reply.
pub fn parse_suggestion(reply: &str) -> Result<OptimizationSuggestion, ReplyError> {
    let block = extract_structured_block(reply).ok_or(ReplyError::NoStructuredBlock)?;
    let value: serde_json::Value = serde_json::from_str(block).map_err(ReplyError::InvalidJson)?;

    let object = value.as_object().ok_or(ReplyError::NoStructuredBlock)?;
    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(ReplyError::MissingKey(*missing));
    }

    let suggestion: OptimizationSuggestion =
        serde_json::from_value(value).map_err(ReplyError::Schema)?;

    if suggestion.fragments.len() > MAX_FRAGMENTS {
        return Err(ReplyError::TooManyFragments(suggestion.fragments.len()));
    }
    Ok(suggestion)
}

/// Instance ids are numeric strings; models sometimes emit them as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const COMPLETE: &str = r#"{
        "armor_pieces": [{"id": "6917529100", "slot": "HELMET"}, {"id": 6917529101}],
        "fragments": [{"name": "Ember of Torches"}],
        "mods": [{"name": "Recovery Mod", "slot": "CHEST_ARMOR"}],
        "total_stats": {"mobility": 20, "resilience": 100, "recovery": 100,
                        "discipline": 50, "intellect": 30, "strength": 30},
        "explanation": "Max resilience and recovery."
    }"#;

    #[test]
    fn parses_fenced_reply() {
        let reply = format!("Here is your build:\n```json\n{COMPLETE}\n```\nGood luck!");
        let suggestion = parse_suggestion(&reply).unwrap();
        assert_eq!(suggestion.armor_pieces.len(), 2);
        assert_eq!(suggestion.armor_pieces[0].slot.as_deref(), Some("HELMET"));
        assert_eq!(suggestion.armor_pieces[1].id, "6917529101");
        assert_eq!(suggestion.fragments[0].name, "Ember of Torches");
        assert_eq!(suggestion.total_stats.resilience, 100);
        assert_eq!(suggestion.total_stats.total(), 330);
    }

    #[test]
    fn parses_unfenced_reply() {
        let reply = format!("Sure. {COMPLETE}");
        assert!(parse_suggestion(&reply).is_ok());
    }

    #[test]
    fn plain_text_has_no_block() {
        assert_matches!(
            parse_suggestion("I could not find a good build."),
            Err(ReplyError::NoStructuredBlock)
        );
    }

    #[test]
    fn broken_json_is_rejected() {
        assert_matches!(
            parse_suggestion("```json\n{\"armor_pieces\": [}\n```"),
            Err(ReplyError::InvalidJson(_))
        );
    }

    #[test]
    fn each_missing_key_is_rejected() {
        for key in REQUIRED_KEYS {
            let mut value: serde_json::Value = serde_json::from_str(COMPLETE).unwrap();
            value.as_object_mut().unwrap().remove(key);
            let reply = format!("```json\n{value}\n```");
            assert_matches!(
                parse_suggestion(&reply),
                Err(ReplyError::MissingKey(k)) if k == key
            );
        }
    }

    #[test]
    fn wrong_shape_is_a_schema_error() {
        let reply = r#"```json
        {"armor_pieces": "none", "fragments": [], "mods": [], "total_stats": {}, "explanation": ""}
        ```"#;
        assert_matches!(parse_suggestion(reply), Err(ReplyError::Schema(_)));
    }

    #[test]
    fn too_many_fragments_is_rejected() {
        let reply = r#"{"armor_pieces": [], "mods": [], "total_stats": {}, "explanation": "x",
            "fragments": [{"name": "a"}, {"name": "b"}, {"name": "c"}, {"name": "d"}, {"name": "e"}]}"#;
        assert_matches!(parse_suggestion(reply), Err(ReplyError::TooManyFragments(5)));
    }
}
