//! Prompt construction for the armor optimizer.
//!
//! The reply schema requested here is parsed by [`crate::reply`]. Both sides
//! are versioned together through [`PROMPT_FORMAT_VERSION`]; bump it whenever
//! the schema block below changes.

use serde::Serialize;

use crate::armor::StatBlock;
use crate::lookup::friendly_stat_name;
use crate::types::ItemHash;

/// Version of the prompt/reply contract shared with [`crate::reply`].
pub const PROMPT_FORMAT_VERSION: u32 = 2;

/// Upper bound on the sum of all six stats.
pub const MAX_STAT_TOTAL: i32 = 340;

/// Upper bound on any single stat.
pub const MAX_STAT_VALUE: i32 = 100;

/// Maximum number of fragments a subclass can socket.
pub const MAX_FRAGMENTS: usize = 4;

/// System framing for free-form chat requests.
pub const CHAT_SYSTEM_PROMPT: &str =
    "You are a Destiny 2 expert. Respond to the player's question or comment \
     accurately and concisely.";

/// System framing for optimization requests.
pub const OPTIMIZER_SYSTEM_PROMPT: &str =
    "You are a Destiny 2 armor optimization expert. You always answer with a \
     single fenced json block that follows the requested schema exactly.";

/// Armor piece as shown to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ArmorProjection {
    pub id: String,
    pub hash: ItemHash,
    #[serde(rename = "type")]
    pub slot: String,
    pub is_exotic: bool,
    pub stats: StatBlock,
}

/// Fragment or armor mod as shown to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ModifierProjection {
    pub name: String,
    pub stat_mods: StatBlock,
}

/// All inputs of one optimization prompt.
#[derive(Debug)]
pub struct OptimizationPrompt<'a> {
    pub subclass_name: &'a str,
    pub exotic_id: &'a str,
    /// Stat hashes (or names) in priority order.
    pub stat_priorities: &'a [String],
    pub armor: &'a [ArmorProjection],
    pub fragments: &'a [ModifierProjection],
    pub mods: &'a [ModifierProjection],
    pub user_input: Option<&'a str>,
}

impl OptimizationPrompt<'_> {
    /// Friendly names of the requested stat priorities, in order.
    pub fn priority_names(&self) -> Vec<String> {
        self.stat_priorities
            .iter()
            .map(|stat| friendly_stat_name(stat))
            .collect()
    }

    /// Render the full instruction text.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let armor = serde_json::to_string_pretty(self.armor)?;
        let fragments = serde_json::to_string_pretty(self.fragments)?;
        let mods = serde_json::to_string_pretty(self.mods)?;
        let priorities = self.priority_names().join(", ");
        let user_input = self
            .user_input
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("(none)");
        let subclass = self.subclass_name;

        Ok(format!(
            "Analyze the following armor pieces, subclass fragments and armor mods and \
suggest the best loadout for maximizing overall stats.

The player is using the {subclass} subclass and must use the exotic armor piece with ID {exotic_id}.
Stat priorities, in order: {priorities}.

Armor Pieces:
{armor}

Subclass Fragments:
{fragments}

Armor Mods:
{mods}

Player's input: {user_input}

Rules for optimization:
- Include exactly one armor piece for each slot: HELMET, GAUNTLETS, CHEST_ARMOR, LEG_ARMOR, CLASS_ARMOR.
- Only one exotic can be equipped, and it must be the piece with ID {exotic_id}.
- Recommend no more than {max_fragments} subclass fragments.
- Recommend exactly one armor mod per armor piece.
- The total of all stats must not exceed {max_total} points.
- No individual stat may exceed {max_stat} points.
- Prioritize stats in the given order but aim for a balanced build unless the player says otherwise.
- Keep every recommendation compatible with the {subclass} subclass.

Reply with a single fenced json block (```json ... ```) and nothing else, using this schema:
{{
  \"armor_pieces\": [{{\"id\": \"<armor piece id>\", \"slot\": \"<slot>\"}}],
  \"fragments\": [{{\"name\": \"<fragment name>\"}}],
  \"mods\": [{{\"name\": \"<mod name>\", \"slot\": \"<slot>\"}}],
  \"total_stats\": {{\"mobility\": 0, \"resilience\": 0, \"recovery\": 0, \"discipline\": 0, \"intellect\": 0, \"strength\": 0}},
  \"explanation\": \"<brief explanation of the choices and trade-offs>\"
}}",
            exotic_id = self.exotic_id,
            max_fragments = MAX_FRAGMENTS,
            max_total = MAX_STAT_TOTAL,
            max_stat = MAX_STAT_VALUE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_armor() -> Vec<ArmorProjection> {
        vec![ArmorProjection {
            id: "6917529".into(),
            hash: 1_234,
            slot: "HELMET".into(),
            is_exotic: true,
            stats: StatBlock {
                mobility: 2,
                resilience: 20,
                recovery: 10,
                discipline: 2,
                intellect: 16,
                strength: 10,
            },
        }]
    }

    #[test]
    fn prompt_embeds_inputs_and_constraints() {
        let armor = sample_armor();
        let fragments = vec![ModifierProjection {
            name: "Ember of Torches".into(),
            stat_mods: StatBlock {
                discipline: -10,
                ..StatBlock::default()
            },
        }];
        let priorities = vec!["1943323491".to_string(), "392767087".to_string()];
        let prompt = OptimizationPrompt {
            subclass_name: "Solar",
            exotic_id: "6917529",
            stat_priorities: &priorities,
            armor: &armor,
            fragments: &fragments,
            mods: &[],
            user_input: Some("I like grenades"),
        };

        let text = prompt.render().unwrap();
        assert!(text.contains("Solar subclass"));
        assert!(text.contains("exotic armor piece with ID 6917529"));
        assert!(text.contains("Stat priorities, in order: recovery, resilience."));
        assert!(text.contains("\"Ember of Torches\""));
        assert!(text.contains("must not exceed 340 points"));
        assert!(text.contains("may exceed 100 points"));
        assert!(text.contains("no more than 4 subclass fragments"));
        assert!(text.contains("\"total_stats\""));
        assert!(text.contains("I like grenades"));
    }

    #[test]
    fn armor_projection_uses_type_key() {
        let json = serde_json::to_value(&sample_armor()[0]).unwrap();
        assert_eq!(json["type"], "HELMET");
        assert_eq!(json["stats"]["resilience"], 20);
    }

    #[test]
    fn blank_user_input_is_marked_none() {
        let prompt = OptimizationPrompt {
            subclass_name: "Arc",
            exotic_id: "1",
            stat_priorities: &[],
            armor: &[],
            fragments: &[],
            mods: &[],
            user_input: Some("   "),
        };
        assert!(prompt.render().unwrap().contains("Player's input: (none)"));
    }
}
