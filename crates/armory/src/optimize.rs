//! Armor optimization requests.
//!
//! A request either carries an exotic/subclass choice, in which case the
//! character's armor is synced and a structured loadout suggestion is
//! generated, or it carries neither and is answered as free-form chat.

use std::collections::HashMap;
use std::sync::Arc;

use guardian_core::lookup::element_for_subclass;
use guardian_core::prompt::{
    ArmorProjection, ModifierProjection, OptimizationPrompt, CHAT_SYSTEM_PROMPT,
    OPTIMIZER_SYSTEM_PROMPT,
};
use guardian_core::reply::{parse_suggestion, OptimizationSuggestion, SuggestedModifier};
use guardian_core::types::ItemHash;
use guardian_db::models::armor_modifier::ArmorModifier;
use guardian_db::models::armor_piece::ArmorPiece;
use guardian_db::models::optimization_request::CreateOptimizationRequest;
use guardian_db::models::user::User;
use guardian_db::repositories::{
    ArmorDefinitionRepo, ArmorModifierRepo, ArmorPieceRepo, OptimizationRequestRepo,
};
use guardian_db::DbPool;
use guardian_llm::{GenerationRequest, TextGenerator};
use serde::Serialize;

use crate::error::OptimizeError;
use crate::sync::ArmorSynchronizer;

/// Inputs of one optimize call.
#[derive(Debug, Clone, Default)]
pub struct OptimizeRequest {
    pub exotic_instance_id: Option<String>,
    pub exotic_hash: Option<ItemHash>,
    pub subclass_id: Option<String>,
    /// Stat hashes in priority order.
    pub stat_priorities: Vec<String>,
    pub chat_input: Option<String>,
    pub character_id: Option<String>,
}

impl OptimizeRequest {
    /// Neither an exotic nor a subclass was chosen.
    pub fn is_chat(&self) -> bool {
        is_blank(self.exotic_instance_id.as_deref()) && is_blank(self.subclass_id.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OptimizeOutcome {
    Chat { response: String },
    Suggestion { suggestion: OptimizationSuggestion },
}

/// Orchestrates sync, prompt, generation, parsing and persistence.
#[derive(Clone)]
pub struct ArmorOptimizer {
    pool: DbPool,
    synchronizer: ArmorSynchronizer,
    generator: Arc<dyn TextGenerator>,
}

impl ArmorOptimizer {
    pub fn new(
        pool: DbPool,
        synchronizer: ArmorSynchronizer,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            pool,
            synchronizer,
            generator,
        }
    }

    pub async fn optimize(
        &self,
        user: &User,
        request: OptimizeRequest,
    ) -> Result<OptimizeOutcome, OptimizeError> {
        if request.is_chat() {
            return self.chat(request.chat_input.as_deref()).await;
        }

        let exotic_id = request
            .exotic_instance_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| OptimizeError::Invalid("an exotic instance id is required".into()))?;
        let character_id = request
            .character_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| OptimizeError::Invalid("a character id is required".into()))?;
        let subclass_id = request.subclass_id.as_deref().unwrap_or_default();
        let element = element_for_subclass(subclass_id);

        self.synchronizer
            .sync(user, character_id, Some(exotic_id))
            .await?;

        let pieces = ArmorPieceRepo::list_for_character(&self.pool, user.id, character_id).await?;
        let fragments = ArmorModifierRepo::list_fragments(&self.pool, element).await?;
        let mods = ArmorModifierRepo::list_armor_mods(&self.pool).await?;

        let armor = project_armor(&pieces);
        let fragment_projection = project_modifiers(&fragments);
        let mod_projection = project_modifiers(&mods);

        let prompt = OptimizationPrompt {
            subclass_name: element.as_str(),
            exotic_id,
            stat_priorities: &request.stat_priorities,
            armor: &armor,
            fragments: &fragment_projection,
            mods: &mod_projection,
            user_input: request.chat_input.as_deref(),
        }
        .render()?;

        let raw = self
            .generator
            .generate(&GenerationRequest::single(OPTIMIZER_SYSTEM_PROMPT, prompt))
            .await?;

        let mut suggestion = match parse_suggestion(&raw) {
            Ok(suggestion) => suggestion,
            Err(source) => {
                tracing::error!(user_id = user.id, error = %source, raw = %raw, "Unparseable optimizer reply");
                return Err(OptimizeError::Parse { source, raw });
            }
        };

        self.enrich(&mut suggestion, &pieces).await?;

        let record = OptimizationRequestRepo::create(
            &self.pool,
            &CreateOptimizationRequest {
                user_id: user.id,
                exotic_instance_id: exotic_id.to_string(),
                exotic_hash: request.exotic_hash,
                subclass_id: subclass_id.to_string(),
                character_id: character_id.to_string(),
                stat_priorities: request.stat_priorities.clone(),
                result: serde_json::to_value(&suggestion)?,
            },
        )
        .await?;

        tracing::info!(
            user_id = user.id,
            request_id = record.id,
            armor_pieces = suggestion.armor_pieces.len(),
            fragments = suggestion.fragments.len(),
            "Optimization suggestion stored",
        );
        Ok(OptimizeOutcome::Suggestion { suggestion })
    }

    async fn chat(&self, input: Option<&str>) -> Result<OptimizeOutcome, OptimizeError> {
        let input = input
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                OptimizeError::Invalid("chat input is required without an exotic or subclass".into())
            })?;
        let response = self
            .generator
            .generate(&GenerationRequest::single(CHAT_SYSTEM_PROMPT, input))
            .await?;
        Ok(OptimizeOutcome::Chat { response })
    }

    /// Fill in hashes and names the model does not know.
    async fn enrich(
        &self,
        suggestion: &mut OptimizationSuggestion,
        pieces: &[ArmorPiece],
    ) -> Result<(), OptimizeError> {
        let by_instance: HashMap<&str, &ArmorPiece> = pieces
            .iter()
            .map(|p| (p.item_instance_id.as_str(), p))
            .collect();
        let hashes: Vec<ItemHash> = pieces.iter().map(|p| p.item_hash).collect();
        let names: HashMap<ItemHash, String> =
            ArmorDefinitionRepo::find_many(&self.pool, &hashes)
                .await?
                .into_iter()
                .map(|def| (def.item_hash, def.name))
                .collect();

        for suggested in &mut suggestion.armor_pieces {
            let piece = by_instance.get(suggested.id.as_str());
            suggested.hash = piece.map(|p| p.item_hash);
            suggested.name = piece.and_then(|p| names.get(&p.item_hash).cloned());
            if suggested.slot.is_none() {
                suggested.slot = piece.map(|p| p.slot.clone());
            }
        }

        for modifier in suggestion
            .fragments
            .iter_mut()
            .chain(suggestion.mods.iter_mut())
        {
            self.resolve_modifier(modifier).await?;
        }
        Ok(())
    }

    async fn resolve_modifier(&self, modifier: &mut SuggestedModifier) -> Result<(), OptimizeError> {
        modifier.hash = ArmorModifierRepo::find_by_name(&self.pool, &modifier.name)
            .await?
            .map(|m| m.item_hash);
        Ok(())
    }
}

fn project_armor(pieces: &[ArmorPiece]) -> Vec<ArmorProjection> {
    pieces
        .iter()
        .map(|p| ArmorProjection {
            id: p.item_instance_id.clone(),
            hash: p.item_hash,
            slot: p.slot.clone(),
            is_exotic: p.is_exotic,
            stats: p.stats(),
        })
        .collect()
}

fn project_modifiers(modifiers: &[ArmorModifier]) -> Vec<ModifierProjection> {
    modifiers
        .iter()
        .map(|m| ModifierProjection {
            name: m.name.clone(),
            stat_mods: m.stats(),
        })
        .collect()
}
