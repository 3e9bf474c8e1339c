//! The character sheet: the orchestration surface the rest of the
//! application calls.
//!
//! Each operation owns its cache-invalidation duty; nothing else in the
//! crate mutates the attached-asset list or dispatches events.

use tracing::debug;

use crate::assets::{AssetId, AssetSource};
use crate::error::Result;
use crate::rules::{EventCtx, RulesEngine, Totals, LONG_REST, SHORT_REST};

use super::state::{CharacterState, ResourceState};

/// A character state paired with the engine that derives it.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::{Asset, AssetCatalog, AssetData, FeatureData, Modifier};
/// use charsheet_engine::character::{CharacterSheet, CharacterState};
/// use charsheet_engine::rules::RulesEngine;
///
/// let mut catalog = AssetCatalog::new();
/// let rage = catalog.insert(Asset::new(
///     "Rage",
///     AssetData::Feature(FeatureData::new().with_modifier(Modifier::add("STR", 2))),
/// ));
///
/// let state = CharacterState::new().with_score("STR", 10);
/// let mut sheet = CharacterSheet::new(state, RulesEngine::new(&catalog));
///
/// sheet.add_asset(rage).unwrap();
/// assert_eq!(sheet.totals().unwrap()["STR"], 12);
/// ```
#[derive(Clone, Debug)]
pub struct CharacterSheet<S> {
    state: CharacterState,
    rules: RulesEngine<S>,
}

impl<S: AssetSource> CharacterSheet<S> {
    /// Pair a character state with a rules engine.
    #[must_use]
    pub fn new(state: CharacterState, rules: RulesEngine<S>) -> Self {
        Self { state, rules }
    }

    /// Derive the character's current totals.
    pub fn totals(&mut self) -> Result<Totals> {
        self.rules.compute(&mut self.state)
    }

    /// Attach an asset to the character.
    ///
    /// The asset is loaded first, so an unresolvable id fails here instead
    /// of poisoning every later computation. Attaching a resource seeds its
    /// pool (full, first attach only); attaching a class adds a level. The
    /// modifier cache is invalidated unconditionally - attachment can
    /// change the expanded closure regardless of the asset's kind.
    pub fn add_asset(&mut self, id: AssetId) -> Result<()> {
        let asset = self.rules.source().load(id)?;

        if let Some(resource) = asset.as_resource() {
            self.state
                .add_resource(id, ResourceState::new(resource.max, resource.recharge));
        }
        if let Some(class) = asset.as_class() {
            self.state.add_level(class.key.clone());
        }

        debug!(asset = %id, kind = %asset.kind(), "attaching asset");
        self.state.attach_asset(id);
        Ok(())
    }

    /// Dispatch a named event to the directly attached assets, then
    /// invalidate the modifier cache.
    ///
    /// Invalidation is unconditional: an event is assumed capable of
    /// changing effective modifiers (e.g. via resource-gated features)
    /// even when its hooks only touch resources.
    pub fn apply_event(&mut self, event: &str, ctx: &EventCtx) -> Result<()> {
        self.rules.apply_event(&mut self.state, event, ctx)?;
        self.state.invalidate_modifiers();
        Ok(())
    }

    /// Take a long rest.
    pub fn long_rest(&mut self) -> Result<()> {
        self.apply_event(LONG_REST, &EventCtx::new())
    }

    /// Take a short rest.
    pub fn short_rest(&mut self) -> Result<()> {
        self.apply_event(SHORT_REST, &EventCtx::new())
    }

    /// The underlying character state.
    #[must_use]
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Mutable access to the underlying state.
    ///
    /// Open state (scores, resources, conditions, levels) is safe to edit
    /// directly; attachment goes through [`add_asset`](Self::add_asset).
    pub fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.state
    }

    /// Split the sheet back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (CharacterState, RulesEngine<S>) {
        (self.state, self.rules)
    }
}
