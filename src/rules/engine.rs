//! The rules engine: totals derivation and event propagation.
//!
//! The engine knows nothing about concrete asset content beyond the data
//! model: which kinds carry modifiers and grants (features), and how to
//! find a hook for an event. Everything else is data flowing through the
//! injected [`AssetSource`].
//!
//! ## Reduction order
//!
//! Modifiers are applied in two passes: every `Set` in collection order,
//! then every `Add` in collection order on top. An absolute override from
//! any source always beats any number of additive bonuses, regardless of
//! the order assets were attached - one well-defined resolution order
//! instead of last-writer-wins.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::assets::{AssetId, AssetSource, Modifier, ModifierOp};
use crate::character::CharacterState;
use crate::error::Result;

use super::hooks::{EventCtx, HookRegistry};

/// Derived scores by stat/skill key.
pub type Totals = FxHashMap<String, i64>;

/// The computation core over an injected asset source.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::{Asset, AssetCatalog, AssetData, FeatureData, Modifier};
/// use charsheet_engine::character::CharacterState;
/// use charsheet_engine::rules::RulesEngine;
///
/// let mut catalog = AssetCatalog::new();
/// let rage = catalog.insert(Asset::new(
///     "Rage",
///     AssetData::Feature(FeatureData::new().with_modifier(Modifier::add("STR", 2))),
/// ));
///
/// let engine = RulesEngine::new(&catalog);
/// let mut state = CharacterState::new().with_score("STR", 10);
/// state.attach_asset(rage);
///
/// let totals = engine.compute(&mut state).unwrap();
/// assert_eq!(totals["STR"], 12);
/// ```
#[derive(Clone, Debug)]
pub struct RulesEngine<S> {
    source: S,
    hooks: HookRegistry,
}

impl<S: AssetSource> RulesEngine<S> {
    /// Create an engine with the standard hook registrations.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            hooks: HookRegistry::standard(),
        }
    }

    /// Create an engine with a custom hook registry.
    #[must_use]
    pub fn with_hooks(source: S, hooks: HookRegistry) -> Self {
        Self { source, hooks }
    }

    /// The injected asset source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The hook registry.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Mutable access to the hook registry, for late registrations.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Derive the character's totals.
    ///
    /// Starts from a copy of the base scores and folds in the effective
    /// modifier list (cached, or collected from the asset closure and then
    /// memoized - the only mutation this method performs). A modifier
    /// targeting a key with no base score establishes it from an implicit
    /// zero.
    pub fn compute(&self, state: &mut CharacterState) -> Result<Totals> {
        let totals = match state.cached_modifiers() {
            Some(modifiers) => {
                debug!(modifiers = modifiers.len(), "computing totals from cache");
                reduce(&state.ability_scores, modifiers)
            }
            None => {
                let modifiers = self.collect_modifiers(state.asset_ids())?;
                debug!(modifiers = modifiers.len(), "collected modifier list");
                let totals = reduce(&state.ability_scores, &modifiers);
                state.memoize_modifiers(modifiers);
                totals
            }
        };
        Ok(totals)
    }

    /// Expand the asset closure reachable from `roots` via grant edges.
    ///
    /// Breadth-first over the `grants` lists of feature assets; every other
    /// kind is a leaf. Membership is checked before enqueueing, so a cycle
    /// terminates at its second visit with no extra bookkeeping. The output
    /// is deterministic: roots in attachment order, then discovery order.
    pub fn asset_closure(&self, roots: &[AssetId]) -> Result<Vec<AssetId>> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::with_capacity(roots.len());
        for &id in roots {
            if seen.insert(id) {
                order.push(id);
            }
        }

        let mut frontier = order.clone();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for id in frontier {
                let asset = self.source.load(id)?;
                if let Some(feature) = asset.as_feature() {
                    for &granted in &feature.grants {
                        if seen.insert(granted) {
                            next.push(granted);
                            order.push(granted);
                        }
                    }
                }
            }
            trace!(discovered = next.len(), "expanded grant frontier");
            frontier = next;
        }

        Ok(order)
    }

    /// Load every closure member and gather feature modifiers in closure
    /// order.
    fn collect_modifiers(&self, roots: &[AssetId]) -> Result<Vec<Modifier>> {
        let mut modifiers = Vec::new();
        for id in self.asset_closure(roots)? {
            let asset = self.source.load(id)?;
            if let Some(feature) = asset.as_feature() {
                modifiers.extend(feature.modifiers.iter().cloned());
            }
        }
        Ok(modifiers)
    }

    /// Dispatch a named event to the directly attached assets.
    ///
    /// Dispatch is intentionally shallow: only direct attachments are
    /// notified, never the expanded closure. A granted asset that needs an
    /// event subscribes through its own direct attachment. An asset whose
    /// kind registered no hook for the event is skipped; an unresolvable id
    /// still fails the whole dispatch.
    pub fn apply_event(
        &self,
        state: &mut CharacterState,
        event: &str,
        ctx: &EventCtx,
    ) -> Result<()> {
        let ids: Vec<AssetId> = state.asset_ids().to_vec();
        for id in ids {
            let asset = self.source.load(id)?;
            if let Some(hook) = self.hooks.get(asset.kind(), event) {
                trace!(asset = %asset.id, kind = %asset.kind(), event, "invoking hook");
                hook(&asset, state, ctx);
            }
        }
        Ok(())
    }
}

/// Two-pass reduction: all `Set` modifiers in order, then all `Add`.
fn reduce(scores: &FxHashMap<String, i64>, modifiers: &[Modifier]) -> Totals {
    let mut totals = scores.clone();

    for modifier in modifiers.iter().filter(|m| m.op == ModifierOp::Set) {
        totals.insert(modifier.target_key.clone(), modifier.value);
    }
    for modifier in modifiers.iter().filter(|m| m.op == ModifierOp::Add) {
        *totals.entry(modifier.target_key.clone()).or_insert(0) += modifier.value;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Asset, AssetCatalog, AssetData, FeatureData};

    fn feature(catalog: &mut AssetCatalog, data: FeatureData) -> AssetId {
        catalog.insert(Asset::new("Feature", AssetData::Feature(data)))
    }

    #[test]
    fn test_reduce_set_beats_add_in_any_order() {
        let scores = FxHashMap::default();

        let forward = vec![Modifier::set("HP", 10), Modifier::add("HP", 3)];
        let backward = vec![Modifier::add("HP", 3), Modifier::set("HP", 10)];

        assert_eq!(reduce(&scores, &forward)["HP"], 13);
        assert_eq!(reduce(&scores, &backward)["HP"], 13);
    }

    #[test]
    fn test_reduce_untargeted_keys_pass_through() {
        let mut scores = FxHashMap::default();
        scores.insert("STR".to_string(), 10);
        scores.insert("DEX".to_string(), 12);

        let totals = reduce(&scores, &[Modifier::add("STR", 2)]);
        assert_eq!(totals["STR"], 12);
        assert_eq!(totals["DEX"], 12);
    }

    #[test]
    fn test_reduce_unknown_target_starts_from_zero() {
        let totals = reduce(&FxHashMap::default(), &[Modifier::add("SPD", 30)]);
        assert_eq!(totals["SPD"], 30);
    }

    #[test]
    fn test_closure_empty_roots() {
        let catalog = AssetCatalog::new();
        let engine = RulesEngine::new(&catalog);

        assert!(engine.asset_closure(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_closure_duplicate_roots_collapse() {
        let mut catalog = AssetCatalog::new();
        let a = feature(&mut catalog, FeatureData::new());

        let engine = RulesEngine::new(&catalog);
        assert_eq!(engine.asset_closure(&[a, a]).unwrap(), vec![a]);
    }

    #[test]
    fn test_closure_follows_grants_breadth_first() {
        let mut catalog = AssetCatalog::new();
        let c = feature(&mut catalog, FeatureData::new());
        let b = feature(&mut catalog, FeatureData::new().with_grant(c));
        let a = feature(&mut catalog, FeatureData::new().with_grant(b));

        let engine = RulesEngine::new(&catalog);
        assert_eq!(engine.asset_closure(&[a]).unwrap(), vec![a, b, c]);
    }

    #[test]
    fn test_compute_memoizes() {
        let mut catalog = AssetCatalog::new();
        let id = feature(
            &mut catalog,
            FeatureData::new().with_modifier(Modifier::add("STR", 2)),
        );

        let engine = RulesEngine::new(&catalog);
        let mut state = CharacterState::new().with_score("STR", 10);
        state.attach_asset(id);
        assert!(state.cached_modifiers().is_none());

        let totals = engine.compute(&mut state).unwrap();
        assert_eq!(totals["STR"], 12);
        assert_eq!(state.cached_modifiers().map(<[Modifier]>::len), Some(1));
    }
}
