//! Character state: the mutable snapshot the engine operates on.
//!
//! ## Modifier cache
//!
//! Collecting modifiers walks the full asset closure through the loader, so
//! the collected list is memoized here. The cache is an explicit slot with
//! an explicit [`invalidate_modifiers`](CharacterState::invalidate_modifiers);
//! every mutation that can change the expanded graph must call it, and the
//! attached-asset list is private so that rule holds by construction.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, Modifier, Recharge};

/// A per-character rechargeable pool.
///
/// `current` stays within `0..=max` through every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Pool capacity.
    pub max: i64,

    current: i64,

    /// When the pool refills. `None` means never on its own.
    pub recharge: Option<Recharge>,
}

impl ResourceState {
    /// Create a full pool.
    #[must_use]
    pub fn new(max: i64, recharge: Option<Recharge>) -> Self {
        let max = max.max(0);
        Self {
            max,
            current: max,
            recharge,
        }
    }

    /// Set the current value, clamped to `0..=max` (builder pattern).
    #[must_use]
    pub fn with_current(mut self, current: i64) -> Self {
        self.current = current.clamp(0, self.max);
        self
    }

    /// Remaining uses.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Consume uses, saturating at zero.
    pub fn spend(&mut self, amount: i64) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    /// Regain uses, saturating at `max`.
    pub fn restore(&mut self, amount: i64) {
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    /// Refill to capacity.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Check whether the pool is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// The mutable per-character snapshot.
///
/// Ability scores, proficiencies, levels, resources and conditions are open
/// state: mutating them never changes the asset graph, so they carry no
/// invalidation duty. The attached-asset list does, and is only reachable
/// through [`attach_asset`](CharacterState::attach_asset).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CharacterState {
    /// Base scores by canonical stat/skill key.
    pub ability_scores: FxHashMap<String, i64>,

    /// Skill keys the character is proficient in.
    pub skill_proficiencies: FxHashSet<String>,

    /// Level count per class key.
    pub level_map: FxHashMap<String, i64>,

    /// Resource pools keyed by the asset that granted them.
    pub resources: FxHashMap<AssetId, ResourceState>,

    /// Active condition labels.
    pub conditions: FxHashSet<String>,

    /// Directly attached asset ids, in attachment order. Direct grants
    /// only - never the expanded closure.
    asset_ids: Vec<AssetId>,

    /// Memoized modifier list; `None` until the first computation after an
    /// invalidation. Never persisted.
    #[serde(skip)]
    mod_cache: Option<Vec<Modifier>>,
}

impl CharacterState {
    /// Create an empty character.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a base score (builder pattern).
    #[must_use]
    pub fn with_score(mut self, key: impl Into<String>, value: i64) -> Self {
        self.ability_scores.insert(key.into(), value);
        self
    }

    /// Add a skill proficiency (builder pattern).
    #[must_use]
    pub fn with_proficiency(mut self, key: impl Into<String>) -> Self {
        self.skill_proficiencies.insert(key.into());
        self
    }

    /// Get a base score, defaulting to zero.
    #[must_use]
    pub fn score(&self, key: &str) -> i64 {
        self.ability_scores.get(key).copied().unwrap_or(0)
    }

    /// Set a base score.
    pub fn set_score(&mut self, key: impl Into<String>, value: i64) {
        self.ability_scores.insert(key.into(), value);
    }

    /// The directly attached asset ids, in attachment order.
    #[must_use]
    pub fn asset_ids(&self) -> &[AssetId] {
        &self.asset_ids
    }

    /// Append a directly attached asset and invalidate the modifier cache.
    ///
    /// Attaching can change the expanded closure, so invalidation is
    /// unconditional regardless of the asset's kind.
    pub fn attach_asset(&mut self, id: AssetId) {
        self.asset_ids.push(id);
        self.invalidate_modifiers();
    }

    /// Seed a resource pool for an asset if it does not already have one.
    ///
    /// Re-attaching the same resource keeps the existing pool (and its
    /// spent uses) intact.
    pub fn add_resource(&mut self, id: AssetId, resource: ResourceState) {
        self.resources.entry(id).or_insert(resource);
    }

    /// Get a resource pool.
    #[must_use]
    pub fn resource(&self, id: AssetId) -> Option<&ResourceState> {
        self.resources.get(&id)
    }

    /// Get a mutable resource pool.
    pub fn resource_mut(&mut self, id: AssetId) -> Option<&mut ResourceState> {
        self.resources.get_mut(&id)
    }

    /// Add a level in a class.
    pub fn add_level(&mut self, class_key: impl Into<String>) {
        *self.level_map.entry(class_key.into()).or_insert(0) += 1;
    }

    /// Total level across all classes.
    #[must_use]
    pub fn level(&self) -> i64 {
        self.level_map.values().sum()
    }

    // === Modifier cache ===

    /// The memoized modifier list, if a computation has populated it since
    /// the last invalidation.
    #[must_use]
    pub fn cached_modifiers(&self) -> Option<&[Modifier]> {
        self.mod_cache.as_deref()
    }

    /// Memoize a freshly collected modifier list.
    pub fn memoize_modifiers(&mut self, modifiers: Vec<Modifier>) {
        self.mod_cache = Some(modifiers);
    }

    /// Drop the memoized modifier list.
    pub fn invalidate_modifiers(&mut self) {
        self.mod_cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_clamping() {
        let mut pool = ResourceState::new(3, Some(Recharge::LongRest));
        assert_eq!(pool.current(), 3);

        pool.spend(5);
        assert_eq!(pool.current(), 0);
        assert!(pool.is_empty());

        pool.restore(10);
        assert_eq!(pool.current(), 3);

        pool.spend(1);
        pool.refill();
        assert_eq!(pool.current(), 3);
    }

    #[test]
    fn test_resource_with_current() {
        let pool = ResourceState::new(4, None).with_current(9);
        assert_eq!(pool.current(), 4);

        let pool = ResourceState::new(4, None).with_current(-1);
        assert_eq!(pool.current(), 0);
    }

    #[test]
    fn test_attach_invalidates_cache() {
        let mut state = CharacterState::new().with_score("STR", 10);
        state.memoize_modifiers(vec![Modifier::add("STR", 2)]);
        assert!(state.cached_modifiers().is_some());

        state.attach_asset(AssetId::new());
        assert!(state.cached_modifiers().is_none());
        assert_eq!(state.asset_ids().len(), 1);
    }

    #[test]
    fn test_empty_cache_is_distinct_from_unset() {
        let mut state = CharacterState::new();
        assert!(state.cached_modifiers().is_none());

        state.memoize_modifiers(Vec::new());
        assert_eq!(state.cached_modifiers(), Some(&[][..]));
    }

    #[test]
    fn test_add_resource_keeps_existing_pool() {
        let mut state = CharacterState::new();
        let id = AssetId::new();

        state.add_resource(id, ResourceState::new(3, None));
        state.resource_mut(id).unwrap().spend(2);

        // Second attach must not reset spent uses.
        state.add_resource(id, ResourceState::new(3, None));
        assert_eq!(state.resource(id).unwrap().current(), 1);
    }

    #[test]
    fn test_levels() {
        let mut state = CharacterState::new();
        state.add_level("FIGHTER");
        state.add_level("FIGHTER");
        state.add_level("WIZARD");

        assert_eq!(state.level_map.get("FIGHTER"), Some(&2));
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_score_defaults_to_zero() {
        let state = CharacterState::new().with_score("STR", 14);
        assert_eq!(state.score("STR"), 14);
        assert_eq!(state.score("DEX"), 0);
    }
}
