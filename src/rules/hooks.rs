//! Event hooks - capability-based dispatch.
//!
//! The engine contains no per-kind branching and no fixed enumeration of
//! event names. An asset kind opts into an event by registering a handler
//! under `(kind, event name)`; kinds that don't register are silently
//! skipped when that event fires. New events and new subscribers need no
//! engine changes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetKind, Recharge};
use crate::character::CharacterState;

/// A full night's rest.
pub const LONG_REST: &str = "long_rest";

/// A breather of an hour or so.
pub const SHORT_REST: &str = "short_rest";

/// The start of a new day.
pub const DAWN: &str = "dawn";

/// Named numeric context passed along with an event.
///
/// ## Example
///
/// ```
/// use charsheet_engine::rules::EventCtx;
///
/// let ctx = EventCtx::new().with("hours", 8);
/// assert_eq!(ctx.value("hours", 0), 8);
/// assert_eq!(ctx.value("missing", -1), -1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCtx {
    values: FxHashMap<String, i64>,
}

impl EventCtx {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Get a named value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Get a named value with a default.
    #[must_use]
    pub fn value(&self, key: &str, default: i64) -> i64 {
        self.get(key).unwrap_or(default)
    }
}

/// Handler invoked when an asset receives an event.
///
/// Receives the asset as loaded, the character state to mutate, and the
/// event's context.
pub type EventHook = fn(&Asset, &mut CharacterState, &EventCtx);

/// Registry mapping `(asset kind, event name)` to a handler.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::AssetKind;
/// use charsheet_engine::rules::{HookRegistry, LONG_REST};
///
/// let hooks = HookRegistry::standard();
/// assert!(hooks.get(AssetKind::Resource, LONG_REST).is_some());
/// assert!(hooks.get(AssetKind::Item, LONG_REST).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct HookRegistry {
    hooks: FxHashMap<AssetKind, FxHashMap<String, EventHook>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in hooks: resource pools recharge on rests and at dawn.
    #[must_use]
    pub fn standard() -> Self {
        let mut hooks = Self::new();
        hooks.register(AssetKind::Resource, LONG_REST, refill_on_long_rest);
        hooks.register(AssetKind::Resource, SHORT_REST, refill_on_short_rest);
        hooks.register(AssetKind::Resource, DAWN, refill_on_dawn);
        hooks
    }

    /// Register a handler. Re-registering the same `(kind, event)` pair
    /// replaces the previous handler.
    pub fn register(&mut self, kind: AssetKind, event: impl Into<String>, hook: EventHook) {
        self.hooks.entry(kind).or_default().insert(event.into(), hook);
    }

    /// Remove a handler, returning it if present.
    pub fn unregister(&mut self, kind: AssetKind, event: &str) -> Option<EventHook> {
        self.hooks.get_mut(&kind)?.remove(event)
    }

    /// Look up the handler for an asset kind and event name.
    #[must_use]
    pub fn get(&self, kind: AssetKind, event: &str) -> Option<EventHook> {
        self.hooks.get(&kind)?.get(event).copied()
    }

    /// Total number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.values().map(FxHashMap::len).sum()
    }

    /// Check if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(FxHashMap::is_empty)
    }
}

fn refill_on_long_rest(asset: &Asset, state: &mut CharacterState, _ctx: &EventCtx) {
    if let Some(pool) = state.resource_mut(asset.id) {
        if matches!(pool.recharge, Some(Recharge::ShortRest | Recharge::LongRest)) {
            pool.refill();
        }
    }
}

fn refill_on_short_rest(asset: &Asset, state: &mut CharacterState, _ctx: &EventCtx) {
    if let Some(pool) = state.resource_mut(asset.id) {
        if matches!(pool.recharge, Some(Recharge::ShortRest)) {
            pool.refill();
        }
    }
}

fn refill_on_dawn(asset: &Asset, state: &mut CharacterState, _ctx: &EventCtx) {
    if let Some(pool) = state.resource_mut(asset.id) {
        if matches!(pool.recharge, Some(Recharge::Daily)) {
            pool.refill();
        }
    }
}
