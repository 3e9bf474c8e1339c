//! # charsheet-engine
//!
//! The rules/derivation core of a tabletop-character application: turns a
//! character's raw ability scores plus an open-ended, data-driven set of
//! assets into computed totals, and propagates named domain events (rests,
//! dawn) through the same asset collection.
//!
//! ## Design Principles
//!
//! 1. **Content-Agnostic**: No hardcoded features, classes, or events.
//!    Everything rule-bearing is data behind the [`AssetSource`] capability.
//!
//! 2. **One Resolution Order**: Absolute overrides always beat additive
//!    bonuses, regardless of attachment order. Never last-writer-wins.
//!
//! 3. **Explicit Memoization**: The collected modifier list is a documented
//!    cache slot with an explicit invalidation, called by every mutator
//!    that can change the asset graph.
//!
//! ## Modules
//!
//! - `assets`: Asset model, modifiers, the lookup capability, the catalog
//! - `ruleset`: Stat/skill definitions and authoring-time validation
//! - `character`: Per-character state, resource pools, the sheet wrapper
//! - `rules`: Closure expansion, modifier reduction, event dispatch
//! - `error`: Runtime error taxonomy

pub mod assets;
pub mod character;
pub mod error;
pub mod rules;
pub mod ruleset;

// Re-export commonly used types
pub use crate::assets::{
    Asset, AssetCatalog, AssetData, AssetId, AssetKind, AssetSource, ClassData, FeatureData,
    ItemData, Modifier, ModifierId, ModifierOp, Recharge, ResourceData, SkillData, SpellData,
    StatData, SubclassData,
};

pub use crate::character::{CharacterSheet, CharacterState, ResourceState};

pub use crate::rules::{EventCtx, EventHook, HookRegistry, RulesEngine, Totals};

pub use crate::ruleset::{Ruleset, RulesetError, Skill, Stat};

pub use crate::error::{EngineError, Result};
