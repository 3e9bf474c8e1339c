//! Asset model: the data schema for all rule-bearing content.
//!
//! An asset is any piece of rule content addressable by a unique id -
//! features, spells, items, classes, subclasses, resources, and the stat
//! and skill definitions themselves. Assets are authored elsewhere and
//! immutable from the engine's point of view; the engine only reads them
//! through the [`AssetSource`] capability.

mod asset;
mod catalog;
mod modifier;
mod source;

pub use asset::{
    Asset, AssetData, AssetId, AssetKind, ClassData, FeatureData, ItemData, Recharge,
    ResourceData, SkillData, SpellData, StatData, SubclassData,
};
pub use catalog::AssetCatalog;
pub use modifier::{Modifier, ModifierId, ModifierOp};
pub use source::AssetSource;
