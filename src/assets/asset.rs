//! Asset definitions - the content schema.
//!
//! An `Asset` pairs identity and provenance with a typed `data` payload.
//! The payload shape is tied to the asset's kind by construction:
//! `AssetData` is a tagged union, so a feature's data can never be spell
//! data. The engine reads assets, never writes them - mutation belongs to
//! the authoring surface outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use super::modifier::Modifier;

/// Unique identifier for an asset.
///
/// Identifies a piece of content globally, not a per-character instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Create a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the raw UUID value.
    #[must_use]
    pub const fn raw(self) -> Uuid {
        self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AssetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Field-less mirror of the `AssetData` discriminant.
///
/// Used as a lookup key (hook registry, catalog queries) where the payload
/// itself is not needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Stat,
    Skill,
    Spell,
    Item,
    Feature,
    Class,
    Subclass,
    Resource,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetKind::Stat => "stat",
            AssetKind::Skill => "skill",
            AssetKind::Spell => "spell",
            AssetKind::Item => "item",
            AssetKind::Feature => "feature",
            AssetKind::Class => "class",
            AssetKind::Subclass => "subclass",
            AssetKind::Resource => "resource",
        };
        write!(f, "{}", name)
    }
}

/// When a resource pool refills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recharge {
    ShortRest,
    LongRest,
    Daily,
}

/// Payload of a feature asset.
///
/// Features are the modifier- and grant-bearing kind: the only kind with
/// outgoing edges in the asset graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureData {
    /// Action economy cost, if the feature is activated ("action",
    /// "bonus_action", ...). `None` for passive features.
    #[serde(default)]
    pub action_cost: Option<String>,

    /// Modifiers this feature contributes, in declaration order.
    /// SmallVec optimizes for the common 0-2 modifier case.
    #[serde(default)]
    pub modifiers: SmallVec<[Modifier; 2]>,

    /// Assets this feature automatically brings along when attached.
    #[serde(default)]
    pub grants: SmallVec<[AssetId; 4]>,
}

impl FeatureData {
    /// Create an empty feature payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action cost (builder pattern).
    #[must_use]
    pub fn with_action_cost(mut self, cost: impl Into<String>) -> Self {
        self.action_cost = Some(cost.into());
        self
    }

    /// Add a modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Add a granted asset (builder pattern).
    #[must_use]
    pub fn with_grant(mut self, id: AssetId) -> Self {
        self.grants.push(id);
        self
    }
}

/// Payload of a class asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassData {
    /// Class key counted in the character's level map ("FIGHTER", ...).
    pub key: String,
}

/// Payload of a resource asset: a rechargeable pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Pool capacity.
    pub max: i64,

    /// When the pool refills. `None` means it never refills on its own.
    #[serde(default)]
    pub recharge: Option<Recharge>,
}

/// Payload of a stat-definition asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatData {
    /// Canonical stat key ("STR", "DEX", ...).
    pub key: String,

    /// Part of the standard rule set.
    #[serde(default)]
    pub default: bool,
}

/// Payload of a skill-definition asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    /// Canonical skill key ("STEAL", "PERCE", ...).
    pub key: String,

    /// Key of the stat that governs this skill.
    pub governing_stat_key: String,

    /// Part of the standard rule set.
    #[serde(default)]
    pub default: bool,
}

/// Payload of a spell asset. No engine-visible fields yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellData {}

/// Payload of an item asset. No engine-visible fields yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemData {}

/// Payload of a subclass asset. No engine-visible fields yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubclassData {}

/// Typed asset payload: one variant per asset kind.
///
/// Serialized as the original content records were stored: a `type`
/// discriminant next to a `data` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AssetData {
    Stat(StatData),
    Skill(SkillData),
    Spell(SpellData),
    Item(ItemData),
    Feature(FeatureData),
    Class(ClassData),
    Subclass(SubclassData),
    Resource(ResourceData),
}

impl AssetData {
    /// The field-less kind of this payload.
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetData::Stat(_) => AssetKind::Stat,
            AssetData::Skill(_) => AssetKind::Skill,
            AssetData::Spell(_) => AssetKind::Spell,
            AssetData::Item(_) => AssetKind::Item,
            AssetData::Feature(_) => AssetKind::Feature,
            AssetData::Class(_) => AssetKind::Class,
            AssetData::Subclass(_) => AssetKind::Subclass,
            AssetData::Resource(_) => AssetKind::Resource,
        }
    }
}

/// A piece of rule content.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::{Asset, AssetData, FeatureData, Modifier};
///
/// let rage = Asset::new(
///     "Rage",
///     AssetData::Feature(FeatureData::new().with_modifier(Modifier::add("STR", 2))),
/// )
/// .with_text("While raging, you hit harder.")
/// .with_tag("barbarian");
///
/// assert!(rage.as_feature().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Globally unique identifier.
    pub id: AssetId,

    /// Display name.
    pub name: String,

    /// Free-form rules text.
    #[serde(default)]
    pub text: String,

    /// Authoring tags for search and grouping.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Provenance: who authored this content.
    #[serde(default)]
    pub created_by: String,

    /// When the content was created.
    pub created_at: DateTime<Utc>,

    /// Typed payload; its shape always matches the asset's kind.
    #[serde(flatten)]
    pub data: AssetData,
}

impl Asset {
    /// Create an asset with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(name: impl Into<String>, data: AssetData) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            text: String::new(),
            tags: Vec::new(),
            created_by: String::new(),
            created_at: Utc::now(),
            data,
        }
    }

    /// Set a specific id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: AssetId) -> Self {
        self.id = id;
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the author (builder pattern).
    #[must_use]
    pub fn with_creator(mut self, author: impl Into<String>) -> Self {
        self.created_by = author.into();
        self
    }

    /// The kind of this asset.
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.data.kind()
    }

    /// Get the feature payload if this is a feature.
    #[must_use]
    pub fn as_feature(&self) -> Option<&FeatureData> {
        match &self.data {
            AssetData::Feature(data) => Some(data),
            _ => None,
        }
    }

    /// Get the resource payload if this is a resource.
    #[must_use]
    pub fn as_resource(&self) -> Option<&ResourceData> {
        match &self.data {
            AssetData::Resource(data) => Some(data),
            _ => None,
        }
    }

    /// Get the class payload if this is a class.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.data {
            AssetData::Class(data) => Some(data),
            _ => None,
        }
    }
}
