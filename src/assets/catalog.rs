//! In-memory asset catalog.
//!
//! The reference [`AssetSource`] implementation: a plain keyed store in the
//! shape of the original content table. Production deployments put a real
//! persistence layer behind [`AssetSource`] instead; the catalog covers
//! tests, tools, and embedders that load content up front.

use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};

use super::asset::{Asset, AssetId, AssetKind};
use super::source::AssetSource;

/// Keyed store of assets.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::{Asset, AssetCatalog, AssetData, AssetSource, FeatureData};
///
/// let mut catalog = AssetCatalog::new();
/// let id = catalog.insert(Asset::new("Darkvision", AssetData::Feature(FeatureData::new())));
///
/// let found = catalog.load(id).unwrap();
/// assert_eq!(found.name, "Darkvision");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    assets: FxHashMap<AssetId, Asset>,
}

impl AssetCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset, returning its id.
    ///
    /// Inserting under an existing id replaces the stored content - the
    /// catalog mirrors content-store semantics where the authoring surface
    /// owns conflicts.
    pub fn insert(&mut self, asset: Asset) -> AssetId {
        let id = asset.id;
        self.assets.insert(id, asset);
        id
    }

    /// Decode a JSON asset record and insert it.
    ///
    /// A record whose payload does not match its `type` tag fails with
    /// [`EngineError::MalformedRecord`].
    pub fn insert_json(&mut self, record: &str) -> Result<AssetId> {
        let asset: Asset = serde_json::from_str(record).map_err(EngineError::MalformedRecord)?;
        Ok(self.insert(asset))
    }

    /// Get an asset by id.
    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Check whether an id is present.
    #[must_use]
    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id)
    }

    /// Remove an asset, returning it if present.
    pub fn remove(&mut self, id: AssetId) -> Option<Asset> {
        self.assets.remove(&id)
    }

    /// Number of stored assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over all assets.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Find assets of one kind.
    pub fn find_by_kind(&self, kind: AssetKind) -> impl Iterator<Item = &Asset> {
        self.assets.values().filter(move |a| a.kind() == kind)
    }

    /// Find assets matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Asset>
    where
        F: Fn(&Asset) -> bool,
    {
        self.assets.values().filter(move |a| predicate(a))
    }
}

impl AssetSource for AssetCatalog {
    fn load(&self, id: AssetId) -> Result<Asset> {
        self.assets
            .get(&id)
            .cloned()
            .ok_or(EngineError::UnresolvedAsset(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetData, FeatureData, ItemData, SpellData};

    #[test]
    fn test_insert_and_get() {
        let mut catalog = AssetCatalog::new();

        let id = catalog.insert(Asset::new("Shield", AssetData::Item(ItemData {})));

        assert!(catalog.contains(id));
        assert_eq!(catalog.get(id).unwrap().name, "Shield");
        assert!(catalog.get(AssetId::new()).is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = AssetCatalog::new();
        let id = AssetId::new();

        catalog.insert(Asset::new("Old", AssetData::Item(ItemData {})).with_id(id));
        catalog.insert(Asset::new("New", AssetData::Item(ItemData {})).with_id(id));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(id).unwrap().name, "New");
    }

    #[test]
    fn test_load_unresolved() {
        let catalog = AssetCatalog::new();
        let missing = AssetId::new();

        match catalog.load(missing) {
            Err(EngineError::UnresolvedAsset(id)) => assert_eq!(id, missing),
            other => panic!("expected UnresolvedAsset, got {:?}", other.map(|a| a.name)),
        }
    }

    #[test]
    fn test_find_by_kind() {
        let mut catalog = AssetCatalog::new();

        catalog.insert(Asset::new("Fireball", AssetData::Spell(SpellData {})));
        catalog.insert(Asset::new("Torch", AssetData::Item(ItemData {})));
        catalog.insert(Asset::new("Lantern", AssetData::Item(ItemData {})));

        assert_eq!(catalog.find_by_kind(AssetKind::Item).count(), 2);
        assert_eq!(catalog.find_by_kind(AssetKind::Spell).count(), 1);
        assert_eq!(catalog.find_by_kind(AssetKind::Feature).count(), 0);
    }

    #[test]
    fn test_find_with_predicate() {
        let mut catalog = AssetCatalog::new();

        catalog.insert(Asset::new("Rage", AssetData::Feature(FeatureData::new())).with_tag("barbarian"));
        catalog.insert(Asset::new("Smite", AssetData::Feature(FeatureData::new())).with_tag("paladin"));

        let barbarian: Vec<_> = catalog
            .find(|a| a.tags.iter().any(|t| t == "barbarian"))
            .collect();
        assert_eq!(barbarian.len(), 1);
        assert_eq!(barbarian[0].name, "Rage");
    }

    #[test]
    fn test_insert_json_record() {
        let mut catalog = AssetCatalog::new();

        let record = serde_json::json!({
            "id": AssetId::new(),
            "name": "Bardic Inspiration",
            "text": "",
            "tags": ["bard"],
            "created_by": "srd",
            "created_at": chrono::Utc::now(),
            "type": "resource",
            "data": { "max": 3, "recharge": "long_rest" }
        });

        let id = catalog.insert_json(&record.to_string()).unwrap();
        let asset = catalog.get(id).unwrap();
        assert_eq!(asset.as_resource().unwrap().max, 3);
    }

    #[test]
    fn test_insert_json_rejects_mismatched_payload() {
        let mut catalog = AssetCatalog::new();

        // Resource-typed record with feature-shaped data.
        let record = serde_json::json!({
            "id": AssetId::new(),
            "name": "Broken",
            "created_at": chrono::Utc::now(),
            "type": "resource",
            "data": { "grants": [] }
        });

        match catalog.insert_json(&record.to_string()) {
            Err(EngineError::MalformedRecord(_)) => {}
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
        assert!(catalog.is_empty());
    }
}
