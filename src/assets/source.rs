//! The asset lookup capability.
//!
//! The engine never knows how assets are stored. It depends on this one
//! trait; the surrounding application injects whatever backs it - an
//! in-memory [`AssetCatalog`](super::AssetCatalog), a database layer, a
//! remote content service. A source must be total over every id reachable
//! from a character's attached assets or any `grants` list, and is treated
//! as authoritative and side-effect-free for the duration of one
//! computation.

use crate::error::Result;

use super::asset::{Asset, AssetId};

/// Resolves an asset id to its content.
pub trait AssetSource {
    /// Load the asset with the given id.
    ///
    /// Returns [`EngineError::UnresolvedAsset`](crate::EngineError::UnresolvedAsset)
    /// if the id is unknown. Implementations that decode stored records
    /// surface decode failures as
    /// [`EngineError::MalformedRecord`](crate::EngineError::MalformedRecord).
    fn load(&self, id: AssetId) -> Result<Asset>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn load(&self, id: AssetId) -> Result<Asset> {
        (**self).load(id)
    }
}
