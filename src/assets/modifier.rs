//! Modifiers - single rules targeting one stat or skill key.
//!
//! A modifier either overrides a score outright (`Set`) or adjusts it
//! (`Add`). Modifiers have no independent lifecycle: they live inside the
//! feature asset that declares them. Target keys are validated against the
//! rule set at authoring time, never re-checked during computation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierId(Uuid);

impl ModifierId {
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

impl Default for ModifierId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a modifier combines with the score it targets.
///
/// Reduction applies every `Set` before any `Add`, so an absolute override
/// beats any number of additive bonuses regardless of attachment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierOp {
    /// Override the score with `value`.
    Set,
    /// Accumulate `value` onto the score.
    Add,
}

/// A single additive or absolute rule targeting one stat/skill key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// Unique identifier.
    pub id: ModifierId,

    /// The stat or skill key this modifier affects.
    pub target_key: String,

    /// How the value combines with the target.
    pub op: ModifierOp,

    /// The amount set or added.
    pub value: i64,
}

impl Modifier {
    /// Create a modifier with a fresh id.
    #[must_use]
    pub fn new(target_key: impl Into<String>, op: ModifierOp, value: i64) -> Self {
        Self {
            id: ModifierId::new(),
            target_key: target_key.into(),
            op,
            value,
        }
    }

    /// Shorthand for an absolute override.
    #[must_use]
    pub fn set(target_key: impl Into<String>, value: i64) -> Self {
        Self::new(target_key, ModifierOp::Set, value)
    }

    /// Shorthand for an additive bonus.
    #[must_use]
    pub fn add(target_key: impl Into<String>, value: i64) -> Self {
        Self::new(target_key, ModifierOp::Add, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands() {
        let set = Modifier::set("HP", 10);
        assert_eq!(set.op, ModifierOp::Set);
        assert_eq!(set.target_key, "HP");
        assert_eq!(set.value, 10);

        let add = Modifier::add("STR", -1);
        assert_eq!(add.op, ModifierOp::Add);
        assert_eq!(add.value, -1);
    }

    #[test]
    fn test_op_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ModifierOp::Set).unwrap(), "\"set\"");
        assert_eq!(serde_json::to_string(&ModifierOp::Add).unwrap(), "\"add\"");
    }

    #[test]
    fn test_serialization_round_trip() {
        let modifier = Modifier::add("STEAL", 2);
        let json = serde_json::to_string(&modifier).unwrap();
        let back: Modifier = serde_json::from_str(&json).unwrap();
        assert_eq!(modifier, back);
    }
}
