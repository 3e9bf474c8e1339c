//! Stat and skill definitions.
//!
//! Keys are short fixed-width uppercase mnemonics: three characters for
//! stats ("STR"), five for skills ("STEAL"). The width difference keeps the
//! two namespaces visually distinct on a sheet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Check a stat key: exactly 3 characters from `[A-Z_]`.
#[must_use]
pub fn is_valid_stat_key(key: &str) -> bool {
    key.len() == 3 && key.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Check a skill key: exactly 5 characters from `[A-Z_]`.
#[must_use]
pub fn is_valid_skill_key(key: &str) -> bool {
    key.len() == 5 && key.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// A stat definition (ability score).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Unique identifier.
    pub id: Uuid,

    /// Canonical key ("STR").
    pub key: String,

    /// Display name ("Strength").
    pub name: String,

    /// Authoring description.
    #[serde(default)]
    pub description: String,

    /// Part of the standard rule set.
    #[serde(default)]
    pub default: bool,
}

impl Stat {
    /// Create a stat definition with a fresh id.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            name: name.into(),
            description: String::new(),
            default: false,
        }
    }

    /// Mark as standard content (builder pattern).
    #[must_use]
    pub fn standard(mut self) -> Self {
        self.default = true;
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A skill definition, governed by one stat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique identifier.
    pub id: Uuid,

    /// Canonical key ("STEAL").
    pub key: String,

    /// Display name ("Stealth").
    pub name: String,

    /// Key of the governing stat.
    pub governing_stat_key: String,

    /// Part of the standard rule set.
    #[serde(default)]
    pub default: bool,
}

impl Skill {
    /// Create a skill definition with a fresh id.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        governing_stat_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            name: name.into(),
            governing_stat_key: governing_stat_key.into(),
            default: false,
        }
    }

    /// Mark as standard content (builder pattern).
    #[must_use]
    pub fn standard(mut self) -> Self {
        self.default = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_key_format() {
        assert!(is_valid_stat_key("STR"));
        assert!(is_valid_stat_key("A_Z"));
        assert!(!is_valid_stat_key("ST"));
        assert!(!is_valid_stat_key("STRE"));
        assert!(!is_valid_stat_key("str"));
        assert!(!is_valid_stat_key("ST1"));
    }

    #[test]
    fn test_skill_key_format() {
        assert!(is_valid_skill_key("STEAL"));
        assert!(is_valid_skill_key("A___Z"));
        assert!(!is_valid_skill_key("STL"));
        assert!(!is_valid_skill_key("STEALTH"));
        assert!(!is_valid_skill_key("steal"));
    }

    #[test]
    fn test_builders() {
        let stat = Stat::new("STR", "Strength").standard();
        assert!(stat.default);
        assert_eq!(stat.key, "STR");

        let skill = Skill::new("ATHLE", "Athletics", "STR");
        assert!(!skill.default);
        assert_eq!(skill.governing_stat_key, "STR");
    }
}
