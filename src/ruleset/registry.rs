//! Keyed registry of stat and skill definitions, with authoring validation.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::assets::Modifier;

use super::definitions::{is_valid_skill_key, is_valid_stat_key, Skill, Stat};

/// Authoring-time validation failures.
///
/// Kept separate from [`EngineError`](crate::EngineError): these belong to
/// the content-authoring surface, not to totals computation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RulesetError {
    #[error("invalid stat key {0:?}: expected 3 characters of [A-Z_]")]
    InvalidStatKey(String),

    #[error("invalid skill key {0:?}: expected 5 characters of [A-Z_]")]
    InvalidSkillKey(String),

    #[error("stat {0:?} does not exist")]
    UnknownStat(String),

    #[error("unknown modifier target: {0:?}")]
    UnknownTarget(String),
}

/// The set of stat and skill definitions modifiers are authored against.
///
/// ## Example
///
/// ```
/// use charsheet_engine::assets::Modifier;
/// use charsheet_engine::ruleset::Ruleset;
///
/// let rules = Ruleset::standard();
/// assert!(rules.validate_modifier(&Modifier::add("STR", 2)).is_ok());
/// assert!(rules.validate_modifier(&Modifier::add("MANA", 5)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ruleset {
    stats: FxHashMap<String, Stat>,
    skills: FxHashMap<String, Skill>,
}

impl Ruleset {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule set: six core stats and eighteen core skills.
    #[must_use]
    pub fn standard() -> Self {
        let mut rules = Self::new();

        for (key, name) in [
            ("STR", "Strength"),
            ("DEX", "Dexterity"),
            ("CON", "Constitution"),
            ("INT", "Intelligence"),
            ("WIS", "Wisdom"),
            ("CHA", "Charisma"),
        ] {
            rules
                .add_stat(Stat::new(key, name).standard())
                .expect("standard stat keys are valid");
        }

        for (key, name, stat) in [
            ("ACRBT", "Acrobatics", "DEX"),
            ("ANIMH", "Animal Handling", "WIS"),
            ("ARCAN", "Arcana", "INT"),
            ("ATHLE", "Athletics", "STR"),
            ("DECEP", "Deception", "CHA"),
            ("HISTO", "History", "INT"),
            ("INSIG", "Insight", "WIS"),
            ("INTIM", "Intimidation", "CHA"),
            ("INVES", "Investigation", "INT"),
            ("MEDIC", "Medicine", "WIS"),
            ("NATUR", "Nature", "INT"),
            ("PERCE", "Perception", "WIS"),
            ("PERFO", "Performance", "CHA"),
            ("PERSU", "Persuasion", "CHA"),
            ("RELIG", "Religion", "INT"),
            ("SLEIG", "Sleight of Hand", "DEX"),
            ("STEAL", "Stealth", "DEX"),
            ("SURVI", "Survival", "WIS"),
        ] {
            rules
                .add_skill(Skill::new(key, name, stat).standard())
                .expect("standard skill definitions are valid");
        }

        rules
    }

    /// Register a stat definition.
    pub fn add_stat(&mut self, stat: Stat) -> Result<(), RulesetError> {
        if !is_valid_stat_key(&stat.key) {
            return Err(RulesetError::InvalidStatKey(stat.key));
        }
        self.stats.insert(stat.key.clone(), stat);
        Ok(())
    }

    /// Register a skill definition. Its governing stat must already exist.
    pub fn add_skill(&mut self, skill: Skill) -> Result<(), RulesetError> {
        if !is_valid_skill_key(&skill.key) {
            return Err(RulesetError::InvalidSkillKey(skill.key));
        }
        if !self.stats.contains_key(&skill.governing_stat_key) {
            return Err(RulesetError::UnknownStat(skill.governing_stat_key));
        }
        self.skills.insert(skill.key.clone(), skill);
        Ok(())
    }

    /// Look up a stat by key.
    #[must_use]
    pub fn stat(&self, key: &str) -> Option<&Stat> {
        self.stats.get(key)
    }

    /// Look up a skill by key.
    #[must_use]
    pub fn skill(&self, key: &str) -> Option<&Skill> {
        self.skills.get(key)
    }

    /// Iterate all stat definitions.
    pub fn stats(&self) -> impl Iterator<Item = &Stat> {
        self.stats.values()
    }

    /// Iterate all skill definitions.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Check that a modifier targets a known stat or skill key.
    ///
    /// This is the authoring-time half of the contract: the engine assumes
    /// stored modifiers passed this check and never re-validates.
    pub fn validate_modifier(&self, modifier: &Modifier) -> Result<(), RulesetError> {
        let key = modifier.target_key.as_str();
        if self.stats.contains_key(key) || self.skills.contains_key(key) {
            Ok(())
        } else {
            Err(RulesetError::UnknownTarget(modifier.target_key.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_content() {
        let rules = Ruleset::standard();

        assert_eq!(rules.stats().count(), 6);
        assert_eq!(rules.skills().count(), 18);
        assert_eq!(rules.stat("STR").unwrap().name, "Strength");
        assert_eq!(rules.skill("STEAL").unwrap().governing_stat_key, "DEX");
        assert!(rules.stats().all(|s| s.default));
    }

    #[test]
    fn test_add_stat_rejects_bad_key() {
        let mut rules = Ruleset::new();

        let err = rules.add_stat(Stat::new("STRENGTH", "Strength")).unwrap_err();
        assert_eq!(err, RulesetError::InvalidStatKey("STRENGTH".to_string()));
    }

    #[test]
    fn test_add_skill_requires_governing_stat() {
        let mut rules = Ruleset::new();

        let err = rules
            .add_skill(Skill::new("STEAL", "Stealth", "DEX"))
            .unwrap_err();
        assert_eq!(err, RulesetError::UnknownStat("DEX".to_string()));

        rules.add_stat(Stat::new("DEX", "Dexterity")).unwrap();
        assert!(rules.add_skill(Skill::new("STEAL", "Stealth", "DEX")).is_ok());
    }

    #[test]
    fn test_validate_modifier() {
        let rules = Ruleset::standard();

        assert!(rules.validate_modifier(&Modifier::set("CON", 14)).is_ok());
        assert!(rules.validate_modifier(&Modifier::add("PERCE", 1)).is_ok());

        let err = rules.validate_modifier(&Modifier::add("LUCK", 1)).unwrap_err();
        assert_eq!(err, RulesetError::UnknownTarget("LUCK".to_string()));
    }
}
