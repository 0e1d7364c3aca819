use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default value of any ability score the producer did not supply.
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// The six ability scores. Always fully populated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AbilityScores {
    #[schemars(range(min = 0, max = 30))]
    pub str: i64,
    #[schemars(range(min = 0, max = 30))]
    pub dex: i64,
    #[schemars(range(min = 0, max = 30))]
    pub con: i64,
    #[schemars(range(min = 0, max = 30))]
    pub int: i64,
    #[schemars(range(min = 0, max = 30))]
    pub wis: i64,
    #[schemars(range(min = 0, max = 30))]
    pub cha: i64,
}

impl AbilityScores {
    /// Canonical short keys, in rendering order.
    pub const KEYS: [&'static str; 6] = ["str", "dex", "con", "int", "wis", "cha"];

    /// Score for a canonical short key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        match key {
            "str" => Some(self.str),
            "dex" => Some(self.dex),
            "con" => Some(self.con),
            "int" => Some(self.int),
            "wis" => Some(self.wis),
            "cha" => Some(self.cha),
            _ => None,
        }
    }

    /// Set the score for a canonical short key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, score: i64) {
        match key {
            "str" => self.str = score,
            "dex" => self.dex = score,
            "con" => self.con = score,
            "int" => self.int = score,
            "wis" => self.wis = score,
            "cha" => self.cha = score,
            _ => {}
        }
    }

    /// `(key, score)` pairs in STR..CHA order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, i64); 6] {
        [
            ("str", self.str),
            ("dex", self.dex),
            ("con", self.con),
            ("int", self.int),
            ("wis", self.wis),
            ("cha", self.cha),
        ]
    }

    /// The standard modifier `floor((score - 10) / 2)`.
    #[must_use]
    pub const fn modifier(score: i64) -> i64 {
        (score - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            str: DEFAULT_ABILITY_SCORE,
            dex: DEFAULT_ABILITY_SCORE,
            con: DEFAULT_ABILITY_SCORE,
            int: DEFAULT_ABILITY_SCORE,
            wis: DEFAULT_ABILITY_SCORE,
            cha: DEFAULT_ABILITY_SCORE,
        }
    }
}

/// One annotated armor class entry, e.g. `15 (natural armor)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArmorClassEntry {
    #[schemars(range(min = 0))]
    pub value: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Armor class: either a bare number or a list of annotated entries.
/// Never a bare string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum ArmorClass {
    Value(i64),
    Entries(Vec<ArmorClassEntry>),
}

impl ArmorClass {
    /// The headline number: the bare value, or the first entry's value.
    #[must_use]
    pub fn primary_value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Entries(entries) => entries.first().map(|e| e.value),
        }
    }
}

/// Hit points parsed from forms like `"138 (12d12+60)"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HitPoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HitPoints {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.average.is_none() && self.formula.is_none() && self.notes.is_none()
    }
}

/// A named ability, action, reaction, or legendary action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A named bonus such as a saving throw, a skill, or a spell-slot count.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScoredEntry {
    pub name: String,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A character's tie to another person or faction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Relationship {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One class in a (possibly multiclass) character build.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassLevel {
    pub class: String,
    #[schemars(range(min = 0, max = 30))]
    pub level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
}

/// Condensed spellcasting details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpellcastingSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_dc: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i64>,
    pub cantrips: Vec<String>,
    pub spells: Vec<String>,
    /// Slot counts keyed by level label (`"1st"`, `"2nd"`, ...).
    pub slots: Vec<ScoredEntry>,
}

impl SpellcastingSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ability.is_none()
            && self.save_dc.is_none()
            && self.attack_bonus.is_none()
            && self.cantrips.is_empty()
            && self.spells.is_empty()
            && self.slots.is_empty()
    }
}

/// The four personality lists of a character.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Personality {
    pub traits: Vec<String>,
    pub ideals: Vec<String>,
    pub bonds: Vec<String>,
    pub flaws: Vec<String>,
}

impl Personality {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty() && self.ideals.is_empty() && self.bonds.is_empty() && self.flaws.is_empty()
    }
}
