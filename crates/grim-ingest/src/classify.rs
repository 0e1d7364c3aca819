//! Domain classification.
//!
//! A payload's domain is inferred by an ordered chain of [`Rule`]s over a
//! [`Signals`] bag. The first rule whose predicate matches decides the tag;
//! nothing matching means [`DomainTag::Generic`].
//!
//! ```text
//! monster_hint → monster_structure → npc_hint → story_arc → encounter
//!   → item → location → writing → rpg_npc_fallback → rpg_monster_fallback
//!   → (generic)
//! ```
//!
//! Monster rules run before the NPC rule because monster payloads routinely
//! carry `content_type: "character"`. RPG signals (stat block, ability scores,
//! armor class, challenge rating) veto the writing rule, so a payload that
//! looks like both is classified RPG.

use std::collections::BTreeSet;

use grim_core::DomainTag;
use grim_core::coerce::is_empty_value;
use serde::Serialize;
use serde_json::Value;

use crate::payload::prepare_payload;

/// Payload keys that mark tabletop RPG content.
const RPG_SIGNAL_KEYS: [&str; 4] = [
    "stat_block",
    "ability_scores",
    "armor_class",
    "challenge_rating",
];

/// Payload keys that mark prose content.
const PROSE_KEYS: [&str; 4] = ["formatted_text", "draft_text", "table_of_contents", "chapters"];

// ── Signals ────────────────────────────────────────────────────────

/// Normalized classification inputs extracted once from a payload.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    /// Lower-cased hint strings joined with spaces.
    hint_text: String,
    /// Alphanumeric tokens of the hint text.
    hint_tokens: BTreeSet<String>,
    /// The payload's `domain` tag, lower-cased.
    domain: String,
    /// Top-level keys with a non-empty value.
    keys: BTreeSet<String>,
    /// Top-level keys whose value is a non-empty object.
    object_keys: BTreeSet<String>,
}

impl Signals {
    /// Collect signals from a payload and optional caller hints.
    ///
    /// Hints are the caller's explicit type hint, the deliverable hint, and
    /// the payload's own `deliverable`, `content_type`, and `type` strings.
    #[must_use]
    pub fn collect(raw: &Value, explicit_type_hint: Option<&str>, deliverable_hint: Option<&str>) -> Self {
        let payload = prepare_payload(raw);

        let mut hints: Vec<String> = [explicit_type_hint, deliverable_hint]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        for key in ["deliverable", "content_type", "type"] {
            if let Some(s) = payload.get(key).and_then(Value::as_str) {
                hints.push(s.to_string());
            }
        }
        let hint_text = hints.join(" ").to_lowercase();
        let hint_tokens = hint_text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let domain = payload
            .get("domain")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        let mut keys = BTreeSet::new();
        let mut object_keys = BTreeSet::new();
        for (key, value) in &payload {
            if is_empty_value(value) {
                continue;
            }
            let key = key.to_lowercase();
            if value.is_object() {
                object_keys.insert(key.clone());
            }
            keys.insert(key);
        }

        Self {
            hint_text,
            hint_tokens,
            domain,
            keys,
            object_keys,
        }
    }

    /// Substring match over the joined hint text.
    #[must_use]
    pub fn hint_contains(&self, needle: &str) -> bool {
        self.hint_text.contains(needle)
    }

    /// Whole-token match over the hint text.
    #[must_use]
    pub fn hint_token(&self, token: &str) -> bool {
        self.hint_tokens.contains(token)
    }

    fn any_token(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.hint_token(t))
    }

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn any_key(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.has_key(k))
    }

    #[must_use]
    pub fn has_object(&self, key: &str) -> bool {
        self.object_keys.contains(key)
    }

    /// Whether any stat block, ability score, armor class, or challenge
    /// rating key is present.
    #[must_use]
    pub fn has_rpg_signal(&self) -> bool {
        self.any_key(&RPG_SIGNAL_KEYS)
    }
}

// ── Rules ──────────────────────────────────────────────────────────

/// One link of the classification chain.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub tag: DomainTag,
    pub predicate: fn(&Signals) -> bool,
}

impl Rule {
    /// `Some(tag)` when the predicate matches.
    #[must_use]
    pub fn evaluate(&self, signals: &Signals) -> Option<DomainTag> {
        (self.predicate)(signals).then_some(self.tag)
    }
}

/// The classification chain, in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "monster_hint",
        tag: DomainTag::Monster,
        predicate: monster_hint,
    },
    Rule {
        name: "monster_structure",
        tag: DomainTag::Monster,
        predicate: monster_structure,
    },
    Rule {
        name: "npc_hint",
        tag: DomainTag::Npc,
        predicate: npc_hint,
    },
    Rule {
        name: "story_arc",
        tag: DomainTag::StoryArc,
        predicate: story_arc_signal,
    },
    Rule {
        name: "encounter",
        tag: DomainTag::Encounter,
        predicate: encounter_signal,
    },
    Rule {
        name: "item",
        tag: DomainTag::Item,
        predicate: item_signal,
    },
    Rule {
        name: "location",
        tag: DomainTag::Location,
        predicate: location_signal,
    },
    Rule {
        name: "writing",
        tag: DomainTag::Writing,
        predicate: writing_signal,
    },
    Rule {
        name: "rpg_npc_fallback",
        tag: DomainTag::Npc,
        predicate: rpg_npc_fallback,
    },
    Rule {
        name: "rpg_monster_fallback",
        tag: DomainTag::Monster,
        predicate: rpg_monster_fallback,
    },
];

/// Rule name reported when nothing in [`RULES`] matched.
pub const DEFAULT_RULE: &str = "default";

fn monster_hint(s: &Signals) -> bool {
    s.hint_contains("monster") || s.hint_contains("creature")
}

fn monster_structure(s: &Signals) -> bool {
    s.has_key("stat_block")
        || s.has_object("monster")
        || (s.has_key("challenge_rating") && s.has_key("ability_scores") && s.has_key("armor_class"))
}

fn npc_hint(s: &Signals) -> bool {
    s.hint_contains("npc")
        || s.hint_contains("character")
        || s.has_object("npc")
        || s.has_object("character")
}

fn story_arc_signal(s: &Signals) -> bool {
    s.any_token(&["arc", "storyline", "campaign", "plot"])
        || s.has_object("story_arc")
        || s.has_object("arc")
        || s.has_key("acts")
        || (s.has_key("characters") && s.any_key(&["premise", "conflicts"]))
}

fn encounter_signal(s: &Signals) -> bool {
    s.any_token(&["encounter", "combat", "battle", "ambush"])
        || s.has_object("encounter")
        || (s.has_key("monsters")
            && s.any_key(&["difficulty", "xp_budget", "party_level", "objectives", "terrain"]))
}

fn item_signal(s: &Signals) -> bool {
    s.any_token(&["item", "artifact", "weapon", "relic", "trinket"])
        || s.has_object("item")
        || s.any_key(&["rarity", "requires_attunement", "attunement", "item_type", "properties_v2"])
}

fn location_signal(s: &Signals) -> bool {
    s.any_token(&[
        "location",
        "place",
        "settlement",
        "city",
        "town",
        "village",
        "dungeon",
        "region",
        "landmark",
    ]) || s.has_object("location")
        || s.any_key(&["points_of_interest", "location_type"])
}

fn writing_signal(s: &Signals) -> bool {
    if s.has_rpg_signal() {
        return false;
    }
    s.has_object("work")
        || s.any_key(&PROSE_KEYS)
        || s.domain == "writing"
        || s.any_token(&["writing", "prose", "nonfiction", "manuscript", "essay"])
}

fn rpg_npc_fallback(s: &Signals) -> bool {
    s.any_key(&["ability_scores", "armor_class"])
}

fn rpg_monster_fallback(s: &Signals) -> bool {
    s.has_key("challenge_rating")
}

// ── Entry points ───────────────────────────────────────────────────

/// A classification decision and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tag: DomainTag,
    pub rule: &'static str,
}

/// Infer the domain of `raw`, reporting which rule decided.
#[must_use]
pub fn classify_traced(
    raw: &Value,
    explicit_type_hint: Option<&str>,
    deliverable_hint: Option<&str>,
) -> Classification {
    let signals = Signals::collect(raw, explicit_type_hint, deliverable_hint);
    let decision = RULES
        .iter()
        .find_map(|rule| rule.evaluate(&signals).map(|tag| Classification { tag, rule: rule.name }))
        .unwrap_or(Classification {
            tag: DomainTag::Generic,
            rule: DEFAULT_RULE,
        });
    tracing::debug!(tag = %decision.tag, rule = decision.rule, "classified payload");
    decision
}

/// Infer the domain of `raw`.
#[must_use]
pub fn classify(raw: &Value, explicit_type_hint: Option<&str>, deliverable_hint: Option<&str>) -> DomainTag {
    classify_traced(raw, explicit_type_hint, deliverable_hint).tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn monster_hint_beats_character_content_type() {
        let raw = json!({"deliverable": "monster", "content_type": "character", "challenge_rating": "3"});
        let decision = classify_traced(&raw, None, None);
        assert_eq!(decision.tag, DomainTag::Monster);
        assert_eq!(decision.rule, "monster_hint");
    }

    #[test]
    fn monster_structure_requires_all_three_stats() {
        let partial = Signals::collect(&json!({"challenge_rating": "2", "ability_scores": {"str": 10}}), None, None);
        assert!(rule("monster_structure").evaluate(&partial).is_none());

        let full = Signals::collect(
            &json!({"challenge_rating": "2", "ability_scores": {"str": 10}, "armor_class": 12}),
            None,
            None,
        );
        assert_eq!(rule("monster_structure").evaluate(&full), Some(DomainTag::Monster));
    }

    #[rstest]
    #[case(json!({"deliverable": "npc", "name": "Mira"}), DomainTag::Npc)]
    #[case(json!({"content_type": "character"}), DomainTag::Npc)]
    #[case(json!({"character": {"name": "Mira"}}), DomainTag::Npc)]
    #[case(json!({"monster": {"name": "Owlbear"}}), DomainTag::Monster)]
    #[case(json!({"stat_block": {"ac": 12}}), DomainTag::Monster)]
    #[case(json!({"deliverable": "story_arc"}), DomainTag::StoryArc)]
    #[case(json!({"acts": [{"name": "Act 1"}]}), DomainTag::StoryArc)]
    #[case(json!({"deliverable": "combat encounter"}), DomainTag::Encounter)]
    #[case(json!({"monsters": ["Goblin"], "difficulty": "hard"}), DomainTag::Encounter)]
    #[case(json!({"deliverable": "magic item"}), DomainTag::Item)]
    #[case(json!({"rarity": "rare"}), DomainTag::Item)]
    #[case(json!({"deliverable": "location"}), DomainTag::Location)]
    #[case(json!({"points_of_interest": ["Well"]}), DomainTag::Location)]
    #[case(json!({"work": {"title": "Essays"}}), DomainTag::Writing)]
    #[case(json!({"chapters": ["One"]}), DomainTag::Writing)]
    #[case(json!({"domain": "writing"}), DomainTag::Writing)]
    #[case(json!({"anything": "else"}), DomainTag::Generic)]
    #[case(json!("just a string"), DomainTag::Generic)]
    fn classifies_payload(#[case] raw: Value, #[case] expected: DomainTag) {
        assert_eq!(classify(&raw, None, None), expected);
    }

    #[test]
    fn arc_token_does_not_match_inside_character() {
        let signals = Signals::collect(&json!({"deliverable": "character sheet"}), None, None);
        assert!(!signals.hint_token("arc"));
        assert!(signals.hint_contains("character"));
    }

    #[test]
    fn rpg_signal_vetoes_writing() {
        let raw = json!({"chapters": ["One"], "ability_scores": {"str": 12}});
        let decision = classify_traced(&raw, None, None);
        assert_eq!(decision.tag, DomainTag::Npc);
        assert_eq!(decision.rule, "rpg_npc_fallback");
    }

    #[test]
    fn writing_domain_tag_with_challenge_rating_is_monster() {
        let raw = json!({"domain": "writing", "formatted_text": "...", "challenge_rating": 5});
        assert_eq!(classify(&raw, None, None), DomainTag::Monster);
    }

    #[test]
    fn caller_hints_participate() {
        let raw = json!({"name": "Vault of Ash"});
        assert_eq!(classify(&raw, Some("location"), None), DomainTag::Location);
        assert_eq!(classify(&raw, None, Some("creature")), DomainTag::Monster);
    }

    #[test]
    fn draft_keys_are_classified() {
        let raw = json!({"draft": {"rarity": "uncommon"}});
        assert_eq!(classify(&raw, None, None), DomainTag::Item);
    }

    #[test]
    fn empty_values_are_not_signals() {
        let raw = json!({"stat_block": {}, "rarity": ""});
        assert_eq!(classify_traced(&raw, None, None).rule, DEFAULT_RULE);
    }
}
