use std::sync::LazyLock;

use grim_core::DomainTag;
use grim_core::coerce::{first_object, first_opt_string, first_string_array};
use grim_core::entities::{ArmorClass, HitPoints, MonsterRecord};
use regex::Regex;
use serde_json::Value;

use super::common::{
    FieldView, normalize_armor_class, normalize_challenge_rating,
    normalize_hit_points, normalize_speed,
};
use super::npc::{ARMOR_CLASS, CHALLENGE_RATING, HIT_DICE, HIT_POINTS, PROFICIENCY_BONUS};
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{SCHEMA_VERSION_VARIANTS, map_fields, resolve_ability_scores};

/// `Large dragon (chromatic), chaotic evil`.
static META_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(tiny|small|medium|large|huge|gargantuan)\s+([^,(]+?)\s*(?:\(([^)]*)\))?\s*(?:,\s*(.+?))?\s*$",
    )
    .expect("pattern is valid")
});

/// Experience points by challenge rating.
const XP_BY_CR: [(&str, i64); 34] = [
    ("0", 10),
    ("1/8", 25),
    ("1/4", 50),
    ("1/2", 100),
    ("1", 200),
    ("2", 450),
    ("3", 700),
    ("4", 1_100),
    ("5", 1_800),
    ("6", 2_300),
    ("7", 2_900),
    ("8", 3_900),
    ("9", 5_000),
    ("10", 5_900),
    ("11", 7_200),
    ("12", 8_400),
    ("13", 10_000),
    ("14", 11_500),
    ("15", 13_000),
    ("16", 15_000),
    ("17", 18_000),
    ("18", 20_000),
    ("19", 22_000),
    ("20", 25_000),
    ("21", 33_000),
    ("22", 41_000),
    ("23", 50_000),
    ("24", 62_000),
    ("25", 75_000),
    ("26", 90_000),
    ("27", 105_000),
    ("28", 120_000),
    ("29", 135_000),
    ("30", 155_000),
];

const NAME: &[&str] = &["name"];
const SIZE: &[&str] = &["size"];
const CREATURE_TYPE: &[&str] = &["creature_type", "monster_type", "creatureType"];
const SUBTYPE: &[&str] = &["subtype", "tags"];
const ALIGNMENT: &[&str] = &["alignment"];
const META_LINE: &[&str] = &["meta", "size_type_alignment", "type_line"];
const DESCRIPTION: &[&str] = &["description", "summary", "lore"];
const SPEED: &[&str] = &["speed"];
const ABILITY_SCORES: &[&str] = &["ability_scores"];
const SAVING_THROWS: &[&str] = &["saving_throws", "saves", "saving_throw"];
const SKILLS: &[&str] = &["skills"];
const DAMAGE_RESISTANCES: &[&str] = &["damage_resistances", "resistances"];
const DAMAGE_IMMUNITIES: &[&str] = &["damage_immunities", "immunities"];
const DAMAGE_VULNERABILITIES: &[&str] = &["damage_vulnerabilities", "vulnerabilities"];
const CONDITION_IMMUNITIES: &[&str] = &["condition_immunities"];
const SENSES: &[&str] = &["senses"];
const LANGUAGES: &[&str] = &["languages"];
const EXPERIENCE_POINTS: &[&str] = &["experience_points", "xp"];
const ABILITIES: &[&str] = &["abilities", "traits", "special_abilities", "features"];
const ACTIONS: &[&str] = &["actions"];
const BONUS_ACTIONS: &[&str] = &["bonus_actions"];
const REACTIONS: &[&str] = &["reactions"];
const LEGENDARY_ACTIONS: &[&str] = &["legendary_actions"];
const LAIR_ACTIONS: &[&str] = &["lair_actions"];
const TACTICS: &[&str] = &["tactics", "combat_tactics"];
const HABITAT: &[&str] = &["habitat", "environment", "environments"];

pub(super) const FIELDS: &[&[&str]] = &[
    NAME,
    SIZE,
    CREATURE_TYPE,
    SUBTYPE,
    ALIGNMENT,
    META_LINE,
    DESCRIPTION,
    ARMOR_CLASS,
    HIT_POINTS,
    HIT_DICE,
    SPEED,
    ABILITY_SCORES,
    SAVING_THROWS,
    SKILLS,
    DAMAGE_RESISTANCES,
    DAMAGE_IMMUNITIES,
    DAMAGE_VULNERABILITIES,
    CONDITION_IMMUNITIES,
    SENSES,
    LANGUAGES,
    CHALLENGE_RATING,
    EXPERIENCE_POINTS,
    PROFICIENCY_BONUS,
    ABILITIES,
    ACTIONS,
    BONUS_ACTIONS,
    REACTIONS,
    LEGENDARY_ACTIONS,
    LAIR_ACTIONS,
    TACTICS,
    HABITAT,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

/// Size, type, subtype, and alignment split out of a stat-block meta line.
#[derive(Debug, Default, PartialEq, Eq)]
struct MetaLine {
    size: String,
    creature_type: String,
    subtype: String,
    alignment: String,
}

fn parse_meta_line(line: &str) -> MetaLine {
    META_LINE_RE
        .captures(line)
        .map(|caps| {
            let group = |i: usize| caps.get(i).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
            MetaLine {
                size: capitalize(&group(1)),
                creature_type: group(2),
                subtype: group(3),
                alignment: group(4),
            }
        })
        .unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Experience points for a challenge rating string, if it is a standard one.
#[must_use]
pub fn experience_for_challenge(challenge_rating: &str) -> Option<i64> {
    let cr = challenge_rating.trim();
    XP_BY_CR.iter().find(|(rating, _)| *rating == cr).map(|(_, xp)| *xp)
}

/// Normalize a monster payload.
///
/// Unlike NPCs, armor class defaults to `0` and hit points to an average of
/// `0` when missing or unreadable. `stat_block.hit_dice` supplies the
/// hit-point formula when the hit points carry none.
#[must_use]
pub fn normalize_monster(raw: &Value) -> MonsterRecord {
    let mapped = map_fields(DomainTag::Monster, raw).mapped;
    let stat_block = first_object(&mapped, &["stat_block", "statblock"]);
    let view = FieldView::with_fallback(&mapped, stat_block);
    let meta = view.opt_string(META_LINE).map(|line| parse_meta_line(&line)).unwrap_or_default();
    let or_meta = |value: String, fallback: String| if value.is_empty() { fallback } else { value };

    let hit_dice = view.opt_string(HIT_DICE);
    let hit_points = view
        .value(HIT_POINTS)
        .and_then(|hp| normalize_hit_points(hp, hit_dice.as_deref()))
        .unwrap_or_default();
    let challenge_rating = normalize_challenge_rating(view.value(CHALLENGE_RATING));

    MonsterRecord {
        name: view.string(NAME),
        size: or_meta(view.string(SIZE), meta.size),
        creature_type: or_meta(view.descriptive(CREATURE_TYPE), meta.creature_type),
        subtype: or_meta(view.text(SUBTYPE), meta.subtype),
        alignment: or_meta(view.string(ALIGNMENT), meta.alignment),
        description: view.string(DESCRIPTION),
        armor_class: view
            .value(ARMOR_CLASS)
            .and_then(normalize_armor_class)
            .unwrap_or(ArmorClass::Value(0)),
        hit_points: HitPoints {
            average: hit_points.average.or(Some(0)),
            ..hit_points
        },
        speed: normalize_speed(view.value(SPEED)),
        ability_scores: resolve_ability_scores(&mapped).scores,
        saving_throws: view.scored(SAVING_THROWS),
        skills: view.scored(SKILLS),
        damage_resistances: view.list(DAMAGE_RESISTANCES),
        damage_immunities: view.list(DAMAGE_IMMUNITIES),
        damage_vulnerabilities: view.list(DAMAGE_VULNERABILITIES),
        condition_immunities: view.list(CONDITION_IMMUNITIES),
        senses: view.list(SENSES),
        languages: view.list(LANGUAGES),
        experience_points: view
            .integer(EXPERIENCE_POINTS)
            .or_else(|| experience_for_challenge(&challenge_rating)),
        challenge_rating,
        proficiency_bonus: view.integer(PROFICIENCY_BONUS),
        abilities: view.features(ABILITIES),
        actions: view.features(ACTIONS),
        bonus_actions: view.features(BONUS_ACTIONS),
        reactions: view.features(REACTIONS),
        legendary_actions: view.features(LEGENDARY_ACTIONS),
        lair_actions: view.features(LAIR_ACTIONS),
        tactics: view.text(TACTICS),
        habitat: view.text(HABITAT),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}
