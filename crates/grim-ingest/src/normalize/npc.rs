use grim_core::DomainTag;
use grim_core::coerce::{
    ensure_string_array, first_object, first_opt_string, first_string_array, first_value,
};
use grim_core::entities::{NpcRecord, Personality};
use serde_json::{Map, Value};

use super::common::{
    FieldView, normalize_armor_class, normalize_challenge_rating, normalize_class_levels,
    normalize_hit_points, normalize_relationships, normalize_speed, normalize_spellcasting,
};
use super::{ASSUMPTIONS, SOURCES_USED};
use crate::field_map::{self, SCHEMA_VERSION_VARIANTS, map_fields};

const NAME: &[&str] = &["name"];
const TITLE: &[&str] = &["title", "epithet", "honorific"];
const RACE: &[&str] = &["race", "species", "ancestry"];
const ROLE: &[&str] = &["role", "occupation", "profession"];
const ALIGNMENT: &[&str] = &["alignment"];
const BACKGROUND: &[&str] = &["background", "backstory", "history"];
const DESCRIPTION: &[&str] = &["description", "summary", "bio"];
const APPEARANCE: &[&str] = &["appearance", "physical_description", "looks"];
const PERSONALITY: &[&str] = &["personality"];
const MOTIVATIONS: &[&str] = &["motivations", "motivation", "goals"];
const HOOKS: &[&str] = &["hooks", "plot_hooks", "adventure_hooks"];
/// Stat-block `traits` only reaches here when the mapper did not claim it as
/// personality.
const ABILITIES: &[&str] = &["abilities", "features", "special_abilities", "traits"];
const SKILLS: &[&str] = &["skills"];
const SAVING_THROWS: &[&str] = &["saving_throws", "saves", "saving_throw"];
const TACTICS: &[&str] = &["tactics", "combat_tactics"];
const CLASS_LEVELS: &[&str] = &["class_levels", "classes", "class", "level", "character_level", "subclass"];
const ABILITY_SCORES: &[&str] = &["ability_scores"];
pub(super) const ARMOR_CLASS: &[&str] = &["armor_class", "ac", "armorClass"];
pub(super) const HIT_POINTS: &[&str] = &["hit_points", "hp", "hitPoints"];
pub(super) const HIT_DICE: &[&str] = &["hit_dice", "hitDice"];
const SPEED: &[&str] = &["speed"];
pub(super) const PROFICIENCY_BONUS: &[&str] = &["proficiency_bonus", "proficiency"];
pub(super) const CHALLENGE_RATING: &[&str] = &["challenge_rating", "cr", "challenge"];
const SENSES: &[&str] = &["senses"];
const LANGUAGES: &[&str] = &["languages"];
const SPELLCASTING: &[&str] = &["spellcasting", "spells"];
const EQUIPMENT: &[&str] = &["equipment"];
const MAGIC_ITEMS: &[&str] = &["magic_items"];
const ACTIONS: &[&str] = &["actions"];
const BONUS_ACTIONS: &[&str] = &["bonus_actions"];
const REACTIONS: &[&str] = &["reactions"];
const LEGENDARY_ACTIONS: &[&str] = &["legendary_actions"];
const RELATIONSHIPS: &[&str] = &["relationships", "allies", "connections"];
const STAT_BLOCK: &[&str] = &["stat_block", "statblock"];

pub(super) const FIELDS: &[&[&str]] = &[
    NAME,
    TITLE,
    RACE,
    ROLE,
    ALIGNMENT,
    BACKGROUND,
    DESCRIPTION,
    APPEARANCE,
    PERSONALITY,
    MOTIVATIONS,
    HOOKS,
    ABILITIES,
    SKILLS,
    SAVING_THROWS,
    TACTICS,
    CLASS_LEVELS,
    ABILITY_SCORES,
    ARMOR_CLASS,
    HIT_POINTS,
    HIT_DICE,
    SPEED,
    PROFICIENCY_BONUS,
    CHALLENGE_RATING,
    SENSES,
    LANGUAGES,
    SPELLCASTING,
    EQUIPMENT,
    MAGIC_ITEMS,
    ACTIONS,
    BONUS_ACTIONS,
    REACTIONS,
    LEGENDARY_ACTIONS,
    RELATIONSHIPS,
    STAT_BLOCK,
    SOURCES_USED,
    ASSUMPTIONS,
    SCHEMA_VERSION_VARIANTS,
];

/// Normalize an NPC payload.
///
/// Stat-block fields (`stat_block.armor_class`, `stat_block.actions`, ...)
/// fill any top-level gap. Armor class and hit points stay `None` when
/// nothing usable was supplied.
#[must_use]
pub fn normalize_npc(raw: &Value) -> NpcRecord {
    let mapped = map_fields(DomainTag::Npc, raw).mapped;
    let stat_block = first_object(&mapped, STAT_BLOCK);
    let view = FieldView::with_fallback(&mapped, stat_block);
    let hit_dice = view.opt_string(HIT_DICE);

    NpcRecord {
        name: view.string(NAME),
        title: view.string(TITLE),
        race: view.string(RACE),
        role: view.string(ROLE),
        alignment: view.string(ALIGNMENT),
        background: view.string(BACKGROUND),
        description: view.string(DESCRIPTION),
        appearance: view.string(APPEARANCE),
        personality: personality(&mapped),
        motivations: first_string_array(&mapped, MOTIVATIONS),
        hooks: first_string_array(&mapped, HOOKS),
        abilities: view.features(ABILITIES),
        skills: view.scored(SKILLS),
        saving_throws: view.scored(SAVING_THROWS),
        tactics: view.text(TACTICS),
        class_levels: normalize_class_levels(&view),
        ability_scores: field_map::resolve_ability_scores(&mapped).scores,
        armor_class: view.value(ARMOR_CLASS).and_then(normalize_armor_class),
        hit_points: view
            .value(HIT_POINTS)
            .and_then(|hp| normalize_hit_points(hp, hit_dice.as_deref())),
        speed: normalize_speed(view.value(SPEED)),
        proficiency_bonus: view.integer(PROFICIENCY_BONUS),
        challenge_rating: normalize_challenge_rating(view.value(CHALLENGE_RATING)),
        senses: view.list(SENSES),
        languages: view.list(LANGUAGES),
        spellcasting: view.value(SPELLCASTING).and_then(normalize_spellcasting),
        equipment: view.strings(EQUIPMENT),
        magic_items: view.strings(MAGIC_ITEMS),
        actions: view.features(ACTIONS),
        bonus_actions: view.features(BONUS_ACTIONS),
        reactions: view.features(REACTIONS),
        legendary_actions: view.features(LEGENDARY_ACTIONS),
        relationships: first_value(&mapped, RELATIONSHIPS)
            .map(normalize_relationships)
            .unwrap_or_default(),
        stat_block: first_value(&mapped, STAT_BLOCK).cloned(),
        sources_used: first_string_array(&mapped, SOURCES_USED),
        assumptions: first_string_array(&mapped, ASSUMPTIONS),
        schema_version: first_opt_string(&mapped, &["schema_version"]),
    }
}

fn personality(mapped: &Map<String, Value>) -> Personality {
    let nested = first_object(mapped, PERSONALITY);
    let list = |key: &str| nested.get(key).map(ensure_string_array).unwrap_or_default();
    Personality {
        traits: list("traits"),
        ideals: list("ideals"),
        bonds: list("bonds"),
        flaws: list("flaws"),
    }
}
