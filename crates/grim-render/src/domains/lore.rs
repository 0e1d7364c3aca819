//! Items, places, arcs, and encounters: the lighter campaign domains.

use grim_core::entities::{EncounterMonster, EncounterRecord, ItemRecord, LocationRecord, StoryArcRecord};

use crate::RenderOptions;
use crate::document::{Document, join_non_empty};

pub(crate) fn render_item(item: &ItemRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&item.name, options);
    let attunement = match (&item.attunement_requirements, item.requires_attunement) {
        (Some(requirement), true) => requirement.clone(),
        (None, true) => "requires attunement".to_string(),
        (_, false) => String::new(),
    };
    doc.tagline(&[&item.item_type, &item.rarity, &attunement]);
    doc.text("Description", &item.description);
    doc.list("Properties", &item.properties);

    let details: Vec<String> = item
        .properties_v2
        .iter()
        .map(|p| {
            if p.description.is_empty() {
                format!("**{}**", p.name)
            } else {
                format!("**{}.** {}", p.name, p.description)
            }
        })
        .collect();
    doc.list("Property Details", &details);
    doc.fields(
        "Details",
        &[
            ("Charges", item.charges.map(|c| c.to_string()).unwrap_or_default()),
            ("Recharge", item.recharge.clone().unwrap_or_default()),
            ("Weight", item.weight.clone()),
            ("Value", item.value.clone()),
        ],
    );
    doc.text("Curse", item.curse.as_deref().unwrap_or(""));
    doc.text("Lore", &item.lore);
    doc.list("Sources", &item.sources_used);
    doc.list("Assumptions", &item.assumptions);
    doc.finish()
}

pub(crate) fn render_location(location: &LocationRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&location.name, options);
    doc.tagline(&[&location.location_type, &location.region]);
    doc.text("Description", &location.description);
    doc.text("Atmosphere", &location.atmosphere);

    doc.group("Points of Interest", !location.points_of_interest.is_empty());
    for poi in &location.points_of_interest {
        doc.subsection(&poi.name, &poi.description, &[]);
    }
    doc.list("Inhabitants", &location.inhabitants);
    doc.list("Hooks", &location.hooks);
    doc.list("Secrets", &location.secrets);
    doc.list("Hazards", &location.hazards);
    doc.list("Connections", &location.connections);
    doc.list("Sources", &location.sources_used);
    doc.list("Assumptions", &location.assumptions);
    doc.finish()
}

pub(crate) fn render_story_arc(arc: &StoryArcRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&arc.title, options);
    doc.tagline(&[&arc.theme]);
    doc.text("Premise", &arc.premise);

    doc.group("Acts", !arc.acts.is_empty());
    for (i, act) in arc.acts.iter().enumerate() {
        let heading = if act.name.is_empty() {
            format!("Act {}", i + 1)
        } else {
            format!("Act {}: {}", i + 1, act.name)
        };
        doc.subsection(&heading, &act.summary, &act.beats);
    }

    doc.group("Characters", !arc.characters.is_empty());
    for character in &arc.characters {
        let heading = if character.role.is_empty() {
            character.name.clone()
        } else {
            format!("{} ({})", character.name, character.role)
        };
        doc.subsection(&heading, &character.description, &character.goals);
    }
    doc.list("Conflicts", &arc.conflicts);
    doc.list("Hooks", &arc.hooks);
    doc.text("Climax", &arc.climax);
    doc.text("Resolution", &arc.resolution);
    doc.list("Rewards", &arc.rewards);
    doc.list("Sources", &arc.sources_used);
    doc.list("Assumptions", &arc.assumptions);
    doc.finish()
}

pub(crate) fn render_encounter(encounter: &EncounterRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&encounter.title, options);
    let level = encounter.party_level.map(|l| format!("party level {l}")).unwrap_or_default();
    doc.tagline(&[&encounter.difficulty, &level, &encounter.setting]);
    doc.text("Description", &encounter.description);

    let monsters: Vec<String> = encounter.monsters.iter().map(monster_line).collect();
    doc.list("Monsters", &monsters);
    doc.list("Objectives", &encounter.objectives);
    doc.text("Tactics", &encounter.tactics);
    doc.list("Terrain", &encounter.terrain);
    doc.list("Treasure", &encounter.treasure);
    doc.fields(
        "Budget",
        &[("XP", encounter.xp_budget.map(|xp| xp.to_string()).unwrap_or_default())],
    );
    doc.list("Sources", &encounter.sources_used);
    doc.list("Assumptions", &encounter.assumptions);
    doc.finish()
}

fn monster_line(monster: &EncounterMonster) -> String {
    let cr = monster
        .challenge_rating
        .as_deref()
        .map(|cr| format!("CR {cr}"))
        .unwrap_or_default();
    let extra = join_non_empty(&[&cr, monster.notes.as_deref().unwrap_or("")], "; ");
    if extra.is_empty() {
        format!("{}x {}", monster.count, monster.name)
    } else {
        format!("{}x {} ({extra})", monster.count, monster.name)
    }
}

#[cfg(test)]
mod tests {
    use crate::render;
    use grim_core::DomainTag;
    use grim_ingest::normalize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn item_tagline_includes_attunement() {
        let record = normalize(
            DomainTag::Item,
            &json!({
                "name": "Moonblade",
                "item_type": "longsword",
                "rarity": "legendary",
                "attunement": "requires attunement by an elf",
                "properties": ["finesse"],
            }),
        );
        let out = render(&record);
        assert!(out.contains("*longsword · legendary · requires attunement by an elf*"));
        assert!(out.contains("### Properties\n\n- finesse\n"));
    }

    #[test]
    fn location_points_are_subsections() {
        let record = normalize(
            DomainTag::Location,
            &json!({
                "name": "Saltmarsh",
                "landmarks": ["The Empty Net: A rowdy tavern"],
            }),
        );
        let out = render(&record);
        assert!(out.contains("### Points of Interest\n\n#### The Empty Net\n\nA rowdy tavern\n"));
    }

    #[test]
    fn story_arc_numbers_acts() {
        let record = normalize(
            DomainTag::StoryArc,
            &json!({
                "title": "The Drowned Crown",
                "acts": [{"name": "Tides", "beats": ["Body on the beach"]}, "The queen rises."],
            }),
        );
        let out = render(&record);
        assert!(out.contains("#### Act 1: Tides\n\n- Body on the beach\n"));
        assert!(out.contains("#### Act 2\n\nThe queen rises.\n"));
    }

    #[test]
    fn encounter_lists_monster_counts() {
        let record = normalize(
            DomainTag::Encounter,
            &json!({"title": "Ford Ambush", "monsters": "3x Goblin, Worg x2"}),
        );
        let out = render(&record);
        assert_eq!(
            out,
            "# Ford Ambush\n\n### Monsters\n\n- 3x Goblin\n- 2x Worg\n"
        );
    }
}
