use grim_core::entities::{ClassLevel, NpcRecord, Relationship, SpellcastingSummary};

use crate::RenderOptions;
use crate::document::{Document, armor_class_text, hit_points_text, join_non_empty, scored_inline};

pub(crate) fn render(npc: &NpcRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&npc.name, options);
    doc.tagline(&[&npc.title, &npc.race, &npc.role, &npc.alignment]);

    doc.text("Description", &npc.description);
    doc.text("Appearance", &npc.appearance);
    doc.text("Background", &npc.background);
    doc.fields(
        "Personality",
        &[
            ("Traits", npc.personality.traits.join("; ")),
            ("Ideals", npc.personality.ideals.join("; ")),
            ("Bonds", npc.personality.bonds.join("; ")),
            ("Flaws", npc.personality.flaws.join("; ")),
        ],
    );
    doc.list("Motivations", &npc.motivations);
    doc.list("Hooks", &npc.hooks);

    doc.features("Abilities", &npc.abilities);
    doc.fields(
        "Proficiencies",
        &[
            ("Skills", scored_inline(&npc.skills)),
            ("Saving Throws", scored_inline(&npc.saving_throws)),
        ],
    );
    doc.text("Tactics", &npc.tactics);

    let classes: Vec<String> = npc.class_levels.iter().map(class_level_text).collect();
    doc.list("Class Levels", &classes);
    doc.ability_scores(&npc.ability_scores);
    doc.fields(
        "Core Stats",
        &[
            ("Armor Class", npc.armor_class.as_ref().map(armor_class_text).unwrap_or_default()),
            ("Hit Points", npc.hit_points.as_ref().map(hit_points_text).unwrap_or_default()),
            ("Speed", npc.speed.clone()),
            (
                "Proficiency Bonus",
                npc.proficiency_bonus.map(|b| format!("{b:+}")).unwrap_or_default(),
            ),
            ("Challenge Rating", npc.challenge_rating.clone()),
            ("Senses", npc.senses.join(", ")),
            ("Languages", npc.languages.join(", ")),
        ],
    );

    if let Some(spellcasting) = &npc.spellcasting {
        spellcasting_section(&mut doc, spellcasting);
    }
    doc.list("Equipment", &npc.equipment);
    doc.list("Magic Items", &npc.magic_items);

    doc.features("Actions", &npc.actions);
    doc.features("Bonus Actions", &npc.bonus_actions);
    doc.features("Reactions", &npc.reactions);
    doc.features("Legendary Actions", &npc.legendary_actions);

    let relationships: Vec<String> = npc.relationships.iter().map(relationship_text).collect();
    doc.list("Relationships", &relationships);

    if doc.options().include_stat_block {
        if let Some(stat_block) = &npc.stat_block {
            doc.json("Stat Block", stat_block);
        }
    }
    doc.list("Sources", &npc.sources_used);
    doc.list("Assumptions", &npc.assumptions);
    doc.finish()
}

fn class_level_text(class: &ClassLevel) -> String {
    match &class.subclass {
        Some(subclass) => format!("{} {} ({subclass})", class.class, class.level),
        None => format!("{} {}", class.class, class.level),
    }
}

fn relationship_text(relationship: &Relationship) -> String {
    let mut text = match &relationship.relation {
        Some(relation) => format!("**{}** ({relation})", relationship.name),
        None => format!("**{}**", relationship.name),
    };
    if let Some(description) = &relationship.description {
        text.push_str(": ");
        text.push_str(description);
    }
    text
}

fn spellcasting_section(doc: &mut Document<'_>, spellcasting: &SpellcastingSummary) {
    let slots = spellcasting
        .slots
        .iter()
        .map(|slot| format!("{}: {}", slot.name, slot.value))
        .collect::<Vec<_>>()
        .join(", ");
    let casting = join_non_empty(
        &[
            spellcasting.ability.as_deref().unwrap_or(""),
            &spellcasting.save_dc.map(|dc| format!("save DC {dc}")).unwrap_or_default(),
            &spellcasting
                .attack_bonus
                .map(|bonus| format!("{bonus:+} to hit"))
                .unwrap_or_default(),
        ],
        ", ",
    );
    doc.fields(
        "Spellcasting",
        &[
            ("Casting", casting),
            ("Cantrips", spellcasting.cantrips.join(", ")),
            ("Spells", spellcasting.spells.join(", ")),
            ("Slots", slots),
        ],
    );
}
