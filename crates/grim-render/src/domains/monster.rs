use grim_core::entities::MonsterRecord;

use crate::RenderOptions;
use crate::document::{Document, armor_class_text, hit_points_text, join_non_empty, scored_inline};

pub(crate) fn render(monster: &MonsterRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&monster.name, options);
    let kind = if monster.subtype.is_empty() {
        monster.creature_type.clone()
    } else {
        format!("{} ({})", monster.creature_type, monster.subtype)
    };
    let size_and_kind = join_non_empty(&[&monster.size, &kind], " ");
    doc.tagline(&[&size_and_kind, &monster.alignment]);
    doc.text("Description", &monster.description);

    doc.fields(
        "Core Stats",
        &[
            ("Armor Class", armor_class_text(&monster.armor_class)),
            ("Hit Points", hit_points_text(&monster.hit_points)),
            ("Speed", monster.speed.clone()),
        ],
    );
    doc.ability_scores(&monster.ability_scores);

    let challenge = match monster.experience_points {
        Some(xp) if !monster.challenge_rating.is_empty() => format!("{} ({xp} XP)", monster.challenge_rating),
        _ => monster.challenge_rating.clone(),
    };
    doc.fields(
        "Details",
        &[
            ("Saving Throws", scored_inline(&monster.saving_throws)),
            ("Skills", scored_inline(&monster.skills)),
            ("Damage Vulnerabilities", monster.damage_vulnerabilities.join(", ")),
            ("Damage Resistances", monster.damage_resistances.join(", ")),
            ("Damage Immunities", monster.damage_immunities.join(", ")),
            ("Condition Immunities", monster.condition_immunities.join(", ")),
            ("Senses", monster.senses.join(", ")),
            ("Languages", monster.languages.join(", ")),
            ("Challenge", challenge),
            (
                "Proficiency Bonus",
                monster.proficiency_bonus.map(|b| format!("{b:+}")).unwrap_or_default(),
            ),
        ],
    );

    doc.features("Traits", &monster.abilities);
    doc.features("Actions", &monster.actions);
    doc.features("Bonus Actions", &monster.bonus_actions);
    doc.features("Reactions", &monster.reactions);
    doc.features("Legendary Actions", &monster.legendary_actions);
    doc.features("Lair Actions", &monster.lair_actions);
    doc.text("Tactics", &monster.tactics);
    doc.text("Habitat", &monster.habitat);
    doc.list("Sources", &monster.sources_used);
    doc.list("Assumptions", &monster.assumptions);
    doc.finish()
}

#[cfg(test)]
mod tests {
    use crate::render;
    use grim_core::DomainTag;
    use grim_ingest::normalize;
    use serde_json::json;

    #[test]
    fn renders_stat_line_and_challenge() {
        let record = normalize(
            DomainTag::Monster,
            &json!({
                "name": "Marsh Troll",
                "size": "Large",
                "creature_type": "giant",
                "alignment": "chaotic evil",
                "armor_class": 15,
                "hit_points": "84 (8d10+40)",
                "challenge_rating": 5,
                "actions": [{"name": "Claw", "description": "Melee Weapon Attack: +7 to hit."}],
            }),
        );
        let out = render(&record);
        assert!(out.starts_with("# Marsh Troll\n\n*Large giant · chaotic evil*\n"));
        assert!(out.contains("- **Armor Class:** 15\n- **Hit Points:** 84 (8d10+40)\n"));
        assert!(out.contains("- **Challenge:** 5 (1800 XP)"));
        assert!(out.contains("### Actions\n\n- **Claw.** Melee Weapon Attack: +7 to hit.\n"));
        assert!(!out.contains("### Lair Actions"));
    }

    #[test]
    fn empty_monster_still_shows_defaults() {
        let out = render(&normalize(DomainTag::Monster, &json!({})));
        assert!(out.starts_with("# Untitled\n"));
        assert!(out.contains("- **Armor Class:** 0"));
        assert!(out.contains("- **Hit Points:** 0"));
        assert!(out.contains("- **CHA** 10 (+0)"));
    }
}
