//! Section-ordered document assembly.

use grim_core::entities::{AbilityScores, ArmorClass, Feature, HitPoints, ScoredEntry};

use crate::RenderOptions;

/// Title used when a record has no name.
pub const UNTITLED: &str = "Untitled";

/// Markdown document under construction. Each section method writes nothing
/// when its content is empty, so callers list sections in their fixed order
/// without checking.
pub(crate) struct Document<'a> {
    out: String,
    options: &'a RenderOptions,
}

impl<'a> Document<'a> {
    pub(crate) fn new(title: &str, options: &'a RenderOptions) -> Self {
        let title = title.trim();
        let title = if title.is_empty() { UNTITLED } else { title };
        Self {
            out: format!("# {title}\n"),
            options,
        }
    }

    pub(crate) const fn options(&self) -> &RenderOptions {
        self.options
    }

    fn heading(&mut self, text: &str, depth: u8) {
        let level = usize::from(self.options.heading_level.saturating_add(depth).min(6));
        self.out.push('\n');
        self.out.push_str(&"#".repeat(level));
        self.out.push(' ');
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn paragraph(&mut self, text: &str) {
        self.out.push('\n');
        self.out.push_str(text.trim());
        self.out.push('\n');
    }

    /// An italic line directly under the title, from the non-empty parts.
    pub(crate) fn tagline(&mut self, parts: &[&str]) {
        let line = join_non_empty(parts, " · ");
        if !line.is_empty() {
            self.paragraph(&format!("*{line}*"));
        }
    }

    pub(crate) fn text(&mut self, heading: &str, body: &str) {
        if !body.trim().is_empty() {
            self.heading(heading, 0);
            self.paragraph(body);
        }
    }

    /// A pre-rendered markdown body, written as-is.
    pub(crate) fn markdown(&mut self, heading: &str, body: &str) {
        if !body.trim().is_empty() {
            self.heading(heading, 0);
            self.out.push('\n');
            self.out.push_str(body.trim_end());
            self.out.push('\n');
        }
    }

    /// Markdown written directly under the title, without a section heading.
    pub(crate) fn raw(&mut self, body: &str) {
        self.out.push('\n');
        self.out.push_str(body.trim_end());
        self.out.push('\n');
    }

    pub(crate) fn list(&mut self, heading: &str, items: &[String]) {
        let lines: Vec<String> = items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .map(|item| format!("- {}", item.trim()))
            .collect();
        self.lines(heading, &lines);
    }

    pub(crate) fn numbered(&mut self, heading: &str, items: &[String]) {
        let lines: Vec<String> = items
            .iter()
            .filter(|item| !item.trim().is_empty())
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item.trim()))
            .collect();
        self.lines(heading, &lines);
    }

    /// `- **Label:** value` lines for the non-empty values.
    pub(crate) fn fields(&mut self, heading: &str, pairs: &[(&str, String)]) {
        let lines: Vec<String> = pairs
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| format!("- **{label}:** {}", value.trim()))
            .collect();
        self.lines(heading, &lines);
    }

    pub(crate) fn features(&mut self, heading: &str, features: &[Feature]) {
        let lines: Vec<String> = features.iter().map(feature_line).collect();
        self.lines(heading, &lines);
    }

    pub(crate) fn scored(&mut self, heading: &str, entries: &[ScoredEntry]) {
        let lines: Vec<String> = entries.iter().map(|e| format!("- {}", scored_text(e))).collect();
        self.lines(heading, &lines);
    }

    pub(crate) fn ability_scores(&mut self, scores: &AbilityScores) {
        let lines: Vec<String> = scores
            .entries()
            .iter()
            .map(|(key, score)| {
                format!(
                    "- **{}** {score} ({:+})",
                    key.to_ascii_uppercase(),
                    AbilityScores::modifier(*score)
                )
            })
            .collect();
        self.lines("Ability Scores", &lines);
    }

    /// A titled sub-block one level below the section headings.
    pub(crate) fn subsection(&mut self, heading: &str, body: &str, items: &[String]) {
        let heading = heading.trim();
        if heading.is_empty() && body.trim().is_empty() && items.is_empty() {
            return;
        }
        self.heading(if heading.is_empty() { UNTITLED } else { heading }, 1);
        if !body.trim().is_empty() {
            self.paragraph(body);
        }
        if !items.is_empty() {
            self.out.push('\n');
            for item in items {
                self.out.push_str("- ");
                self.out.push_str(item.trim());
                self.out.push('\n');
            }
        }
    }

    /// Section heading only, for callers that follow with subsections.
    pub(crate) fn group(&mut self, heading: &str, non_empty: bool) {
        if non_empty {
            self.heading(heading, 0);
        }
    }

    pub(crate) fn json(&mut self, heading: &str, value: &serde_json::Value) {
        if grim_core::coerce::is_empty_value(value) {
            return;
        }
        let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
        self.heading(heading, 0);
        self.out.push_str("\n```json\n");
        self.out.push_str(&pretty);
        self.out.push_str("\n```\n");
    }

    fn lines(&mut self, heading: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        self.heading(heading, 0);
        self.out.push('\n');
        for line in lines {
            self.out.push_str(line);
            self.out.push('\n');
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

pub(crate) fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn feature_line(feature: &Feature) -> String {
    let mut tags: Vec<String> = Vec::new();
    if let Some(uses) = &feature.uses {
        tags.push(uses.clone());
    }
    if let Some(recharge) = &feature.recharge {
        tags.push(format!("Recharge {recharge}"));
    }
    let name = if tags.is_empty() {
        feature.name.clone()
    } else {
        format!("{} ({})", feature.name, tags.join(", "))
    };
    let mut line = if feature.description.is_empty() || feature.description == feature.name {
        format!("- **{name}**")
    } else {
        format!("- **{name}.** {}", feature.description)
    };
    if let Some(notes) = &feature.notes {
        line.push_str(&format!(" _{notes}_"));
    }
    line
}

fn scored_text(entry: &ScoredEntry) -> String {
    match &entry.notes {
        Some(notes) => format!("{} {:+} ({notes})", entry.name, entry.value),
        None => format!("{} {:+}", entry.name, entry.value),
    }
}

/// Scored entries on one line, e.g. `Dex +4, Con +6`.
pub(crate) fn scored_inline(entries: &[ScoredEntry]) -> String {
    entries.iter().map(scored_text).collect::<Vec<_>>().join(", ")
}

/// `15`, or `15 (natural armor), 17 (with shield)`.
pub(crate) fn armor_class_text(armor_class: &ArmorClass) -> String {
    match armor_class {
        ArmorClass::Value(value) => value.to_string(),
        ArmorClass::Entries(entries) => entries
            .iter()
            .map(|entry| {
                let note = join_non_empty(
                    &[entry.kind.as_deref().unwrap_or(""), entry.notes.as_deref().unwrap_or("")],
                    "; ",
                );
                if note.is_empty() {
                    entry.value.to_string()
                } else {
                    format!("{} ({note})", entry.value)
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// `138 (12d12+60)`, with any notes appended.
pub(crate) fn hit_points_text(hit_points: &HitPoints) -> String {
    let base = match (hit_points.average, hit_points.formula.as_deref()) {
        (Some(average), Some(formula)) => format!("{average} ({formula})"),
        (Some(average), None) => average.to_string(),
        (None, Some(formula)) => formula.to_string(),
        (None, None) => String::new(),
    };
    join_non_empty(&[&base, hit_points.notes.as_deref().unwrap_or("")], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use grim_core::entities::ArmorClassEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_sections_are_suppressed() {
        let options = RenderOptions::default();
        let mut doc = Document::new("  ", &options);
        doc.text("Description", "   ");
        doc.list("Hooks", &[String::new()]);
        doc.fields("Stats", &[("Speed", String::new())]);
        assert_eq!(doc.finish(), "# Untitled\n");
    }

    #[test]
    fn ability_lines_carry_signed_modifiers() {
        let options = RenderOptions::default();
        let mut doc = Document::new("Mira", &options);
        doc.ability_scores(&AbilityScores {
            str: 16,
            dex: 9,
            ..AbilityScores::default()
        });
        let out = doc.finish();
        assert!(out.contains("### Ability Scores\n\n- **STR** 16 (+3)\n- **DEX** 9 (-1)\n- **CON** 10 (+0)\n"));
    }

    #[test]
    fn feature_line_formats_tags() {
        let feature = Feature {
            name: "Fire Breath".into(),
            description: "Cone of fire.".into(),
            recharge: Some("5-6".into()),
            ..Feature::default()
        };
        assert_eq!(feature_line(&feature), "- **Fire Breath (Recharge 5-6).** Cone of fire.");
    }

    #[test]
    fn armor_and_hit_point_text() {
        let ac = ArmorClass::Entries(vec![
            ArmorClassEntry {
                value: 15,
                kind: Some("natural armor".into()),
                notes: None,
            },
            ArmorClassEntry {
                value: 17,
                kind: None,
                notes: Some("with shield".into()),
            },
        ]);
        assert_eq!(armor_class_text(&ac), "15 (natural armor), 17 (with shield)");
        let hp = HitPoints {
            average: Some(138),
            formula: Some("12d12+60".into()),
            notes: None,
        };
        assert_eq!(hit_points_text(&hp), "138 (12d12+60)");
    }
}
