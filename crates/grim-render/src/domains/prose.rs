use grim_core::entities::{GenericRecord, WritingRecord};

use crate::RenderOptions;
use crate::blocks::{demote_headings, parse_blocks, render_blocks};
use crate::document::Document;

/// Draft text passed through the block reader, with its headings pushed below
/// the section heading.
fn normalized_draft(text: &str, options: &RenderOptions) -> String {
    render_blocks(&demote_headings(parse_blocks(text), options.heading_level))
}

pub(crate) fn render_writing(writing: &WritingRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&writing.title, options);
    let words = writing.word_count.map(|n| format!("{n} words")).unwrap_or_default();
    doc.tagline(&[&writing.work_type, &writing.genre, &writing.audience, &words]);
    doc.text("Summary", &writing.summary);
    doc.numbered("Contents", &writing.table_of_contents);

    doc.group("Chapters", !writing.chapters.is_empty());
    for (i, chapter) in writing.chapters.iter().enumerate() {
        let heading = if chapter.title.is_empty() {
            format!("Chapter {}", i + 1)
        } else {
            chapter.title.clone()
        };
        let body = if chapter.content.is_empty() {
            chapter.summary.clone()
        } else {
            normalized_draft(&chapter.content, options)
        };
        doc.subsection(&heading, &body, &[]);
    }

    doc.markdown("Text", &normalized_draft(&writing.formatted_text, options));
    doc.list("Sources", &writing.sources_used);
    doc.list("Assumptions", &writing.assumptions);
    doc.finish()
}

pub(crate) fn render_generic(generic: &GenericRecord, options: &RenderOptions) -> String {
    let mut doc = Document::new(&generic.title, options);
    let body = normalized_draft(&generic.content, options);
    if !body.is_empty() {
        doc.raw(&body);
    }
    doc.finish()
}
