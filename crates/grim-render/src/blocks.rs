//! Draft-text block reader.
//!
//! Parses free-form markdown-like text into display blocks. Line types are
//! mutually exclusive:
//!
//! - heading: `#` through `######` followed by a space
//! - bullet: `-` or `*` followed by a space
//! - numbered: digits followed by `.` or `)` and a space
//! - paragraph: anything else that is not blank
//!
//! Contiguous lines of the same type accumulate into one block. A blank line
//! closes the current block and, between two blocks, yields one [`Block::Break`].

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(#{1,6})\s+(.*?)(?:\s+#+)?\s*$").expect("pattern is valid"));

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*?)\s*$").expect("pattern is valid"));

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*?)\s*$").expect("pattern is valid"));

/// One display block of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    BulletList(Vec<String>),
    NumberedList(Vec<String>),
    /// Lines of one paragraph, joined with single spaces.
    Paragraph(String),
    /// Vertical spacing from one or more blank lines.
    Break,
}

enum Line<'a> {
    Blank,
    Heading(u8, &'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

fn classify_line(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = HEADING_RE.captures(line) {
        let hashes = caps.get(1).map_or(1, |m| m.as_str().len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Line::Heading(u8::try_from(hashes).unwrap_or(6), text);
    }
    if let Some(item) = BULLET_RE.captures(line).and_then(|c| c.get(1)) {
        return Line::Bullet(item.as_str());
    }
    if let Some(item) = NUMBERED_RE.captures(line).and_then(|c| c.get(1)) {
        return Line::Numbered(item.as_str());
    }
    Line::Text(line.trim())
}

#[derive(Default)]
struct Reader {
    blocks: Vec<Block>,
    open: Option<Block>,
    pending_break: bool,
}

impl Reader {
    fn close(&mut self) {
        if let Some(block) = self.open.take() {
            self.emit(block);
        }
    }

    fn emit(&mut self, block: Block) {
        if self.pending_break && !self.blocks.is_empty() {
            self.blocks.push(Block::Break);
        }
        self.pending_break = false;
        self.blocks.push(block);
    }

    fn push_line(&mut self, line: Line<'_>) {
        match line {
            Line::Blank => {
                self.close();
                self.pending_break = true;
            }
            Line::Heading(level, text) => {
                self.close();
                self.emit(Block::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            Line::Bullet(item) => match &mut self.open {
                Some(Block::BulletList(items)) => items.push(item.to_string()),
                _ => {
                    self.close();
                    self.open = Some(Block::BulletList(vec![item.to_string()]));
                }
            },
            Line::Numbered(item) => match &mut self.open {
                Some(Block::NumberedList(items)) => items.push(item.to_string()),
                _ => {
                    self.close();
                    self.open = Some(Block::NumberedList(vec![item.to_string()]));
                }
            },
            Line::Text(text) => match &mut self.open {
                Some(Block::Paragraph(paragraph)) => {
                    paragraph.push(' ');
                    paragraph.push_str(text);
                }
                _ => {
                    self.close();
                    self.open = Some(Block::Paragraph(text.to_string()));
                }
            },
        }
    }
}

/// Parse draft text into blocks. Never fails; leading and trailing blank
/// lines produce no breaks.
#[must_use]
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut reader = Reader::default();
    for line in text.lines() {
        reader.push_line(classify_line(line));
    }
    reader.close();
    reader.blocks
}

/// Re-emit blocks as normalized markdown. Numbered lists are renumbered from 1.
#[must_use]
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                lines.push(format!("{} {text}", "#".repeat(usize::from(*level))));
            }
            Block::BulletList(items) => lines.extend(items.iter().map(|item| format!("- {item}"))),
            Block::NumberedList(items) => lines.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}. {item}", i + 1)),
            ),
            Block::Paragraph(text) => lines.push(text.clone()),
            Block::Break => lines.push(String::new()),
        }
    }
    lines.join("\n")
}

/// Shift every heading down by `by` levels, capped at six.
#[must_use]
pub fn demote_headings(blocks: Vec<Block>, by: u8) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| match block {
            Block::Heading { level, text } => Block::Heading {
                level: level.saturating_add(by).min(6),
                text,
            },
            other => other,
        })
        .collect()
}
