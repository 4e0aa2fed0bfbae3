//! Markdown to printable blocks

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::debug;

/// One printable unit of the itinerary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level 1..=3 (deeper levels collapse to 3)
    Heading(u8, String),
    Paragraph(String),
    /// List item with nesting depth starting at 1
    ListItem(usize, String),
    TableRow { cells: Vec<String>, header: bool },
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

/// Flatten Markdown into blocks; inline styling is dropped
pub fn markdown_blocks(markdown: &str) -> Vec<Block> {
    debug!(len = markdown.len(), "markdown_blocks: called");
    let mut blocks = Vec::new();
    let mut text = String::new();
    let mut cells: Vec<String> = Vec::new();
    let mut heading: Option<u8> = None;
    let mut item_depth = 0usize;

    let take = |text: &mut String| -> Option<String> {
        let t = text.split_whitespace().collect::<Vec<_>>().join(" ");
        text.clear();
        if t.is_empty() { None } else { Some(t) }
    };

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                if let Some(t) = take(&mut text) {
                    blocks.push(Block::Paragraph(t));
                }
                heading = Some(heading_level(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(t) = take(&mut text) {
                    blocks.push(Block::Heading(heading.unwrap_or(3), t));
                }
                heading = None;
            }
            Event::Start(Tag::Item) => {
                // text before a nested list belongs to the parent item
                if let Some(t) = take(&mut text) {
                    blocks.push(Block::ListItem(item_depth.max(1), t));
                }
                item_depth += 1;
            }
            Event::End(TagEnd::Item) => {
                if let Some(t) = take(&mut text) {
                    blocks.push(Block::ListItem(item_depth.max(1), t));
                }
                item_depth = item_depth.saturating_sub(1);
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::CodeBlock) => {
                if item_depth == 0 {
                    if let Some(t) = take(&mut text) {
                        blocks.push(Block::Paragraph(t));
                    }
                } else {
                    text.push(' ');
                }
            }
            Event::End(TagEnd::TableCell) => {
                let cell = take(&mut text).unwrap_or_default();
                cells.push(cell);
            }
            Event::End(TagEnd::TableHead) => {
                blocks.push(Block::TableRow {
                    cells: std::mem::take(&mut cells),
                    header: true,
                });
            }
            Event::End(TagEnd::TableRow) => {
                blocks.push(Block::TableRow {
                    cells: std::mem::take(&mut cells),
                    header: false,
                });
            }
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    if let Some(t) = take(&mut text) {
        blocks.push(Block::Paragraph(t));
    }

    debug!(block_count = blocks.len(), "markdown_blocks: done");
    blocks
}

/// Reduce text to what the builtin PDF fonts can draw
///
/// `₹` becomes `Rs.`, common typographic punctuation becomes ASCII, and
/// anything else outside printable ASCII (emoji included) is dropped.
pub fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            '–' | '—' | '−' => out.push('-'),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '•' | '·' => out.push('-'),
            '…' => out.push_str("..."),
            '→' => out.push_str("->"),
            '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap to at most `width` characters per line
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        if line.is_empty() {
            line = word;
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITINERARY: &str = "\
# Goa on a Shoestring

Scene set hai, **Bhai**. Take the overnight train.

## The Perfect 3-Day Itinerary

- Day 1: Morning beach
  - Evening shack dinner
- Day 2: Fort hopping

| Item | Cost |
|------|------|
| Train | ₹800 |
| Hostel | ₹1200 |
";

    #[test]
    fn test_blocks_cover_headings_lists_and_tables() {
        let blocks = markdown_blocks(ITINERARY);

        assert_eq!(blocks[0], Block::Heading(1, "Goa on a Shoestring".to_string()));
        assert_eq!(
            blocks[1],
            Block::Paragraph("Scene set hai, Bhai. Take the overnight train.".to_string())
        );
        assert_eq!(blocks[2], Block::Heading(2, "The Perfect 3-Day Itinerary".to_string()));
        assert!(blocks.contains(&Block::ListItem(1, "Day 1: Morning beach".to_string())));
        assert!(blocks.contains(&Block::ListItem(2, "Evening shack dinner".to_string())));
        assert!(blocks.contains(&Block::TableRow {
            cells: vec!["Item".to_string(), "Cost".to_string()],
            header: true,
        }));
        assert!(blocks.contains(&Block::TableRow {
            cells: vec!["Hostel".to_string(), "₹1200".to_string()],
            header: false,
        }));
    }

    #[test]
    fn test_plain_text_is_one_paragraph() {
        assert_eq!(
            markdown_blocks("just some\ntext"),
            vec![Block::Paragraph("just some text".to_string())]
        );
        assert!(markdown_blocks("").is_empty());
    }

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("Budget: ₹3000 🎒"), "Budget: Rs.3000");
        assert_eq!(pdf_safe("Goa — beaches’ best"), "Goa - beaches' best");
        assert_eq!(pdf_safe("🗺️"), "");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 10).is_empty());
    }
}
