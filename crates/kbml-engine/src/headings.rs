//! Heading recognition and table-of-contents extraction.

use serde::Serialize;

use crate::slug::slugify;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Anchor id, identical to the id on the rendered heading tag.
    pub id: String,
    /// Heading text as written, marker stripped.
    pub text: String,
    /// Heading depth: 2 or 3.
    pub level: u8,
}

/// Recognize an ATX heading line of level 1 to 3.
///
/// Shared by the block segmenter and the TOC extractor so the two passes
/// can never disagree on what counts as a heading line.
pub fn heading_line(line: &str) -> Option<(u8, &str)> {
    for (marker, level) in [("### ", 3u8), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((level, rest.trim()));
        }
    }
    None
}

/// Collect the level-2/3 headings of an article body, in document order.
///
/// This is the TOC pass: an independent, deliberately simple scan of the
/// raw text. Level-1 headings are page titles and excluded; ids come from
/// the same [`slugify`] the render pass uses.
pub fn extract_headings(content: &str) -> Vec<HeadingEntry> {
    content
        .lines()
        .filter_map(|line| heading_line(line.trim_end()))
        .filter(|(level, _)| *level >= 2)
        .map(|(level, text)| HeadingEntry {
            id: slugify(text),
            text: text.to_string(),
            level,
        })
        .collect()
}
