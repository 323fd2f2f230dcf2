//! Block segmentation: the render pass of the compiler.
//!
//! A single forward scan over the article's lines with an explicit cursor.
//! At each position the recognizers run in a fixed priority order
//! (directive fence, code fence, pipe table, single-line constructs, list
//! runs, paragraph); the first match consumes its lines and emits one
//! [`Block`]. The order is part of the authoring contract: changing it
//! changes the meaning of stored articles.
//!
//! Segmentation never fails. Malformed input degrades to a best-effort
//! block: unknown directives become inert, unterminated fences consume the
//! remainder of the document, malformed tables fall through to paragraphs.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::blocks::{Block, NoticeSeverity};
use crate::directive::{self, Directive};
use crate::headings::heading_line;
use crate::inline::format_inline;
use crate::slug::slugify;

/// `1. `-style ordered list item; capture 1 is the item text.
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("valid regex"));

/// `- ` / `* ` bullet item; capture 1 is the item text.
static BULLET_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(.*)$").expect("valid regex"));

/// Table separator row: dashes, pipes, colons and whitespace only.
static TABLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:-]+$").expect("valid regex"));

/// Split an article body into renderable blocks.
pub fn segment(content: &str) -> Vec<Block> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        if lines[pos].trim().is_empty() {
            pos += 1;
            continue;
        }

        if let Some((block, consumed)) = scan_directive(&lines, pos) {
            blocks.push(block);
            pos += consumed;
            continue;
        }
        if let Some((block, consumed)) = scan_code_fence(&lines, pos) {
            blocks.push(block);
            pos += consumed;
            continue;
        }
        if let Some((block, consumed)) = scan_table(&lines, pos) {
            blocks.push(block);
            pos += consumed;
            continue;
        }
        if let Some(block) = scan_single_line(lines[pos].trim_end()) {
            blocks.push(block);
            pos += 1;
            continue;
        }
        if let Some((block, consumed)) = scan_bullet_list(&lines, pos) {
            blocks.push(block);
            pos += consumed;
            continue;
        }
        if let Some((block, consumed)) = scan_ordered_list(&lines, pos) {
            blocks.push(block);
            pos += consumed;
            continue;
        }

        let (block, consumed) = scan_paragraph(&lines, pos);
        blocks.push(block);
        pos += consumed;
    }

    debug!(blocks = blocks.len(), "article segmented");
    blocks
}

// ---------------------------------------------------------------------------
// Directive fences
// ---------------------------------------------------------------------------

/// Consume a `:::name` fence. Without a closing `:::` the fence swallows
/// the rest of the document; that is the contract, not an error.
fn scan_directive(lines: &[&str], pos: usize) -> Option<(Block, usize)> {
    let (name, attrs) = directive::parse_open(lines[pos])?;

    let mut end = pos + 1;
    while end < lines.len() && !directive::is_close(lines[end]) {
        end += 1;
    }
    let body: Vec<String> = lines[pos + 1..end].iter().map(|l| l.to_string()).collect();
    // Consume the closing fence line when one was found.
    let consumed = if end < lines.len() { end - pos + 1 } else { end - pos };

    let block = directive_block(Directive { name, attrs, body });
    Some((block, consumed))
}

/// Dispatch a parsed directive to its block variant.
fn directive_block(dir: Directive) -> Block {
    match dir.name.as_str() {
        "callout" | "cta" => Block::Callout {
            body: dir.body.join("\n").trim().to_string(),
        },
        "notice" => Block::Notice {
            severity: NoticeSeverity::from_attr(dir.attr("type")),
            body: dir.body.join("\n").trim().to_string(),
        },
        "steps" => Block::Steps {
            items: numbered_items(&dir.body),
        },
        "checklist" => Block::Checklist {
            items: bullet_items(&dir.body),
        },
        "compare" => comparison_table(dir.body.iter().map(String::as_str)),
        other => {
            // Unknown directives must never break rendering of the rest of
            // the article; they become an inert block.
            debug!(directive = other, "unknown directive, emitting inert block");
            Block::Html { html: String::new() }
        }
    }
}

/// Keep only `N. ` body lines, prefix stripped, in source order.
fn numbered_items(body: &[String]) -> Vec<String> {
    body.iter()
        .filter_map(|line| ORDERED_ITEM_RE.captures(line.trim()))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Keep only `- ` / `* ` body lines, prefix stripped, in source order.
fn bullet_items(body: &[String]) -> Vec<String> {
    body.iter()
        .filter_map(|line| BULLET_ITEM_RE.captures(line.trim()))
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Build a [`Block::ComparisonTable`] from pipe-delimited lines: the first
/// pipe line is the header row, the next pipe line (the separator) is
/// discarded, the rest become data rows. Lines without a pipe are ignored.
fn comparison_table<'a>(lines: impl Iterator<Item = &'a str>) -> Block {
    let mut piped = lines.filter(|l| l.contains('|'));
    let headers = piped.next().map(split_row).unwrap_or_default();
    let rows: Vec<Vec<String>> = piped.skip(1).map(split_row).collect();
    Block::ComparisonTable { headers, rows }
}

/// Split one `| a | b |` line into trimmed cells, dropping the empty
/// leading/trailing cells produced by the delimiter syntax. Interior empty
/// cells are kept.
fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Code fences
// ---------------------------------------------------------------------------

/// Consume a triple-backtick fence, escaping the body for `&`, `<`, `>`.
/// Unterminated fences consume to end of input.
fn scan_code_fence(lines: &[&str], pos: usize) -> Option<(Block, usize)> {
    let lang = lines[pos].trim_end().strip_prefix("```")?.trim();

    let mut end = pos + 1;
    while end < lines.len() && !lines[end].trim_end().starts_with("```") {
        end += 1;
    }
    let consumed = if end < lines.len() { end - pos + 1 } else { end - pos };

    let body = lines[pos + 1..end].join("\n");
    let escaped = html_escape::encode_text(&body);
    let lang_class = if lang.is_empty() {
        "language-text".to_string()
    } else {
        format!("language-{lang}")
    };
    let html = format!("<pre class=\"kb-code\"><code class=\"{lang_class}\">{escaped}</code></pre>");

    Some((Block::Html { html }, consumed))
}

// ---------------------------------------------------------------------------
// Pipe tables
// ---------------------------------------------------------------------------

/// A pipe line followed by a separator row opens a table; it is consumed
/// exactly like a `:::compare` body and yields the same variant.
fn scan_table(lines: &[&str], pos: usize) -> Option<(Block, usize)> {
    if !lines[pos].contains('|') {
        return None;
    }
    if !lines.get(pos + 1).is_some_and(|next| is_table_separator(next)) {
        return None;
    }

    let mut end = pos + 2;
    while end < lines.len() && lines[end].contains('|') {
        end += 1;
    }

    let headers = split_row(lines[pos]);
    let rows: Vec<Vec<String>> = lines[pos + 2..end].iter().map(|l| split_row(l)).collect();

    Some((Block::ComparisonTable { headers, rows }, end - pos))
}

/// Separator row under a table header: dashes, pipes, colons, whitespace.
fn is_table_separator(line: &str) -> bool {
    let line = line.trim_end();
    line.contains('-') && TABLE_SEPARATOR_RE.is_match(line)
}

// ---------------------------------------------------------------------------
// Single-line constructs
// ---------------------------------------------------------------------------

/// Headings, horizontal rules and blockquotes; each consumes one line.
fn scan_single_line(line: &str) -> Option<Block> {
    if let Some((level, text)) = heading_line(line) {
        let html = match level {
            1 => format!("<h1>{text}</h1>"),
            // Levels 2 and 3 carry the same anchor id the TOC pass derives.
            level => format!("<h{level} id=\"{}\">{text}</h{level}>", slugify(text)),
        };
        return Some(Block::Html { html });
    }
    if is_rule(line) {
        return Some(Block::Html {
            html: "<hr>".to_string(),
        });
    }
    if let Some(quoted) = line.strip_prefix("> ") {
        return Some(Block::Html {
            html: format!("<blockquote>{}</blockquote>", format_inline(quoted.trim())),
        });
    }
    None
}

/// Horizontal rule: a line of three or more dashes.
fn is_rule(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

// ---------------------------------------------------------------------------
// List runs
// ---------------------------------------------------------------------------

/// A run of consecutive `- ` / `* ` lines becomes one `<ul>` block.
fn scan_bullet_list(lines: &[&str], pos: usize) -> Option<(Block, usize)> {
    let items = list_run(lines, pos, &BULLET_ITEM_RE)?;
    let html = format!("<ul class=\"kb-list\"><li>{}</li></ul>", items.join("</li><li>"));
    Some((Block::Html { html }, items.len()))
}

/// A run of consecutive `N. ` lines becomes one `<ol>` block. The rendered
/// list renumbers sequentially regardless of the numbers written.
fn scan_ordered_list(lines: &[&str], pos: usize) -> Option<(Block, usize)> {
    let items = list_run(lines, pos, &ORDERED_ITEM_RE)?;
    let html = format!("<ol class=\"kb-list\"><li>{}</li></ol>", items.join("</li><li>"));
    Some((Block::Html { html }, items.len()))
}

/// Collect the maximal run of lines matching an item pattern, item text
/// inline-formatted. One consumed line per item.
fn list_run(lines: &[&str], pos: usize, item_re: &Regex) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut end = pos;
    while end < lines.len() {
        let Some(caps) = item_re.captures(lines[end].trim_end()) else {
            break;
        };
        items.push(format_inline(caps[1].trim()));
        end += 1;
    }
    if items.is_empty() { None } else { Some(items) }
}

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// Accumulate consecutive non-blank lines that do not open another block,
/// join with single spaces, and wrap as one inline-formatted paragraph.
fn scan_paragraph(lines: &[&str], pos: usize) -> (Block, usize) {
    let mut end = pos + 1;
    while end < lines.len() && !lines[end].trim().is_empty() && !opens_other_block(lines, end) {
        end += 1;
    }

    let text = lines[pos..end]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let html = format!("<p>{}</p>", format_inline(&text));

    (Block::Html { html }, end - pos)
}

/// Whether the line at `idx` would start a non-paragraph block, ending
/// paragraph accumulation.
fn opens_other_block(lines: &[&str], idx: usize) -> bool {
    let line = lines[idx].trim_end();
    directive::parse_open(line).is_some()
        || line.starts_with("```")
        || heading_line(line).is_some()
        || is_rule(line)
        || line.starts_with("> ")
        || BULLET_ITEM_RE.is_match(line)
        || ORDERED_ITEM_RE.is_match(line)
        || (line.contains('|') && lines.get(idx + 1).is_some_and(|next| is_table_separator(next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_levels_and_anchors() {
        let blocks = segment("# Title\n## Shipping\n### Rates\n");
        assert_eq!(
            blocks,
            vec![
                Block::Html { html: "<h1>Title</h1>".into() },
                Block::Html { html: "<h2 id=\"shipping\">Shipping</h2>".into() },
                Block::Html { html: "<h3 id=\"rates\">Rates</h3>".into() },
            ]
        );
    }

    #[test]
    fn rule_and_blockquote() {
        let blocks = segment("---\n> keep calm\n");
        assert_eq!(
            blocks,
            vec![
                Block::Html { html: "<hr>".into() },
                Block::Html { html: "<blockquote>keep calm</blockquote>".into() },
            ]
        );
    }

    #[test]
    fn paragraph_joins_lines_with_spaces() {
        let blocks = segment("first line\nsecond line\n\nnext paragraph\n");
        assert_eq!(
            blocks,
            vec![
                Block::Html { html: "<p>first line second line</p>".into() },
                Block::Html { html: "<p>next paragraph</p>".into() },
            ]
        );
    }

    #[test]
    fn paragraph_stops_at_block_opener() {
        let blocks = segment("some text\n## Heading\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block::Html { html: "<p>some text</p>".into() });
    }

    #[test]
    fn bullet_list_run() {
        let blocks = segment("- one\n- two\n* three\n");
        assert_eq!(
            blocks,
            vec![Block::Html {
                html: "<ul class=\"kb-list\"><li>one</li><li>two</li><li>three</li></ul>".into(),
            }]
        );
    }

    #[test]
    fn ordered_list_is_renumbered_by_markup() {
        // Source numbering is irrelevant; <ol> renumbers on render.
        let blocks = segment("3. first\n1. second\n7. third\n");
        assert_eq!(
            blocks,
            vec![Block::Html {
                html: "<ol class=\"kb-list\"><li>first</li><li>second</li><li>third</li></ol>".into(),
            }]
        );
    }

    #[test]
    fn list_items_are_inline_formatted() {
        let blocks = segment("- **bold** item\n");
        assert_eq!(
            blocks,
            vec![Block::Html {
                html: "<ul class=\"kb-list\"><li><strong>bold</strong> item</li></ul>".into(),
            }]
        );
    }

    #[test]
    fn code_fence_escapes_and_tags_language() {
        let blocks = segment("```rust\nlet x = a < b && c > d;\n```\n");
        assert_eq!(
            blocks,
            vec![Block::Html {
                html: "<pre class=\"kb-code\"><code class=\"language-rust\">let x = a &lt; b &amp;&amp; c &gt; d;</code></pre>".into(),
            }]
        );
    }

    #[test]
    fn code_fence_without_language() {
        let blocks = segment("```\nplain\n```\n");
        assert_eq!(
            blocks,
            vec![Block::Html {
                html: "<pre class=\"kb-code\"><code class=\"language-text\">plain</code></pre>".into(),
            }]
        );
    }

    #[test]
    fn unterminated_code_fence_consumes_remainder() {
        let blocks = segment("```sh\necho one\necho two\n");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Html { html } => assert!(html.contains("echo one\necho two")),
            other => panic!("expected Html, got {other:?}"),
        }
    }

    #[test]
    fn markdown_table_round_trip() {
        let blocks = segment("| A | B |\n| - | - |\n| 1 | 2 |\n| 3 | 4 |\n");
        assert_eq!(
            blocks,
            vec![Block::ComparisonTable {
                headers: vec!["A".into(), "B".into()],
                rows: vec![
                    vec!["1".into(), "2".into()],
                    vec!["3".into(), "4".into()],
                ],
            }]
        );
    }

    #[test]
    fn pipe_without_separator_is_a_paragraph() {
        let blocks = segment("a | b\nplain text\n");
        assert_eq!(blocks, vec![Block::Html { html: "<p>a | b plain text</p>".into() }]);
    }

    #[test]
    fn callout_and_cta_share_a_variant() {
        let callout = segment(":::callout\nShip faster today.\n:::\n");
        let cta = segment(":::cta\nShip faster today.\n:::\n");
        assert_eq!(callout, cta);
        assert_eq!(
            callout,
            vec![Block::Callout { body: "Ship faster today.".into() }]
        );
    }

    #[test]
    fn notice_severity_from_attribute() {
        let blocks = segment(":::notice type=\"danger\"\nDo not do this.\n:::\n");
        assert_eq!(
            blocks,
            vec![Block::Notice {
                severity: NoticeSeverity::Danger,
                body: "Do not do this.".into(),
            }]
        );
    }

    #[test]
    fn notice_defaults_to_info() {
        let blocks = segment(":::notice\nHeads up.\n:::\n");
        assert_eq!(
            blocks,
            vec![Block::Notice {
                severity: NoticeSeverity::Info,
                body: "Heads up.".into(),
            }]
        );
    }

    #[test]
    fn unterminated_directive_consumes_remainder() {
        let blocks = segment(":::notice\nHello");
        assert_eq!(
            blocks,
            vec![Block::Notice {
                severity: NoticeSeverity::Info,
                body: "Hello".into(),
            }]
        );
    }

    #[test]
    fn steps_keep_only_numbered_lines() {
        let blocks = segment(":::steps\n1. Create the request\nstray note\n2. Pick an offer\n3. Confirm\n:::\n");
        assert_eq!(
            blocks,
            vec![Block::Steps {
                items: vec![
                    "Create the request".into(),
                    "Pick an offer".into(),
                    "Confirm".into(),
                ],
            }]
        );
    }

    #[test]
    fn checklist_keeps_only_bulleted_lines() {
        let blocks = segment(":::checklist\n- Passport\n* Insurance\nignored\n:::\n");
        assert_eq!(
            blocks,
            vec![Block::Checklist {
                items: vec!["Passport".into(), "Insurance".into()],
            }]
        );
    }

    #[test]
    fn compare_directive_parses_pipe_body() {
        let blocks = segment(":::compare\n| Plan | Price |\n| --- | --- |\n| Basic | 10 |\nnot a row\n| Pro | 25 |\n:::\n");
        assert_eq!(
            blocks,
            vec![Block::ComparisonTable {
                headers: vec!["Plan".into(), "Price".into()],
                rows: vec![
                    vec!["Basic".into(), "10".into()],
                    vec!["Pro".into(), "25".into()],
                ],
            }]
        );
    }

    #[test]
    fn unknown_directive_is_inert_and_nonfatal() {
        let blocks = segment(":::foo\nbar\n:::\n\nNext paragraph.\n");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_inert());
        assert_eq!(
            blocks[1],
            Block::Html { html: "<p>Next paragraph.</p>".into() }
        );
    }

    #[test]
    fn blank_lines_produce_no_blocks() {
        assert!(segment("\n\n   \n").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn interior_empty_cells_are_kept() {
        let blocks = segment("| A |  | C |\n| - | - | - |\n| 1 |  | 3 |\n");
        assert_eq!(
            blocks,
            vec![Block::ComparisonTable {
                headers: vec!["A".into(), "".into(), "C".into()],
                rows: vec![vec!["1".into(), "".into(), "3".into()]],
            }]
        );
    }
}
