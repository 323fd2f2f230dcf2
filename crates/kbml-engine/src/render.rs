//! Block rendering: the presentation mapping.
//!
//! Each [`Block`] variant maps to one fixed markup template with stable
//! class hooks; the back-office front end owns the styling. The match is
//! exhaustive over the closed variant set, so rendering is total and never
//! fails. Inert blocks contribute no node.

use crate::blocks::Block;

/// Render blocks to presentation nodes, in order.
pub fn render(blocks: &[Block]) -> Vec<String> {
    blocks.iter().filter_map(render_block).collect()
}

/// Render one block, or `None` for inert blocks.
pub fn render_block(block: &Block) -> Option<String> {
    let node = match block {
        Block::Html { html } => {
            if html.is_empty() {
                return None;
            }
            html.clone()
        }
        Block::Callout { body } => format!("<div class=\"kb-callout\">{body}</div>"),
        Block::Notice { severity, body } => format!(
            "<div class=\"kb-notice kb-notice--{}\">{body}</div>",
            severity.as_str()
        ),
        Block::Steps { items } => wrap_items("ol", "kb-steps", items),
        Block::Checklist { items } => wrap_items("ul", "kb-checklist", items),
        Block::ComparisonTable { headers, rows } => table(headers, rows),
    };
    Some(node)
}

/// Render and join into one HTML fragment.
pub fn to_html(blocks: &[Block]) -> String {
    render(blocks).join("\n")
}

fn wrap_items(tag: &str, class: &str, items: &[String]) -> String {
    let body: String = items.iter().map(|item| format!("<li>{item}</li>")).collect();
    format!("<{tag} class=\"{class}\">{body}</{tag}>")
}

fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table class=\"kb-compare\"><thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}
