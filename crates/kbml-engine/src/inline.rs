//! Inline formatting.
//!
//! A fixed, ordered substitution pipeline applied to plain text runs inside
//! a block. The order is load-bearing and part of the authoring contract:
//! bold runs before italic so the asterisks of `**x**` are never consumed
//! as italic markers, and links run last so earlier passes see the raw
//! label text.

use std::sync::LazyLock;

use regex::Regex;

/// The substitution table, applied top to bottom.
static RULES: LazyLock<[(Regex, &'static str); 6]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"),
            "<strong>$1</strong>",
        ),
        (
            Regex::new(r"__(.+?)__").expect("valid regex"),
            "<strong>$1</strong>",
        ),
        (
            Regex::new(r"\*([^*]+)\*").expect("valid regex"),
            "<em>$1</em>",
        ),
        (Regex::new(r"_([^_]+)_").expect("valid regex"), "<em>$1</em>"),
        (
            Regex::new(r"`([^`]+)`").expect("valid regex"),
            r#"<code class="kb-inline-code">$1</code>"#,
        ),
        (
            Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"),
            r#"<a class="kb-link" href="$2">$1</a>"#,
        ),
    ]
});

/// Apply the inline substitutions to one run of plain text.
///
/// No escaping is performed beyond these substitutions; article authors are
/// trusted back-office users.
pub fn format_inline(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}
