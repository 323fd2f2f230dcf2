//! Custom `:::name` fenced directives.
//!
//! A directive opens with `:::name attr="value" ...` and closes with a line
//! that is exactly `:::`. The parse result is transient: it is consumed
//! entirely while producing a single [`Block`](crate::Block).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Opening fence: `:::name` plus optional attribute tail.
static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:::([a-zA-Z][\w-]*)\s*(.*)$").expect("valid regex"));

/// One `key="value"` pair in the attribute tail.
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w-]+)="([^"]*)""#).expect("valid regex"));

/// Parsed directive: name, attribute whitelist, raw body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub body: Vec<String>,
}

impl Directive {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Parse an opening fence line into the directive name and attributes.
///
/// Returns `None` when the line is not a directive opener; the bare closing
/// fence `:::` never matches.
pub(crate) fn parse_open(line: &str) -> Option<(String, HashMap<String, String>)> {
    let caps = OPEN_RE.captures(line.trim_end())?;
    let name = caps[1].to_lowercase();

    let mut attrs = HashMap::new();
    for attr in ATTR_RE.captures_iter(&caps[2]) {
        attrs.insert(attr[1].to_lowercase(), attr[2].to_string());
    }

    Some((name, attrs))
}

/// Whether a line is the closing fence.
pub(crate) fn is_close(line: &str) -> bool {
    line.trim_end() == ":::"
}
