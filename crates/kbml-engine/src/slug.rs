//! Heading anchor slugs.
//!
//! [`slugify`] is the one leaf both compile passes share: the segmenter
//! stamps the id onto rendered `<h2>`/`<h3>` tags and the TOC extractor
//! stamps the same id onto its entries. Keeping a single implementation is
//! what keeps the anchors aligned.

/// Derive a lowercase, hyphenated anchor id from heading text.
///
/// Cyrillic letters go through a fixed transliteration table; every maximal
/// run of other characters outside `[a-z0-9]` collapses into one hyphen;
/// leading and trailing hyphens are stripped. Total: any input, including
/// the empty string, produces a (possibly empty) string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.to_lowercase().chars() {
        if let Some(mapped) = transliterate(ch) {
            slug.push_str(mapped);
        } else if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Fixed Cyrillic-to-Latin table. Returns `None` for anything that is not a
/// Cyrillic letter so the caller can handle it positionally. Hard and soft
/// signs map to the empty string and disappear from the slug.
fn transliterate(ch: char) -> Option<&'static str> {
    Some(match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    })
}
