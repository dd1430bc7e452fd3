//! Beer name cleanup and search variant generation.
//!
//! [`escape`] turns the raw export field into a display name.
//! [`variants`] derives the three search strings tried, in order, when a
//! beer cannot be fetched directly.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches named (`&amp;`), decimal (`&#39;`) and hex (`&#x27;`) entities.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid regex")
});

/// Mis-decoded and typographic apostrophes, all mapped to `'`.
const APOSTROPHE_FORMS: &[&str] = &["â€™", "â€˜", "\u{2019}", "\u{2018}"];

/// Characters that separate words in a name without carrying meaning.
const SEPARATOR_CHARS: &[char] = &['(', ')', '/'];

/// Conjunctions dropped from search strings.
const CONJUNCTIONS: &[&str] = &["with", "and", "or", "vs"];

/// Number of variants produced by [`variants`].
pub const VARIANT_COUNT: usize = 3;

/// Decode XML entities, strip NUL characters, and trim whitespace.
///
/// Unknown named entities and out-of-range code points are left as written.
pub fn escape(raw: &str) -> String {
    let decoded = ENTITY_RE.replace_all(raw, |caps: &Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.replace('\0', "").trim().to_string()
}

fn decode_entity(body: &str) -> Option<String> {
    let code_point = if let Some(hex) = body.strip_prefix("#x").or(body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        let named = match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => return None,
        };
        return Some(named.to_string());
    };
    char::from_u32(code_point).map(String::from)
}

/// Produce the ordered search variants for a cleaned name.
///
/// 1. the normalized name,
/// 2. the normalized name without its first word (usually the brewery),
/// 3. the normalized name without its last word (usually the style).
///
/// Normalization repairs apostrophes, turns parentheses and slashes into
/// word breaks, and drops the conjunctions in [`CONJUNCTIONS`]. A name of
/// one word yields empty strings for the last two variants.
///
/// # Examples
///
/// ```
/// use brewscrape_core::naming::variants;
///
/// assert_eq!(
///     variants("Golden Ale (Special)"),
///     ["Golden Ale Special", "Ale Special", "Golden Ale"],
/// );
/// ```
pub fn variants(clean_name: &str) -> [String; VARIANT_COUNT] {
    let tokens = normalized_tokens(clean_name);

    let full = tokens.join(" ");
    let without_first = tokens.get(1..).map(|t| t.join(" ")).unwrap_or_default();
    let without_last = tokens
        .len()
        .checked_sub(1)
        .map(|end| tokens[..end].join(" "))
        .unwrap_or_default();

    [full, without_first, without_last]
}

fn normalized_tokens(name: &str) -> Vec<String> {
    let mut repaired = name.to_string();
    for form in APOSTROPHE_FORMS {
        repaired = repaired.replace(form, "'");
    }
    let spaced = repaired.replace(SEPARATOR_CHARS, " ");

    spaced
        .split_whitespace()
        .filter(|token| !is_conjunction(token))
        .map(str::to_string)
        .collect()
}

fn is_conjunction(token: &str) -> bool {
    let word = token.trim_end_matches('.');
    CONJUNCTIONS.iter().any(|c| word.eq_ignore_ascii_case(c))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
