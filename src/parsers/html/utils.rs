/// ASCII whitespace, as HTML defines it
///
/// U+00A0 is deliberately absent: the parser stores `&nbsp;` as that character,
/// and a node holding only `&nbsp;` still carries visible content.
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// The character `&nbsp;` decodes to
pub const NBSP: char = '\u{a0}';

/// Attributes allowed to stay on the `<html>` element
pub const HTML_TAG_ALLOWED_ATTRIBUTES: &[&str] = &["lang"];

/// Tag prefixes of Office namespaces (`<o:p>`, `<v:shape>`, ...)
pub const WORD_TAG_PREFIXES: &[&str] = &["o:", "v:"];

/// Tags Word writes for its own bookkeeping
pub const WORD_TAG_NAMES: &[&str] = &["xml", "w:worddocument"];

/// Presentational attributes dropped from `<table>`
pub const TABLE_ATTRIBUTES: &[&str] = &["width", "border", "cellspacing", "cellpadding"];

/// Presentational attributes dropped from `<td>`
pub const TABLE_CELL_ATTRIBUTES: &[&str] = &["width"];

/// Body colour attributes left over from HTML 3.2
pub const LINK_ATTRIBUTES: &[&str] = &["link", "vlink"];

/// Checks whether text is blank once ASCII whitespace is trimmed
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(WHITESPACES).is_empty()
}

/// Checks whether a tag name belongs to Word's private vocabulary
pub fn is_word_tag(tag_name: &str) -> bool {
    WORD_TAG_PREFIXES
        .iter()
        .any(|prefix| tag_name.starts_with(prefix))
        || WORD_TAG_NAMES.contains(&tag_name)
}
