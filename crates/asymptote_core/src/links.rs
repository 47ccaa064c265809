use asymptote_markup::{Section, Wikilink};

/// Article links only: no namespace prefix, or the `[[:Target]]` escape.
pub fn link_is_wanted(link: &Wikilink) -> bool {
    link.namespace().map_or(true, |prefix| prefix.is_empty())
}

/// Canonical page title for a link target: fragment dropped, first character
/// upper-cased, spaces as underscores. `None` for in-page anchors such as
/// `#History`.
pub fn canonical_title(target: &str) -> Option<String> {
    let target = target.trim();
    let target = target.strip_prefix(':').unwrap_or(target);
    let page = target.split('#').next().unwrap_or_default().trim();

    let mut chars = page.chars();
    let first = chars.next()?;
    let mut title: String = first.to_uppercase().collect();
    title.push_str(chars.as_str());
    Some(title.replace(' ', "_"))
}

/// Canonical titles of every article link in the section, in document order,
/// including links nested in templates and captions.
pub fn extract_links(section: &Section<'_>) -> Vec<String> {
    section
        .filter_wikilinks()
        .into_iter()
        .filter(|link| link_is_wanted(link))
        .filter_map(|link| canonical_title(&link.title.to_string()))
        .collect()
}
