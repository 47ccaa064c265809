use asymptote_logging::asy_debug;
use asymptote_markup::{Heading, Node, Section};

use crate::dispatch::Dispatcher;
use crate::hatnote::extract_hatnote;
use crate::links::extract_links;
use crate::normalize::normalize;

/// Channel output of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionResult {
    pub rendered: Vec<String>,
    pub plain: Vec<String>,
    pub auxiliary: Vec<String>,
    /// Same fragments as `plain`, for the lead section only.
    pub opening_text: Vec<String>,
    /// Normalized text of every heading in the section, sub-headings included.
    pub headings: Vec<String>,
    pub links: Vec<String>,
}

/// Lowercased, normalized heading text used for exclusion and auxiliary
/// routing.
pub fn section_key(dispatcher: &Dispatcher<'_>, heading: &Heading) -> String {
    normalize(&heading_text(dispatcher, heading).to_lowercase())
}

fn heading_text(dispatcher: &Dispatcher<'_>, heading: &Heading) -> String {
    normalize(&dispatcher.plain_text(&heading.title))
}

/// Routes every node of `section` into the section's channels.
///
/// Templates at the very start of the section are first offered as hatnotes.
/// The first template that yields no hatnote ends that phase and is dropped;
/// the first other node that is not blank text ends it and is dispatched
/// like any other. Body text of auxiliary-only sections
/// (such as "See also") lands in `auxiliary` instead of `plain`.
pub fn process_section(dispatcher: &Dispatcher<'_>, section: &Section<'_>) -> SectionResult {
    let vocabulary = dispatcher.vocabulary();
    let key = section
        .heading()
        .map(|heading| section_key(dispatcher, heading))
        .unwrap_or_default();
    let auxiliary_only = vocabulary.is_auxiliary_section(&key);
    let is_lead = section.is_lead();

    let mut result = SectionResult {
        headings: section
            .filter_headings()
            .into_iter()
            .map(|heading| heading_text(dispatcher, heading))
            .collect(),
        links: extract_links(section),
        ..SectionResult::default()
    };

    let mut nodes = section.nodes();
    if let Some((Node::Heading(_), _)) = nodes.split_first() {
        let bundle = dispatcher.dispatch(&nodes[0]);
        result.rendered.extend(bundle.rendered);
        nodes = &nodes[1..];
    }

    let mut hatnotes_expected = true;
    for node in nodes {
        if hatnotes_expected {
            if node.is_blank_text() {
                continue;
            }
            if let Node::Template(_) = node {
                let hatnote = extract_hatnote(dispatcher, node);
                if hatnote.trim().is_empty() {
                    // Ends the phase without reaching any channel.
                    hatnotes_expected = false;
                } else {
                    result.auxiliary.push(hatnote);
                }
                continue;
            }
            hatnotes_expected = false;
        }

        let bundle = dispatcher.dispatch(node);
        result.rendered.extend(bundle.rendered);
        result.auxiliary.extend(bundle.auxiliary);
        if is_lead {
            result.opening_text.extend(bundle.plain.iter().cloned());
        }
        if auxiliary_only {
            result.auxiliary.extend(bundle.plain);
        } else {
            result.plain.extend(bundle.plain);
        }
    }

    asy_debug!(
        "Section {:?}: {} plain, {} auxiliary fragments, {} links",
        if is_lead { "(lead)" } else { key.as_str() },
        result.plain.len(),
        result.auxiliary.len(),
        result.links.len()
    );
    result
}
