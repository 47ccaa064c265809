use asymptote_markup::{Node, Wikicode};

use crate::dispatch::Dispatcher;

/// Text of a hatnote-style template found at the start of a section, or an
/// empty string when `node` is not one.
///
/// Infoboxes yield their caption when they have one. `about` notes yield only
/// their first parameter; the rest point at other topics. Anything else
/// yields all of its parameters.
pub fn extract_hatnote(dispatcher: &Dispatcher<'_>, node: &Node) -> String {
    let Node::Template(template) = node else {
        return String::new();
    };
    let name = template.name_key();
    if !dispatcher.vocabulary().is_relevant_hatnote(&name) {
        return String::new();
    }

    let joined = |value: &Wikicode| dispatcher.dispatch_code(value).plain.join(" ");

    if name.contains("infobox") {
        if let Some(caption) = template.value("caption") {
            return joined(caption);
        }
    }
    if name.contains("about") {
        if let Some(first) = template.params().first() {
            return joined(&first.value);
        }
    }
    template
        .params()
        .iter()
        .map(|parameter| joined(&parameter.value))
        .collect::<Vec<_>>()
        .join(" ")
}
