use std::sync::Once;

use asymptote_markup::{parse, Heading, Node};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(asymptote_logging::initialize_for_tests);
}

const PAGE: &str = "Lead [[a]]\n=== Early ===\nstill lead\n== Alpha ==\nbody {{t|[[b]]}}\n=== Alpha one ===\nsub\n== References ==\nrefs [[c]]\n";

fn title(heading: &Heading) -> String {
    heading.title.to_string().trim().to_string()
}

#[test]
fn lead_runs_to_the_first_requested_level() {
    init_logging();
    let tree = parse(PAGE);
    let sections = tree.get_sections(&[2], true, |_| true);

    assert_eq!(sections.len(), 3);
    assert!(sections[0].is_lead());
    let lead_headings: Vec<String> = sections[0].filter_headings().into_iter().map(title).collect();
    assert_eq!(lead_headings, vec!["Early"]);
}

#[test]
fn sections_include_their_sub_sections() {
    init_logging();
    let tree = parse(PAGE);
    let sections = tree.get_sections(&[2], true, |_| true);

    let alpha = &sections[1];
    assert_eq!(alpha.heading().map(title).as_deref(), Some("Alpha"));
    let headings: Vec<String> = alpha.filter_headings().into_iter().map(title).collect();
    assert_eq!(headings, vec!["Alpha", "Alpha one"]);
    assert!(matches!(alpha.nodes().first(), Some(Node::Heading(_))));
}

#[test]
fn unmatched_headings_drop_their_whole_section() {
    init_logging();
    let tree = parse(PAGE);
    let sections = tree.get_sections(&[2], true, |heading| title(heading) != "References");

    assert_eq!(sections.len(), 2);
    let links: Vec<String> = sections
        .iter()
        .flat_map(|section| section.filter_wikilinks())
        .map(|link| link.title.to_string())
        .collect();
    assert_eq!(links, vec!["a", "b"]);
}

#[test]
fn lead_is_kept_even_when_empty() {
    init_logging();
    let tree = parse("== Only ==\ntext");
    let sections = tree.get_sections(&[2], true, |_| true);

    assert_eq!(sections.len(), 2);
    assert!(sections[0].nodes().is_empty());
}

#[test]
fn filter_reaches_into_template_parameters() {
    init_logging();
    let tree = parse("{{outer|x={{inner|[[deep]]}}}}");

    let names: Vec<String> = tree.filter_templates().into_iter().map(|t| t.name_key()).collect();
    assert_eq!(names, vec!["outer", "inner"]);
    assert_eq!(tree.filter_wikilinks().len(), 1);
}
