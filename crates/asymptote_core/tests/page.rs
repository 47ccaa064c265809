use std::sync::Once;

use asymptote_core::{assemble, extract_page, normalize, PageExtractor, SectionResult, Vocabulary};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(asymptote_logging::initialize_for_tests);
}

#[test]
fn excluded_sections_contribute_nothing() {
    init_logging();
    let page = extract_page("Intro text.\n== References ==\n{{reflist}}\n* [[Smith]] 2000\n");

    assert_eq!(page.text, "Intro text.");
    assert_eq!(page.opening_text, "Intro text.");
    assert!(page.heading.is_empty());
    assert!(page.links.is_empty());
}

#[test]
fn excluded_sections_take_their_sub_sections_along() {
    init_logging();
    let page = extract_page(
        "A\n== External links ==\n=== Official ===\n[[Site]]\n== Life ==\nB",
    );

    assert_eq!(page.text, "A\nB");
    assert_eq!(page.heading, vec!["Life".to_string()]);
    assert!(page.links.is_empty());
}

#[test]
fn see_also_text_is_auxiliary_only() {
    init_logging();
    let page = extract_page("Lead.\n== See also ==\n* [[Topology]]\n* [[Geometry]]\n");

    assert_eq!(page.text, "Lead.");
    assert_eq!(page.auxiliary_text, vec!["Topology".to_string(), "Geometry".to_string()]);
    assert_eq!(page.heading, vec!["See also".to_string()]);
    assert_eq!(page.links, vec!["Topology".to_string(), "Geometry".to_string()]);
}

#[test]
fn table_text_never_reaches_plain_text() {
    init_logging();
    let page = extract_page("Before.\n{|\n| Cell one || Cell two\n|}\nAfter.");

    assert_eq!(page.text, "Before.\nAfter.");
    assert_eq!(
        page.auxiliary_text,
        vec!["Cell one".to_string(), "Cell two".to_string()]
    );
}

#[test]
fn opening_text_is_the_lead_only() {
    init_logging();
    let page = extract_page("Lead ''para''.\n== History ==\nOld times.\n=== Ancient ===\nVery old.");

    assert_eq!(page.opening_text, "Lead para.");
    assert_eq!(page.text, "Lead para.\nOld times.\nVery old.");
    assert_eq!(page.heading, vec!["History".to_string(), "Ancient".to_string()]);
    assert!(page.html.contains("<h2> History </h2>"));
    assert!(page.html.contains("<h3> Ancient </h3>"));
}

#[test]
fn hatnotes_at_section_start_go_to_auxiliary() {
    init_logging();
    let page = extract_page(
        "{{about|the planet|the god|Mars (god)}}\n{{short description|Fourth planet}}\nMars is a planet.\n== Name ==\n{{further|Names of Mars}}\nNamed after a god.",
    );

    assert_eq!(page.text, "Mars is a planet.\nNamed after a god.");
    assert_eq!(page.opening_text, "Mars is a planet.");
    assert_eq!(
        page.auxiliary_text,
        vec![
            "the planet".to_string(),
            "Fourth planet".to_string(),
            "Names of Mars".to_string()
        ]
    );
}

#[test]
fn a_template_that_is_no_hatnote_is_dropped_and_ends_the_hatnote_phase() {
    init_logging();
    let page = extract_page("{{lang|fr|Bonjour}} world.");
    assert_eq!(page.text, "world.");

    let page = extract_page(
        "{{about|the planet}}\n{{lang|fr|Mars}}\n{{about|late note}}\nMars is red. {{lang|fr|Rouge}}",
    );
    assert_eq!(page.auxiliary_text, vec!["the planet".to_string()]);
    assert_eq!(page.text, "Mars is red. Rouge");
}

#[test]
fn text_ends_the_hatnote_phase_and_is_kept() {
    init_logging();
    let page = extract_page("Intro {{lang|fr|Bonjour}}.\n== Name ==\n{{further|Names}}\nText.");

    assert_eq!(page.text, "Intro Bonjour.\nText.");
    assert_eq!(page.auxiliary_text, vec!["Names".to_string()]);
}

#[test]
fn links_are_canonical_and_filtered() {
    init_logging();
    let page = extract_page(
        "See [[physics#History|physics]], [[mathematics]], [[File:X.png|thumb|[[cat]]]], [[Category:Y]], [[:topology]], [[#Local]].",
    );

    assert_eq!(
        page.links,
        vec![
            "Physics".to_string(),
            "Mathematics".to_string(),
            "Cat".to_string(),
            "Topology".to_string()
        ]
    );
    assert_eq!(page.text, "See physics, mathematics, , , topology, #Local.");
}

#[test]
fn quote_parity_repair_reaches_the_heading() {
    init_logging();
    let page = extract_page("===''The Times They Are A-Changin''' sessions===\nText");

    assert_eq!(
        page.heading,
        vec!["The Times They Are A-Changin' sessions".to_string()]
    );
}

#[test]
fn short_auxiliary_fragments_are_dropped() {
    let page = assemble(vec![SectionResult {
        auxiliary: vec!["x".to_string(), " ab \n c".to_string(), "\n-\n".to_string()],
        ..SectionResult::default()
    }]);

    assert_eq!(page.auxiliary_text, vec!["abc".to_string()]);
}

#[test]
fn assembled_text_is_normalized() {
    let page = assemble(vec![
        SectionResult {
            rendered: vec!["<b>a</b>".to_string()],
            plain: vec!["a  ".to_string(), "\n\n".to_string()],
            opening_text: vec!["a  ".to_string()],
            ..SectionResult::default()
        },
        SectionResult {
            plain: vec!["b\t c".to_string()],
            headings: vec!["B".to_string()],
            links: vec!["B".to_string()],
            ..SectionResult::default()
        },
    ]);

    assert_eq!(page.html, "<b>a</b>");
    assert_eq!(page.text, "a\nb c");
    assert_eq!(page.opening_text, "a");
    assert_eq!(page.heading, vec!["B".to_string()]);
    assert_eq!(page.links, vec!["B".to_string()]);
    assert_eq!(normalize(&page.text), page.text);
}

#[test]
fn custom_vocabulary_changes_routing() {
    init_logging();
    let mut vocabulary = Vocabulary::default();
    vocabulary.auxiliary_sections.insert("trivia".to_string());
    vocabulary.excluded_sections.remove("external links");
    let extractor = PageExtractor::new(vocabulary);

    let page = extractor.extract("Lead.\n== Trivia ==\nFun fact.\n== External links ==\nSite list.");

    assert_eq!(page.text, "Lead.\nSite list.");
    assert_eq!(page.auxiliary_text, vec!["Fun fact.".to_string()]);
}

#[test]
fn page_serializes_with_channel_names() {
    init_logging();
    let page = extract_page("Hello [[world]].");
    let value = serde_json::to_value(&page).expect("serialize");

    let mut keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["auxiliary_text", "heading", "html", "links", "opening_text", "text"]
    );
    assert_eq!(value["links"][0], "World");
}
