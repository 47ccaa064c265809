use std::sync::Once;

use asymptote_core::{find_rule, ChannelBundle, Dispatcher, Vocabulary};
use asymptote_markup::{parse, Node};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(asymptote_logging::initialize_for_tests);
}

fn render(source: &str) -> ChannelBundle {
    init_logging();
    let vocabulary = Vocabulary::default();
    let dispatcher = Dispatcher::new(&vocabulary);
    dispatcher.dispatch_code(&parse(source))
}

fn channels(source: &str) -> (String, String) {
    let bundle = render(source);
    (bundle.rendered_text(), bundle.plain_text())
}

fn plain(source: &str) -> String {
    render(source).plain_text()
}

fn rule_label(source: &str) -> Option<&'static str> {
    let tree = parse(source);
    let Some(Node::Template(template)) = tree.nodes().first() else {
        panic!("expected a template in {source:?}");
    };
    find_rule(template, &Vocabulary::default()).map(|rule| rule.label)
}

#[test]
fn dash_and_space_templates() {
    assert_eq!(channels("{{snd}}"), ("&nbsp;&ndash; ".to_string(), " - ".to_string()));
    assert_eq!(channels("{{nbsp}}"), ("&nbsp;".to_string(), " ".to_string()));
    assert_eq!(channels("{{=}}"), ("=".to_string(), "=".to_string()));
}

#[test]
fn cross_references_join_with_and() {
    assert_eq!(plain("{{main|A}}"), "A");
    assert_eq!(plain("{{main|A|B}}"), "A and B");
    assert_eq!(plain("{{main|A|B|C}}"), "A, B and C");
    assert_eq!(plain("{{see also|A|l1=Alpha|B}}"), "Alpha and B");
    assert!(render("{{main}}").is_empty());
}

#[test]
fn nihongo_composes_the_triple() {
    assert_eq!(plain("{{nihongo|Tokyo|とうきょう|Tōkyō}}"), "Tokyo (とうきょう, Tōkyō)");
    assert_eq!(plain("{{nihongo|||Tōkyō}}"), "Tōkyō");
    assert_eq!(
        channels("{{nihongo|Tokyo||Tōkyō}}"),
        ("Tokyo (Tōkyō)".to_string(), "Tokyo (Tōkyō)".to_string())
    );
}

#[test]
fn val_assembles_number_exponent_and_units() {
    assert_eq!(
        channels("{{val|1.5|e=3|u=m|up=s}}"),
        (
            "1.5 × 10<sup>3</sup> m/s".to_string(),
            "1.5 × 10^3 m/s".to_string()
        )
    );
    assert_eq!(plain("{{val|p=~|42|ul=kg|s=!}}"), "~42 kg!");
}

#[test]
fn gaps_group_digits() {
    assert_eq!(plain("{{gaps|3.141|592|65}}"), "3.141 592 65");
    assert_eq!(
        channels("{{gaps|lhs=N|6.022|140|e=23}}"),
        (
            "N = 6.022 140 × 10<sup>23</sup>".to_string(),
            "N = 6.022 140 × 10^23".to_string()
        )
    );
    assert_eq!(plain("{{gaps|1|024|e=10|base=2|u=B}}"), "1 024 × 2^10 B");
}

#[test]
fn language_and_translation_wrappers_pass_one_parameter() {
    assert_eq!(plain("{{lang|fr|Bonjour}}"), "Bonjour");
    assert_eq!(plain("{{lang-fr|Salut}}"), "Salut");
    assert_eq!(plain("{{IPA|/ˈtɒm/}}"), "/ˈtɒm/");
    assert_eq!(plain("{{lit|water of life}}"), "water of life");
    assert_eq!(plain("{{transliteration|ru|Moskva}}"), "Moskva");
    assert_eq!(plain("{{ill|Foo|de|lt=Bar}}"), "Bar");
    assert_eq!(plain("{{ill|Foo|de}}"), "Foo");
    assert_eq!(plain("{{annotated link|Topology}}"), "Topology");
    assert_eq!(plain("{{quote|text=To be}}"), "To be");
    assert_eq!(plain("{{quote|Or not}}"), "Or not");
}

#[test]
fn pronunciation_skips_modifiers_and_named_parameters() {
    assert_eq!(plain("{{IPAc-en|US|ˈ|t|ɒ|m|audio=Tom.ogg}}"), "ˈtɒm");
}

#[test]
fn floruit_joins_the_range_with_a_hyphen() {
    assert_eq!(plain("{{fl.|1200|1250}}"), "1200-1250");
    assert_eq!(plain("{{circa|1500}}"), "1500");
}

#[test]
fn math_like_templates() {
    assert_eq!(channels("{{mvar|x}}"), ("<math>x</math>".to_string(), "x".to_string()));
    assert_eq!(channels("{{sfrac|3}}"), ("<math>1/3</math>".to_string(), "1/3".to_string()));
    assert_eq!(channels("{{sfrac|1|2}}"), ("<math>1/2</math>".to_string(), "1/2".to_string()));
    assert_eq!(plain("{{sfrac|1|2|3}}"), "1 2/3");
    assert_eq!(channels("{{sub|2}}"), ("<sub>2</sub>".to_string(), "_2".to_string()));
    assert_eq!(channels("{{sup|2}}"), ("<sup>2</sup>".to_string(), "^2".to_string()));
    assert_eq!(plain("{{math|x + y}}"), "x + y");
    assert_eq!(plain("{{chem|H|2|O}}"), "H2O");
}

#[test]
fn math_without_a_parameter_falls_through() {
    assert_eq!(rule_label("{{math|x}}"), Some("math"));
    assert_eq!(rule_label("{{math}}"), None);
    assert!(render("{{math}}").is_empty());
}

#[test]
fn formatting_templates() {
    assert_eq!(
        channels("{{nowrap|a b}}"),
        (r#"<span class="nowrap">a b</span>"#.to_string(), "a b".to_string())
    );
    assert_eq!(channels("{{pi}}"), ("&pi;".to_string(), "pi".to_string()));
    assert_eq!(
        channels("{{abbr|NATO|North Atlantic Treaty Organization}}"),
        (
            r#"<abbr title="North Atlantic Treaty Organization">NATO</abbr>"#.to_string(),
            "North Atlantic Treaty Organization (NATO)".to_string()
        )
    );
    assert!(render("{{abbr|NATO}}").is_empty());
}

#[test]
fn ignored_and_unknown_templates_emit_nothing() {
    for source in [
        "{{citation needed|date=May 2020}}",
        "{{reflist}}",
        "{{sfn|Smith|2000|p=4}}",
        "{{convert|5|km}}",
        "{{some unknown template|x=1}}",
    ] {
        let bundle = render(source);
        assert_eq!(bundle, ChannelBundle::default(), "{source}");
    }
    assert_eq!(rule_label("{{reflist}}"), Some("ignored"));
    assert_eq!(rule_label("{{some unknown template}}"), None);
}

#[test]
fn substring_rules_claim_unrelated_names() {
    assert_eq!(rule_label("{{interval|5}}"), Some("val"));
    assert_eq!(plain("{{interval|5}}"), "5");
    assert_eq!(rule_label("{{Langx|de|Haus}}"), Some("lang"));
}
