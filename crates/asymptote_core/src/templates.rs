//! How each template family renders.
//!
//! Rules are tried in table order against the lowercased, trimmed template
//! name and the first match wins. Several rules match on substrings, so a
//! name such as `interval` is taken by the `val` rule; the order is part of
//! the behavior.

use asymptote_logging::asy_trace;
use asymptote_markup::{Template, Wikicode};

use crate::channels::ChannelBundle;
use crate::dispatch::Dispatcher;
use crate::vocabulary::Vocabulary;

/// How a rule recognizes a template name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
    Exactly(&'static str),
    OneOf(&'static [&'static str]),
    /// Substring match that only applies when the parameter is present.
    ContainsWithParam(&'static str, &'static str),
    /// Listed in [`Vocabulary::ignored_templates`].
    Ignored,
}

impl NameMatch {
    fn matches(self, name: &str, template: &Template, vocabulary: &Vocabulary) -> bool {
        match self {
            NameMatch::Contains(fragment) => name.contains(fragment),
            NameMatch::ContainsAny(fragments) => fragments.iter().any(|f| name.contains(f)),
            NameMatch::Exactly(expected) => name == expected,
            NameMatch::OneOf(names) => names.iter().any(|candidate| *candidate == name),
            NameMatch::ContainsWithParam(fragment, param) => {
                name.contains(fragment) && template.has(param)
            }
            NameMatch::Ignored => vocabulary.is_ignored_template(name),
        }
    }
}

type Expand = fn(&Dispatcher<'_>, &Template) -> ChannelBundle;

pub struct TemplateRule {
    pub label: &'static str,
    pub matches: NameMatch,
    expand: Expand,
}

impl TemplateRule {
    const fn new(label: &'static str, matches: NameMatch, expand: Expand) -> Self {
        Self {
            label,
            matches,
            expand,
        }
    }
}

const FLORUIT_NAMES: &[&str] = &[
    "fl", "fl.", "circa", "c.", "born-in", "born in", "b.", "died-in", "died in", "d.",
    "married-in", "married in", "m.", "reign", "rexit", "ruled", "r.",
];

const LITERAL_NAMES: &[&str] = &["literal translation", "literally", "lit", "lit."];

const DASH_NAMES: &[&str] = &["dash", "snd", "spnd", "sndash", "spndash", "spaced en dash"];

const GREEK_NAMES: &[&str] = &[
    "gamma", "epsilon", "varepsilon", "theta", "vartheta", "kappa", "lambda", "mu", "pi",
    "sigma", "varsigma", "tau", "upsilon", "phi", "varphi", "xi",
];

/// The rule table, in priority order.
pub static RULES: &[TemplateRule] = &[
    TemplateRule::new("ipac", NameMatch::Contains("ipac"), expand_ipac),
    TemplateRule::new("ipa", NameMatch::Contains("ipa"), expand_first),
    TemplateRule::new("lang", NameMatch::Contains("lang"), expand_lang),
    TemplateRule::new("floruit", NameMatch::OneOf(FLORUIT_NAMES), expand_floruit),
    TemplateRule::new("literal", NameMatch::OneOf(LITERAL_NAMES), expand_first),
    TemplateRule::new(
        "transliteration",
        NameMatch::Exactly("transliteration"),
        expand_second,
    ),
    TemplateRule::new("ill", NameMatch::Contains("ill"), expand_interlanguage_link),
    TemplateRule::new(
        "annotated link",
        NameMatch::Exactly("annotated link"),
        expand_first,
    ),
    TemplateRule::new("nihongo", NameMatch::Contains("nihongo"), expand_nihongo),
    TemplateRule::new("val", NameMatch::Contains("val"), expand_val),
    TemplateRule::new("gaps", NameMatch::Contains("gaps"), expand_gaps),
    TemplateRule::new("space", NameMatch::ContainsAny(&["space", "nbsp"]), expand_space),
    TemplateRule::new("dash", NameMatch::OneOf(DASH_NAMES), expand_dash),
    TemplateRule::new("equals", NameMatch::Exactly("="), expand_equals),
    TemplateRule::new("nowrap", NameMatch::Contains("nowrap"), expand_nowrap),
    TemplateRule::new("greek", NameMatch::OneOf(GREEK_NAMES), expand_greek),
    TemplateRule::new("abbr", NameMatch::Contains("abbr"), expand_abbr),
    TemplateRule::new("math", NameMatch::ContainsWithParam("math", "1"), expand_first),
    TemplateRule::new("mvar", NameMatch::Contains("mvar"), expand_mvar),
    TemplateRule::new("sfrac", NameMatch::Contains("sfrac"), expand_sfrac),
    TemplateRule::new("sub", NameMatch::Contains("sub"), expand_sub),
    TemplateRule::new("sup", NameMatch::Contains("sup"), expand_sup),
    TemplateRule::new("chem", NameMatch::Exactly("chem"), expand_all_params),
    TemplateRule::new(
        "cross-reference",
        NameMatch::ContainsAny(&["main", "see also"]),
        expand_cross_reference,
    ),
    TemplateRule::new("quote", NameMatch::Contains("quote"), expand_quote),
    TemplateRule::new("ignored", NameMatch::Ignored, expand_nothing),
];

/// The first rule matching `template`, if any.
pub fn find_rule(template: &Template, vocabulary: &Vocabulary) -> Option<&'static TemplateRule> {
    let name = template.name_key();
    RULES
        .iter()
        .find(|rule| rule.matches.matches(&name, template, vocabulary))
}

/// Channel output of a template. Unrecognized templates contribute nothing.
pub fn expand_template(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    match find_rule(template, dispatcher.vocabulary()) {
        Some(rule) => (rule.expand)(dispatcher, template),
        None => {
            asy_trace!("Dropping unrecognized template {:?}", template.name_key());
            ChannelBundle::new()
        }
    }
}

fn param(dispatcher: &Dispatcher<'_>, template: &Template, key: &str) -> Option<ChannelBundle> {
    template.value(key).map(|value| dispatcher.dispatch_code(value))
}

fn raw(template: &Template, key: &str) -> String {
    template.value(key).map(Wikicode::to_string).unwrap_or_default()
}

fn expand_nothing(_: &Dispatcher<'_>, _: &Template) -> ChannelBundle {
    ChannelBundle::new()
}

fn expand_first(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    param(dispatcher, template, "1").unwrap_or_default()
}

fn expand_second(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    param(dispatcher, template, "2").unwrap_or_default()
}

/// Phonemes only: named parameters and modifier codes (`lang`, `US`) are
/// skipped.
fn expand_ipac(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let vocabulary = dispatcher.vocabulary();
    let mut bundle = ChannelBundle::new();
    for parameter in template.unnamed_params() {
        let value = dispatcher.dispatch_code(&parameter.value);
        if vocabulary.is_ipac_modifier(&value.plain_text().trim().to_lowercase()) {
            continue;
        }
        bundle.extend(value);
    }
    bundle
}

/// `{{lang|fr|Bonjour}}` and `{{lang-fr|Bonjour}}`.
fn expand_lang(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    param(dispatcher, template, "2")
        .or_else(|| param(dispatcher, template, "1"))
        .unwrap_or_default()
}

/// `{{fl.|1200|1250}}` reads `1200-1250`.
fn expand_floruit(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let mut bundle = param(dispatcher, template, "1").unwrap_or_default();
    if let Some(end) = param(dispatcher, template, "2") {
        for (target, source) in [
            (&mut bundle.rendered, end.rendered),
            (&mut bundle.plain, end.plain),
            (&mut bundle.auxiliary, end.auxiliary),
        ] {
            if !source.is_empty() {
                target.push("-".to_string());
                target.extend(source);
            }
        }
    }
    bundle
}

fn expand_interlanguage_link(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    if !template.has("1") {
        return ChannelBundle::new();
    }
    param(dispatcher, template, "lt")
        .or_else(|| param(dispatcher, template, "1"))
        .unwrap_or_default()
}

/// Native script, romanization and translation, composed as
/// `A (B, C)`, `A (B)`, `A (C)`, `C (B)` or a single field.
fn expand_nihongo(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let field = |key: &str| {
        template
            .value(key)
            .map(|value| dispatcher.plain_text(value).trim().to_string())
            .unwrap_or_default()
    };
    let composed = compose_triple(&field("1"), &field("2"), &field("3"));
    if composed.is_empty() {
        return ChannelBundle::new();
    }
    ChannelBundle::text(composed)
}

fn compose_triple(a: &str, b: &str, c: &str) -> String {
    match (!a.is_empty(), !b.is_empty(), !c.is_empty()) {
        (true, true, true) => format!("{a} ({b}, {c})"),
        (true, true, false) => format!("{a} ({b})"),
        (true, false, true) => format!("{a} ({c})"),
        (false, true, true) => format!("{c} ({b})"),
        (false, false, true) => c.to_string(),
        (false, true, false) => b.to_string(),
        (true, false, false) => a.to_string(),
        (false, false, false) => String::new(),
    }
}

/// `{{val|p=~|1.5|e=3|u=m|up=s|s=!}}`.
fn expand_val(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let mut bundle = ChannelBundle::new();
    if let Some(prefix) = param(dispatcher, template, "p") {
        bundle.extend_body(prefix);
    }
    if let Some(number) = param(dispatcher, template, "1") {
        bundle.extend_body(number);
    }
    if let Some(exponent) = param(dispatcher, template, "e") {
        push_power(&mut bundle, "10".to_string(), "10".to_string(), exponent);
    }
    let unit = param(dispatcher, template, "u").or_else(|| param(dispatcher, template, "ul"));
    if let Some(unit) = unit {
        bundle.push_text(" ");
        bundle.extend_body(unit);
    }
    let per = param(dispatcher, template, "up").or_else(|| param(dispatcher, template, "upl"));
    if let Some(per) = per {
        bundle.push_text("/");
        bundle.extend_body(per);
    }
    if let Some(suffix) = param(dispatcher, template, "s") {
        bundle.extend_body(suffix);
    }
    bundle
}

/// Appends ` × base<sup>exp</sup>` (plain ` × base^exp`).
fn push_power(
    bundle: &mut ChannelBundle,
    base_rendered: String,
    base_plain: String,
    exponent: ChannelBundle,
) {
    bundle.push_text(" × ");
    bundle.push_rendered(base_rendered);
    bundle.push_rendered("<sup>");
    bundle.rendered.extend(exponent.rendered);
    bundle.push_rendered("</sup>");
    bundle.push_plain(base_plain);
    bundle.push_plain("^");
    bundle.plain.extend(exponent.plain);
}

/// `{{gaps|lhs=π|3.141|592|e=0|u=rad}}`.
fn expand_gaps(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let mut bundle = ChannelBundle::new();
    if let Some(lhs) = param(dispatcher, template, "lhs") {
        bundle.extend_body(lhs);
        bundle.push_text(" = ");
    }
    for (index, group) in template.unnamed_params().enumerate() {
        if index > 0 {
            bundle.push_text(" ");
        }
        bundle.extend_body(dispatcher.dispatch_code(&group.value));
    }
    if let Some(exponent) = param(dispatcher, template, "e") {
        let (base_rendered, base_plain) = match param(dispatcher, template, "base") {
            Some(base) => (base.rendered_text(), base.plain_text()),
            None => ("10".to_string(), "10".to_string()),
        };
        push_power(&mut bundle, base_rendered, base_plain, exponent);
    }
    if let Some(unit) = param(dispatcher, template, "u") {
        bundle.push_text(" ");
        bundle.extend_body(unit);
    }
    bundle
}

fn expand_space(_: &Dispatcher<'_>, _: &Template) -> ChannelBundle {
    ChannelBundle::pair("&nbsp;", " ")
}

fn expand_dash(_: &Dispatcher<'_>, _: &Template) -> ChannelBundle {
    ChannelBundle::pair("&nbsp;&ndash; ", " - ")
}

fn expand_equals(_: &Dispatcher<'_>, _: &Template) -> ChannelBundle {
    ChannelBundle::text("=")
}

fn expand_nowrap(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let mut bundle = ChannelBundle::new();
    for parameter in template.params() {
        let value = dispatcher.dispatch_code(&parameter.value);
        bundle.push_rendered(r#"<span class="nowrap">"#);
        bundle.rendered.extend(value.rendered);
        bundle.push_rendered("</span>");
        bundle.plain.extend(value.plain);
    }
    bundle
}

fn expand_greek(_: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let name = template.name_key();
    ChannelBundle::pair(format!("&{name};"), name)
}

/// `{{abbr|NATO|North Atlantic Treaty Organization}}`.
fn expand_abbr(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let (Some(short), Some(title)) = (
        param(dispatcher, template, "1"),
        param(dispatcher, template, "2"),
    ) else {
        return ChannelBundle::new();
    };
    let mut bundle = ChannelBundle::new();
    bundle.push_rendered(format!(
        r#"<abbr title="{}">{}</abbr>"#,
        title.rendered_text(),
        short.rendered_text()
    ));
    bundle.push_plain(format!("{} ({})", title.plain_text(), short.plain_text()));
    bundle
}

fn expand_mvar(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let Some(variable) = param(dispatcher, template, "1") else {
        return ChannelBundle::new();
    };
    let mut bundle = ChannelBundle::new();
    bundle.push_rendered(format!("<math>{}</math>", raw(template, "1")));
    bundle.plain.extend(variable.plain);
    bundle
}

/// `{{sfrac|A}}` is 1/A, `{{sfrac|A|B}}` is A/B and `{{sfrac|A|B|C}}` is the
/// mixed number A B/C.
fn expand_sfrac(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let plain = |key: &str| template.value(key).map(|value| dispatcher.plain_text(value));
    let Some(first) = plain("1") else {
        return ChannelBundle::new();
    };
    let (rendered, text) = match (plain("2"), plain("3")) {
        (Some(second), Some(third)) => (
            format!(
                "{} {}/{}",
                raw(template, "1"),
                raw(template, "2"),
                raw(template, "3")
            ),
            format!("{first} {second}/{third}"),
        ),
        (Some(second), None) => (
            format!("{}/{}", raw(template, "1"), raw(template, "2")),
            format!("{first}/{second}"),
        ),
        (None, _) => (format!("1/{}", raw(template, "1")), format!("1/{first}")),
    };
    ChannelBundle::pair(format!("<math>{rendered}</math>"), text)
}

fn expand_sub(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    wrap_script(dispatcher, template, "sub", "_")
}

fn expand_sup(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    wrap_script(dispatcher, template, "sup", "^")
}

fn wrap_script(
    dispatcher: &Dispatcher<'_>,
    template: &Template,
    tag: &str,
    marker: &str,
) -> ChannelBundle {
    let Some(value) = param(dispatcher, template, "1") else {
        return ChannelBundle::new();
    };
    let mut bundle = ChannelBundle::new();
    bundle.push_rendered(format!("<{tag}>{}</{tag}>", raw(template, "1")));
    bundle.push_plain(marker);
    bundle.plain.extend(value.plain);
    bundle
}

fn expand_all_params(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let mut bundle = ChannelBundle::new();
    for parameter in template.params() {
        bundle.extend_body(dispatcher.dispatch_code(&parameter.value));
    }
    bundle
}

/// `{{main|A|B|C}}` reads "A, B and C"; `lN` overrides the label of the
/// N-th target.
fn expand_cross_reference(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    let targets: Vec<ChannelBundle> = (1..=template.params().len())
        .filter(|index| template.has(&index.to_string()))
        .filter_map(|index| {
            param(dispatcher, template, &format!("l{index}"))
                .or_else(|| param(dispatcher, template, &index.to_string()))
        })
        .collect();

    let mut bundle = ChannelBundle::new();
    let count = targets.len();
    for (index, target) in targets.into_iter().enumerate() {
        if index > 0 {
            bundle.push_text(if index + 1 == count { " and " } else { ", " });
        }
        bundle.extend_body(target);
    }
    bundle
}

fn expand_quote(dispatcher: &Dispatcher<'_>, template: &Template) -> ChannelBundle {
    param(dispatcher, template, "text")
        .or_else(|| param(dispatcher, template, "1"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{compose_triple, RULES};

    #[test]
    fn triple_prefers_the_fullest_combination() {
        assert_eq!(compose_triple("A", "B", "C"), "A (B, C)");
        assert_eq!(compose_triple("A", "B", ""), "A (B)");
        assert_eq!(compose_triple("A", "", "C"), "A (C)");
        assert_eq!(compose_triple("", "B", "C"), "C (B)");
        assert_eq!(compose_triple("", "", "C"), "C");
        assert_eq!(compose_triple("", "B", ""), "B");
        assert_eq!(compose_triple("", "", ""), "");
    }

    #[test]
    fn rule_labels_are_unique() {
        let mut labels: Vec<&str> = RULES.iter().map(|rule| rule.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), RULES.len());
    }
}
