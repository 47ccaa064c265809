use asymptote_logging::asy_debug;
use asymptote_markup::{TreeBuilder, WikitextParser};
use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;
use crate::normalize::normalize;
use crate::preprocess::preprocess;
use crate::section::{process_section, section_key, SectionResult};
use crate::vocabulary::Vocabulary;

/// Search channels of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub html: String,
    pub text: String,
    pub opening_text: String,
    pub auxiliary_text: Vec<String>,
    pub heading: Vec<String>,
    pub links: Vec<String>,
}

/// Turns raw page markup into a [`PageResult`].
///
/// Holds no per-page state, so one extractor can serve many threads.
pub struct PageExtractor {
    vocabulary: Vocabulary,
    builder: Box<dyn TreeBuilder>,
}

impl PageExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_builder(vocabulary, Box::new(WikitextParser::new()))
    }

    pub fn with_builder(vocabulary: Vocabulary, builder: Box<dyn TreeBuilder>) -> Self {
        Self {
            vocabulary,
            builder,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn extract(&self, raw: &str) -> PageResult {
        let text = preprocess(raw);
        let tree = self.builder.build(&text);
        let dispatcher = Dispatcher::new(&self.vocabulary);

        let sections = tree.get_sections(&[2], true, |heading| {
            !self
                .vocabulary
                .is_excluded_section(&section_key(&dispatcher, heading))
        });
        asy_debug!(
            "Parsed page of {} bytes into {} top-level nodes, {} sections",
            raw.len(),
            tree.nodes().len(),
            sections.len()
        );

        let results = sections
            .iter()
            .map(|section| process_section(&dispatcher, section))
            .collect();
        assemble(results)
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

/// Extracts `raw` with the built-in vocabulary and parser.
pub fn extract_page(raw: &str) -> PageResult {
    PageExtractor::default().extract(raw)
}

/// Joins section results in order and normalizes the text channels.
///
/// Each auxiliary fragment is normalized on its own with its line breaks
/// removed; fragments left with at most one character are dropped.
pub fn assemble(sections: Vec<SectionResult>) -> PageResult {
    let mut html = String::new();
    let mut text = String::new();
    let mut opening_text = String::new();
    let mut auxiliary = Vec::new();
    let mut heading = Vec::new();
    let mut links = Vec::new();

    for section in sections {
        html.extend(section.rendered);
        text.extend(section.plain);
        opening_text.extend(section.opening_text);
        auxiliary.extend(section.auxiliary);
        heading.extend(section.headings);
        links.extend(section.links);
    }

    let auxiliary_text = auxiliary
        .iter()
        .map(|fragment| normalize(fragment).replace('\n', ""))
        .filter(|fragment| fragment.chars().count() > 1)
        .collect();

    PageResult {
        html,
        text: normalize(&text),
        opening_text: normalize(&opening_text),
        auxiliary_text,
        heading,
        links,
    }
}
