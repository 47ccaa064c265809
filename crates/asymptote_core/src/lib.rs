//! Asymptote core: turns a wikitext page into search channels.
//!
//! The page is preprocessed, built into a syntax tree, split into sections
//! and walked node by node. Each node contributes to three channels
//! (rendered HTML, plain text, auxiliary text); the page assembler joins them
//! with the lead excerpt, section headings and outgoing links.
mod channels;
mod dispatch;
mod hatnote;
mod links;
mod normalize;
mod page;
mod preprocess;
mod section;
mod templates;
mod vocabulary;

pub use channels::ChannelBundle;
pub use dispatch::Dispatcher;
pub use hatnote::extract_hatnote;
pub use links::{canonical_title, extract_links, link_is_wanted};
pub use normalize::normalize;
pub use page::{assemble, extract_page, PageExtractor, PageResult};
pub use preprocess::preprocess;
pub use section::{process_section, section_key, SectionResult};
pub use templates::{expand_template, find_rule, NameMatch, TemplateRule, RULES};
pub use vocabulary::{Vocabulary, DEFAULT_MAX_DEPTH};
