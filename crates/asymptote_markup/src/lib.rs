//! Wikitext syntax trees for the asymptote workspace.
//!
//! [`WikitextParser`] turns page markup into a [`Wikicode`] tree of [`Node`]s.
//! Every node reproduces its source through `Display`, and the tree can be
//! filtered by node kind or split into heading-delimited [`Section`]s.

mod entity;
mod node;
mod parser;
mod tree;

pub use entity::decode_entity;
pub use node::{
    Argument, Comment, ExternalLink, Heading, HtmlEntity, Node, Parameter, Tag, Template,
    Wikicode, Wikilink,
};
pub use parser::{TreeBuilder, WikitextParser, DEFAULT_MAX_DEPTH};
pub use tree::Section;

/// Parses `text` with the default [`WikitextParser`].
pub fn parse(text: &str) -> Wikicode {
    WikitextParser::new().build(text)
}
