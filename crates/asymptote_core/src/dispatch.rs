use std::borrow::Cow;
use std::cell::Cell;

use asymptote_logging::asy_warn;
use asymptote_markup::{ExternalLink, Node, Tag, Wikicode, Wikilink};

use crate::channels::ChannelBundle;
use crate::templates::expand_template;
use crate::vocabulary::Vocabulary;

/// Walks a syntax tree and decides, node by node, what each channel
/// receives.
///
/// One dispatcher serves one page. Nesting deeper than
/// [`Vocabulary::max_depth`] yields nothing for the offending sub-tree.
pub struct Dispatcher<'v> {
    vocabulary: &'v Vocabulary,
    depth: Cell<usize>,
}

impl<'v> Dispatcher<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            depth: Cell::new(0),
        }
    }

    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    /// Concatenation, channel by channel, of every child's output.
    pub fn dispatch_code(&self, code: &Wikicode) -> ChannelBundle {
        let mut bundle = ChannelBundle::new();
        for node in code.nodes() {
            bundle.extend(self.dispatch(node));
        }
        bundle
    }

    /// Plain-channel text of a sub-tree.
    pub fn plain_text(&self, code: &Wikicode) -> String {
        self.dispatch_code(code).plain_text()
    }

    pub fn dispatch(&self, node: &Node) -> ChannelBundle {
        let depth = self.depth.get();
        if depth >= self.vocabulary.max_depth {
            asy_warn!(
                "Dispatch depth limit {} reached; dropping {}",
                self.vocabulary.max_depth,
                node_kind(node)
            );
            return ChannelBundle::new();
        }
        self.depth.set(depth + 1);
        let bundle = self.dispatch_node(node);
        self.depth.set(depth);
        bundle
    }

    fn dispatch_node(&self, node: &Node) -> ChannelBundle {
        match node {
            Node::Argument(argument) => ChannelBundle::text(argument.to_string()),
            Node::Comment(_) => ChannelBundle::new(),
            Node::ExternalLink(link) => self.external_link(link),
            Node::Heading(heading) => {
                let title = self.dispatch_code(&heading.title);
                let mut bundle = ChannelBundle::new();
                bundle.push_rendered(format!(
                    "<h{level}>{}</h{level}>",
                    title.rendered_text(),
                    level = heading.level
                ));
                bundle
            }
            Node::HtmlEntity(entity) => {
                ChannelBundle::pair(entity.raw.as_str(), entity.value.as_str())
            }
            Node::Tag(tag) => self.tag(tag),
            Node::Template(template) => expand_template(self, template),
            Node::Text(text) => ChannelBundle::text(repair_braces(text)),
            Node::Wikilink(link) => self.wikilink(link),
        }
    }

    fn external_link(&self, link: &ExternalLink) -> ChannelBundle {
        let url = self.dispatch_code(&link.url);
        let title = link
            .title
            .as_ref()
            .map(|title| self.dispatch_code(title))
            .unwrap_or_default();

        let mut bundle = ChannelBundle::new();
        bundle.push_rendered(format!(
            r#"<a href="{}">{}</a>"#,
            url.rendered_text(),
            title.rendered_text()
        ));
        bundle.plain.extend(title.plain);
        bundle
    }

    fn tag(&self, tag: &Tag) -> ChannelBundle {
        let vocabulary = self.vocabulary;
        if vocabulary.is_reference_tag(&tag.name) {
            return ChannelBundle::new();
        }
        if tag.self_closing {
            let mut bundle = ChannelBundle::new();
            bundle.push_rendered(tag.to_string());
            return bundle;
        }
        if vocabulary.is_table_tag(&tag.name) {
            let contents = self.dispatch_code(&tag.contents);
            return ChannelBundle {
                auxiliary: contents.plain,
                ..ChannelBundle::default()
            };
        }
        if vocabulary.is_math_tag(&tag.name) {
            let mut bundle = ChannelBundle::new();
            bundle.push_rendered(tag.to_string());
            return bundle;
        }
        self.dispatch_code(&tag.contents)
    }

    fn wikilink(&self, link: &Wikilink) -> ChannelBundle {
        let namespace = link.namespace();
        if namespace
            .as_deref()
            .is_some_and(|namespace| self.vocabulary.is_media_namespace(namespace))
        {
            return self.media_caption(link);
        }
        if let Some(text) = &link.text {
            return self.dispatch_code(text);
        }

        if namespace.as_deref() == Some("") {
            // `[[:Target]]` shows as `Target`.
            return self.dispatch_code(&without_escape_colon(&link.title));
        }
        self.dispatch_code(&link.title)
    }

    /// File, image and category links contribute only their caption: the last
    /// `|` segment of the display text, unless that segment is an image
    /// option.
    fn media_caption(&self, link: &Wikilink) -> ChannelBundle {
        let mut bundle = ChannelBundle::new();
        let Some(text) = &link.text else {
            return bundle;
        };
        let plain = self.plain_text(text);
        let caption = plain.rsplit('|').next().unwrap_or_default();
        if !self.vocabulary.is_file_link_option(caption) {
            bundle.auxiliary.push(caption.to_string());
        }
        bundle
    }
}

/// The link title without the `:` that escapes its namespace, removed from
/// the leading text node so that the rest of the title renders unchanged.
fn without_escape_colon(title: &Wikicode) -> Wikicode {
    let mut nodes = title.nodes.clone();
    if let Some(Node::Text(first)) = nodes.first_mut() {
        if let Some(rest) = first.trim_start().strip_prefix(':') {
            *first = rest.to_string();
        }
    }
    if matches!(nodes.first(), Some(Node::Text(text)) if text.is_empty()) {
        nodes.remove(0);
    }
    Wikicode::new(nodes)
}

/// Drops `{{` or `}}` when only one of the two occurs, the trace a template
/// leaves when the parser could not close it.
fn repair_braces(text: &str) -> Cow<'_, str> {
    match (text.contains("{{"), text.contains("}}")) {
        (true, false) => Cow::Owned(text.replace("{{", "")),
        (false, true) => Cow::Owned(text.replace("}}", "")),
        _ => Cow::Borrowed(text),
    }
}

fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Argument(_) => "argument",
        Node::Comment(_) => "comment",
        Node::ExternalLink(_) => "external link",
        Node::Heading(_) => "heading",
        Node::HtmlEntity(_) => "entity",
        Node::Tag(_) => "tag",
        Node::Template(_) => "template",
        Node::Text(_) => "text",
        Node::Wikilink(_) => "wikilink",
    }
}
