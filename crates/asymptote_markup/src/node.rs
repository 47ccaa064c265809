use std::fmt;

/// An ordered run of nodes: a whole page, a template parameter, a link title.
///
/// `Display` reproduces the markup the nodes were parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wikicode {
    pub nodes: Vec<Node>,
}

impl Wikicode {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// A tree holding a single text node (or nothing, for the empty string).
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            nodes: vec![Node::Text(text)],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Wikicode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// A syntax node. The set of variants is closed; consumers match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Argument(Argument),
    Comment(Comment),
    ExternalLink(ExternalLink),
    Heading(Heading),
    HtmlEntity(HtmlEntity),
    Tag(Tag),
    Template(Template),
    Text(String),
    Wikilink(Wikilink),
}

impl Node {
    /// True for text nodes holding nothing but whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }

    /// Direct sub-trees of this node, in source order.
    pub fn children(&self) -> Vec<&Wikicode> {
        match self {
            Node::Argument(argument) => {
                let mut out = vec![&argument.name];
                out.extend(argument.default.as_ref());
                out
            }
            Node::ExternalLink(link) => {
                let mut out = vec![&link.url];
                out.extend(link.title.as_ref());
                out
            }
            Node::Heading(heading) => vec![&heading.title],
            Node::Tag(tag) => vec![&tag.contents],
            Node::Template(template) => {
                let mut out = vec![&template.name];
                out.extend(template.params.iter().map(|param| &param.value));
                out
            }
            Node::Wikilink(link) => {
                let mut out = vec![&link.title];
                out.extend(link.text.as_ref());
                out
            }
            Node::Comment(_) | Node::HtmlEntity(_) | Node::Text(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Argument(argument) => argument.fmt(f),
            Node::Comment(comment) => comment.fmt(f),
            Node::ExternalLink(link) => link.fmt(f),
            Node::Heading(heading) => heading.fmt(f),
            Node::HtmlEntity(entity) => f.write_str(&entity.raw),
            Node::Tag(tag) => tag.fmt(f),
            Node::Template(template) => template.fmt(f),
            Node::Text(text) => f.write_str(text),
            Node::Wikilink(link) => link.fmt(f),
        }
    }
}

/// `{{{name|default}}}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: Wikicode,
    pub default: Option<Wikicode>,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{{{}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, "|{default}")?;
        }
        f.write_str("}}}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub contents: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!--{}-->", self.contents)
    }
}

/// `[url title]` or a bare URL in running text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: Wikicode,
    pub title: Option<Wikicode>,
    pub brackets: bool,
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.brackets {
            return self.url.fmt(f);
        }
        match &self.title {
            Some(title) => write!(f, "[{} {}]", self.url, title),
            None => write!(f, "[{}]", self.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 through 6.
    pub level: u8,
    pub title: Wikicode,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks = "=".repeat(usize::from(self.level));
        write!(f, "{marks}{}{marks}", self.title)
    }
}

/// `&name;`, `&#NNN;` or `&#xHHH;` together with the character it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlEntity {
    pub raw: String,
    pub value: String,
}

/// An HTML/extension tag or a piece of wiki markup parsed as one
/// (`''italic''`, list bullets, table cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercase tag name (`ref`, `table`, `i`, `li`, ...).
    pub name: String,
    /// Raw attribute text, untrimmed.
    pub attributes: String,
    pub self_closing: bool,
    /// Written with wiki syntax rather than angle brackets.
    pub wiki_markup: bool,
    /// Raw opening delimiter as it appeared in the source.
    pub open: String,
    /// Raw closing delimiter; empty for self-closing tags.
    pub close: String,
    pub contents: Wikicode,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.open, self.contents, self.close)
    }
}

/// `{{name|positional|key=value}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: Wikicode,
    pub params: Vec<Parameter>,
}

impl Template {
    /// Lowercased, trimmed name used for every name-based decision.
    pub fn name_key(&self) -> String {
        self.name.to_string().trim().to_lowercase()
    }

    /// The parameter stored under `key`. Later duplicates win, as they do
    /// when the page is rendered.
    pub fn get(&self, key: &str) -> Option<&Parameter> {
        self.params.iter().rev().find(|param| param.name == key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn value(&self, key: &str) -> Option<&Wikicode> {
        self.get(key).map(|param| &param.value)
    }

    /// Value of the `index`-th positional parameter (1-based).
    pub fn positional(&self, index: usize) -> Option<&Wikicode> {
        self.value(&index.to_string())
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameters written without an explicit `key=`.
    pub fn unnamed_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|param| !param.showkey)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}", self.name)?;
        for param in &self.params {
            write!(f, "|{param}")?;
        }
        f.write_str("}}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Trimmed key: the explicit name, or `"1"`, `"2"`, ... for positionals.
    pub name: String,
    /// The key exactly as written, used to reproduce the source.
    pub raw_name: String,
    pub value: Wikicode,
    /// The key was written out (`key=value`).
    pub showkey: bool,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.showkey {
            write!(f, "{}=", self.raw_name)?;
        }
        self.value.fmt(f)
    }
}

/// `[[title|text]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wikilink {
    pub title: Wikicode,
    pub text: Option<Wikicode>,
}

impl Wikilink {
    /// Namespace prefix of the target (`"file"` for `[[File:x.png]]`),
    /// lowercased. `None` when the target has no colon; `Some("")` for the
    /// `[[:Target]]` escape form.
    pub fn namespace(&self) -> Option<String> {
        let target = self.title.to_string();
        target
            .split_once(':')
            .map(|(prefix, _)| prefix.trim().to_lowercase())
    }
}

impl fmt::Display for Wikilink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "[[{}|{}]]", self.title, text),
            None => write!(f, "[[{}]]", self.title),
        }
    }
}
