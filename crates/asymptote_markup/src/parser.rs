mod table;

use std::collections::HashMap;

use asymptote_logging::asy_trace;

use crate::entity::decode_entity;
use crate::node::{
    Argument, Comment, ExternalLink, Heading, HtmlEntity, Node, Parameter, Tag, Template,
    Wikicode, Wikilink,
};

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Builds a syntax tree from raw page markup.
pub trait TreeBuilder: Send + Sync {
    fn build(&self, text: &str) -> Wikicode;
}

/// Recursive-descent wikitext parser.
///
/// Never fails: any construct that does not close, or that nests deeper than
/// `max_depth`, is kept as literal text.
#[derive(Debug, Clone, Copy)]
pub struct WikitextParser {
    max_depth: usize,
}

impl WikitextParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for WikitextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder for WikitextParser {
    fn build(&self, text: &str) -> Wikicode {
        let mut parser = Parser::new(text, self.max_depth, 0);
        let (nodes, _) = parser.parse_nodes(Context::Document);
        Wikicode::new(nodes)
    }
}

const TAGS: &[&str] = &[
    "abbr", "b", "bdi", "bdo", "big", "blockquote", "br", "caption", "categorytree", "ce",
    "center", "charinsert", "chem", "cite", "code", "data", "dd", "del", "dfn", "div", "dl", "dt",
    "em", "font", "gallery", "graph", "h1", "h2", "h3", "h4", "h5", "h6", "hiero", "hr", "i",
    "imagemap", "includeonly", "indicator", "inputbox", "ins", "kbd", "li", "mapframe", "maplink",
    "mark", "math", "noinclude", "nowiki", "ol", "onlyinclude", "p", "poem", "pre", "q", "rb",
    "ref", "references", "rp", "rt", "rtc", "ruby", "s", "samp", "score", "section", "small",
    "source", "span", "strike", "strong", "sub", "sup", "syntaxhighlight", "table", "td",
    "templatedata", "th", "time", "timeline", "tr", "tt", "u", "ul", "var", "wbr",
];

/// Contents are kept verbatim instead of being parsed as markup.
const RAW_CONTENT_TAGS: &[&str] = &[
    "categorytree", "ce", "charinsert", "chem", "graph", "hiero", "imagemap", "inputbox",
    "mapframe", "maplink", "math", "nowiki", "pre", "score", "source", "syntaxhighlight",
    "templatedata", "timeline",
];

const VOID_TAGS: &[&str] = &["br", "hr", "wbr"];

const URL_SCHEMES: &[&str] = &[
    "http://", "https://", "ftp://", "ftps://", "sftp://", "git://", "svn://", "ssh://",
    "irc://", "ircs://", "gopher://", "telnet://", "nntp://", "mms://", "worldwind://",
    "mailto:", "news:", "urn:", "xmpp:", "geo:", "tel:", "sms:", "magnet:",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Whole page: every construct, including headings.
    Document,
    /// Tag bodies, table cells: everything but headings.
    Block,
    /// Heading titles: no line-start constructs.
    Inline,
    TemplateName,
    TemplateParam,
    ArgumentName,
    ArgumentDefault,
    LinkTitle,
    LinkText,
    ExternalTitle,
    /// Inside `''`, `'''` or `'''''`.
    Style(usize),
    TagBody(&'static str),
}

impl Context {
    fn allows_blocks(self) -> bool {
        matches!(
            self,
            Context::Document
                | Context::Block
                | Context::TemplateParam
                | Context::LinkText
                | Context::TagBody(_)
        )
    }

    fn allows_bare_urls(self) -> bool {
        !matches!(
            self,
            Context::TemplateName | Context::LinkTitle | Context::ExternalTitle
        )
    }
}

/// Why `parse_nodes` stopped. The terminator itself is left unconsumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    Eof,
    Pipe,
    CloseTemplate,
    CloseArgument,
    CloseLink,
    CloseBracket,
    CloseStyle,
    CloseTag,
    Invalid,
}

/// Accumulates nodes, merging adjacent text.
#[derive(Default)]
pub(crate) struct NodeBuf {
    nodes: Vec<Node>,
    text: String,
}

impl NodeBuf {
    pub(crate) fn push(&mut self, node: Node) {
        match node {
            Node::Text(text) => self.text.push_str(&text),
            other => {
                self.flush();
                self.nodes.push(other);
            }
        }
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.text)));
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }
}

/// Constructs tried through [`Parser::attempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Route {
    Heading,
    Table,
    Tag,
    Argument,
    Template,
    Wikilink,
    ExternalLink,
    Entity,
    Style,
}

pub(crate) struct Parser<'s> {
    pub(crate) src: &'s str,
    pub(crate) pos: usize,
    max_depth: usize,
    depth: usize,
    /// Failed routes by start offset, with the shallowest depth they failed
    /// at. Zero marks a failure that did not depend on the nesting limit.
    bad_routes: HashMap<(usize, Route), usize>,
    /// Set when the current attempt ran into `max_depth` somewhere below.
    hit_limit: bool,
}

impl<'s> Parser<'s> {
    pub(crate) fn new(src: &'s str, max_depth: usize, depth: usize) -> Self {
        Self {
            src,
            pos: 0,
            max_depth,
            depth,
            bad_routes: HashMap::new(),
            hit_limit: false,
        }
    }

    /// Parser over a fragment of the page, one nesting level deeper.
    pub(crate) fn fragment(&self, src: &'s str) -> Parser<'s> {
        Parser::new(src, self.max_depth, self.depth + 1)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.src[..self.pos].ends_with('\n')
    }

    /// Runs `f`, rewinding to the starting position if it gives up.
    ///
    /// A failed route is never retried from the same offset, unless the
    /// failure came from the nesting limit and the retry starts shallower.
    /// Every unclosed `{{` or `[[` is therefore scanned a bounded number of
    /// times.
    fn attempt<T>(
        &mut self,
        route: Route,
        f: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        if self.depth >= self.max_depth {
            asy_trace!("nesting limit {} reached at byte {}", self.max_depth, self.pos);
            self.hit_limit = true;
            return None;
        }
        let start = self.pos;
        if let Some(&failed_at) = self.bad_routes.get(&(start, route)) {
            if self.depth >= failed_at {
                return None;
            }
        }

        let outer_hit_limit = std::mem::take(&mut self.hit_limit);
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        if result.is_none() {
            self.pos = start;
            let failed_at = if self.hit_limit { self.depth } else { 0 };
            self.bad_routes
                .entry((start, route))
                .and_modify(|depth| *depth = (*depth).min(failed_at))
                .or_insert(failed_at);
        }
        self.hit_limit |= outer_hit_limit;
        result
    }

    pub(crate) fn parse_nodes(&mut self, ctx: Context) -> (Vec<Node>, Exit) {
        let mut buf = NodeBuf::default();
        loop {
            let rest = self.rest();
            let Some(ch) = rest.chars().next() else {
                return (buf.finish(), Exit::Eof);
            };
            if let Some(exit) = terminator(ctx, rest) {
                return (buf.finish(), exit);
            }
            if ctx.allows_blocks() && self.at_line_start() {
                if let Some(nodes) = self.line_construct(ctx) {
                    nodes.into_iter().for_each(|node| buf.push(node));
                    continue;
                }
            }
            if let Some(nodes) = self.construct(ctx, ch) {
                nodes.into_iter().for_each(|node| buf.push(node));
                continue;
            }
            buf.push_char(ch);
            self.pos += ch.len_utf8();
        }
    }

    fn line_construct(&mut self, ctx: Context) -> Option<Vec<Node>> {
        let rest = self.rest();
        if ctx == Context::Document && rest.starts_with('=') {
            if let Some(heading) = self.attempt(Route::Heading, Self::parse_heading) {
                return Some(vec![heading]);
            }
        }
        if rest.starts_with("{|") {
            if let Some(table) = self.attempt(Route::Table, Self::parse_table) {
                return Some(vec![table]);
            }
        }
        let dashes = rest.bytes().take_while(|b| *b == b'-').count();
        if dashes >= 4 {
            self.pos += dashes;
            return Some(vec![wiki_marker("hr", &rest[..dashes])]);
        }
        let markers = rest
            .bytes()
            .take_while(|b| matches!(b, b'*' | b'#' | b':' | b';'))
            .count();
        if markers > 0 {
            self.pos += markers;
            let nodes = rest[..markers]
                .char_indices()
                .map(|(i, marker)| {
                    let name = match marker {
                        ':' => "dd",
                        ';' => "dt",
                        _ => "li",
                    };
                    wiki_marker(name, &rest[i..i + 1])
                })
                .collect();
            return Some(nodes);
        }
        None
    }

    fn construct(&mut self, ctx: Context, ch: char) -> Option<Vec<Node>> {
        let rest = self.rest();
        let node = match ch {
            '<' if rest.starts_with("<!--") => Some(self.parse_comment()),
            '<' => self.attempt(Route::Tag, Self::parse_tag),
            '{' if rest.starts_with("{{{") => {
                // A failed argument leaves one `{` behind so `{{x}}` can still match.
                self.attempt(Route::Argument, Self::parse_argument)
            }
            '{' if rest.starts_with("{{") => self.attempt(Route::Template, Self::parse_template),
            '[' if rest.starts_with("[[") => self.attempt(Route::Wikilink, Self::parse_wikilink),
            '[' if ctx != Context::ExternalTitle => {
                self.attempt(Route::ExternalLink, Self::parse_external_link)
            }
            '&' => self.attempt(Route::Entity, Self::parse_entity),
            '\'' if rest.starts_with("''") => return self.parse_style(),
            _ if ctx.allows_bare_urls() => self.parse_bare_url(),
            _ => None,
        };
        node.map(|node| vec![node])
    }

    fn parse_comment(&mut self) -> Node {
        let body_start = self.pos + 4;
        let (contents, end) = match self.src[body_start..].find("-->") {
            Some(offset) => (
                &self.src[body_start..body_start + offset],
                body_start + offset + 3,
            ),
            // An unterminated comment hides the rest of the page.
            None => (&self.src[body_start..], self.src.len()),
        };
        self.pos = end;
        Node::Comment(Comment {
            contents: contents.to_string(),
        })
    }

    fn parse_argument(&mut self) -> Option<Node> {
        self.pos += 3;
        let (name, exit) = self.parse_nodes(Context::ArgumentName);
        let default = match exit {
            Exit::CloseArgument => None,
            Exit::Pipe => {
                self.pos += 1;
                let (default, exit) = self.parse_nodes(Context::ArgumentDefault);
                if exit != Exit::CloseArgument {
                    return None;
                }
                Some(Wikicode::new(default))
            }
            _ => return None,
        };
        self.pos += 3;
        Some(Node::Argument(Argument {
            name: Wikicode::new(name),
            default,
        }))
    }

    fn parse_template(&mut self) -> Option<Node> {
        self.pos += 2;
        let (name, mut exit) = self.parse_nodes(Context::TemplateName);
        let name = Wikicode::new(name);
        if name.to_string().trim().is_empty() {
            return None;
        }
        let mut params = Vec::new();
        let mut next_index = 1;
        while exit == Exit::Pipe {
            self.pos += 1;
            let (value, param_exit) = self.parse_nodes(Context::TemplateParam);
            exit = param_exit;
            params.push(build_parameter(value, &mut next_index));
        }
        if exit != Exit::CloseTemplate {
            return None;
        }
        self.pos += 2;
        Some(Node::Template(Template { name, params }))
    }

    fn parse_wikilink(&mut self) -> Option<Node> {
        self.pos += 2;
        let (title, exit) = self.parse_nodes(Context::LinkTitle);
        let title = Wikicode::new(title);
        if title.to_string().trim().is_empty() {
            return None;
        }
        let text = match exit {
            Exit::CloseLink => None,
            Exit::Pipe => {
                self.pos += 1;
                let (text, exit) = self.parse_nodes(Context::LinkText);
                if exit != Exit::CloseLink {
                    return None;
                }
                Some(Wikicode::new(text))
            }
            _ => return None,
        };
        self.pos += 2;
        Some(Node::Wikilink(Wikilink { title, text }))
    }

    fn parse_external_link(&mut self) -> Option<Node> {
        self.pos += 1;
        let rest = self.rest();
        if !rest.starts_with("//") && scheme_len(rest).is_none() {
            return None;
        }
        let url_len = url_length(rest);
        if url_len == 0 {
            return None;
        }
        let url = Wikicode::from_text(&rest[..url_len]);
        self.pos += url_len;

        let rest = self.rest();
        if rest.starts_with(']') {
            self.pos += 1;
            return Some(Node::ExternalLink(ExternalLink {
                url,
                title: None,
                brackets: true,
            }));
        }
        let gap = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        if gap == 0 {
            return None;
        }
        self.pos += gap;
        let (title, exit) = self.parse_nodes(Context::ExternalTitle);
        if exit != Exit::CloseBracket {
            return None;
        }
        self.pos += 1;
        Some(Node::ExternalLink(ExternalLink {
            url,
            title: Some(Wikicode::new(title)),
            brackets: true,
        }))
    }

    fn parse_bare_url(&mut self) -> Option<Node> {
        let rest = self.rest();
        let scheme = scheme_len(rest)?;
        let word_boundary = self.src[..self.pos]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric());
        if !word_boundary {
            return None;
        }
        let mut len = url_length(rest);
        let url = &rest[..len];
        let trimmed = url.trim_end_matches(|c: char| {
            matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '\'')
                || (c == ')' && !url.contains('('))
        });
        len = trimmed.len();
        if len <= scheme {
            return None;
        }
        self.pos += len;
        Some(Node::ExternalLink(ExternalLink {
            url: Wikicode::from_text(trimmed),
            title: None,
            brackets: false,
        }))
    }

    fn parse_entity(&mut self) -> Option<Node> {
        let rest = self.rest();
        let (end, _) = rest
            .char_indices()
            .skip(1)
            .take(33)
            .find(|(_, c)| *c == ';')?;
        let body = &rest[1..end];
        if body.is_empty() || !body.chars().all(|c| c.is_ascii_alphanumeric() || c == '#') {
            return None;
        }
        let value = decode_entity(body)?;
        self.pos += end + 1;
        Some(Node::HtmlEntity(HtmlEntity {
            raw: rest[..=end].to_string(),
            value,
        }))
    }

    fn parse_tag(&mut self) -> Option<Node> {
        let rest = self.rest();
        let name_len = rest[1..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len() - 1);
        if name_len == 0 {
            return None;
        }
        let lowered = rest[1..1 + name_len].to_ascii_lowercase();
        let name = TAGS.iter().copied().find(|tag| *tag == lowered)?;

        let after_name = 1 + name_len;
        let (attr_len, self_closing) = scan_attributes(&rest[after_name..])?;
        let open_len = after_name + attr_len + 1;
        let mut attributes = rest[after_name..after_name + attr_len].trim_end();
        if self_closing {
            attributes = &attributes[..attributes.len() - 1];
        }
        let attributes = attributes.to_string();
        let open = rest[..open_len].to_string();
        self.pos += open_len;

        if self_closing || VOID_TAGS.contains(&name) {
            return Some(Node::Tag(Tag {
                name: name.to_string(),
                attributes,
                self_closing: true,
                wiki_markup: false,
                open,
                close: String::new(),
                contents: Wikicode::default(),
            }));
        }

        let contents = if RAW_CONTENT_TAGS.contains(&name) {
            let body = self.rest();
            let end = find_closing_tag(body, name)?;
            self.pos += end;
            Wikicode::from_text(&body[..end])
        } else {
            let (nodes, exit) = self.parse_nodes(Context::TagBody(name));
            if exit != Exit::CloseTag {
                return None;
            }
            Wikicode::new(nodes)
        };

        let rest = self.rest();
        let close_len = rest.find('>')? + 1;
        let close = rest[..close_len].to_string();
        self.pos += close_len;
        Some(Node::Tag(Tag {
            name: name.to_string(),
            attributes,
            self_closing: false,
            wiki_markup: false,
            open,
            close,
            contents,
        }))
    }

    /// `''italic''`, `'''bold'''` and `'''''both'''''`. Apostrophes that do
    /// not pair up on the same line stay literal.
    fn parse_style(&mut self) -> Option<Vec<Node>> {
        let run = self.rest().bytes().take_while(|b| *b == b'\'').count();
        let (lead, width) = match run {
            2 => (0, 2),
            3 => (0, 3),
            4 => (1, 3),
            _ => (run - 5, 5),
        };
        let start = self.pos;
        self.pos += lead;
        match self.attempt(Route::Style, |p| p.parse_style_span(width)) {
            Some(tag) => {
                let mut nodes = Vec::with_capacity(2);
                if lead > 0 {
                    nodes.push(Node::Text("'".repeat(lead)));
                }
                nodes.push(tag);
                Some(nodes)
            }
            None => {
                self.pos = start;
                None
            }
        }
    }

    fn parse_style_span(&mut self, width: usize) -> Option<Node> {
        self.pos += width;
        let (nodes, exit) = self.parse_nodes(Context::Style(width));
        if exit != Exit::CloseStyle || nodes.is_empty() {
            return None;
        }
        self.pos += width;
        let contents = Wikicode::new(nodes);
        Some(match width {
            2 => style_tag("i", "''", contents),
            3 => style_tag("b", "'''", contents),
            _ => style_tag(
                "b",
                "'''",
                Wikicode::new(vec![style_tag("i", "''", contents)]),
            ),
        })
    }

    fn parse_heading(&mut self) -> Option<Node> {
        let rest = self.rest();
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        let line = line.trim_end();
        let lead = line.bytes().take_while(|b| *b == b'=').count();
        let trail = line.bytes().rev().take_while(|b| *b == b'=').count();
        if lead == 0 || trail == 0 {
            return None;
        }
        let level = if lead == line.len() {
            (line.len() - 1) / 2
        } else {
            lead.min(trail)
        }
        .min(6);
        if level == 0 {
            return None;
        }
        let title_src = &line[level..line.len() - level];
        let (title, _) = self.fragment(title_src).parse_nodes(Context::Inline);
        self.pos += line.len();
        Some(Node::Heading(Heading {
            level: level as u8,
            title: Wikicode::new(title),
        }))
    }
}

fn terminator(ctx: Context, rest: &str) -> Option<Exit> {
    match ctx {
        Context::Document | Context::Block | Context::Inline => None,
        Context::TemplateName | Context::TemplateParam => {
            if rest.starts_with("}}") {
                Some(Exit::CloseTemplate)
            } else if rest.starts_with('|') {
                Some(Exit::Pipe)
            } else {
                None
            }
        }
        Context::ArgumentName | Context::ArgumentDefault => {
            if rest.starts_with("}}}") {
                Some(Exit::CloseArgument)
            } else if ctx == Context::ArgumentName && rest.starts_with('|') {
                Some(Exit::Pipe)
            } else {
                None
            }
        }
        Context::LinkTitle => {
            if rest.starts_with("]]") {
                Some(Exit::CloseLink)
            } else if rest.starts_with('|') {
                Some(Exit::Pipe)
            } else if rest.starts_with('\n') || rest.starts_with("[[") {
                Some(Exit::Invalid)
            } else {
                None
            }
        }
        Context::LinkText => rest.starts_with("]]").then_some(Exit::CloseLink),
        Context::ExternalTitle => {
            if rest.starts_with(']') {
                Some(Exit::CloseBracket)
            } else if rest.starts_with('\n') {
                Some(Exit::Invalid)
            } else {
                None
            }
        }
        Context::Style(width) => {
            if rest.starts_with('\n') {
                return Some(Exit::Invalid);
            }
            let run = rest.bytes().take_while(|b| *b == b'\'').count();
            (run == width).then_some(Exit::CloseStyle)
        }
        Context::TagBody(name) => is_closing_tag(rest, name).then_some(Exit::CloseTag),
    }
}

fn build_parameter(mut value: Vec<Node>, next_index: &mut usize) -> Parameter {
    if let Some(Node::Text(first)) = value.first() {
        if let Some((key, rest)) = first.split_once('=') {
            let raw_name = key.to_string();
            let rest = rest.to_string();
            if rest.is_empty() {
                value.remove(0);
            } else {
                value[0] = Node::Text(rest);
            }
            return Parameter {
                name: raw_name.trim().to_string(),
                raw_name,
                value: Wikicode::new(value),
                showkey: true,
            };
        }
    }
    let name = next_index.to_string();
    *next_index += 1;
    Parameter {
        raw_name: name.clone(),
        name,
        value: Wikicode::new(value),
        showkey: false,
    }
}

fn style_tag(name: &str, marker: &str, contents: Wikicode) -> Node {
    Node::Tag(Tag {
        name: name.to_string(),
        attributes: String::new(),
        self_closing: false,
        wiki_markup: true,
        open: marker.to_string(),
        close: marker.to_string(),
        contents,
    })
}

fn wiki_marker(name: &str, marker: &str) -> Node {
    Node::Tag(Tag {
        name: name.to_string(),
        attributes: String::new(),
        self_closing: true,
        wiki_markup: true,
        open: marker.to_string(),
        close: String::new(),
        contents: Wikicode::default(),
    })
}

/// Length of the URL scheme `rest` starts with, case-insensitively.
fn scheme_len(rest: &str) -> Option<usize> {
    URL_SCHEMES
        .iter()
        .find(|scheme| {
            rest.get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        })
        .map(|scheme| scheme.len())
}

fn url_length(rest: &str) -> usize {
    rest.find(|c: char| {
        c.is_whitespace() || matches!(c, '[' | ']' | '<' | '>' | '"' | '{' | '}' | '|')
    })
    .unwrap_or(rest.len())
}

/// Scans tag attributes up to the closing `>`, honoring quotes. Returns the
/// attribute length and whether the tag closes itself with `/>`.
fn scan_attributes(s: &str) -> Option<(usize, bool)> {
    if !s.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
        return None;
    }
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '<') => return None,
            (None, '>') => return Some((i, s[..i].trim_end().ends_with('/'))),
            (None, _) => {}
        }
    }
    None
}

fn is_closing_tag(rest: &str, name: &str) -> bool {
    let Some(after_slash) = rest.strip_prefix("</") else {
        return false;
    };
    after_slash
        .get(..name.len())
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
        && after_slash[name.len()..].starts_with(|c: char| c == '>' || c.is_whitespace())
}

fn find_closing_tag(body: &str, name: &str) -> Option<usize> {
    body.match_indices("</")
        .map(|(i, _)| i)
        .find(|i| is_closing_tag(&body[*i..], name))
}

#[cfg(test)]
mod tests {
    use super::{scan_attributes, scheme_len, url_length};

    #[test]
    fn attributes_respect_quotes_and_self_closing_slash() {
        assert_eq!(scan_attributes(r#" name="a>b"/>rest"#), Some((11, true)));
        assert_eq!(scan_attributes(">x"), Some((0, false)));
        assert_eq!(scan_attributes("x>"), None);
        assert_eq!(scan_attributes(" a <b>"), None);
    }

    #[test]
    fn schemes_match_case_insensitively() {
        assert_eq!(scheme_len("HTTPS://example.org"), Some(8));
        assert_eq!(scheme_len("mailto:someone@example.org"), Some(7));
        assert_eq!(scheme_len("example.org"), None);
    }

    #[test]
    fn url_stops_at_whitespace_and_brackets() {
        assert_eq!(url_length("http://a.org/x y"), 14);
        assert_eq!(url_length("http://a.org]"), 12);
    }
}
