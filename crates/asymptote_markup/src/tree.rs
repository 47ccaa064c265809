//! Queries over a parsed tree: descendant filtering and heading-delimited
//! sections.

use crate::node::{Heading, Node, Template, Wikicode, Wikilink};

/// A run of top-level nodes introduced by a heading, or the lead run before
/// any heading.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    heading: Option<&'a Heading>,
    nodes: &'a [Node],
}

impl<'a> Section<'a> {
    /// The heading node opening this section; `None` for the lead.
    pub fn heading(&self) -> Option<&'a Heading> {
        self.heading
    }

    pub fn is_lead(&self) -> bool {
        self.heading.is_none()
    }

    /// Top-level nodes of the section, starting with its heading (if any).
    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn filter(&self, pred: impl Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut out = Vec::new();
        for node in self.nodes {
            collect(node, &pred, &mut out);
        }
        out
    }

    pub fn filter_headings(&self) -> Vec<&'a Heading> {
        self.filter(|node| matches!(node, Node::Heading(_)))
            .into_iter()
            .filter_map(as_heading)
            .collect()
    }

    pub fn filter_wikilinks(&self) -> Vec<&'a Wikilink> {
        self.filter(|node| matches!(node, Node::Wikilink(_)))
            .into_iter()
            .filter_map(as_wikilink)
            .collect()
    }

    pub fn filter_templates(&self) -> Vec<&'a Template> {
        self.filter(|node| matches!(node, Node::Template(_)))
            .into_iter()
            .filter_map(as_template)
            .collect()
    }
}

impl Wikicode {
    /// Every node in the tree, at any depth, for which `pred` holds.
    /// Pre-order: a node comes before its descendants.
    pub fn filter(&self, pred: impl Fn(&Node) -> bool) -> Vec<&Node> {
        let mut out = Vec::new();
        for node in &self.nodes {
            collect(node, &pred, &mut out);
        }
        out
    }

    pub fn filter_headings(&self) -> Vec<&Heading> {
        self.filter(|node| matches!(node, Node::Heading(_)))
            .into_iter()
            .filter_map(as_heading)
            .collect()
    }

    pub fn filter_wikilinks(&self) -> Vec<&Wikilink> {
        self.filter(|node| matches!(node, Node::Wikilink(_)))
            .into_iter()
            .filter_map(as_wikilink)
            .collect()
    }

    pub fn filter_templates(&self) -> Vec<&Template> {
        self.filter(|node| matches!(node, Node::Template(_)))
            .into_iter()
            .filter_map(as_template)
            .collect()
    }

    /// Splits the top level of the tree into sections.
    ///
    /// A section opens at each heading whose level is in `levels` (any level
    /// when empty) and for which `matches` holds, and runs up to the next
    /// heading of the same or a shallower level. With `include_lead`, the
    /// nodes before the first heading at or above the deepest requested
    /// level come first, even when empty.
    pub fn get_sections(
        &self,
        levels: &[u8],
        include_lead: bool,
        matches: impl Fn(&Heading) -> bool,
    ) -> Vec<Section<'_>> {
        let nodes = self.nodes.as_slice();
        let wanted = |level: u8| levels.is_empty() || levels.contains(&level);
        let lead_limit = levels.iter().copied().max().unwrap_or(6);
        let mut sections = Vec::new();

        if include_lead {
            let end = nodes
                .iter()
                .position(|node| heading_level(node).is_some_and(|level| level <= lead_limit))
                .unwrap_or(nodes.len());
            sections.push(Section {
                heading: None,
                nodes: &nodes[..end],
            });
        }

        for (start, node) in nodes.iter().enumerate() {
            let Node::Heading(heading) = node else {
                continue;
            };
            if !wanted(heading.level) || !matches(heading) {
                continue;
            }
            let end = nodes[start + 1..]
                .iter()
                .position(|next| heading_level(next).is_some_and(|level| level <= heading.level))
                .map_or(nodes.len(), |offset| start + 1 + offset);
            sections.push(Section {
                heading: Some(heading),
                nodes: &nodes[start..end],
            });
        }
        sections
    }
}

fn collect<'a>(node: &'a Node, pred: &impl Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
    if pred(node) {
        out.push(node);
    }
    for child in node.children() {
        for grandchild in &child.nodes {
            collect(grandchild, pred, out);
        }
    }
}

fn heading_level(node: &Node) -> Option<u8> {
    match node {
        Node::Heading(heading) => Some(heading.level),
        _ => None,
    }
}

fn as_heading(node: &Node) -> Option<&Heading> {
    match node {
        Node::Heading(heading) => Some(heading),
        _ => None,
    }
}

fn as_wikilink(node: &Node) -> Option<&Wikilink> {
    match node {
        Node::Wikilink(link) => Some(link),
        _ => None,
    }
}

fn as_template(node: &Node) -> Option<&Template> {
    match node {
        Node::Template(template) => Some(template),
        _ => None,
    }
}
