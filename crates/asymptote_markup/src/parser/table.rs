//! `{| ... |}` tables, parsed into `table`, `caption`, `tr`, `th` and `td` tags.

use super::{Context, NodeBuf, Parser};
use crate::node::{Node, Tag, Wikicode};

impl<'s> Parser<'s> {
    pub(super) fn parse_table(&mut self) -> Option<Node> {
        let rest = self.rest();
        let (body_end, end) = find_table_end(rest);
        let header_end = rest.find('\n').unwrap_or(rest.len()).min(body_end);

        let contents = self.table_contents(&rest[header_end..body_end]);
        let table = Tag {
            name: "table".to_string(),
            attributes: rest[2..header_end].to_string(),
            self_closing: false,
            wiki_markup: true,
            open: rest[..header_end].to_string(),
            close: rest[body_end..end].to_string(),
            contents,
        };
        self.pos += end;
        Some(Node::Tag(table))
    }

    fn table_contents(&self, body: &str) -> Wikicode {
        let mut table = TableBuilder::default();
        let mut nested = 0usize;
        for line in body.split('\n') {
            let trimmed = line.trim_start();
            if nested > 0 || trimmed.starts_with("{|") {
                if trimmed.starts_with("{|") {
                    nested += 1;
                } else if trimmed.starts_with("|}") {
                    nested -= 1;
                }
                table.continue_cell(self, line);
            } else if trimmed.starts_with("|-") {
                table.start_row(self, trimmed);
            } else if let Some(caption) = trimmed.strip_prefix("|+") {
                table.start_cells(self, "caption", "|+", caption, &[]);
            } else if let Some(cells) = trimmed.strip_prefix('!') {
                table.start_cells(self, "th", "!", cells, &["!!", "||"]);
            } else if let Some(cells) = trimmed.strip_prefix('|') {
                table.start_cells(self, "td", "|", cells, &["||"]);
            } else {
                table.continue_cell(self, line);
            }
        }
        table.finish(self)
    }

    fn build_cell(&self, cell: OpenCell) -> Node {
        let (attributes, content) = split_cell_attributes(&cell.source);
        let mut open = cell.marker.to_string();
        if let Some(attributes) = attributes {
            open.push_str(attributes);
            open.push('|');
        }
        let mut parser = Parser::new(content, self.max_depth, self.depth + 1);
        let (nodes, _) = parser.parse_nodes(Context::Block);
        Node::Tag(Tag {
            name: cell.name.to_string(),
            attributes: attributes.unwrap_or_default().to_string(),
            self_closing: false,
            wiki_markup: true,
            open,
            close: String::new(),
            contents: Wikicode::new(nodes),
        })
    }
}

struct OpenCell {
    name: &'static str,
    marker: &'static str,
    source: String,
}

struct OpenRow {
    open: String,
    nodes: NodeBuf,
}

#[derive(Default)]
struct TableBuilder {
    nodes: NodeBuf,
    row: Option<OpenRow>,
    cell: Option<OpenCell>,
}

impl TableBuilder {
    fn start_row(&mut self, parser: &Parser<'_>, line: &str) {
        self.finish_row(parser);
        self.row = Some(OpenRow {
            open: line.to_string(),
            nodes: NodeBuf::default(),
        });
    }

    fn start_cells(
        &mut self,
        parser: &Parser<'_>,
        name: &'static str,
        marker: &'static str,
        line: &str,
        separators: &[&'static str],
    ) {
        for (separator, source) in split_cells(line, separators) {
            self.finish_cell(parser);
            self.cell = Some(OpenCell {
                name,
                marker: if separator.is_empty() { marker } else { separator },
                source: source.to_string(),
            });
        }
    }

    fn continue_cell(&mut self, parser: &Parser<'_>, line: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.source.push('\n');
            cell.source.push_str(line);
            return;
        }
        if line.trim().is_empty() {
            return;
        }
        // Stray text outside any cell stays with the table.
        let mut parser = Parser::new(line, parser.max_depth, parser.depth + 1);
        let (nodes, _) = parser.parse_nodes(Context::Block);
        let target = match self.row.as_mut() {
            Some(row) => &mut row.nodes,
            None => &mut self.nodes,
        };
        nodes.into_iter().for_each(|node| target.push(node));
        target.push(Node::Text("\n".to_string()));
    }

    fn finish_cell(&mut self, parser: &Parser<'_>) {
        let Some(cell) = self.cell.take() else {
            return;
        };
        let is_caption = cell.name == "caption";
        let node = parser.build_cell(cell);
        if is_caption {
            self.nodes.push(node);
            self.nodes.push(Node::Text("\n".to_string()));
            return;
        }
        let row = self.row.get_or_insert_with(|| OpenRow {
            open: String::new(),
            nodes: NodeBuf::default(),
        });
        row.nodes.push(node);
        row.nodes.push(Node::Text("\n".to_string()));
    }

    fn finish_row(&mut self, parser: &Parser<'_>) {
        self.finish_cell(parser);
        if let Some(row) = self.row.take() {
            let attributes = row.open.get(2..).unwrap_or_default().to_string();
            self.nodes.push(Node::Tag(Tag {
                name: "tr".to_string(),
                attributes,
                self_closing: false,
                wiki_markup: true,
                open: row.open,
                close: String::new(),
                contents: Wikicode::new(row.nodes.finish()),
            }));
        }
    }

    fn finish(mut self, parser: &Parser<'_>) -> Wikicode {
        self.finish_row(parser);
        Wikicode::new(self.nodes.finish())
    }
}

/// Start of the closing `|}` matching the table opened on the first line,
/// and the end of that delimiter. An unclosed table runs to the end of input.
fn find_table_end(rest: &str) -> (usize, usize) {
    let mut depth = 0usize;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("{|") {
            depth += 1;
        } else if trimmed.starts_with("|}") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                let start = offset + (line.len() - trimmed.len());
                return (start, start + 2);
            }
        }
        offset += line.len();
    }
    (rest.len(), rest.len())
}

/// Splits a cell line on `||` (and `!!` for headers) outside links and
/// templates. Each part carries the separator that introduced it; the first
/// carries an empty one.
fn split_cells<'a>(line: &'a str, separators: &[&'static str]) -> Vec<(&'static str, &'a str)> {
    let bytes = line.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut separator: &'static str = "";
    let mut i = 0;
    while i < bytes.len() {
        let tail = &bytes[i..];
        if tail.starts_with(b"{{") || tail.starts_with(b"[[") {
            depth += 1;
            i += 2;
            continue;
        }
        if tail.starts_with(b"}}") || tail.starts_with(b"]]") {
            depth = depth.saturating_sub(1);
            i += 2;
            continue;
        }
        if depth == 0 {
            if let Some(found) = separators
                .iter()
                .find(|candidate| tail.starts_with(candidate.as_bytes()))
            {
                parts.push((separator, &line[start..i]));
                separator = found;
                i += found.len();
                start = i;
                continue;
            }
        }
        i += 1;
    }
    parts.push((separator, &line[start..]));
    parts
}

/// Separates `attrs | content` in a cell. A pipe inside a link or template,
/// or a prefix holding markup, is content.
fn split_cell_attributes(source: &str) -> (Option<&str>, &str) {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        let tail = &bytes[i..];
        if tail.starts_with(b"{{") || tail.starts_with(b"[[") {
            depth += 1;
            i += 2;
            continue;
        }
        if tail.starts_with(b"}}") || tail.starts_with(b"]]") {
            depth = depth.saturating_sub(1);
            i += 2;
            continue;
        }
        if bytes[i] == b'\n' {
            break;
        }
        if depth == 0 && bytes[i] == b'|' {
            let prefix = &source[..i];
            if prefix.contains("[[") || prefix.contains("{{") || prefix.contains('<') {
                break;
            }
            return (Some(prefix), &source[i + 1..]);
        }
        i += 1;
    }
    (None, source)
}

#[cfg(test)]
mod tests {
    use super::{find_table_end, split_cell_attributes, split_cells};

    #[test]
    fn nested_tables_close_at_the_matching_delimiter() {
        let src = "{|\n| a\n{|\n| b\n|}\n|}\ntail";
        let (start, end) = find_table_end(src);
        assert_eq!(&src[start..end], "|}");
        assert_eq!(&src[end..], "\ntail");
    }

    #[test]
    fn cells_split_outside_templates_only() {
        let parts = split_cells(" a || {{x||y}} || c", &["||"]);
        let sources: Vec<&str> = parts.iter().map(|(_, source)| *source).collect();
        assert_eq!(sources, vec![" a ", " {{x||y}} ", " c"]);
        assert_eq!(parts[1].0, "||");
    }

    #[test]
    fn attributes_are_split_from_content() {
        assert_eq!(
            split_cell_attributes(r#" style="x" | value"#),
            (Some(r#" style="x" "#), " value")
        );
        assert_eq!(split_cell_attributes(" [[a|b]]"), (None, " [[a|b]]"));
    }
}
