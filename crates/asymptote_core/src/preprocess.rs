//! Raw-text repair applied before the tree is built.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static DANGLING_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"''(.*in')''").expect("DANGLING_ITALIC should compile"));

/// Repairs headings such as `===''The Times They Are A-Changin''' sessions===`,
/// where an italic span closes right after a trailing apostrophe and the
/// apostrophe runs no longer pair up.
///
/// When any heading line holds an odd number of apostrophes, every
/// `''…in'''` on a line is rewritten to `<i>…in'</i>`. Otherwise the text is
/// returned untouched. Best effort: it can miss and it can over-correct.
pub fn preprocess(text: &str) -> Cow<'_, str> {
    let unbalanced = text
        .lines()
        .filter(|line| is_quoted_heading(line))
        .any(|line| line.matches('\'').count() % 2 != 0);
    if !unbalanced {
        return Cow::Borrowed(text);
    }
    DANGLING_ITALIC.replace_all(text, "<i>${1}</i>")
}

/// A line wrapped in `=` runs with at least one apostrophe between them.
fn is_quoted_heading(line: &str) -> bool {
    line.len() >= 3 && line.starts_with('=') && line.ends_with('=') && line.contains('\'')
}

#[cfg(test)]
mod tests {
    use super::preprocess;

    #[test]
    fn odd_heading_apostrophes_rewrite_the_italic_span() {
        let text = "===''The Times They Are A-Changin''' sessions, part 1===\nbody";
        assert_eq!(
            preprocess(text),
            "===<i>The Times They Are A-Changin'</i> sessions, part 1===\nbody"
        );
    }

    #[test]
    fn balanced_headings_are_left_alone() {
        let text = "== ''Title'' ==\nIt was ''singin''' all day";
        assert_eq!(preprocess(text), text);
    }

    #[test]
    fn apostrophes_outside_headings_do_not_trigger() {
        let text = "== Plain ==\nthe ''Changin''' line";
        assert_eq!(preprocess(text), text);
    }
}
