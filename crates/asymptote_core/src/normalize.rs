//! Canonical whitespace, line and Unicode form for text channels.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static LINE_BREAK_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\x0B\x0C]").expect("LINE_BREAK_LIKE should compile"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("BLANK_LINES should compile"));
static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("SPACE_RUNS should compile"));

/// Characters a line may consist of and still count as noise.
const NOISE_PUNCTUATION: &[char] = &[',', ';', '.', ':', '+', '*', '·', '-'];

/// NFKC can turn a character into something an earlier step rewrites
/// (U+00A0 into a space beside another space), so passes repeat until
/// nothing changes. Three are enough in practice.
const MAX_PASSES: usize = 4;

/// Normalizes whitespace, drops punctuation-only lines and applies NFKC.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_pass(text: &str) -> String {
    let text = LINE_BREAK_LIKE.replace_all(text, "\n");
    let text = text.replace('\t', " ");

    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !is_noise_line(line))
        .collect();
    let text = lines.join("\n");

    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.nfkc().collect()
}

fn is_noise_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| NOISE_PUNCTUATION.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::{is_noise_line, normalize};

    #[test]
    fn collapses_blank_lines_and_spaces() {
        assert_eq!(normalize("a\n\n\nb"), "a\nb");
        assert_eq!(normalize("a    b"), "a b");
        assert_eq!(normalize("a\r\nb\x0Cc\td"), "a\nb\nc d");
    }

    #[test]
    fn drops_punctuation_only_lines() {
        assert_eq!(normalize("x\n- \ny"), "x\ny");
        assert_eq!(normalize("x\n ·,; \ny"), "x\ny");
        assert_eq!(normalize("x\n- y"), "x\n- y");
        assert!(!is_noise_line(""));
    }

    #[test]
    fn applies_compatibility_composition() {
        assert_eq!(normalize("ﬁne ①"), "fine 1");
        assert_eq!(normalize("e\u{301}"), "é");
    }

    #[test]
    fn is_idempotent_across_nfkc_rewrites() {
        let samples = [
            "",
            "a\u{a0} b",
            "  lead\n\n\u{2003}\n-\ntrail  ",
            "x\u{a0}\u{a0}y\n\u{3000}\nz",
            "line\r\r\n\t\tindented",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }
}
