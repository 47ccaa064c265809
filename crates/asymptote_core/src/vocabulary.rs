use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Deepest template/tag nesting the dispatcher follows before giving up on a
/// sub-tree.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// The word lists that drive section, template, hatnote, tag and file-link
/// decisions.
///
/// Every field has a built-in default; a configuration file only needs to
/// name the fields it overrides. Names are compared lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Section keys whose whole section (with sub-sections) is dropped.
    pub excluded_sections: BTreeSet<String>,
    /// Section keys whose body text goes to the auxiliary channel.
    pub auxiliary_sections: BTreeSet<String>,
    /// Templates that contribute nothing.
    pub ignored_templates: BTreeSet<String>,
    /// Templates read as hatnotes at the start of a section.
    pub relevant_hatnotes: BTreeSet<String>,
    /// Pronunciation parameters that are modifiers rather than phonemes.
    pub ipac_modifier_codes: BTreeSet<String>,
    /// Image options (`thumb`, `left`, `alt=`, ...) that are not captions.
    pub file_link_options: BTreeSet<String>,
    /// Link namespaces that contribute only their caption.
    pub media_namespaces: BTreeSet<String>,
    /// Tags dropped with their contents.
    pub reference_tags: BTreeSet<String>,
    /// Tags whose raw form is rendered and that contribute no plain text.
    pub math_tags: BTreeSet<String>,
    /// Tags whose text is side content.
    pub table_tags: BTreeSet<String>,
    pub max_depth: usize,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            excluded_sections: set(&[
                "references",
                "references and notes",
                "external links",
                "footnotes",
                "further reading",
            ]),
            auxiliary_sections: set(&["see also"]),
            ignored_templates: set(&[
                "sfn",
                "efn",
                "toc",
                "anchor",
                "vanchor",
                "toc limit",
                "toc_limit",
                "toclimit",
                "font color",
                "clear",
                "div col",
                "div col end",
                "cols",
                "colbegin",
                "colend",
                "portal",
                "portal inline",
                "reflist",
                "refbegin",
                "refend",
                "refn",
                "citation needed",
                "more citations needed section",
                "expand section",
                "update section",
                "rp",
                "convert",
                "cite book",
                "isbn",
                "webarchive",
            ]),
            relevant_hatnotes: set(&[
                "hatnote",
                "about",
                "distinguish",
                "about-distinguish",
                "for",
                "for2",
                "other uses",
                "other uses of",
                "other people",
                "about other people",
                "similar names",
                "other places",
                "other ships",
                "other hurricanes",
                "see also",
                "further",
                "short description",
                "infobox",
            ]),
            ipac_modifier_codes: set(&[
                "lang", "local", "ipa", "also", "uk", "us", "uklang", "uslang", "ukalso",
                "usalso", "alsouk", "alsous",
            ]),
            file_link_options: set(&[
                "thumb",
                "thumbnail",
                "frame",
                "framed",
                "frameless",
                "border",
                "left",
                "right",
                "center",
                "centre",
                "none",
                "upright",
                "baseline",
                "middle",
                "sub",
                "super",
                "text-top",
                "text-bottom",
                "top",
                "bottom",
                "link",
                "alt",
                "page",
                "lang",
                "langtag",
                "class",
                "location",
                "alignment",
                "size",
            ]),
            media_namespaces: set(&["file", "image", "category"]),
            reference_tags: set(&["ref", "references"]),
            math_tags: set(&["math", "chem", "ce"]),
            table_tags: set(&["table"]),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Vocabulary {
    pub fn is_excluded_section(&self, key: &str) -> bool {
        self.excluded_sections.contains(key)
    }

    pub fn is_auxiliary_section(&self, key: &str) -> bool {
        self.auxiliary_sections.contains(key)
    }

    pub fn is_ignored_template(&self, name: &str) -> bool {
        self.ignored_templates.contains(name)
    }

    /// Allow-listed names, plus anything mentioning `infobox`.
    pub fn is_relevant_hatnote(&self, name: &str) -> bool {
        self.relevant_hatnotes.contains(name) || name.contains("infobox")
    }

    pub fn is_ipac_modifier(&self, text: &str) -> bool {
        self.ipac_modifier_codes.contains(text)
    }

    /// True when a `|`-separated file-link segment is an image option rather
    /// than a caption: a listed keyword, a listed `key=value` option, or a
    /// size such as `250px`, `x120px` or `200x100px`.
    pub fn is_file_link_option(&self, segment: &str) -> bool {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            return false;
        }
        if self.file_link_options.contains(&segment) {
            return true;
        }
        if let Some((key, _)) = segment.split_once('=') {
            return self.file_link_options.contains(key.trim());
        }
        is_image_size(&segment)
    }

    pub fn is_media_namespace(&self, namespace: &str) -> bool {
        self.media_namespaces.contains(namespace)
    }

    pub fn is_reference_tag(&self, name: &str) -> bool {
        self.reference_tags.contains(name)
    }

    pub fn is_math_tag(&self, name: &str) -> bool {
        self.math_tags.contains(name)
    }

    pub fn is_table_tag(&self, name: &str) -> bool {
        self.table_tags.contains(name)
    }
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|word| word.to_string()).collect()
}

fn is_image_size(segment: &str) -> bool {
    let Some(dimensions) = segment.strip_suffix("px") else {
        return false;
    };
    let (width, height) = dimensions.split_once('x').unwrap_or((dimensions, ""));
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    !(width.is_empty() && height.is_empty()) && digits(width) && digits(height)
}

#[cfg(test)]
mod tests {
    use super::Vocabulary;

    #[test]
    fn file_link_options_cover_keywords_keys_and_sizes() {
        let vocabulary = Vocabulary::default();

        for option in ["thumb", " Left ", "250px", "x120px", "200x100px", "alt=A cat", "upright=1.2"] {
            assert!(vocabulary.is_file_link_option(option), "{option:?}");
        }
        for caption in ["A cat on a mat", "px", "", "12 px", "tiger=striped cat"] {
            assert!(!vocabulary.is_file_link_option(caption), "{caption:?}");
        }
    }

    #[test]
    fn infobox_names_are_always_hatnotes() {
        let vocabulary = Vocabulary::default();

        assert!(vocabulary.is_relevant_hatnote("infobox person"));
        assert!(vocabulary.is_relevant_hatnote("about"));
        assert!(!vocabulary.is_relevant_hatnote("citation needed"));
    }
}
