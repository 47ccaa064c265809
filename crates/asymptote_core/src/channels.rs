/// Output of any sub-tree, split into the three emission channels.
///
/// Each channel is an ordered list of fragments; concatenating a channel
/// gives its text in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelBundle {
    /// HTML-ish markup.
    pub rendered: Vec<String>,
    /// Search and display text.
    pub plain: Vec<String>,
    /// Side content: captions, table text, hatnotes.
    pub auxiliary: Vec<String>,
}

impl ChannelBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same fragment in `rendered` and `plain`.
    pub fn text(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            rendered: vec![fragment.clone()],
            plain: vec![fragment],
            auxiliary: Vec::new(),
        }
    }

    /// Different fragments for `rendered` and `plain`.
    pub fn pair(rendered: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            rendered: vec![rendered.into()],
            plain: vec![plain.into()],
            auxiliary: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty() && self.plain.is_empty() && self.auxiliary.is_empty()
    }

    /// Appends every channel of `other` to the matching channel of `self`.
    pub fn extend(&mut self, other: ChannelBundle) {
        self.rendered.extend(other.rendered);
        self.plain.extend(other.plain);
        self.auxiliary.extend(other.auxiliary);
    }

    /// Appends `rendered` and `plain` of `other`, discarding its auxiliary
    /// fragments.
    pub fn extend_body(&mut self, other: ChannelBundle) {
        self.rendered.extend(other.rendered);
        self.plain.extend(other.plain);
    }

    pub fn push_rendered(&mut self, fragment: impl Into<String>) {
        self.rendered.push(fragment.into());
    }

    pub fn push_plain(&mut self, fragment: impl Into<String>) {
        self.plain.push(fragment.into());
    }

    pub fn push_text(&mut self, fragment: &str) {
        self.rendered.push(fragment.to_string());
        self.plain.push(fragment.to_string());
    }

    pub fn rendered_text(&self) -> String {
        self.rendered.concat()
    }

    pub fn plain_text(&self) -> String {
        self.plain.concat()
    }

    pub fn auxiliary_text(&self) -> String {
        self.auxiliary.concat()
    }
}
