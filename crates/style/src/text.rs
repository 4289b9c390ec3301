use crate::font::FontWeight;
use serde::{Deserialize, Serialize};

/// A piece of a rich-text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TextSpan {
    Text { text: String, weight: FontWeight },
    LineBreak,
}

/// Styled text with bold runs and explicit line breaks.
///
/// Text is plain Unicode; there is no markup to escape. Whitespace inside a
/// run is collapsed when the block is wrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    spans: Vec<TextSpan>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(text, FontWeight::Regular)
    }

    pub fn bold(self, text: impl Into<String>) -> Self {
        self.push(text, FontWeight::Bold)
    }

    pub fn push(mut self, text: impl Into<String>, weight: FontWeight) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(TextSpan::Text { text, weight });
        }
        self
    }

    pub fn line_break(mut self) -> Self {
        self.spans.push(TextSpan::LineBreak);
        self
    }

    /// Appends `text` followed by a line break.
    pub fn line(self, text: impl Into<String>) -> Self {
        self.text(text).line_break()
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The text content with line breaks as `\n`, styling dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                TextSpan::Text { text, .. } => out.push_str(text),
                TextSpan::LineBreak => out.push('\n'),
            }
        }
        out
    }
}
