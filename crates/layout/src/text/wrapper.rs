use super::builder::{Token, tokenize};
use crate::fonts::FontMetrics;
use labelsheet_style::{FontWeight, RichText};

// Absorbs float noise when a word fits the line exactly.
const EPSILON: f32 = 0.01;

/// A same-weight piece of a line, positioned relative to the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRun {
    pub text: String,
    pub weight: FontWeight,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineLayout {
    pub runs: Vec<LineRun>,
    pub width: f32,
}

impl LineLayout {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The line's text with styling dropped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn append(&mut self, text: &str, weight: FontWeight, width: f32) {
        match self.runs.last_mut() {
            Some(last) if last.weight == weight => {
                last.text.push_str(text);
                last.width += width;
            }
            _ => self.runs.push(LineRun {
                text: text.to_string(),
                weight,
                x: self.width,
                width,
            }),
        }
        self.width += width;
    }
}

/// Breaks `text` into lines no wider than `max_width` at `font_size`.
///
/// Lines break at whitespace and between full-width characters. A word wider
/// than a whole line is split between characters; every line holds at least
/// one character, so a line can only exceed `max_width` when a single glyph
/// does. Explicit breaks always end the line, producing empty lines when
/// repeated.
pub fn break_lines(
    text: &RichText,
    max_width: f32,
    font_size: f32,
    metrics: &dyn FontMetrics,
) -> Vec<LineLayout> {
    let mut breaker = LineBreaker {
        metrics,
        font_size,
        max_width,
        lines: Vec::new(),
        current: LineLayout::default(),
        pending_space: None,
    };

    for token in tokenize(text) {
        match token {
            Token::Word { text, weight } => breaker.push_word(&text, weight),
            Token::Space { weight } => {
                if !breaker.current.is_empty() {
                    breaker.pending_space = Some(weight);
                }
            }
            Token::Break => breaker.finish_line(),
        }
    }

    if !breaker.current.is_empty() {
        breaker.finish_line();
    }
    breaker.lines
}

struct LineBreaker<'m> {
    metrics: &'m dyn FontMetrics,
    font_size: f32,
    max_width: f32,
    lines: Vec<LineLayout>,
    current: LineLayout,
    pending_space: Option<FontWeight>,
}

impl LineBreaker<'_> {
    fn width_of(&self, text: &str, weight: FontWeight) -> f32 {
        self.metrics.text_width(text, weight, self.font_size)
    }

    fn push_word(&mut self, text: &str, weight: FontWeight) {
        let word_width = self.width_of(text, weight);

        if !self.current.is_empty() {
            let space = self.pending_space.take();
            let space_width = space.map_or(0.0, |w| self.width_of(" ", w));
            if self.current.width + space_width + word_width <= self.max_width + EPSILON {
                if let Some(w) = space {
                    self.current.append(" ", w, space_width);
                }
                self.current.append(text, weight, word_width);
                return;
            }
            self.finish_line();
        }

        if word_width <= self.max_width + EPSILON {
            self.current.append(text, weight, word_width);
        } else {
            self.split_word(text, weight);
        }
    }

    /// Places a word that is wider than a whole line, character by character.
    fn split_word(&mut self, text: &str, weight: FontWeight) {
        let mut chunk = String::new();
        let mut chunk_width = 0.0;
        for c in text.chars() {
            let w = self.metrics.char_width(c, weight) * self.font_size / 1000.0;
            if !chunk.is_empty() && chunk_width + w > self.max_width + EPSILON {
                self.current.append(&chunk, weight, chunk_width);
                self.finish_line();
                chunk.clear();
                chunk_width = 0.0;
            }
            chunk.push(c);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            self.current.append(&chunk, weight, chunk_width);
        }
    }

    fn finish_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.pending_space = None;
    }
}
