//! Splits rich text into the tokens the line breaker works on.

use crate::fonts::is_wide;
use labelsheet_style::{FontWeight, RichText, TextSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An unbreakable run of characters.
    Word { text: String, weight: FontWeight },
    /// Collapsed whitespace between words.
    Space { weight: FontWeight },
    /// An explicit line break.
    Break,
}

/// Tokenizes `text`. Whitespace runs collapse into a single [`Token::Space`];
/// each full-width character becomes its own word so lines may break between
/// them even though the script puts no spaces there.
pub fn tokenize(text: &RichText) -> Vec<Token> {
    let mut tokens = Vec::new();
    for span in text.spans() {
        match span {
            TextSpan::LineBreak => tokens.push(Token::Break),
            TextSpan::Text { text, weight } => tokenize_run(text, *weight, &mut tokens),
        }
    }
    tokens
}

fn tokenize_run(text: &str, weight: FontWeight, tokens: &mut Vec<Token>) {
    let mut word = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            flush_word(&mut word, weight, tokens);
            if !matches!(tokens.last(), Some(Token::Space { .. })) {
                tokens.push(Token::Space { weight });
            }
        } else if is_wide(c) {
            flush_word(&mut word, weight, tokens);
            tokens.push(Token::Word {
                text: c.to_string(),
                weight,
            });
        } else {
            word.push(c);
        }
    }
    flush_word(&mut word, weight, tokens);
}

fn flush_word(word: &mut String, weight: FontWeight, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::Word {
            text: std::mem::take(word),
            weight,
        });
    }
}
