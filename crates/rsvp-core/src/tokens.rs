//! Immutable token sequences.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Ordered, immutable list of display tokens.
///
/// Cloning is cheap: clones share the same backing slice, and nothing can
/// mutate it once built.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TokenSequence {
    tokens: Arc<[String]>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Split `text` on whitespace runs. Punctuation stays attached.
    pub fn from_text(text: &str) -> Self {
        Self::new(tokenize(text))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl Index<usize> for TokenSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.tokens[index]
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> From<&[&'a str]> for TokenSequence {
    fn from(tokens: &[&'a str]) -> Self {
        Self::new(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Whitespace tokenizer used for every document format.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
