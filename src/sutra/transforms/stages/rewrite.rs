//! Keyword rewriting stage
//!
//! The last stage: turns validated sutra text into JavaScript. The text is tokenized once
//! (see [`crate::sutra::keywords::Token`]) and each keyword token is replaced by its host
//! text in a single left-to-right pass. Everything else is copied through unchanged, so a
//! replacement can never be rewritten again and the order of the keyword table does not
//! matter.
//!
//! Quotes carry no meaning here: keywords inside string literals are rewritten like any
//! other occurrence.

use crate::sutra::error::CompileError;
use crate::sutra::keywords::{tokenize, Token};
use crate::sutra::transforms::Runnable;

/// Keyword rewriting stage
pub struct KeywordRewriting;

impl KeywordRewriting {
    pub fn new() -> Self {
        KeywordRewriting
    }
}

impl Default for KeywordRewriting {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for KeywordRewriting {
    fn name(&self) -> &'static str {
        "keyword_rewriting"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        Ok(rewrite_keywords(&input))
    }
}

pub fn rewrite_keywords(source: &str) -> String {
    let mut output = String::with_capacity(source.len());

    for (token, span) in tokenize(source) {
        match token {
            Token::Keyword(keyword) => output.push_str(keyword.host()),
            _ => output.push_str(&source[span]),
        }
    }

    output
}
