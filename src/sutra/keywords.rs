//! Keyword table and rewriting tokens
//!
//! The sutra vocabulary is a fixed set of Devanagari words, each standing for one piece of
//! JavaScript. Besides the table itself this module defines the logos token stream that the
//! keyword rewriter walks.
//!
//! Tokens are whole words: `असत्य` is its own keyword and never the keyword `सत्य` with a
//! prefix, and an identifier such as `सत्यम्` is a plain word. Quotes are ordinary symbols,
//! so a keyword inside a string literal is still a keyword.

use logos::Logos;
use std::fmt;

/// Start of the compilable region
pub const START_MARKER: &str = "आरम्भ";

/// End of the compilable region
pub const END_MARKER: &str = "समाप्त";

/// Line comment marker
pub const COMMENT_MARKER: &str = "//";

/// Statement terminator appended by the semicolon normalizer
pub const TERMINATOR: char = ';';

/// Keywords with a JavaScript equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Declare,
    Print,
    Loop,
    Conditional,
    Alternate,
    True,
    False,
    Null,
    Break,
    Continue,
}

/// Every keyword, in table order
pub const KEYWORD_TABLE: [Keyword; 10] = [
    Keyword::Declare,
    Keyword::Print,
    Keyword::Loop,
    Keyword::Conditional,
    Keyword::Alternate,
    Keyword::False,
    Keyword::True,
    Keyword::Null,
    Keyword::Break,
    Keyword::Continue,
];

impl Keyword {
    /// The word as written in sutra source
    pub fn source(self) -> &'static str {
        match self {
            Keyword::Declare => "मान",
            Keyword::Print => "मुद्रय",
            Keyword::Loop => "यावत्",
            Keyword::Conditional => "यदि",
            Keyword::Alternate => "अन्यथा",
            Keyword::True => "सत्य",
            Keyword::False => "असत्य",
            Keyword::Null => "शून्य",
            Keyword::Break => "विराम",
            Keyword::Continue => "अग्रिम",
        }
    }

    /// The JavaScript text the keyword becomes
    pub fn host(self) -> &'static str {
        match self {
            Keyword::Declare => "let",
            Keyword::Print => "console.log",
            Keyword::Loop => "while",
            Keyword::Conditional => "if",
            Keyword::Alternate => "else",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
        }
    }

    /// `विराम` and `अग्रिम`, which are only legal inside a loop body
    pub fn is_loop_control(self) -> bool {
        matches!(self, Keyword::Break | Keyword::Continue)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

/// Tokens seen by the keyword rewriter
///
/// Every input character belongs to exactly one token, so concatenating the slices of all
/// tokens reproduces the input.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("मान", |_| Keyword::Declare)]
    #[token("मुद्रय", |_| Keyword::Print)]
    #[token("यावत्", |_| Keyword::Loop)]
    #[token("यदि", |_| Keyword::Conditional)]
    #[token("अन्यथा", |_| Keyword::Alternate)]
    #[token("सत्य", |_| Keyword::True)]
    #[token("असत्य", |_| Keyword::False)]
    #[token("शून्य", |_| Keyword::Null)]
    #[token("विराम", |_| Keyword::Break)]
    #[token("अग्रिम", |_| Keyword::Continue)]
    Keyword(Keyword),

    // Identifiers and numbers, Devanagari combining marks included
    #[regex(r"[\p{L}\p{M}\p{N}_$]+")]
    Word,

    // Any other single character: whitespace, quotes and operators
    #[regex(r"[^\p{L}\p{M}\p{N}_$]")]
    Symbol,
}

/// Tokenize text into `(Token, byte range)` pairs.
///
/// Characters the lexer cannot classify are reported as [`Token::Symbol`].
pub fn tokenize(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push((result.unwrap_or(Token::Symbol), lexer.span()));
    }

    tokens
}
