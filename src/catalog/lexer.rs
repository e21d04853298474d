//! Line lexer for template catalogs using logos
//!
//! Every token except [`Token::Newline`] runs to the end of its line, so each
//! one starts at column 0. That is what anchors headings and fences.

use logos::Logos;

pub use crate::error::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `## name optional title`
    #[regex(r"##[ \t]+[^\r\n]*", priority = 5)]
    Heading,

    /// Opening fence of a structured payload, e.g. ```` ```json ````
    #[regex(r"```[ \t]*[jJ][sS][oO][nN][^\r\n]*", priority = 6)]
    JsonFence,

    /// Any other fence line, opening or closing
    #[regex(r"```[^\r\n]*", priority = 4)]
    Fence,

    #[regex(r"\r?\n")]
    Newline,

    /// Everything else on a line
    #[regex(r"[^\r\n]+", priority = 1)]
    Text,
}

/// Tokenize catalog text into (token, span) pairs.
///
/// Bytes the lexer cannot classify (a lone `\r`) come back as [`Token::Text`].
pub fn lex(source: &str) -> Vec<(Token, Span)> {
    Token::lexer(source)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Text), span))
        .collect()
}

/// Text of a heading line with the `##` marker and surrounding blanks removed
pub fn heading_text(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}
