//! # Lexer - Tokenizing Markdown Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped,
//! which is what lets the CST print back the original document:
//!
//! ```
//! use fenced_matter_syntax::lexer::lex;
//!
//! let input = "---\ntitle: x\n---\n# Hello\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Fences Are Not Tokens
//!
//! Front matter fences are configured at runtime (`---`, `+++`, `<<<`, `{`,
//! ...), so the lexer cannot know them. A fence like `---` comes out as three
//! `DASH` tokens and `<<<` as one `TEXT` run; the grammar compares whole
//! lines against the configured fences and regroups the tokens into
//! `FRONT_MATTER_FENCE` / `FRONT_MATTER_VALUE` composites.
//!
//! Characters with block-level meaning get their own token types:
//! - `#` → `HASH` (headings)
//! - `>` → `GT` (blockquotes)
//! - `-`, `*`, `+` → `DASH`, `STAR`, `PLUS` (lists, thematic breaks)
//! - `` ` ``, `~` → `BACKTICK`, `TILDE` (fenced code)
//!
//! Everything else becomes `TEXT`, grouped into runs.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF, CRLF or a lone CR)
    #[regex(r"\r\n|\r|\n")]
    Newline,

    #[token(">")]
    Gt,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("#")]
    Hash,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^\s>`*+#~-]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized character - treat as TEXT
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        let tokens = lex("hello");
        assert_eq!(tokens, vec![token(SyntaxKind::TEXT, "hello")]);
    }

    #[test]
    fn lex_newline_crlf() {
        let tokens = lex("\r\n");
        assert_eq!(tokens, vec![token(SyntaxKind::NEWLINE, "\r\n")]);
    }

    #[test]
    fn lex_newline_lone_cr() {
        let tokens = lex("a\r\rb");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TEXT, "a"),
                token(SyntaxKind::NEWLINE, "\r"),
                token(SyntaxKind::NEWLINE, "\r"),
                token(SyntaxKind::TEXT, "b"),
            ]
        );
    }

    #[test]
    fn lex_yaml_fence() {
        let tokens = lex("---\n");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::NEWLINE, "\n"),
            ]
        );
    }

    #[test]
    fn lex_toml_fence_with_suffix() {
        let tokens = lex("+++ \t");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::PLUS, "+"),
                token(SyntaxKind::PLUS, "+"),
                token(SyntaxKind::PLUS, "+"),
                token(SyntaxKind::WHITESPACE, " \t"),
            ]
        );
    }

    #[test]
    fn lex_custom_fences() {
        assert_eq!(lex("<<<"), vec![token(SyntaxKind::TEXT, "<<<")]);
        assert_eq!(
            lex(">>>"),
            vec![
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::GT, ">"),
            ]
        );
        assert_eq!(lex("{"), vec![token(SyntaxKind::TEXT, "{")]);
    }

    #[test]
    fn lex_heading_markers() {
        let tokens = lex("## ");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::HASH, "#"),
                token(SyntaxKind::WHITESPACE, " "),
            ]
        );
    }

    #[test]
    fn lex_code_fence() {
        let tokens = lex("```rust\n");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::BACKTICK, "`"),
                token(SyntaxKind::BACKTICK, "`"),
                token(SyntaxKind::BACKTICK, "`"),
                token(SyntaxKind::TEXT, "rust"),
                token(SyntaxKind::NEWLINE, "\n"),
            ]
        );
    }

    #[test]
    fn lex_escaped_marker() {
        let tokens = lex("\\---");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TEXT, "\\"),
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::DASH, "-"),
                token(SyntaxKind::DASH, "-"),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "+++\ntitle = \"x\"\n+++\n\n# Hello\n> quote\n- item";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "---\na: 1\n---";
        let tokens = lex_with_spans(input);
        for (token, span) in &tokens {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }
}
