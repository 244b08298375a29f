//! Sinks that consume parser events.
//!
//! [`replay`] walks the flat event list and drives any [`TreeSink`]. The
//! Rowan [`Sink`] is one implementation; the document tree builder in
//! `fenced-matter-mdast` is another.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::matter::MatterId;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Receives the tree structure described by parser events, in document order.
///
/// Calls are well nested: every `start_node`/`start_matter` is matched by one
/// `finish_node`.
pub trait TreeSink {
    fn start_node(&mut self, kind: SyntaxKind);

    /// Begin a front matter block of a configured kind.
    fn start_matter(&mut self, matter: MatterId);

    /// Add a token. `text` is the concatenation of the raw tokens it covers.
    fn token(&mut self, kind: SyntaxKind, text: &str);

    fn finish_node(&mut self);
}

/// Replay `events` over `tokens` into `sink`.
pub fn replay<S>(tokens: &[Token<'_>], events: &[Event], sink: &mut S)
where
    S: TreeSink + ?Sized,
{
    let mut cursor = 0;
    for event in events {
        match *event {
            Event::Start { kind } => sink.start_node(kind),
            Event::Matter { matter } => sink.start_matter(matter),
            Event::Token { kind, n_raw_tokens } => {
                let start = cursor;
                cursor += n_raw_tokens;
                let text: String = tokens[start..cursor].iter().map(|t| t.text).collect();
                sink.token(kind, &text);
            }
            Event::Finish => sink.finish_node(),
            Event::Placeholder => {}
        }
    }
}

/// Builds a lossless Rowan syntax tree.
pub struct Sink {
    builder: GreenNodeBuilder<'static>,
}

impl Sink {
    pub fn new() -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
        }
    }

    /// Consume the sink and return the root node.
    pub fn finish(self) -> SyntaxNode {
        SyntaxNode::new_root(self.builder.finish())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for Sink {
    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_matter(&mut self, _matter: MatterId) {
        self.builder.start_node(SyntaxKind::FRONT_MATTER.into());
    }

    fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::matter::Registry;

    #[test]
    fn sink_builds_simple_tree() {
        let tokens = lex("hello");

        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::start(SyntaxKind::PARAGRAPH),
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
            Event::Finish,
        ];

        let mut sink = Sink::new();
        replay(&tokens, &events, &mut sink);
        let tree = sink.finish();

        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.text().to_string(), "hello");
    }

    #[test]
    fn sink_groups_raw_tokens() {
        let input = "---\n";
        let tokens = lex(input);
        let (yaml, _) = Registry::default().iter().next().unwrap();

        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::Matter { matter: yaml },
            Event::Token {
                kind: SyntaxKind::FRONT_MATTER_FENCE,
                n_raw_tokens: 3,
            },
            Event::token(SyntaxKind::NEWLINE),
            Event::Finish,
            Event::Finish,
        ];

        let mut sink = Sink::new();
        replay(&tokens, &events, &mut sink);
        let tree = sink.finish();

        let matter = tree.children().next().unwrap();
        assert_eq!(matter.kind(), SyntaxKind::FRONT_MATTER);
        let fence = matter.first_token().unwrap();
        assert_eq!(fence.kind(), SyntaxKind::FRONT_MATTER_FENCE);
        assert_eq!(fence.text(), "---");
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn placeholders_are_ignored() {
        let tokens = lex("x");
        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::Placeholder,
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
        ];

        let mut sink = Sink::new();
        replay(&tokens, &events, &mut sink);
        assert_eq!(sink.finish().text().to_string(), "x");
    }
}
