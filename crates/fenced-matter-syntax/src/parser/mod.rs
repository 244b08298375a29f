//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a flat list of [`Event`]s using the **event-based** architecture from
//! rust-analyzer. A [`TreeSink`] then turns the events into a tree: the Rowan
//! [`Sink`] for the lossless CST, or any other builder.
//!
//! ## The Event Model
//!
//! Parsing produces events like:
//! ```text
//! Start(HEADING)
//! Token(HASH)
//! Token(WHITESPACE)
//! Token(TEXT)
//! Token(NEWLINE)
//! Finish
//! ```
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must**
//! be either:
//!
//! - Completed with `marker.complete(parser, KIND)` → emits Start+Finish
//! - Completed with `marker.complete_matter(parser, id)` → front matter node
//! - Abandoned with `marker.abandon(parser)` → removes the placeholder
//!
//! If you drop a marker without doing either, **the program panics**. This
//! prevents accidentally leaving the tree in an inconsistent state.
//!
//! ```ignore
//! let m = parser.start();           // Get a marker
//! parser.bump();                    // Consume some tokens
//! m.complete(parser, SyntaxKind::PARAGRAPH);  // MUST complete or abandon
//! ```
//!
//! ## Front Matter
//!
//! The parser carries the [`Registry`] of configured matter kinds. The block
//! grammar tries them before anything else, so a recognized fence never
//! becomes a thematic break or paragraph. See `grammar::matter`.
//!
//! ## Public API
//!
//! ```
//! use fenced_matter_syntax::{parse, Registry, SyntaxKind};
//!
//! let parse = parse("---\ntitle: x\n---\n", &Registry::default());
//! let tree = parse.syntax_node();
//! assert_eq!(tree.first_child().unwrap().kind(), SyntaxKind::FRONT_MATTER);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::matter::{MatterId, Registry};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::{Sink, TreeSink, replay};

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `nth_text()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `bump_n()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    registry: &'t Registry,
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>], registry: &'t Registry) -> Self {
        Self {
            tokens,
            registry,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Run the grammar and return the events.
    pub fn finish(mut self) -> Vec<Event> {
        grammar::root(&mut self);
        self.events
    }

    /// The configured matter kinds.
    pub fn registry(&self) -> &'t Registry {
        self.registry
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, or `""` past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if no token has been consumed yet.
    pub fn at_document_start(&self) -> bool {
        self.pos == 0
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n,
            });
            self.pos += n;
        }
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it.
///
/// ## The Must-Use Contract
///
/// The `#[must_use]` attribute and the `Drop` impl together enforce that
/// every marker is either completed or abandoned. Dropping it otherwise
/// panics, which catches bugs at runtime rather than producing corrupt trees.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.fill(p, Event::Start { kind });
    }

    /// Complete this marker as a front matter block of a configured kind.
    pub fn complete_matter(self, p: &mut Parser<'_, '_>, matter: MatterId) {
        self.fill(p, Event::Matter { matter });
    }

    fn fill(mut self, p: &mut Parser<'_, '_>, start: Event) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = start;
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// **Note**: This only removes the placeholder if it's the last event.
    /// If other events were pushed after `start()`, the placeholder becomes
    /// inert and is ignored by sinks.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// The result of parsing: the tokens and the events describing their tree.
#[derive(Debug, Clone)]
pub struct Parse<'input> {
    tokens: Vec<Token<'input>>,
    events: Vec<Event>,
}

impl<'input> Parse<'input> {
    pub fn tokens(&self) -> &[Token<'input>] {
        &self.tokens
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drive `sink` with the parsed structure.
    pub fn replay<S>(&self, sink: &mut S)
    where
        S: TreeSink + ?Sized,
    {
        replay(&self.tokens, &self.events, sink);
    }

    /// Build the lossless Rowan syntax tree.
    pub fn syntax_node(&self) -> SyntaxNode {
        let mut sink = Sink::new();
        self.replay(&mut sink);
        sink.finish()
    }
}

/// Parse markdown source, recognizing front matter of the configured kinds.
pub fn parse<'input>(source: &'input str, registry: &Registry) -> Parse<'input> {
    let tokens = lex(source);
    let events = Parser::new(&tokens, registry).finish();
    Parse { tokens, events }
}
