//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree building.
//! Instead of building the tree directly, the parser emits a **flat sequence**
//! of events that describe the tree structure.
//!
//! ## Event Types
//!
//! ```text
//! Start(ROOT)
//!   Matter(yaml)                 ← Begin a front matter block of kind `yaml`
//!     Token(FRONT_MATTER_FENCE)  ← `---`
//!     Token(FRONT_MATTER_VALUE)  ← `\n`
//!     Token(FRONT_MATTER_VALUE)  ← `title: x\n`
//!     Token(FRONT_MATTER_FENCE)  ← `---`
//!     Token(NEWLINE)
//!   Finish
//!   Start(HEADING)
//!     Token(HASH)
//!     ...
//!   Finish
//! Finish
//! ```
//!
//! Front matter gets its own start event because its node type is not a
//! fixed [`SyntaxKind`]: it is whichever configured kind the grammar matched,
//! identified by a [`MatterId`] into the [`Registry`](crate::matter::Registry).
//! Sinks that only care about the CST treat it as `FRONT_MATTER`.

use crate::matter::MatterId;
use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
///
/// Events form a flat representation of the tree that a
/// [`TreeSink`](super::sink::TreeSink) replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Begin a front matter block of the given configured kind.
    Matter { matter: MatterId },

    /// Add a token to the current node.
    ///
    /// The `n_raw_tokens` field says how many lexer tokens this event
    /// consumes. Usually 1; fence lines and front matter chunks group a
    /// whole line.
    Token { kind: SyntaxKind, n_raw_tokens: usize },

    /// Finish the current node.
    ///
    /// Must be paired with a preceding `Start` or `Matter`.
    Finish,

    /// A placeholder that will be replaced.
    ///
    /// When `parser.start()` is called, a `Placeholder` is pushed. Later,
    /// `marker.complete()` replaces it with a real `Start`, or
    /// `marker.abandon()` leaves it (sinks ignore placeholders).
    Placeholder,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
