//! # fenced-matter-syntax
//!
//! A lossless Markdown syntax tree with configurable front matter, using
//! [Rowan] + [Logos] and following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Front Matter
//!
//! Front matter is a fenced block of raw metadata (YAML, TOML, anything)
//! that a Markdown document carries alongside its content:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! # Hello
//! ```
//!
//! Which fences count, what node type they produce, and whether they may
//! appear mid-document is configured through a [`Registry`] of matter kinds.
//! The default registry has one kind, `yaml`, fenced by `---` and only valid
//! as the very first thing in the document.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → TreeSink
//!               (Logos)          (Grammar)        ├─ Rowan CST (GreenNodeBuilder)
//!                                                 └─ document tree (fenced-matter-mdast)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Every character becomes part of some token - nothing is discarded.
//!
//! ```text
//! "# Hello\n" → [HASH, WHITESPACE, TEXT("Hello"), NEWLINE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The parser consumes tokens and emits **events** (Start, Matter, Token,
//! Finish) using a marker system. Front matter is recognized before any other
//! block construct and regrouped into fence and value tokens.
//!
//! ### 3. Sinks ([`parser::sink`] module)
//!
//! [`Parse::replay`] drives any [`TreeSink`]. [`Parse::syntax_node`] builds
//! the Rowan tree.
//!
//! ## Module Structure
//!
//! ```text
//! fenced-matter-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── matter.rs        # Matter kinds, configuration shapes, Registry
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Matter, Token, Finish, Placeholder)
//!     ├── sink.rs      # TreeSink trait, replay, Rowan sink
//!     └── grammar/
//!         ├── mod.rs   # Root document parsing
//!         ├── block.rs # Block-level elements (headings, lists, code blocks)
//!         └── matter.rs# Front matter recognition
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use fenced_matter_syntax::{parse, Registry, SyntaxKind};
//!
//! let tree = parse("+++\ntitle = 1\n+++\n# Hello\n", &Registry::new(Some(&"toml".into())).unwrap())
//!     .syntax_node();
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "+++\ntitle = 1\n+++\n# Hello\n");
//!
//! let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
//! assert_eq!(kinds, [SyntaxKind::FRONT_MATTER, SyntaxKind::HEADING]);
//! ```

pub mod lexer;
pub mod matter;
pub mod parser;
pub mod syntax_kind;

pub use matter::{
    FenceSide, FenceSpec, MatterConfig, MatterDescriptor, MatterEntry, MatterError, MatterId,
    MatterKind, Registry,
};
pub use parser::sink::TreeSink;
pub use parser::{Parse, parse};
pub use syntax_kind::{MarkdownLang, SyntaxKind, SyntaxNode};
