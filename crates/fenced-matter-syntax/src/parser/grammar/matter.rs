//! Front matter blocks.
//!
//! A block is recognized when, at the start of a top-level block:
//!
//! - the line is exactly a kind's open fence, optionally followed by spaces
//!   or tabs, and
//! - a later line is exactly that kind's close fence (same suffix rule).
//!
//! Kinds are tried in registry order. A kind that is not `anywhere` is only a
//! candidate at byte 0 of the document. The first kind whose block closes
//! wins; a block that runs to the end of input without closing is not front
//! matter at all.
//!
//! ```text
//! FRONT_MATTER
//!   FRONT_MATTER_FENCE  "---"
//!   FRONT_MATTER_VALUE  "\n"            ← line ending after the open fence
//!   FRONT_MATTER_VALUE  "title: x\n"    ← one chunk per content line
//!   FRONT_MATTER_FENCE  "---"
//!   NEWLINE             "\n"
//! ```

use crate::matter::{MatterId, MatterKind};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Token counts of a recognized block, relative to the current position.
#[derive(Debug, PartialEq, Eq)]
struct Shape {
    open: usize,
    chunks: Vec<usize>,
    close: usize,
}

/// Try every candidate kind at the current position. Returns true if a front
/// matter block was parsed.
pub(super) fn front_matter(p: &mut Parser<'_, '_>) -> bool {
    let registry = p.registry();
    let at_start = p.at_document_start();

    for (id, kind) in registry.iter() {
        if !at_start && !kind.anywhere() {
            continue;
        }
        if let Some(shape) = scan(p, kind) {
            emit(p, id, shape);
            return true;
        }
    }

    false
}

fn scan(p: &Parser<'_, '_>, kind: &MatterKind) -> Option<Shape> {
    let open = line_len(p, 0);
    if !is_fence_line(&line_text(p, 0, open), kind.open()) {
        return None;
    }
    if p.nth(open) != SyntaxKind::NEWLINE {
        return None;
    }

    let mut offset = open + 1;
    let mut chunks = vec![1];

    loop {
        if p.nth(offset) == SyntaxKind::EOF {
            return None;
        }

        let len = line_len(p, offset);
        if is_fence_line(&line_text(p, offset, len), kind.close()) {
            return Some(Shape {
                open,
                chunks,
                close: len,
            });
        }

        if p.nth(offset + len) != SyntaxKind::NEWLINE {
            return None;
        }
        chunks.push(len + 1);
        offset += len + 1;
    }
}

fn emit(p: &mut Parser<'_, '_>, id: MatterId, shape: Shape) {
    let m = p.start();

    p.bump_n(shape.open, SyntaxKind::FRONT_MATTER_FENCE);
    for chunk in shape.chunks {
        p.bump_n(chunk, SyntaxKind::FRONT_MATTER_VALUE);
    }
    p.bump_n(shape.close, SyntaxKind::FRONT_MATTER_FENCE);
    p.eat(SyntaxKind::NEWLINE);

    m.complete_matter(p, id);
}

/// Number of tokens from `offset` up to (not including) the line ending.
fn line_len(p: &Parser<'_, '_>, offset: usize) -> usize {
    let mut len = 0;
    while !matches!(
        p.nth(offset + len),
        SyntaxKind::NEWLINE | SyntaxKind::EOF
    ) {
        len += 1;
    }
    len
}

fn line_text(p: &Parser<'_, '_>, offset: usize, len: usize) -> String {
    (offset..offset + len).map(|n| p.nth_text(n)).collect()
}

/// `fence` followed by nothing but spaces and tabs.
fn is_fence_line(line: &str, fence: &str) -> bool {
    line.strip_prefix(fence)
        .is_some_and(|rest| rest.chars().all(|c| c == ' ' || c == '\t'))
}
