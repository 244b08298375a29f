//! Block-level grammar rules.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::matter;

/// Parse a block element.
pub fn block(p: &mut Parser<'_, '_>) {
    // Skip leading blank lines
    while p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }

    if p.at_end() {
        return;
    }

    // Front matter wins over every other reading of its fence line
    if matter::front_matter(p) {
        return;
    }

    // Detect block type at line start
    match p.current() {
        SyntaxKind::HASH => heading(p),
        SyntaxKind::GT => blockquote(p),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
            // Could be list item or thematic break
            if is_thematic_break(p) {
                thematic_break(p);
            } else if is_list_item(p) {
                list_item(p);
            } else {
                paragraph(p);
            }
        }
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => {
            if is_code_fence(p) {
                fenced_code(p);
            } else {
                paragraph(p);
            }
        }
        _ => paragraph(p),
    }
}

/// Check if current position is a thematic break (---, ***, etc.)
fn is_thematic_break(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::DASH | SyntaxKind::STAR) {
        return false;
    }

    // Need at least 3 markers
    let mut count = 0;
    let mut i = 0;

    while p.nth(i) != SyntaxKind::EOF && p.nth(i) != SyntaxKind::NEWLINE {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
        i += 1;
    }

    count >= 3
}

/// Marker followed by whitespace.
fn is_list_item(p: &Parser<'_, '_>) -> bool {
    matches!(
        p.current(),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS
    ) && p.nth(1) == SyntaxKind::WHITESPACE
}

/// Check if current position starts a code fence.
fn is_code_fence(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(marker, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return false;
    }

    let mut count = 0;
    while p.nth(count) == marker {
        count += 1;
    }

    count >= 3
}

/// Consume everything up to (not including) the line ending.
fn rest_of_line(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
}

/// Parse an ATX heading.
fn heading(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while p.at(SyntaxKind::HASH) {
        p.bump();
    }

    rest_of_line(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::HEADING);
}

/// Parse a blockquote.
fn blockquote(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while p.at(SyntaxKind::GT) {
        p.bump();
        rest_of_line(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }

        // Continuation only if the next line starts with `>`
        if !p.at(SyntaxKind::GT) {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

/// Parse a list item. The caller has checked [`is_list_item`].
fn list_item(p: &mut Parser<'_, '_>) {
    let m = p.start();

    // Marker and the space after it
    p.bump();
    p.bump();

    rest_of_line(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// Parse a thematic break.
fn thematic_break(p: &mut Parser<'_, '_>) {
    let m = p.start();

    rest_of_line(p);
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

/// Parse a fenced code block.
fn fenced_code(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let fence_marker = p.current();

    // Count opening fence length
    let mut fence_len = 0;
    while p.at(fence_marker) {
        p.bump();
        fence_len += 1;
    }

    // Info string
    rest_of_line(p);
    p.eat(SyntaxKind::NEWLINE);

    // Parse content until closing fence
    loop {
        if p.at_end() {
            break;
        }

        // Check for closing fence at start of line
        if p.at(fence_marker) {
            let mut close_len = 0;
            while p.nth(close_len) == fence_marker {
                close_len += 1;
            }

            if close_len >= fence_len {
                rest_of_line(p);
                p.eat(SyntaxKind::NEWLINE);
                break;
            }
        }

        rest_of_line(p);
        p.eat(SyntaxKind::NEWLINE);
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// Parse a paragraph (default block).
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();

    // Consume until blank line or block-level construct
    loop {
        rest_of_line(p);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }

        if p.at_end() || p.at(SyntaxKind::NEWLINE) {
            break;
        }

        // Block-level constructs that interrupt paragraphs
        match p.current() {
            SyntaxKind::HASH | SyntaxKind::GT => break,
            SyntaxKind::DASH | SyntaxKind::STAR if is_thematic_break(p) => break,
            SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS if is_list_item(p) => break,
            SyntaxKind::BACKTICK | SyntaxKind::TILDE if is_code_fence(p) => break,
            _ => {}
        }
    }

    m.complete(p, SyntaxKind::PARAGRAPH);
}
