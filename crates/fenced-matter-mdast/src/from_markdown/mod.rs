//! # Markdown → document tree
//!
//! [`Compiler`] is a [`TreeSink`]: it replays the events of a
//! [`fenced_matter_syntax::parse`] and turns each block into a [`Node`].
//!
//! ## Event flow
//!
//! ```text
//! Start(ROOT)
//!   Matter(toml)           → FrontmatterBuilder::enter  (node + buffer)
//!     FRONT_MATTER_FENCE   → ignored
//!     FRONT_MATTER_VALUE   → FrontmatterBuilder::value  (append_raw)
//!     FRONT_MATTER_FENCE   → ignored
//!   Finish                 → FrontmatterBuilder::exit   (resume, trim, close)
//!   Start(PARAGRAPH)       → buffer
//!     TEXT, NEWLINE, ...   → append_raw
//!   Finish                 → resume, build the paragraph
//! Finish
//! ```
//!
//! Other block kinds capture their raw text the same way and are converted
//! when they close.

mod context;
mod frontmatter;

pub use context::{TreeContext, TreeState};
pub use frontmatter::{FrontmatterBuilder, strip_boundary_line_endings};

use fenced_matter_syntax::{MatterId, Registry, SyntaxKind, TreeSink, parse};

use crate::tree::Node;

/// Parse `source` and build its document tree.
pub fn from_markdown(source: &str, registry: &Registry) -> Node {
    let parse = parse(source, registry);
    let mut compiler = Compiler::new(registry);
    parse.replay(&mut compiler);
    compiler.finish()
}

#[derive(Debug, Clone, Copy)]
enum Open {
    Syntax(SyntaxKind),
    Matter(MatterId),
}

/// Builds a [`Node`] tree from parser events.
pub struct Compiler {
    tree: TreeState,
    frontmatter: FrontmatterBuilder,
    open: Vec<Open>,
}

impl Compiler {
    pub fn new(registry: &Registry) -> Self {
        Self {
            tree: TreeState::new(),
            frontmatter: FrontmatterBuilder::new(registry),
            open: Vec::new(),
        }
    }

    /// Return the root node.
    pub fn finish(self) -> Node {
        self.tree.finish()
    }
}

impl TreeSink for Compiler {
    fn start_node(&mut self, kind: SyntaxKind) {
        if kind != SyntaxKind::ROOT {
            self.tree.buffer();
        }
        self.open.push(Open::Syntax(kind));
    }

    fn start_matter(&mut self, matter: MatterId) {
        self.frontmatter.enter(&mut self.tree, matter);
        self.open.push(Open::Matter(matter));
    }

    fn token(&mut self, kind: SyntaxKind, text: &str) {
        match self.open.last() {
            Some(Open::Matter(id)) => {
                if kind == SyntaxKind::FRONT_MATTER_VALUE {
                    self.frontmatter.value(&mut self.tree, *id, text);
                }
            }
            // Blank lines between blocks
            Some(Open::Syntax(SyntaxKind::ROOT)) | None => {}
            Some(Open::Syntax(_)) => self.tree.append_raw(text),
        }
    }

    fn finish_node(&mut self) {
        match self.open.pop() {
            Some(Open::Matter(id)) => self.frontmatter.exit(&mut self.tree, id),
            Some(Open::Syntax(SyntaxKind::ROOT)) => {}
            Some(Open::Syntax(kind)) => {
                let raw = self.tree.resume();
                if let Some(node) = block(kind, &raw) {
                    self.tree.enter(node);
                    self.tree.exit();
                }
            }
            None => panic!("finish without a matching start"),
        }
    }
}

/// Convert the raw text of one block.
fn block(kind: SyntaxKind, raw: &str) -> Option<Node> {
    let node = match kind {
        SyntaxKind::HEADING => {
            let depth = raw.chars().take_while(|&c| c == '#').count();
            let text = raw[depth..].trim();
            Node::Heading {
                depth: u8::try_from(depth).unwrap_or(u8::MAX),
                children: phrasing(text),
            }
        }
        SyntaxKind::PARAGRAPH => Node::Paragraph {
            children: phrasing(&strip_indent(lines(raw))),
        },
        SyntaxKind::BLOCK_QUOTE => {
            let lines = lines(raw).map(|line| {
                let line = line.trim_start();
                line.strip_prefix('>').unwrap_or(line)
            });
            Node::Blockquote {
                children: flow(&strip_indent(lines)),
            }
        }
        SyntaxKind::LIST_ITEM => {
            // Marker is a single ASCII byte
            let content = raw.trim_start().get(1..).unwrap_or_default();
            Node::ListItem {
                children: flow(&strip_indent(lines(content))),
            }
        }
        SyntaxKind::THEMATIC_BREAK => Node::ThematicBreak,
        SyntaxKind::FENCED_CODE => code(raw),
        _ => {
            log::debug!("no document node for {kind:?}");
            return None;
        }
    };
    Some(node)
}

/// Lines of `text` split on `\r\n`, `\n` or a lone `\r`, without their
/// endings. A final line ending does not start an empty line.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(index) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..index];
        let ending = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + ending..];
        Some(line)
    })
}

fn strip_indent<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.map(str::trim_start).collect::<Vec<_>>().join("\n")
}

/// A single text child, or none for empty content.
fn phrasing(text: &str) -> Vec<Node> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::text(unescape(text))]
    }
}

/// A single paragraph child, or none for empty content.
fn flow(text: &str) -> Vec<Node> {
    let text = text.trim_end();
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::Paragraph {
            children: phrasing(text),
        }]
    }
}

fn code(raw: &str) -> Node {
    let mut lines = lines(raw);
    let opening = lines.next().unwrap_or_default();
    let marker = opening.chars().next().unwrap_or('`');
    let fence_len = opening.chars().take_while(|&c| c == marker).count();
    let lang = opening[fence_len * marker.len_utf8()..]
        .split_whitespace()
        .next()
        .map(unescape);

    let mut body: Vec<&str> = lines.collect();
    if let Some(last) = body.last() {
        let last = last.trim_end();
        let closing = last.chars().take_while(|&c| c == marker).count();
        if closing >= fence_len && closing == last.chars().count() {
            body.pop();
        }
    }

    Node::Code {
        lang,
        value: body.join("\n"),
    }
}

/// Decode backslash escapes of ASCII punctuation and numeric character
/// references (`&#35;`, `&#x23;`).
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find(['\\', '&']) {
        out.push_str(&rest[..index]);
        rest = &rest[index..];

        if let Some(after) = rest.strip_prefix('\\') {
            match after.chars().next() {
                Some(c) if c.is_ascii_punctuation() => {
                    out.push(c);
                    rest = &after[1..];
                }
                _ => {
                    out.push('\\');
                    rest = after;
                }
            }
        } else if let Some((decoded, len)) = numeric_reference(rest) {
            out.push(decoded);
            rest = &rest[len..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Parse `&#NNN;` or `&#xHH;` at the start of `text`, returning the
/// character and the number of bytes consumed.
fn numeric_reference(text: &str) -> Option<(char, usize)> {
    let body = text.strip_prefix("&#")?;
    let (digits, radix, prefix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 3),
        None => (body, 10, 2),
    };
    let end = digits.find(';')?;
    let digits = &digits[..end];
    let max_len = if radix == 16 { 6 } else { 7 };
    if digits.is_empty()
        || digits.len() > max_len
        || !digits.chars().all(|c| c.is_digit(radix))
    {
        return None;
    }
    let code = u32::from_str_radix(digits, radix).ok()?;
    let decoded = match char::from_u32(code) {
        Some('\0') | None => char::REPLACEMENT_CHARACTER,
        Some(c) => c,
    };
    Some((decoded, prefix + digits.len() + 1))
}
