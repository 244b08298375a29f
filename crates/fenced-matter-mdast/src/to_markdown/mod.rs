//! # Document tree → markdown
//!
//! [`ToMarkdown`] walks a [`Node`] tree and renders each node. Extensions
//! are consulted first, in the order they were added; built-in handlers
//! cover the block nodes of [`crate::tree`]. Text is escaped against a
//! table of [`Unsafe`] characters that extensions can extend.
//!
//! ```
//! use fenced_matter_mdast::{FrontmatterToMarkdown, Node, ToMarkdown};
//! use fenced_matter_syntax::Registry;
//!
//! let registry = Registry::default();
//! let frontmatter = FrontmatterToMarkdown::new(&registry);
//! let tree = Node::root(vec![Node::matter("yaml", "a: 1"), Node::paragraph("---")]);
//!
//! let markdown = ToMarkdown::new().extension(&frontmatter).serialize(&tree).unwrap();
//! assert_eq!(markdown, "---\na: 1\n---\n\n\\---\n");
//! ```

mod escape;
mod frontmatter;

pub use escape::{Unsafe, default_unsafe, safe};
pub use frontmatter::{FrontmatterToMarkdown, fenced};

use thiserror::Error;

use crate::tree::Node;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("no handler for `{kind}` nodes")]
    UnknownNode { kind: String },

    #[error("`{child}` cannot appear inside `{parent}`")]
    UnexpectedChild { parent: String, child: String },
}

/// Contributes node handlers and escaping rules to a [`ToMarkdown`].
pub trait Extension: Send + Sync {
    /// Characters this extension's syntax makes unsafe in plain text.
    fn unsafe_patterns(&self) -> Vec<Unsafe> {
        Vec::new()
    }

    /// Render `node`, or `None` to let the next handler try.
    fn handle(&self, node: &Node) -> Option<String>;
}

/// A markdown serializer.
pub struct ToMarkdown<'e> {
    extensions: Vec<&'e dyn Extension>,
    unsafe_patterns: Vec<Unsafe>,
}

impl<'e> ToMarkdown<'e> {
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
            unsafe_patterns: default_unsafe().to_vec(),
        }
    }

    pub fn extension(mut self, extension: &'e dyn Extension) -> Self {
        self.unsafe_patterns.extend(extension.unsafe_patterns());
        self.extensions.push(extension);
        self
    }

    /// Render `node`. Non-empty output ends with exactly one line ending.
    pub fn serialize(&self, node: &Node) -> Result<String, SerializeError> {
        let out = self.node(node)?;
        let out = out.trim_end_matches('\n');
        if out.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("{out}\n"))
        }
    }

    fn node(&self, node: &Node) -> Result<String, SerializeError> {
        if let Some(out) = self.extensions.iter().find_map(|ext| ext.handle(node)) {
            return Ok(out);
        }

        match node {
            Node::Root { children } => self.flow(children),
            Node::Heading { depth, children } => {
                let hashes = "#".repeat(usize::from(*depth).max(1));
                let text = self.phrasing(node, children, false)?;
                if text.is_empty() {
                    Ok(hashes)
                } else {
                    Ok(format!("{hashes} {text}"))
                }
            }
            Node::Paragraph { children } => self.phrasing(node, children, true),
            Node::Blockquote { children } => Ok(prefix_lines(&self.flow(children)?, "> ", "> ")),
            Node::ListItem { children } => Ok(prefix_lines(&self.flow(children)?, "* ", "  ")),
            Node::Code { lang, value } => Ok(code(lang.as_deref(), value)),
            Node::ThematicBreak => Ok("***".to_string()),
            Node::Text { value } => Ok(safe(value, &self.unsafe_patterns, true)),
            Node::Matter { kind, .. } => {
                log::debug!("no serializer registered for `{kind}` front matter");
                Err(SerializeError::UnknownNode { kind: kind.clone() })
            }
        }
    }

    /// Block children, separated by a blank line.
    fn flow(&self, children: &[Node]) -> Result<String, SerializeError> {
        let blocks = children
            .iter()
            .map(|child| self.node(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blocks.join("\n\n"))
    }

    /// Text children, concatenated and escaped as one run.
    fn phrasing(
        &self,
        parent: &Node,
        children: &[Node],
        at_break: bool,
    ) -> Result<String, SerializeError> {
        let mut text = String::new();
        for child in children {
            match child {
                Node::Text { value } => text.push_str(value),
                other => {
                    return Err(SerializeError::UnexpectedChild {
                        parent: parent.type_name().to_string(),
                        child: other.type_name().to_string(),
                    });
                }
            }
        }
        Ok(safe(&text, &self.unsafe_patterns, at_break))
    }
}

impl Default for ToMarkdown<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix the first line with `first` and the others with `rest`. Blank
/// lines get the prefix without trailing whitespace.
fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    if text.is_empty() {
        return first.trim_end().to_string();
    }
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 { first } else { rest };
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A backtick fence longer than any backtick run in `value`.
fn code(lang: Option<&str>, value: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for character in value.chars() {
        if character == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let fence = "`".repeat((longest + 1).max(3));
    let lang = lang.unwrap_or_default();
    if value.is_empty() {
        format!("{fence}{lang}\n{fence}")
    } else {
        format!("{fence}{lang}\n{value}\n{fence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(node: &Node) -> Result<String, SerializeError> {
        ToMarkdown::new().serialize(node)
    }

    #[test]
    fn empty_root_is_empty() {
        assert_eq!(render(&Node::root(Vec::new())).unwrap(), "");
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let tree = Node::root(vec![
            Node::heading(2, "Title"),
            Node::paragraph("one\ntwo"),
            Node::Blockquote {
                children: vec![Node::paragraph("a"), Node::paragraph("b")],
            },
            Node::ListItem {
                children: vec![Node::paragraph("item\nmore")],
            },
            Node::ThematicBreak,
            Node::Code {
                lang: Some("rust".into()),
                value: "let x = 1;".into(),
            },
        ]);
        assert_eq!(
            render(&tree).unwrap(),
            "## Title\n\none\ntwo\n\n> a\n>\n> b\n\n* item\n  more\n\n***\n\n```rust\nlet x = 1;\n```\n"
        );
    }

    #[test]
    fn code_fence_outgrows_content() {
        assert_eq!(code(None, "a ```` b"), "`````\na ```` b\n`````");
        assert_eq!(code(None, ""), "```\n```");
    }

    #[test]
    fn heading_text_is_not_at_a_break() {
        assert_eq!(render(&Node::heading(1, "# x")).unwrap(), "# # x\n");
        assert_eq!(
            render(&Node::Heading {
                depth: 3,
                children: Vec::new()
            })
            .unwrap(),
            "###\n"
        );
    }

    #[test]
    fn root_text_is_escaped() {
        assert_eq!(render(&Node::root(vec![Node::text("> x")])).unwrap(), "\\> x\n");
    }

    #[test]
    fn matter_without_extension_is_unknown() {
        let err = render(&Node::root(vec![Node::matter("yaml", "")])).unwrap_err();
        assert_eq!(
            err,
            SerializeError::UnknownNode {
                kind: "yaml".into()
            }
        );
        assert_eq!(err.to_string(), "no handler for `yaml` nodes");
    }

    #[test]
    fn block_inside_phrasing_is_rejected() {
        let tree = Node::Paragraph {
            children: vec![Node::ThematicBreak],
        };
        assert_eq!(
            render(&tree).unwrap_err(),
            SerializeError::UnexpectedChild {
                parent: "paragraph".into(),
                child: "thematicBreak".into()
            }
        );
    }

    struct Shout;

    impl Extension for Shout {
        fn unsafe_patterns(&self) -> Vec<Unsafe> {
            vec![Unsafe::at_break('!')]
        }

        fn handle(&self, node: &Node) -> Option<String> {
            match node {
                Node::ThematicBreak => Some("!!!".to_string()),
                _ => None,
            }
        }
    }

    #[test]
    fn extensions_take_precedence() {
        let tree = Node::root(vec![Node::ThematicBreak, Node::paragraph("!x")]);
        let shout = Shout;
        assert_eq!(
            ToMarkdown::new().extension(&shout).serialize(&tree).unwrap(),
            "!!!\n\n\\!x\n"
        );
    }
}
