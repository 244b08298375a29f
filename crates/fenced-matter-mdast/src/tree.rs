//! The document tree.
//!
//! A small block-level tree in the shape of mdast: every node has a `type`
//! tag, flow containers hold `children`, leaves hold a `value`. Front matter
//! nodes carry the name of their matter kind (`yaml`, `toml`, ...) and the
//! raw payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    Heading {
        depth: u8,
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    Blockquote {
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        value: String,
    },
    ThematicBreak,
    Text {
        value: String,
    },
    /// Front matter of a configured kind. `value` excludes the fences and
    /// the line endings directly inside them.
    Matter {
        kind: String,
        value: String,
    },
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// A paragraph holding a single text node.
    pub fn paragraph(value: impl Into<String>) -> Self {
        Node::Paragraph {
            children: vec![Node::text(value)],
        }
    }

    pub fn heading(depth: u8, value: impl Into<String>) -> Self {
        Node::Heading {
            depth,
            children: vec![Node::text(value)],
        }
    }

    pub fn matter(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Matter {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// The node's type name. For front matter this is the matter kind.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Root { .. } => "root",
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::Blockquote { .. } => "blockquote",
            Node::ListItem { .. } => "listItem",
            Node::Code { .. } => "code",
            Node::ThematicBreak => "thematicBreak",
            Node::Text { .. } => "text",
            Node::Matter { kind, .. } => kind,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::Blockquote { children }
            | Node::ListItem { children } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::Blockquote { children }
            | Node::ListItem { children } => Some(children),
            _ => None,
        }
    }
}
