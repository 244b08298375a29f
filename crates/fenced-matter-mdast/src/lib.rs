//! # fenced-matter-mdast
//!
//! A block-level document tree for markdown with front matter, and the two
//! directions between it and text:
//!
//! ```text
//! markdown ──parse──▶ events ──Compiler──▶ Node tree ──ToMarkdown──▶ markdown
//!                      (fenced-matter-syntax)
//! ```
//!
//! Both directions are driven by the same [`Registry`] of matter kinds, so a
//! node built from a `+++` block of kind `toml` serializes back with `+++`.
//!
//! ```
//! use fenced_matter_mdast::{Node, from_markdown, to_markdown};
//! use fenced_matter_syntax::Registry;
//!
//! let registry = Registry::new(Some(&"toml".into())).unwrap();
//! let tree = from_markdown("+++\na\n\nb\n+++", &registry);
//! assert_eq!(tree, Node::root(vec![Node::matter("toml", "a\n\nb")]));
//! assert_eq!(to_markdown(&tree, &registry).unwrap(), "+++\na\n\nb\n+++\n");
//! ```

pub mod from_markdown;
pub mod to_markdown;
pub mod tree;

pub use from_markdown::{
    Compiler, FrontmatterBuilder, TreeContext, TreeState, from_markdown, unescape,
};
pub use to_markdown::{Extension, FrontmatterToMarkdown, SerializeError, ToMarkdown, Unsafe};
pub use tree::Node;

use fenced_matter_syntax::Registry;

/// Serialize `tree`, rendering front matter of the kinds in `registry`.
pub fn to_markdown(tree: &Node, registry: &Registry) -> Result<String, SerializeError> {
    let frontmatter = FrontmatterToMarkdown::new(registry);
    ToMarkdown::new().extension(&frontmatter).serialize(tree)
}

/// Parse `source` and serialize it again.
pub fn format(source: &str, registry: &Registry) -> Result<String, SerializeError> {
    to_markdown(&from_markdown(source, registry), registry)
}
