//! Front matter nodes back to fenced text.

use std::collections::HashMap;

use fenced_matter_syntax::Registry;

use super::Extension;
use super::escape::Unsafe;
use crate::tree::Node;

#[derive(Debug, Clone)]
struct Fences {
    open: String,
    close: String,
}

/// Serializes [`Node::Matter`] nodes of the kinds in one registry, and
/// escapes text that would otherwise open one of them.
#[derive(Debug, Clone)]
pub struct FrontmatterToMarkdown {
    fences: HashMap<String, Fences>,
    openers: Vec<char>,
}

impl FrontmatterToMarkdown {
    pub fn new(registry: &Registry) -> Self {
        let mut fences = HashMap::with_capacity(registry.len());
        let mut openers = Vec::new();

        for (_, kind) in registry.iter() {
            fences.insert(
                kind.name().to_string(),
                Fences {
                    open: kind.open().to_string(),
                    close: kind.close().to_string(),
                },
            );
            // Only the first character is guarded, even when fences differ later on
            if let Some(first) = kind.open().chars().next()
                && !openers.contains(&first)
            {
                openers.push(first);
            }
        }

        Self { fences, openers }
    }
}

impl Extension for FrontmatterToMarkdown {
    fn unsafe_patterns(&self) -> Vec<Unsafe> {
        self.openers.iter().copied().map(Unsafe::at_break).collect()
    }

    fn handle(&self, node: &Node) -> Option<String> {
        let Node::Matter { kind, value } = node else {
            return None;
        };
        let fences = self.fences.get(kind)?;
        Some(fenced(&fences.open, &fences.close, value))
    }
}

/// `open`, the value on its own lines when non-empty, then `close`. No
/// trailing line ending.
pub fn fenced(open: &str, close: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{open}\n{close}")
    } else {
        format!("{open}\n{value}\n{close}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenced_matter_syntax::{MatterConfig, MatterDescriptor, MatterEntry};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn registry() -> Registry {
        Registry::new(Some(&MatterConfig::Kinds(vec![
            MatterEntry::Preset("yaml".into()),
            MatterEntry::Preset("toml".into()),
            MatterEntry::Descriptor(MatterDescriptor::new("custom").marker(("<", ">"))),
            MatterEntry::Descriptor(MatterDescriptor::new("json").fence(("{", "}"))),
            MatterEntry::Descriptor(MatterDescriptor::new("dashes").fence(("-=-", "-=-"))),
        ])))
        .unwrap()
    }

    #[rstest]
    #[case("yaml", "", "---\n---")]
    #[case("yaml", "a\nb", "---\na\nb\n---")]
    #[case("toml", "a\n\nb", "+++\na\n\nb\n+++")]
    #[case("custom", "a\n\nb", "<<<\na\n\nb\n>>>")]
    #[case("json", "a\n\nb", "{\na\n\nb\n}")]
    fn renders_fenced(#[case] kind: &str, #[case] value: &str, #[case] expected: &str) {
        let extension = FrontmatterToMarkdown::new(&registry());
        assert_eq!(
            extension.handle(&Node::matter(kind, value)).as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn ignores_other_nodes() {
        let extension = FrontmatterToMarkdown::new(&registry());
        assert_eq!(extension.handle(&Node::matter("unknown", "x")), None);
        assert_eq!(extension.handle(&Node::paragraph("---")), None);
    }

    #[test]
    fn guards_first_fence_characters_once() {
        let extension = FrontmatterToMarkdown::new(&registry());
        let guarded: Vec<char> = extension
            .unsafe_patterns()
            .iter()
            .map(|entry| {
                assert!(entry.at_break);
                entry.character
            })
            .collect();
        assert_eq!(guarded, vec!['-', '+', '<', '{']);
    }
}
