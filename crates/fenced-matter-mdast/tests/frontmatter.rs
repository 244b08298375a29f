//! Front matter through both directions: markdown → tree → markdown.

use fenced_matter_mdast::{Node, format, from_markdown, to_markdown, to_markdown::fenced};
use fenced_matter_syntax::{MatterConfig, MatterDescriptor, MatterEntry, Registry};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn yaml() -> Registry {
    Registry::default()
}

fn toml() -> Registry {
    Registry::new(Some(&"toml".into())).unwrap()
}

fn yaml_and_toml() -> Registry {
    Registry::new(Some(&MatterConfig::Kinds(vec![
        MatterEntry::Preset("yaml".into()),
        MatterEntry::Preset("toml".into()),
    ])))
    .unwrap()
}

fn custom() -> Registry {
    Registry::new(Some(
        &MatterDescriptor::new("custom").marker(("<", ">")).into(),
    ))
    .unwrap()
}

fn json() -> Registry {
    Registry::new(Some(&MatterDescriptor::new("json").fence(("{", "}")).into())).unwrap()
}

fn yaml_anywhere() -> Registry {
    Registry::new(Some(
        &MatterDescriptor::new("yaml").marker("-").anywhere(true).into(),
    ))
    .unwrap()
}

fn root(children: Vec<Node>) -> Node {
    Node::root(children)
}

#[rstest]
#[case::single_fence_is_thematic_break("---", yaml(), root(vec![Node::ThematicBreak]))]
#[case::empty_yaml("---\n---", yaml(), root(vec![Node::matter("yaml", "")]))]
#[case::suffix_after_fences("---  \n---\t ", yaml(), root(vec![Node::matter("yaml", "")]))]
#[case::content("---\na\nb\n---", yaml(), root(vec![Node::matter("yaml", "a\nb")]))]
#[case::lone_cr_line_endings("---\ra: 1\r---", yaml(), root(vec![Node::matter("yaml", "a: 1")]))]
#[case::blank_lines("---\na\n\nb\n---", yaml(), root(vec![Node::matter("yaml", "a\n\nb")]))]
#[case::toml("+++\na\n\nb\n+++", toml(), root(vec![Node::matter("toml", "a\n\nb")]))]
#[case::custom_marker("<<<\na\n\nb\n>>>", custom(), root(vec![Node::matter("custom", "a\n\nb")]))]
#[case::custom_fence("{\na\n\nb\n}", json(), root(vec![Node::matter("json", "a\n\nb")]))]
#[case::text_after_closing_fence(
    "---\n--- x",
    yaml(),
    root(vec![Node::ThematicBreak, Node::paragraph("--- x")])
)]
#[case::long_opening_fence("----\n---", yaml(), root(vec![Node::ThematicBreak, Node::ThematicBreak]))]
#[case::long_closing_fence("---\n----", yaml(), root(vec![Node::ThematicBreak, Node::ThematicBreak]))]
#[case::short_closing_fence("---\n--", yaml(), root(vec![Node::ThematicBreak, Node::paragraph("--")]))]
#[case::toml_opens_toml(
    "+++\ntitle = 1\n+++\n",
    yaml_and_toml(),
    root(vec![Node::matter("toml", "title = 1")])
)]
#[case::yaml_in_the_middle(
    "# Hello\n---\na\n\nb\n---\n+++",
    yaml(),
    root(vec![
        Node::heading(1, "Hello"),
        Node::ThematicBreak,
        Node::paragraph("a"),
        Node::paragraph("b"),
        Node::ThematicBreak,
        Node::paragraph("+++"),
    ])
)]
#[case::anywhere_in_the_middle(
    "# Hello\n---\na\n\nb\n---\n+++",
    yaml_anywhere(),
    root(vec![
        Node::heading(1, "Hello"),
        Node::matter("yaml", "a\n\nb"),
        Node::paragraph("+++"),
    ])
)]
fn builds_tree(#[case] source: &str, #[case] registry: Registry, #[case] expected: Node) {
    assert_eq!(from_markdown(source, &registry), expected);
}

// No setext headings and no indented block markers: look-alikes become
// paragraphs and thematic breaks.
#[rstest]
#[case::indented_opening_fence(
    " ---\n---",
    vec![Node::paragraph("---"), Node::ThematicBreak]
)]
#[case::indented_closing_fence(
    "---\n ---",
    vec![Node::ThematicBreak, Node::paragraph("---")]
)]
#[case::other_characters_after_opening_fence(
    "--- --\n---",
    vec![Node::ThematicBreak, Node::ThematicBreak]
)]
#[case::short_opening_fence("--\n---", vec![Node::paragraph("--"), Node::ThematicBreak])]
#[case::unclosed(
    "---\ntitle: x\n",
    vec![Node::ThematicBreak, Node::paragraph("title: x")]
)]
#[case::after_blank_line(
    "\n---\na\n---\n",
    vec![Node::ThematicBreak, Node::paragraph("a"), Node::ThematicBreak]
)]
fn never_front_matter(#[case] source: &str, #[case] expected: Vec<Node>) {
    assert_eq!(from_markdown(source, &yaml()), root(expected));
}

#[rstest]
fn round_trips_every_kind(
    #[values(yaml_and_toml(), custom(), json())] registry: Registry,
    #[values("", "a", "a\nb", "a\n\nb", "\nleading blank", "key: [1, 2]")] value: &str,
) {
    for (_, kind) in registry.iter() {
        let source = fenced(kind.open(), kind.close(), value);
        let tree = from_markdown(&source, &registry);
        assert_eq!(tree, root(vec![Node::matter(kind.name(), value)]));
        assert_eq!(to_markdown(&tree, &registry).unwrap(), format!("{source}\n"));
    }
}

#[test]
fn boundary_line_endings_are_trimmed_once() {
    assert_eq!(
        from_markdown("---\n---", &yaml()),
        root(vec![Node::matter("yaml", "")])
    );
    assert_eq!(
        from_markdown("---\nline1\n\nline2\n---", &yaml()),
        root(vec![Node::matter("yaml", "line1\n\nline2")])
    );
}

#[test]
fn empty_yaml_serializes_to_adjacent_fences() {
    let tree = root(vec![Node::matter("yaml", "")]);
    assert_eq!(to_markdown(&tree, &yaml()).unwrap(), "---\n---\n");
}

#[test]
fn toml_scenario() {
    let registry =
        Registry::new(Some(&MatterDescriptor::new("toml").fence("+++").into())).unwrap();
    let tree = from_markdown("+++\na\n\nb\n+++", &registry);
    assert_eq!(tree, root(vec![Node::matter("toml", "a\n\nb")]));
    assert_eq!(to_markdown(&tree, &registry).unwrap(), "+++\na\n\nb\n+++\n");
}

#[test]
fn escapes_what_would_otherwise_be_custom_matter() {
    let tree = root(vec![Node::text("<<<\na\n\nb\n>>>")]);
    assert_eq!(
        to_markdown(&tree, &custom()).unwrap(),
        "\\<<<\na\n\nb\n\\>>>\n"
    );
}

#[rstest]
#[case::yaml(yaml(), "---\nx\n---")]
#[case::toml(toml(), "+++\nx\n+++")]
#[case::custom(custom(), "<<<\nx\n>>>")]
#[case::json(json(), "{\nx\n}")]
fn fence_like_text_reads_back_as_text(#[case] registry: Registry, #[case] text: &str) {
    let tree = root(vec![Node::paragraph(text)]);
    let markdown = to_markdown(&tree, &registry).unwrap();
    assert_eq!(from_markdown(&markdown, &registry), tree);
}

#[test]
fn serializer_without_the_kind_fails() {
    let tree = root(vec![Node::matter("toml", "a")]);
    assert!(to_markdown(&tree, &yaml()).is_err());
}

#[test]
fn registry_and_extension_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<fenced_matter_mdast::FrontmatterToMarkdown>();
}

#[test]
fn format_document() {
    let source = "+++\ntitle = \"Notes\"\n+++\n# Notes\n\n+++ not a fence\n\n- first\n-second\n\n```\nlet a = 1;\n```\n";
    assert_snapshot!(format(source, &yaml_and_toml()).unwrap(), @r#"
    +++
    title = "Notes"
    +++

    # Notes

    \+++ not a fence

    * first

    \-second

    ```
    let a = 1;
    ```
    "#);
}
