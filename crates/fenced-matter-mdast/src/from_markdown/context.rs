//! Tree-building primitives.
//!
//! Handlers never touch the node stack directly. They open a node, capture
//! raw text into a buffer, take the buffer back and close the node, all
//! through [`TreeContext`].

use crate::tree::Node;

/// The primitives a tree-building handler works with.
///
/// Misuse (closing the root, appending with no open buffer, resuming twice)
/// is a bug in the event source and panics.
pub trait TreeContext {
    /// Open `node` as a child of the current node.
    fn enter(&mut self, node: Node);

    /// The innermost open node.
    fn current_mut(&mut self) -> &mut Node;

    /// Close the innermost open node, attaching it to its parent.
    fn exit(&mut self);

    /// Start capturing raw text.
    fn buffer(&mut self);

    /// Append to the innermost buffer.
    fn append_raw(&mut self, text: &str);

    /// Stop capturing and return what the innermost buffer holds.
    fn resume(&mut self) -> String;
}

/// The default [`TreeContext`]: a stack of open nodes rooted at
/// [`Node::Root`] and a stack of text buffers.
#[derive(Debug)]
pub struct TreeState {
    stack: Vec<Node>,
    buffers: Vec<String>,
}

impl TreeState {
    pub fn new() -> Self {
        Self {
            stack: vec![Node::root(Vec::new())],
            buffers: Vec::new(),
        }
    }

    /// Return the finished root.
    ///
    /// # Panics
    ///
    /// If a node or buffer is still open.
    pub fn finish(mut self) -> Node {
        assert!(
            self.buffers.is_empty(),
            "document ended with {} open buffer(s)",
            self.buffers.len()
        );
        assert_eq!(
            self.stack.len(),
            1,
            "document ended with {} unclosed node(s)",
            self.stack.len() - 1
        );
        match self.stack.pop() {
            Some(root) => root,
            None => unreachable!(),
        }
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeContext for TreeState {
    fn enter(&mut self, node: Node) {
        self.stack.push(node);
    }

    fn current_mut(&mut self) -> &mut Node {
        match self.stack.last_mut() {
            Some(node) => node,
            None => unreachable!("the root is never popped"),
        }
    }

    fn exit(&mut self) {
        assert!(self.stack.len() > 1, "exit without a matching enter");
        let Some(node) = self.stack.pop() else {
            unreachable!()
        };
        let parent = self.current_mut();
        let type_name = parent.type_name().to_string();
        match parent.children_mut() {
            Some(children) => children.push(node),
            None => panic!("`{type_name}` node cannot have children"),
        }
    }

    fn buffer(&mut self) {
        self.buffers.push(String::new());
    }

    fn append_raw(&mut self, text: &str) {
        match self.buffers.last_mut() {
            Some(buffer) => buffer.push_str(text),
            None => panic!("raw text outside of a buffer"),
        }
    }

    fn resume(&mut self) -> String {
        match self.buffers.pop() {
            Some(buffer) => buffer,
            None => panic!("resume without a matching buffer"),
        }
    }
}
