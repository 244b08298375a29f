//! Front matter nodes from parser events.
//!
//! For each configured kind the builder runs a small state machine:
//!
//! ```text
//! Idle --enter--> Open --value*--> Open --exit--> Idle
//! ```
//!
//! While a kind is open its raw chunks go into a buffer on the
//! [`TreeContext`]; on exit the buffer is taken back, one line ending is
//! removed from each end, and the node is closed.

use fenced_matter_syntax::{MatterId, Registry};

use super::context::TreeContext;
use crate::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatterState {
    Idle,
    Open,
}

/// Builds [`Node::Matter`] nodes for the kinds of one registry.
#[derive(Debug)]
pub struct FrontmatterBuilder {
    names: Vec<String>,
    states: Vec<MatterState>,
}

impl FrontmatterBuilder {
    pub fn new(registry: &Registry) -> Self {
        let names: Vec<String> = registry
            .iter()
            .map(|(_, kind)| kind.name().to_string())
            .collect();
        let states = vec![MatterState::Idle; names.len()];
        Self { names, states }
    }

    /// A block of kind `id` starts: open an empty node and start buffering.
    ///
    /// # Panics
    ///
    /// If a block of the same kind is already open.
    pub fn enter(&mut self, cx: &mut impl TreeContext, id: MatterId) {
        self.transition(id, MatterState::Idle, MatterState::Open);
        let kind = self.names[id.index()].clone();
        log::trace!("enter {kind} front matter");
        cx.enter(Node::Matter {
            kind,
            value: String::new(),
        });
        cx.buffer();
    }

    /// One raw chunk of the open block of kind `id`.
    pub fn value(&mut self, cx: &mut impl TreeContext, id: MatterId, chunk: &str) {
        assert_eq!(
            self.states[id.index()],
            MatterState::Open,
            "`{}` value outside of its block",
            self.names[id.index()]
        );
        cx.append_raw(chunk);
    }

    /// The block of kind `id` ends: trim the buffered text into the node's
    /// value and close it.
    pub fn exit(&mut self, cx: &mut impl TreeContext, id: MatterId) {
        self.transition(id, MatterState::Open, MatterState::Idle);
        let raw = cx.resume();
        let trimmed = strip_boundary_line_endings(&raw);
        log::trace!(
            "exit {} front matter ({} bytes)",
            self.names[id.index()],
            trimmed.len()
        );
        match cx.current_mut() {
            Node::Matter { value, .. } => *value = trimmed.to_string(),
            other => panic!("expected open front matter, found `{}`", other.type_name()),
        }
        cx.exit();
    }

    fn transition(&mut self, id: MatterId, from: MatterState, to: MatterState) {
        let state = &mut self.states[id.index()];
        assert_eq!(
            *state,
            from,
            "`{}` front matter is already {:?}",
            self.names[id.index()],
            state
        );
        *state = to;
    }
}

/// Remove exactly one line ending (`\r\n`, `\n` or `\r`) from the start and
/// one from the end.
pub fn strip_boundary_line_endings(raw: &str) -> &str {
    let raw = ["\r\n", "\n", "\r"]
        .iter()
        .find_map(|eol| raw.strip_prefix(eol))
        .unwrap_or(raw);
    ["\r\n", "\n", "\r"]
        .iter()
        .find_map(|eol| raw.strip_suffix(eol))
        .unwrap_or(raw)
}
