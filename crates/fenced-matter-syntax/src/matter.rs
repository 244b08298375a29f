//! # Matter Kinds and the Registry
//!
//! A *matter kind* is one configured category of front matter: a name (the
//! node type, e.g. `yaml`), the fences that open and close it, and whether it
//! may appear anywhere or only as the first content of a document.
//!
//! Configuration comes in three shapes, mirrored by [`MatterConfig`]:
//!
//! ```text
//! (none)                          → one `yaml` kind fenced by `---`
//! "toml"                          → one preset kind
//! [{type, marker?, fence?, ...}]  → explicit kinds, presets allowed inline
//! ```
//!
//! [`Registry::new`] normalizes any of these into an ordered list of
//! [`MatterKind`]s with concrete open/close strings. The registry is built
//! once and never mutated; the grammar, the tree builder and the serializer
//! all read from the same instance.
//!
//! ## Fence Shapes
//!
//! - `marker = "-"` → open and close are `---` (the marker tripled)
//! - `marker = { open = "<", close = ">" }` → `<<<` and `>>>`
//! - `fence = "+++"` → used verbatim for both sides
//! - `fence = { open = "{", close = "}" }` → used verbatim
//!
//! `marker` wins when both are given.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many times a marker is repeated to form a fence.
pub const MARKER_REPEAT: usize = 3;

/// Errors raised while normalizing matter configuration.
///
/// All of these are programmer errors in the configuration; no partial
/// registry is ever produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatterError {
    #[error("matter kind is missing a `type`")]
    MissingType,

    #[error("matter kind `{kind}` needs either a `marker` or a `fence`")]
    MissingFence { kind: String },

    #[error("matter kind `{kind}` has an empty {side} fence")]
    EmptyFence { kind: String, side: FenceSide },

    #[error("matter kind `{kind}` is configured more than once")]
    DuplicateType { kind: String },
}

/// Which end of a front matter block a fence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceSide {
    Open,
    Close,
}

impl fmt::Display for FenceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceSide::Open => f.write_str("opening"),
            FenceSide::Close => f.write_str("closing"),
        }
    }
}

/// A fence or marker as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FenceSpec {
    /// The same string on both sides.
    Both(String),
    /// Distinct opening and closing strings.
    Pair { open: String, close: String },
}

impl FenceSpec {
    /// The string configured for `side`.
    pub fn side(&self, side: FenceSide) -> &str {
        match (self, side) {
            (FenceSpec::Both(both), _) => both,
            (FenceSpec::Pair { open, .. }, FenceSide::Open) => open,
            (FenceSpec::Pair { close, .. }, FenceSide::Close) => close,
        }
    }
}

impl From<&str> for FenceSpec {
    fn from(both: &str) -> Self {
        FenceSpec::Both(both.to_string())
    }
}

impl From<(&str, &str)> for FenceSpec {
    fn from((open, close): (&str, &str)) -> Self {
        FenceSpec::Pair {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// One matter kind as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatterDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<FenceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fence: Option<FenceSpec>,
    #[serde(default)]
    pub anywhere: bool,
}

impl MatterDescriptor {
    /// A descriptor with no fence yet; add one with [`marker`](Self::marker)
    /// or [`fence`](Self::fence).
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            marker: None,
            fence: None,
            anywhere: false,
        }
    }

    pub fn marker(mut self, marker: impl Into<FenceSpec>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn fence(mut self, fence: impl Into<FenceSpec>) -> Self {
        self.fence = Some(fence.into());
        self
    }

    pub fn anywhere(mut self, anywhere: bool) -> Self {
        self.anywhere = anywhere;
        self
    }

    /// The built-in descriptor for a bare kind name.
    ///
    /// `toml` is fenced by `+++`; every other name gets YAML-style `---`.
    pub fn preset(name: &str) -> Self {
        match name {
            "toml" => Self::new(name).marker("+"),
            _ => Self::new(name).marker("-"),
        }
    }
}

/// An entry in a list of matter kinds: a preset name or a full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatterEntry {
    Preset(String),
    Descriptor(MatterDescriptor),
}

impl MatterEntry {
    fn into_descriptor(self) -> MatterDescriptor {
        match self {
            MatterEntry::Preset(name) => MatterDescriptor::preset(&name),
            MatterEntry::Descriptor(descriptor) => descriptor,
        }
    }
}

/// User-facing front matter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatterConfig {
    Preset(String),
    Kinds(Vec<MatterEntry>),
}

impl From<&str> for MatterConfig {
    fn from(name: &str) -> Self {
        MatterConfig::Preset(name.to_string())
    }
}

impl From<MatterDescriptor> for MatterConfig {
    fn from(descriptor: MatterDescriptor) -> Self {
        MatterConfig::Kinds(vec![MatterEntry::Descriptor(descriptor)])
    }
}

impl From<Vec<MatterDescriptor>> for MatterConfig {
    fn from(descriptors: Vec<MatterDescriptor>) -> Self {
        MatterConfig::Kinds(
            descriptors
                .into_iter()
                .map(MatterEntry::Descriptor)
                .collect(),
        )
    }
}

/// Identifies a kind within the [`Registry`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatterId(usize);

impl MatterId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A normalized matter kind with concrete fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatterKind {
    name: String,
    open: String,
    close: String,
    anywhere: bool,
}

impl MatterKind {
    /// The node type, e.g. `yaml`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    pub fn fence(&self, side: FenceSide) -> &str {
        match side {
            FenceSide::Open => &self.open,
            FenceSide::Close => &self.close,
        }
    }

    /// Whether the kind may start at any top-level block, not just byte 0.
    pub fn anywhere(&self) -> bool {
        self.anywhere
    }

    fn from_descriptor(descriptor: MatterDescriptor) -> Result<Self, MatterError> {
        let MatterDescriptor {
            kind,
            marker,
            fence,
            anywhere,
        } = descriptor;

        if kind.is_empty() {
            return Err(MatterError::MissingType);
        }

        let derive = |side: FenceSide| -> Result<String, MatterError> {
            let fence = match (&marker, &fence) {
                (Some(marker), _) => marker.side(side).repeat(MARKER_REPEAT),
                (None, Some(fence)) => fence.side(side).to_string(),
                (None, None) => {
                    return Err(MatterError::MissingFence { kind: kind.clone() });
                }
            };
            if fence.is_empty() {
                return Err(MatterError::EmptyFence {
                    kind: kind.clone(),
                    side,
                });
            }
            Ok(fence)
        };

        let open = derive(FenceSide::Open)?;
        let close = derive(FenceSide::Close)?;

        Ok(Self {
            name: kind,
            open,
            close,
            anywhere,
        })
    }
}

/// The ordered, immutable set of configured matter kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    kinds: Vec<MatterKind>,
}

impl Registry {
    /// Normalize `config` into a registry. `None` yields the default single
    /// `yaml` kind.
    pub fn new(config: Option<&MatterConfig>) -> Result<Self, MatterError> {
        let descriptors = match config {
            None => vec![MatterDescriptor::preset("yaml")],
            Some(MatterConfig::Preset(name)) => vec![MatterDescriptor::preset(name)],
            Some(MatterConfig::Kinds(entries)) => entries
                .iter()
                .cloned()
                .map(MatterEntry::into_descriptor)
                .collect(),
        };

        let mut kinds: Vec<MatterKind> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let kind = MatterKind::from_descriptor(descriptor)?;
            if kinds.iter().any(|k| k.name == kind.name) {
                return Err(MatterError::DuplicateType { kind: kind.name });
            }
            kinds.push(kind);
        }

        log::debug!(
            "normalized {} matter kind(s): {:?}",
            kinds.len(),
            kinds.iter().map(MatterKind::name).collect::<Vec<_>>()
        );

        Ok(Self { kinds })
    }

    /// A registry with no kinds; front matter is never recognized.
    pub fn empty() -> Self {
        Self { kinds: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// All kinds in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (MatterId, &MatterKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| (MatterId(index), kind))
    }

    /// Look up a kind by id.
    ///
    /// # Panics
    ///
    /// If `id` was handed out by a different registry with more kinds.
    pub fn get(&self, id: MatterId) -> &MatterKind {
        &self.kinds[id.0]
    }

    /// Resolve a node type name to its id.
    pub fn find(&self, name: &str) -> Option<MatterId> {
        self.kinds.iter().position(|k| k.name == name).map(MatterId)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            kinds: vec![MatterKind {
                name: "yaml".to_string(),
                open: "---".to_string(),
                close: "---".to_string(),
                anywhere: false,
            }],
        }
    }
}
