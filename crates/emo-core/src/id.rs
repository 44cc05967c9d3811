//! Interned host node identifiers.
//!
//! Figma addresses a node as `"<session>:<local>"` (`"12:345"`); layers inside
//! component instances get compound ids (`"I12:34;56:78"`). Any string is
//! accepted, and only the simple form exposes its numeric parts.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A host node id, interned so detections can carry it by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// The simple id `"<session>:<local>"`.
    pub fn from_parts(session: u32, local: u32) -> Self {
        Self::intern(&format!("{session}:{local}"))
    }

    /// `(session, local)` of a simple id. `None` for compound instance ids
    /// and free-form ids.
    pub fn parts(&self) -> Option<(u32, u32)> {
        let (session, local) = self.as_str().split_once(':')?;
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(session) || !digits(local) {
            return None;
        }
        Some((session.parse().ok()?, local.parse().ok()?))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}
