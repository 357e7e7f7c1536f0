//! Host node identifiers and markers

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Identifies a node in a host display tree
    pub struct NodeId;
}

impl NodeId {
    /// Convert to a raw u64 representation
    ///
    /// Hosts that keep their own node storage can encode their handles here.
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Create from a raw u64 representation
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Broad classification of a host node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of the live tree
    Document,
    /// A regular element (templates and styles included)
    Element,
    /// An isolated sub-tree exclusively owned by an element
    ShadowRoot,
    /// A parentless container whose children move on insertion
    Fragment,
    /// Text content
    Text,
    /// Inert marker node
    Comment,
}

impl NodeKind {
    /// Whether nodes of this kind may hold children
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Document | NodeKind::Element | NodeKind::ShadowRoot | NodeKind::Fragment
        )
    }
}

/// Marker tag recognized on placeholder destinations
pub const PLACEHOLDER_MARKER: &str = "placeholder";

/// A "replace me with the real component" marker sitting in a host tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Marker tag; only [`PLACEHOLDER_MARKER`] is recognized
    pub marker: String,
    /// The host node that gets replaced
    pub node: NodeId,
}

impl Placeholder {
    /// A placeholder carrying the recognized marker
    pub fn new(node: NodeId) -> Self {
        Self {
            marker: PLACEHOLDER_MARKER.to_string(),
            node,
        }
    }

    /// Whether the marker tag is the recognized one
    pub fn is_recognized(&self) -> bool {
        self.marker == PLACEHOLDER_MARKER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_raw_round_trip() {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        let id = map.insert(());
        assert_eq!(NodeId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn test_placeholder_marker() {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        let node = map.insert(());

        assert!(Placeholder::new(node).is_recognized());
        let foreign = Placeholder {
            marker: "slot".into(),
            node,
        };
        assert!(!foreign.is_recognized());
    }

    #[test]
    fn test_container_kinds() {
        assert!(NodeKind::Element.is_container());
        assert!(NodeKind::ShadowRoot.is_container());
        assert!(!NodeKind::Text.is_container());
        assert!(!NodeKind::Comment.is_container());
    }
}
