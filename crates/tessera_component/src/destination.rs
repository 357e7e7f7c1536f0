//! Attach destinations

use std::fmt;

use tessera_core::PropValue;
use tessera_platform::{NodeId, Placeholder};

/// Where [`Component::attach`](crate::Component::attach) puts a component
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    /// A host element; the component is appended as its last child
    Element(NodeId),
    /// A placeholder marker; the component replaces it in place
    Placeholder(Placeholder),
    /// Any other value; always rejected
    Other(PropValue),
}

impl From<NodeId> for Destination {
    fn from(node: NodeId) -> Self {
        Destination::Element(node)
    }
}

impl From<Placeholder> for Destination {
    fn from(placeholder: Placeholder) -> Self {
        Destination::Placeholder(placeholder)
    }
}

impl From<&Placeholder> for Destination {
    fn from(placeholder: &Placeholder) -> Self {
        Destination::Placeholder(placeholder.clone())
    }
}

impl From<PropValue> for Destination {
    fn from(value: PropValue) -> Self {
        Destination::Other(value)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Element(node) => write!(f, "node {:?}", node),
            Destination::Placeholder(p) => {
                write!(f, "marker {:?} on node {:?}", p.marker, p.node)
            }
            Destination::Other(value) => write!(f, "{} {}", value.type_name(), value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_display_names_type_and_value() {
        let dest = Destination::from(PropValue::from("sidebar"));
        assert_eq!(dest.to_string(), "string sidebar");

        let dest = Destination::from(PropValue::from(42));
        assert_eq!(dest.to_string(), "int 42");
    }
}
