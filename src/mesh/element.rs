#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use std::fmt;

/// A triangular face of the Mesh carrying a single scalar value
///
/// `nodes` holds indices into `Mesh::nodes` (not Node ids), in the order they were listed in the mesh file.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: usize,
    pub nodes: [usize; 3],
    pub value: f64,
}

impl Element {
    /// Create a new Element over three Nodes. Its value is 0.0 until one is assigned.
    pub fn new(id: usize, nodes: [usize; 3]) -> Self {
        Self {
            id,
            nodes,
            value: 0.0,
        }
    }

    /// Produce a Json Object that describes this Element
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "id": self.id,
            "nodes": JsonValue::from(self.nodes.to_vec()),
            "value": self.value,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Element {} (value: {})", self.id, self.value)
    }
}
