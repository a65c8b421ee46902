use super::space::Point;
#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use smallvec::SmallVec;

/// Expected number of Elements sharing a Node in a typical triangulation.
/// Determines the stack allocation size of each Node's element list.
pub const EXPECTED_NODE_DEGREE: usize = 8;

/// A vertex of the Mesh.
/// Keeps the indices of every `Element` that references it.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub coords: Point,
    elements: SmallVec<[usize; EXPECTED_NODE_DEGREE]>,
}

impl Node {
    pub fn new(id: usize, coords: Point) -> Self {
        Self {
            id,
            coords,
            elements: SmallVec::new(),
        }
    }

    /// Indices (into `Mesh::elements`) of the Elements that reference this Node
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub(crate) fn connect_element(&mut self, elem_idx: usize) {
        if !self.elements.contains(&elem_idx) {
            self.elements.push(elem_idx);
        }
    }

    pub(crate) fn disconnect_element(&mut self, elem_idx: usize) {
        self.elements.retain(|idx| *idx != elem_idx);
    }

    /// Produce a Json Object that describes this Node
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "id": self.id,
            "x": self.coords.x,
            "y": self.coords.y,
            "elements": JsonValue::from(self.elements.to_vec()),
        }
    }
}
