/// A triangular face with a scalar value
pub mod element;
/// A vertex in real space
pub mod node;
/// Points, and the ranges used to normalize coordinates and values
pub mod space;

use element::Element;
use node::Node;
use space::Point;

use crate::error::ViewSpotError;

use json::{object, JsonValue};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::read_to_string;
use std::path::Path;

/// How repeated Node or Element ids are treated while building a [Mesh]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The last record with a given id replaces the earlier ones
    #[default]
    Overwrite,
    /// A repeated id is an error
    Reject,
}

/// A Node as listed in a mesh file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// An Element as listed in a mesh file: three Node ids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRecord {
    pub id: usize,
    pub nodes: [usize; 3],
}

/// A scalar value assigned to an Element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRecord {
    pub element_id: usize,
    pub value: f64,
}

/// The flat, id-referencing contents of a mesh file
#[derive(Debug, Clone, Default)]
pub struct MeshRecords {
    pub nodes: Vec<NodeRecord>,
    pub elements: Vec<ElementRecord>,
    pub values: Vec<ValueRecord>,
}

impl MeshRecords {
    /// Parse mesh records from a JSON document with the following format:
    ///
    /// The following document describes two triangles sharing the edge between nodes 1 and 2:
    /// ```text
    ///  1.0  2 *-------* 3
    ///         | \   1 |
    ///         |   \   |
    ///         | 0   \ |
    ///  0.0  0 *-------* 1
    ///       0.0      1.0
    /// ```
    ///
    /// mesh.json
    /// ```JSON
    /// {
    ///     "nodes": [
    ///         {"id": 0, "x": 0.0, "y": 0.0},
    ///         {"id": 1, "x": 1.0, "y": 0.0},
    ///         {"id": 2, "x": 0.0, "y": 1.0},
    ///         {"id": 3, "x": 1.0, "y": 1.0}
    ///     ],
    ///     "elements": [
    ///         {"id": 0, "nodes": [0, 1, 2]},
    ///         {"id": 1, "nodes": [1, 3, 2]}
    ///     ],
    ///     "values": [
    ///         {"element_id": 0, "value": 0.25},
    ///         {"element_id": 1, "value": 0.75}
    ///     ]
    /// }
    /// ```
    pub fn parse(source: &str) -> Result<Self, ViewSpotError> {
        let doc = json::parse(source)?;

        let nodes = array_members(&doc, "nodes")?
            .map(|json_node| {
                Ok(NodeRecord {
                    id: usize_field(json_node, "id", "nodes")?,
                    x: f64_field(json_node, "x", "nodes")?,
                    y: f64_field(json_node, "y", "nodes")?,
                })
            })
            .collect::<Result<Vec<_>, ViewSpotError>>()?;

        let elements = array_members(&doc, "elements")?
            .map(|json_element| {
                let id = usize_field(json_element, "id", "elements")?;
                let node_ids = &json_element["nodes"];
                if !node_ids.is_array() || node_ids.len() != 3 {
                    return Err(ViewSpotError::MalformedInput(format!(
                        "Element {} must have an Array of exactly 3 node ids!",
                        id
                    )));
                }

                let mut nodes = [0; 3];
                for (slot, node_id) in nodes.iter_mut().zip(node_ids.members()) {
                    *slot = node_id.as_usize().ok_or_else(|| {
                        ViewSpotError::MalformedInput(format!(
                            "Element {} node ids must be non-negative integers!",
                            id
                        ))
                    })?;
                }

                Ok(ElementRecord { id, nodes })
            })
            .collect::<Result<Vec<_>, ViewSpotError>>()?;

        let values = array_members(&doc, "values")?
            .map(|json_value| {
                Ok(ValueRecord {
                    element_id: usize_field(json_value, "element_id", "values")?,
                    value: f64_field(json_value, "value", "values")?,
                })
            })
            .collect::<Result<Vec<_>, ViewSpotError>>()?;

        Ok(Self {
            nodes,
            elements,
            values,
        })
    }
}

fn array_members<'a>(
    doc: &'a JsonValue,
    key: &'static str,
) -> Result<impl Iterator<Item = &'a JsonValue>, ViewSpotError> {
    if doc[key].is_array() {
        Ok(doc[key].members())
    } else {
        Err(ViewSpotError::MalformedInput(format!(
            "\"{}\" must be an Array!",
            key
        )))
    }
}

fn usize_field(obj: &JsonValue, field: &str, array: &str) -> Result<usize, ViewSpotError> {
    obj[field].as_usize().ok_or_else(|| {
        ViewSpotError::MalformedInput(format!(
            "entries of \"{}\" must have a non-negative integer \"{}\"!",
            array, field
        ))
    })
}

fn f64_field(obj: &JsonValue, field: &str, array: &str) -> Result<f64, ViewSpotError> {
    obj[field].as_f64().ok_or_else(|| {
        ViewSpotError::MalformedInput(format!(
            "entries of \"{}\" must have a numerical \"{}\"!",
            array, field
        ))
    })
}

/// The Node/Element graph of a triangle mesh.
///
/// `Node`s and `Element`s are owned by the tables below and refer to each other by index:
/// * each `Element` holds the indices of its three `Node`s
/// * each `Node` holds the indices of every `Element` that lists it
///
/// The graph is read-only once construction has finished.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
    node_indices: BTreeMap<usize, usize>,
    element_indices: BTreeMap<usize, usize>,
}

impl Mesh {
    /// Construct a completely empty Mesh
    pub fn blank() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
            node_indices: BTreeMap::new(),
            element_indices: BTreeMap::new(),
        }
    }

    /// Construct a Mesh from a JSON file (see [`MeshRecords::parse`] for the format)
    pub fn from_file(
        path: impl AsRef<Path>,
        duplicates: DuplicatePolicy,
    ) -> Result<Self, ViewSpotError> {
        let mesh_file_contents = read_to_string(path.as_ref())?;
        Self::from_json_str(&mesh_file_contents, duplicates)
    }

    /// Construct a Mesh from the contents of a JSON mesh file
    pub fn from_json_str(source: &str, duplicates: DuplicatePolicy) -> Result<Self, ViewSpotError> {
        Self::from_records(&MeshRecords::parse(source)?, duplicates)
    }

    /// Build the graph from flat records in three passes: Nodes, then Elements (connecting each Node
    /// back to the Elements that reference it), then values.
    pub fn from_records(
        records: &MeshRecords,
        duplicates: DuplicatePolicy,
    ) -> Result<Self, ViewSpotError> {
        let mut mesh = Self::blank();
        mesh.nodes.reserve(records.nodes.len());
        mesh.elements.reserve(records.elements.len());

        for node in records.nodes.iter() {
            mesh.insert_node(node, duplicates)?;
        }
        debug!("built {} nodes", mesh.nodes.len());

        for element in records.elements.iter() {
            mesh.insert_element(element, duplicates)?;
        }
        debug!("built {} elements", mesh.elements.len());

        for value in records.values.iter() {
            let elem_idx = mesh.element_indices.get(&value.element_id).ok_or(
                ViewSpotError::DanglingElement {
                    element_id: value.element_id,
                },
            )?;
            mesh.elements[*elem_idx].value = value.value;
        }
        debug!("assigned {} values", records.values.len());

        Ok(mesh)
    }

    fn insert_node(
        &mut self,
        record: &NodeRecord,
        duplicates: DuplicatePolicy,
    ) -> Result<(), ViewSpotError> {
        let coords = Point::new(record.x, record.y);

        match self.node_indices.get(&record.id) {
            Some(node_idx) => {
                check_duplicate(duplicates, "Node", record.id)?;
                self.nodes[*node_idx].coords = coords;
            }
            None => {
                self.node_indices.insert(record.id, self.nodes.len());
                self.nodes.push(Node::new(record.id, coords));
            }
        }

        Ok(())
    }

    fn insert_element(
        &mut self,
        record: &ElementRecord,
        duplicates: DuplicatePolicy,
    ) -> Result<(), ViewSpotError> {
        let mut node_idxs = [0; 3];
        for (slot, node_id) in node_idxs.iter_mut().zip(record.nodes.iter()) {
            *slot = *self
                .node_indices
                .get(node_id)
                .ok_or(ViewSpotError::DanglingNode {
                    element_id: record.id,
                    node_id: *node_id,
                })?;
        }

        let elem_idx = match self.element_indices.get(&record.id) {
            Some(elem_idx) => {
                check_duplicate(duplicates, "Element", record.id)?;
                let elem_idx = *elem_idx;
                for node_idx in self.elements[elem_idx].nodes {
                    self.nodes[node_idx].disconnect_element(elem_idx);
                }
                self.elements[elem_idx] = Element::new(record.id, node_idxs);
                elem_idx
            }
            None => {
                let elem_idx = self.elements.len();
                self.element_indices.insert(record.id, elem_idx);
                self.elements.push(Element::new(record.id, node_idxs));
                elem_idx
            }
        };

        for node_idx in node_idxs {
            self.nodes[node_idx].connect_element(elem_idx);
        }

        Ok(())
    }

    // ----------------------------------------------------------------------------------------------------
    // General Data Retrieval
    // ----------------------------------------------------------------------------------------------------

    /// Look up a Node by its id
    pub fn node(&self, node_id: usize) -> Option<&Node> {
        self.node_indices.get(&node_id).map(|idx| &self.nodes[*idx])
    }

    /// Look up an Element by its id
    pub fn element(&self, element_id: usize) -> Option<&Element> {
        self.element_indices
            .get(&element_id)
            .map(|idx| &self.elements[*idx])
    }

    /// Position of an Element in `self.elements`
    pub fn element_index(&self, element_id: usize) -> Option<usize> {
        self.element_indices.get(&element_id).copied()
    }

    /// Get the three [Point]s composing an [`Element`] (by index)
    pub fn element_points(&self, elem_idx: usize) -> [&Point; 3] {
        self.elements[elem_idx]
            .nodes
            .map(|node_idx| &self.nodes[node_idx].coords)
    }

    /// Indices of every Element sharing at least one Node with the Element at `elem_idx`
    ///
    /// The Element itself is never included, and each neighbor appears once regardless of how many Nodes
    /// it shares. Indices are returned in ascending order.
    pub fn neighbors(&self, elem_idx: usize) -> Vec<usize> {
        let mut neighbors = BTreeSet::new();
        for node_idx in self.elements[elem_idx].nodes {
            neighbors.extend(self.nodes[node_idx].elements().iter().copied());
        }
        neighbors.remove(&elem_idx);
        neighbors.into_iter().collect()
    }

    /// Neighboring Elements of the Element with id `element_id`
    pub fn neighbors_of(&self, element_id: usize) -> Result<Vec<&Element>, ViewSpotError> {
        let elem_idx = self
            .element_index(element_id)
            .ok_or(ViewSpotError::UnknownElement(element_id))?;

        Ok(self
            .neighbors(elem_idx)
            .into_iter()
            .map(|n_idx| &self.elements[n_idx])
            .collect())
    }

    /// Produce a Json Object that describes the whole Mesh
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "nodes": JsonValue::from(self.nodes.iter().map(|node| node.to_json()).collect::<Vec<_>>()),
            "elements": JsonValue::from(self.elements.iter().map(|element| element.to_json()).collect::<Vec<_>>()),
        }
    }
}

fn check_duplicate(
    duplicates: DuplicatePolicy,
    kind: &'static str,
    id: usize,
) -> Result<(), ViewSpotError> {
    match duplicates {
        DuplicatePolicy::Overwrite => {
            warn!("{} id {} repeated; keeping the last definition", kind, id);
            Ok(())
        }
        DuplicatePolicy::Reject => Err(ViewSpotError::DuplicateId { kind, id }),
    }
}
