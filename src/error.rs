use thiserror::Error;

/// The Error Type for loading a Mesh and searching it for view spots
#[derive(Debug, Error)]
pub enum ViewSpotError {
    /// A collection that must have at least one entry was empty
    #[error("No {0} found; Cannot continue!")]
    EmptyInput(&'static str),
    /// A Node or Element id was repeated (only raised with `DuplicatePolicy::Reject`)
    #[error("{kind} id {id} appears more than once in the mesh!")]
    DuplicateId { kind: &'static str, id: usize },
    /// An Element references a Node that isn't in the mesh
    #[error("Element {element_id} references Node {node_id}, which does not exist!")]
    DanglingNode { element_id: usize, node_id: usize },
    /// A value record references an Element that isn't in the mesh
    #[error("Value assigned to Element {element_id}, which does not exist!")]
    DanglingElement { element_id: usize },
    /// An Element id was requested that isn't in the mesh
    #[error("Element {0} does not exist!")]
    UnknownElement(usize),
    /// The mesh document could not be parsed or is missing required fields
    #[error("Malformed mesh input: {0}")]
    MalformedInput(String),
    /// A caller supplied parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<json::Error> for ViewSpotError {
    fn from(err: json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
