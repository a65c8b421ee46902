use crate::mesh::Mesh;

use json::{object, JsonValue};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;

/// true if no neighbor of the Element at `elem_idx` has a strictly greater value
///
/// Neighbors with an equal value do not disqualify an Element, so every member of a plateau is a local maximum.
pub fn is_local_maximum(mesh: &Mesh, elem_idx: usize) -> bool {
    let value = mesh.elements[elem_idx].value;
    mesh.neighbors(elem_idx)
        .into_iter()
        .all(|n_idx| mesh.elements[n_idx].value <= value)
}

/// A local maximum of the Mesh's scalar field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSpot {
    pub element_id: usize,
    pub value: f64,
}

impl From<ViewSpot> for JsonValue {
    fn from(vs: ViewSpot) -> Self {
        object! {
            "element_id": vs.element_id,
            "value": vs.value,
        }
    }
}

impl fmt::Display for ViewSpot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Element {}: {}", self.element_id, self.value)
    }
}

/// Every local maximum of a Mesh, ranked by descending value
///
/// Maxima with equal values keep the order their Elements were listed in the mesh file.
#[derive(Debug, Clone, Default)]
pub struct ViewSpots {
    spots: Vec<ViewSpot>,
}

impl ViewSpots {
    /// Classify every Element of the `mesh` and rank the local maxima
    ///
    /// Elements are classified in parallel; the Mesh is only read.
    pub fn find(mesh: &Mesh) -> Self {
        let mut spots: Vec<ViewSpot> = (0..mesh.elements.len())
            .into_par_iter()
            .filter(|elem_idx| is_local_maximum(mesh, *elem_idx))
            .map(|elem_idx| ViewSpot {
                element_id: mesh.elements[elem_idx].id,
                value: mesh.elements[elem_idx].value,
            })
            .collect();

        // stable: ties stay in Element order
        spots.sort_by(|a, b| b.value.total_cmp(&a.value));

        Self { spots }
    }

    /// The `n` highest ranked view spots (or all of them if there are fewer than `n`)
    pub fn take(&self, n: usize) -> &[ViewSpot] {
        &self.spots[..n.min(self.spots.len())]
    }

    /// All view spots in ranked order
    pub fn all(&self) -> &[ViewSpot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// The ids of every Element that is a local maximum
    pub fn element_ids(&self) -> BTreeSet<usize> {
        self.spots.iter().map(|vs| vs.element_id).collect()
    }

    /// Json Array describing the `n` highest ranked view spots
    pub fn to_json(&self, n: usize) -> JsonValue {
        JsonValue::from(self.take(n).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{DuplicatePolicy, ElementRecord, MeshRecords, NodeRecord, ValueRecord};

    fn mesh_with(elements: Vec<[usize; 3]>, values: Vec<f64>) -> Mesh {
        let num_nodes = elements.iter().flatten().max().map_or(0, |max| max + 1);
        let records = MeshRecords {
            nodes: (0..num_nodes)
                .map(|id| NodeRecord {
                    id,
                    x: id as f64,
                    y: (id % 2) as f64,
                })
                .collect(),
            elements: elements
                .into_iter()
                .enumerate()
                .map(|(id, nodes)| ElementRecord { id, nodes })
                .collect(),
            values: values
                .into_iter()
                .enumerate()
                .map(|(element_id, value)| ValueRecord { element_id, value })
                .collect(),
        };
        Mesh::from_records(&records, DuplicatePolicy::Reject).unwrap()
    }

    #[test]
    fn coincident_elements() {
        let mesh = mesh_with(vec![[0, 1, 2], [0, 1, 2]], vec![1.0, 2.0]);
        let vs = ViewSpots::find(&mesh);

        assert!(!is_local_maximum(&mesh, 0));
        assert!(is_local_maximum(&mesh, 1));
        assert_eq!(vs.all(), &[ViewSpot { element_id: 1, value: 2.0 }]);
    }

    #[test]
    fn path_of_three() {
        // A-B share nodes 1, 2; B-C share nodes 2, 3; A and C are disjoint
        let mesh = mesh_with(vec![[0, 1, 2], [1, 2, 3], [3, 4, 5]], vec![1.0, 3.0, 2.0]);
        assert_eq!(mesh.neighbors(0), vec![1]);
        assert_eq!(mesh.neighbors(2), vec![1]);

        let vs = ViewSpots::find(&mesh);
        assert_eq!(vs.element_ids(), BTreeSet::from([1]));
    }

    #[test]
    fn ties_do_not_disqualify() {
        let mesh = mesh_with(vec![[0, 1, 2], [1, 2, 3], [3, 4, 5]], vec![2.0, 2.0, 1.0]);
        let vs = ViewSpots::find(&mesh);

        // equal values keep their Element order
        assert_eq!(
            vs.all(),
            &[
                ViewSpot { element_id: 0, value: 2.0 },
                ViewSpot { element_id: 1, value: 2.0 },
            ]
        );
    }

    #[test]
    fn isolated_element_is_maximum() {
        let mesh = mesh_with(vec![[0, 1, 2]], vec![-5.0]);
        assert_eq!(ViewSpots::find(&mesh).len(), 1);
    }

    #[test]
    fn grid_mesh() {
        let mesh =
            Mesh::from_file("./test_input/grid_mesh.json", DuplicatePolicy::Reject).unwrap();
        let vs = ViewSpots::find(&mesh);

        let ranked: Vec<usize> = vs.all().iter().map(|vs| vs.element_id).collect();
        assert_eq!(ranked, vec![10, 7, 22]);

        // the predicate agrees with a direct comparison against every neighbor
        for (elem_idx, element) in mesh.elements.iter().enumerate() {
            let dominated = mesh
                .neighbors(elem_idx)
                .iter()
                .any(|n| mesh.elements[*n].value > element.value);
            assert_eq!(is_local_maximum(&mesh, elem_idx), !dominated);
            assert_eq!(vs.element_ids().contains(&element.id), !dominated);
        }

        for pair in vs.all().windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn truncation() {
        let mesh =
            Mesh::from_file("./test_input/grid_mesh.json", DuplicatePolicy::Reject).unwrap();
        let vs = ViewSpots::find(&mesh);

        assert!(vs.take(0).is_empty());
        assert_eq!(vs.take(2), &vs.all()[..2]);
        assert_eq!(vs.take(3).len(), 3);
        assert_eq!(vs.take(100).len(), 3);
    }

    #[test]
    fn view_spots_to_json() {
        let mesh = mesh_with(vec![[0, 1, 2], [3, 4, 5]], vec![0.5, 1.5]);
        let json = ViewSpots::find(&mesh).to_json(5);

        assert_eq!(json.len(), 2);
        assert_eq!(json[0]["element_id"].as_usize(), Some(1));
        assert_eq!(json[1]["value"].as_f64(), Some(0.5));
    }
}
