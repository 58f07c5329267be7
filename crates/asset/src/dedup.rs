//! Vertex deduplication and index generation.

use std::collections::HashMap;

use corelib::{LoadError, LoadResult, Vec2, Vec3, geometry::canonical_bits};

use crate::mesh::{Face, OutputVertex};
use crate::normals::NormalTable;

/// Unique vertices plus one index per face corner (`None` when not indexed).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedVertices {
    pub vertices: Vec<OutputVertex>,
    pub indices: Option<Vec<u32>>,
}

/// Hashable value identity of an [`OutputVertex`]: position, normal, uv bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct VertexKey([u32; 8]);

impl From<&OutputVertex> for VertexKey {
    fn from(v: &OutputVertex) -> Self {
        let [px, py, pz] = v.position;
        let [nx, ny, nz] = v.normal.unwrap_or_default();
        let [u, w] = v.uv.unwrap_or_default();
        Self([px, py, pz, nx, ny, nz, u, w].map(canonical_bits))
    }
}

/// Borrowed attribute data the corners are resolved against.
pub struct CornerSource<'a> {
    pub positions: &'a [Vec3],
    /// `None` when the layout has no texture coordinates.
    pub texcoords: Option<&'a [Vec2]>,
    pub normals: &'a NormalTable<'a>,
}

impl CornerSource<'_> {
    fn resolve(&self, face_idx: usize, face: &Face) -> [OutputVertex; 3] {
        face.map(|corner| {
            let position = self.positions[corner.position].to_array();
            let normal = self.normals.lookup(face_idx, &corner).map(|n| n.to_array());
            let uv = self
                .texcoords
                .and_then(|uvs| corner.uv.and_then(|i| uvs.get(i)))
                .map(|uv| uv.to_array());
            OutputVertex::new(position, normal, uv)
        })
    }
}

/// Merge corners with identical attribute values into one vertex each, in
/// order of first appearance, and emit an index per corner.
pub fn build_indexed(faces: &[Face], source: &CornerSource<'_>) -> LoadResult<IndexedVertices> {
    let mut unique: HashMap<VertexKey, u32> = HashMap::new();
    let mut vertices: Vec<OutputVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::with_capacity(faces.len() * 3);

    for (face_idx, face) in faces.iter().enumerate() {
        for vertex in source.resolve(face_idx, face) {
            let index = match unique.get(&VertexKey::from(&vertex)) {
                Some(&idx) => idx,
                None => {
                    let idx = u32::try_from(vertices.len()).map_err(|_| LoadError::TooManyVertices {
                        count: vertices.len() + 1,
                    })?;
                    unique.insert(VertexKey::from(&vertex), idx);
                    vertices.push(vertex);
                    idx
                }
            };
            indices.push(index);
        }
    }

    Ok(IndexedVertices {
        vertices,
        indices: Some(indices),
    })
}

/// One vertex per corner, no index buffer.
pub fn build_expanded(faces: &[Face], source: &CornerSource<'_>) -> IndexedVertices {
    let vertices = faces
        .iter()
        .enumerate()
        .flat_map(|(face_idx, face)| source.resolve(face_idx, face))
        .collect();
    IndexedVertices {
        vertices,
        indices: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Corner;

    fn face(a: usize, b: usize, c: usize) -> Face {
        [a, b, c].map(|p| Corner::new(p, None, None))
    }

    fn quad() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y]
    }

    #[test]
    fn shared_edge_reuses_indices() {
        let positions = quad();
        let source = CornerSource {
            positions: &positions,
            texcoords: None,
            normals: &NormalTable::None,
        };
        let out = build_indexed(&[face(0, 1, 2), face(0, 2, 3)], &source).unwrap();
        assert_eq!(out.vertices.len(), 4);
        assert_eq!(out.indices, Some(vec![0, 1, 2, 0, 2, 3]));
    }

    #[test]
    fn equal_values_merge_even_from_distinct_slots() {
        // Position 3 duplicates position 0 by value.
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(0.0, -0.0, 0.0)];
        let source = CornerSource {
            positions: &positions,
            texcoords: None,
            normals: &NormalTable::None,
        };
        let out = build_indexed(&[face(3, 1, 2)], &source).unwrap();
        assert_eq!(out.vertices.len(), 3);

        let out = build_indexed(&[face(0, 1, 2), face(3, 2, 1)], &source).unwrap();
        assert_eq!(out.vertices.len(), 3);
        assert_eq!(out.indices, Some(vec![0, 1, 2, 0, 2, 1]));
    }

    #[test]
    fn differing_uv_splits_a_position() {
        let positions = quad();
        let uvs = vec![Vec2::ZERO, Vec2::ONE];
        let faces = [
            [Corner::new(0, Some(0), None), Corner::new(1, Some(0), None), Corner::new(2, Some(0), None)],
            [Corner::new(0, Some(1), None), Corner::new(2, Some(0), None), Corner::new(3, Some(0), None)],
        ];
        let source = CornerSource {
            positions: &positions,
            texcoords: Some(uvs.as_slice()),
            normals: &NormalTable::None,
        };
        let out = build_indexed(&faces, &source).unwrap();
        assert_eq!(out.vertices.len(), 5);
        assert_eq!(out.indices, Some(vec![0, 1, 2, 3, 2, 4]));
        assert_eq!(out.vertices[3].uv, Some([1.0, 1.0]));
    }

    #[test]
    fn differing_normals_split_a_position() {
        let positions = quad();
        let normals = NormalTable::PerFace(vec![Vec3::Z, Vec3::NEG_Z]);
        let source = CornerSource {
            positions: &positions,
            texcoords: None,
            normals: &normals,
        };
        let out = build_indexed(&[face(0, 1, 2), face(0, 2, 3)], &source).unwrap();
        assert_eq!(out.vertices.len(), 6);
        assert_eq!(out.vertices[4].normal, Some([0.0, 0.0, -1.0]));
    }

    #[test]
    fn expanded_keeps_every_corner() {
        let positions = quad();
        let source = CornerSource {
            positions: &positions,
            texcoords: None,
            normals: &NormalTable::None,
        };
        let out = build_expanded(&[face(0, 1, 2), face(0, 2, 3)], &source);
        assert_eq!(out.vertices.len(), 6);
        assert_eq!(out.indices, None);
        assert_eq!(out.vertices[3].position, [0.0, 0.0, 0.0]);
        assert_eq!(out.vertices[5].position, [0.0, 1.0, 0.0]);
    }
}
