//! Normal resolution: file normals, or normals synthesized from face geometry.

use std::collections::HashMap;

use corelib::{
    Vec3,
    geometry::{canonical_bits, face_normal},
};

use crate::mesh::{Corner, Face};
use crate::options::NormalPolicy;

/// Where each corner's normal is looked up.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalTable<'a> {
    /// Layout has no normals.
    None,
    /// Indexed by the corner's `vn` reference.
    File(&'a [Vec3]),
    /// Indexed by the corner's position.
    PerPosition(Vec<Vec3>),
    /// Indexed by face.
    PerFace(Vec<Vec3>),
}

impl NormalTable<'_> {
    pub fn synthesize(policy: NormalPolicy, positions: &[Vec3], faces: &[Face]) -> Self {
        match policy {
            NormalPolicy::Averaged => Self::PerPosition(averaged_normals(positions, faces)),
            NormalPolicy::Flat => Self::PerFace(flat_normals(positions, faces)),
        }
    }

    /// Normal for `corner` of face number `face`.
    pub fn lookup(&self, face: usize, corner: &Corner) -> Option<Vec3> {
        match self {
            Self::None => None,
            Self::File(normals) => corner.normal.and_then(|n| normals.get(n).copied()),
            Self::PerPosition(normals) => normals.get(corner.position).copied(),
            Self::PerFace(normals) => normals.get(face).copied(),
        }
    }
}

fn face_geometry_normal(positions: &[Vec3], face: &Face) -> Vec3 {
    let [a, b, c] = face.map(|corner| positions[corner.position]);
    face_normal(a, b, c)
}

/// Smooth normals: every adjacent face adds its unit normal once to each of
/// its positions, then each sum is normalized. Slots holding the same
/// coordinates share one sum, so value-equal positions get the same normal.
/// Unreferenced positions stay zero.
pub fn averaged_normals(positions: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut groups: HashMap<[u32; 3], usize> = HashMap::new();
    let slot_group: Vec<usize> = positions
        .iter()
        .map(|p| {
            let key = p.to_array().map(canonical_bits);
            let next = groups.len();
            *groups.entry(key).or_insert(next)
        })
        .collect();

    let mut sums = vec![Vec3::ZERO; groups.len()];
    for face in faces {
        let n = face_geometry_normal(positions, face);
        for corner in face {
            sums[slot_group[corner.position]] += n;
        }
    }
    for sum in &mut sums {
        *sum = sum.normalize_or_zero();
    }
    slot_group.into_iter().map(|g| sums[g]).collect()
}

/// Faceted normals: one per face, shared by its three corners.
pub fn flat_normals(positions: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|face| face_geometry_normal(positions, face))
        .collect()
}
