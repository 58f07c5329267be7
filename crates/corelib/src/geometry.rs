use crate::Vec3;

/// Unit normal of the triangle `p0, p1, p2` (counter-clockwise = front).
///
/// Zero-area triangles give `Vec3::ZERO`.
#[inline]
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

/// Bit pattern of `v` with `-0.0` folded onto `0.0`, so equal values hash equal.
#[inline]
pub fn canonical_bits(v: f32) -> u32 {
    if v == 0.0 { 0 } else { v.to_bits() }
}
