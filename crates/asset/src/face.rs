//! `f` line parsing under a locked [`AttributeMode`].

use crate::mesh::{AttributeMode, Corner, Face};

/// Why a face line was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceReject {
    /// Wrong corner count or a corner that does not match the mode's grammar.
    Malformed,
    /// Some index is `<= 0` or past the end of its accumulator.
    OutOfBounds,
    /// No grammar exists for the mode (normals without texture coordinates).
    Unsupported,
}

/// Accumulator sizes at the time the face line is read.
#[derive(Clone, Copy, Debug)]
pub struct FaceBounds {
    pub positions: usize,
    pub texcoords: usize,
    /// `None` when normal payloads are not stored, which skips the check.
    pub normals: Option<usize>,
}

/// Parse the corner tokens of one face line (everything after `f`).
///
/// The face is accepted whole or not at all.
pub fn parse_face<'a, I>(tokens: I, mode: AttributeMode, bounds: FaceBounds) -> Result<Face, FaceReject>
where
    I: IntoIterator<Item = &'a str>,
{
    if !mode.is_supported() {
        return Err(FaceReject::Unsupported);
    }

    let mut raw = [[0i64; 3]; 3];
    let mut count = 0;
    for token in tokens {
        if count == 3 {
            return Err(FaceReject::Malformed);
        }
        raw[count] = parse_corner(token, mode).ok_or(FaceReject::Malformed)?;
        count += 1;
    }
    if count != 3 {
        return Err(FaceReject::Malformed);
    }

    let mut face = [Corner::new(0, None, None); 3];
    for (corner, [p, t, n]) in face.iter_mut().zip(raw) {
        let position = resolve(p, bounds.positions).ok_or(FaceReject::OutOfBounds)?;
        let uv = if mode.has_uv() {
            Some(resolve(t, bounds.texcoords).ok_or(FaceReject::OutOfBounds)?)
        } else {
            None
        };
        let normal = match (mode.has_normals(), bounds.normals) {
            (true, Some(len)) => Some(resolve(n, len).ok_or(FaceReject::OutOfBounds)?),
            _ => None,
        };
        *corner = Corner::new(position, uv, normal);
    }
    Ok(face)
}

/// `[position, uv, normal]` as written in the file; unused slots stay 0.
fn parse_corner(token: &str, mode: AttributeMode) -> Option<[i64; 3]> {
    let mut parts = token.split('/');
    let mut next = || parts.next().and_then(|s| s.parse::<i64>().ok());

    let corner = match mode {
        AttributeMode::PositionOnly => [next()?, 0, 0],
        AttributeMode::PositionUv => [next()?, next()?, 0],
        AttributeMode::PositionNormalUv => [next()?, next()?, next()?],
        AttributeMode::PositionNormal => return None,
    };
    // Trailing components belong to a different grammar.
    if parts.next().is_some() {
        return None;
    }
    Some(corner)
}

/// One-based file index to zero-based storage index.
#[inline]
fn resolve(raw: i64, len: usize) -> Option<usize> {
    let idx = usize::try_from(raw).ok()?;
    (1..=len).contains(&idx).then(|| idx - 1)
}
