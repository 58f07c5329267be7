//! Triangulated OBJ subset: `v`, `vt`, `vn` and three-corner `f` lines.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use corelib::{LoadError, LoadResult, Vec2, Vec3};

use crate::buffer::build_buffers;
use crate::face::{FaceBounds, FaceReject, parse_face};
use crate::mesh::{AttributeMode, Face, ObjBuffers};
use crate::options::LoadOptions;

/// Line counters gathered during one parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub faces: usize,
    pub malformed_lines: usize,
    pub out_of_bounds_faces: usize,
    pub unsupported_faces: usize,
}

impl ParseStats {
    pub fn skipped(&self) -> usize {
        self.malformed_lines + self.out_of_bounds_faces + self.unsupported_faces
    }
}

/// Everything one parse pass produced. Owned by a single load call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedObj {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    /// Stays empty unless `vn` payloads are stored.
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// `None` until the first `f` line is seen.
    pub mode: Option<AttributeMode>,
    pub stats: ParseStats,
}

/// Leading keyword of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind {
    Position,
    TexCoord,
    Normal,
    Face,
    Ignored,
}

impl LineKind {
    fn classify(head: &str) -> Self {
        match head {
            "v" => Self::Position,
            "vt" => Self::TexCoord,
            "vn" => Self::Normal,
            "f" => Self::Face,
            _ => Self::Ignored,
        }
    }
}

/// Load an OBJ file with default options.
pub fn load_object(path: impl AsRef<Path>) -> LoadResult<ObjBuffers> {
    load_object_with(path, LoadOptions::default())
}

/// Load an OBJ file from a path.
pub fn load_object_with(path: impl AsRef<Path>, options: LoadOptions) -> LoadResult<ObjBuffers> {
    let path = path.as_ref();
    log::info!("Loading OBJ from {:?}", path);

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_object_from_reader(BufReader::new(file), options)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_object_from_reader<R: BufRead>(reader: R, options: LoadOptions) -> LoadResult<ObjBuffers> {
    let parsed = parse_obj(reader, &options)?;
    let buffers = build_buffers(&parsed, &options)?;

    log::info!(
        "Loaded OBJ: mode={:?}, faces={}, vertices={}, indices={}, stride={} floats, skipped {} lines",
        parsed.mode,
        parsed.faces.len(),
        buffers.vertex_count,
        buffers.index_count,
        buffers.stride(),
        parsed.stats.skipped()
    );
    Ok(buffers)
}

/// Convenience helper to load an OBJ string literal.
pub fn load_object_from_str(contents: &str, options: LoadOptions) -> LoadResult<ObjBuffers> {
    load_object_from_reader(io::Cursor::new(contents), options)
}

/// Single pass over the file, filling the accumulators and the face list.
///
/// Bad lines, including undecodable bytes, are skipped and counted; only I/O
/// failures abort.
pub fn parse_obj<R: BufRead>(mut reader: R, options: &LoadOptions) -> LoadResult<ParsedObj> {
    let mut obj = ParsedObj::default();
    let mut seen_uv = false;
    let mut seen_normal = false;
    let mut buf: Vec<u8> = Vec::new();

    for line_no in 0.. {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|source| LoadError::Read {
            line: line_no + 1,
            source,
        })?;
        if read == 0 {
            break;
        }
        obj.stats.lines += 1;

        // Undecodable bytes become U+FFFD, so such lines are ignored or malformed.
        let line = String::from_utf8_lossy(&buf);

        let content = line.split('#').next().unwrap_or_default();
        let mut parts = content.split_whitespace();
        let Some(head) = parts.next() else {
            continue;
        };

        match LineKind::classify(head) {
            LineKind::Position => match parse_floats::<3>(parts) {
                Some(p) => obj.positions.push(Vec3::from_array(p)),
                None => obj.malformed(line_no, content),
            },
            LineKind::TexCoord => {
                seen_uv = true;
                match parse_floats::<2>(parts) {
                    Some(t) => obj.texcoords.push(Vec2::from_array(t)),
                    None => obj.malformed(line_no, content),
                }
            }
            LineKind::Normal => {
                seen_normal = true;
                if options.stores_file_normals() {
                    match parse_floats::<3>(parts) {
                        Some(n) => obj.normals.push(Vec3::from_array(n)),
                        None => obj.malformed(line_no, content),
                    }
                }
            }
            LineKind::Face => {
                let mode = *obj
                    .mode
                    .get_or_insert_with(|| AttributeMode::detect(seen_uv, seen_normal));
                let bounds = FaceBounds {
                    positions: obj.positions.len(),
                    texcoords: obj.texcoords.len(),
                    normals: options.stores_file_normals().then_some(obj.normals.len()),
                };
                match parse_face(parts, mode, bounds) {
                    Ok(face) => obj.faces.push(face),
                    Err(reject) => obj.rejected(line_no, content, reject),
                }
            }
            LineKind::Ignored => {
                // Comments, groups, materials and other directives.
            }
        }
    }

    obj.stats.positions = obj.positions.len();
    obj.stats.texcoords = obj.texcoords.len();
    obj.stats.normals = obj.normals.len();
    obj.stats.faces = obj.faces.len();
    Ok(obj)
}

impl ParsedObj {
    fn malformed(&mut self, line_no: usize, line: &str) {
        log::debug!("Skipping malformed OBJ line {}: '{}'", line_no + 1, line.trim());
        self.stats.malformed_lines += 1;
    }

    fn rejected(&mut self, line_no: usize, line: &str, reject: FaceReject) {
        match reject {
            FaceReject::Malformed => return self.malformed(line_no, line),
            FaceReject::OutOfBounds => self.stats.out_of_bounds_faces += 1,
            FaceReject::Unsupported => self.stats.unsupported_faces += 1,
        }
        log::debug!("Skipping OBJ face on line {} ({:?}): '{}'", line_no + 1, reject, line.trim());
    }
}

/// First `N` tokens as floats; extra tokens are ignored.
fn parse_floats<'a, const N: usize>(mut parts: impl Iterator<Item = &'a str>) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        *slot = parts.next()?.parse::<f32>().ok()?;
    }
    Some(out)
}
