//! Final stage: resolve normals, deduplicate, interleave into flat buffers.

use corelib::{LoadError, LoadResult};

use crate::dedup::{CornerSource, IndexedVertices, build_expanded, build_indexed};
use crate::mesh::{ObjBuffers, OutputVertex, VertexLayout};
use crate::normals::NormalTable;
use crate::obj::ParsedObj;
use crate::options::{LoadOptions, NormalSource};

/// Turn a parse result into GPU-ready buffers.
///
/// Fails with [`LoadError::Empty`] when no face survived parsing.
pub fn build_buffers(parsed: &ParsedObj, options: &LoadOptions) -> LoadResult<ObjBuffers> {
    let Some(mode) = parsed.mode.filter(|_| !parsed.faces.is_empty()) else {
        return Err(LoadError::Empty {
            faces: 0,
            vertices: parsed.positions.len(),
        });
    };

    let normals = match options.normal_source {
        NormalSource::Omit => NormalTable::None,
        NormalSource::FromFile if mode.has_normals() => NormalTable::File(&parsed.normals),
        NormalSource::FromFile | NormalSource::Synthesize => {
            NormalTable::synthesize(options.normal_policy, &parsed.positions, &parsed.faces)
        }
    };
    let layout = VertexLayout::new(!matches!(normals, NormalTable::None), mode.has_uv());

    let source = CornerSource {
        positions: &parsed.positions,
        texcoords: mode.has_uv().then_some(parsed.texcoords.as_slice()),
        normals: &normals,
    };
    let IndexedVertices { vertices, indices } = if options.emit_indexed {
        build_indexed(&parsed.faces, &source)?
    } else {
        build_expanded(&parsed.faces, &source)
    };

    if vertices.is_empty() {
        return Err(LoadError::Empty {
            faces: parsed.faces.len(),
            vertices: 0,
        });
    }

    Ok(assemble(&vertices, indices, layout))
}

/// Interleave `position[, normal][, uv]` per vertex. Absent attributes take
/// no space in the layout.
pub fn assemble(vertices: &[OutputVertex], indices: Option<Vec<u32>>, layout: VertexLayout) -> ObjBuffers {
    let mut vertex_buffer: Vec<f32> = Vec::with_capacity(layout.stride() * vertices.len());
    for v in vertices {
        vertex_buffer.extend_from_slice(&v.position);
        if layout.normal > 0 {
            vertex_buffer.extend_from_slice(&v.normal.unwrap_or_default());
        }
        if layout.uv > 0 {
            vertex_buffer.extend_from_slice(&v.uv.unwrap_or_default());
        }
    }

    let buffer_size_bytes = vertex_buffer.len() * size_of::<f32>();
    ObjBuffers {
        vertex_buffer,
        vertex_count: vertices.len(),
        index_count: indices.as_ref().map_or(0, Vec::len),
        index_buffer: indices,
        layout,
        buffer_size_bytes,
    }
}
