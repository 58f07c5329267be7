//! CPU-side mesh representation shared by the loader stages.

use bytemuck::cast_slice;

/// Which attributes the face lines of a file carry. Locked on the first `f` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeMode {
    PositionOnly,
    PositionUv,
    /// Normals without texture coordinates: no face grammar covers it.
    PositionNormal,
    PositionNormalUv,
}

impl AttributeMode {
    pub fn detect(seen_uv: bool, seen_normal: bool) -> Self {
        match (seen_uv, seen_normal) {
            (false, false) => Self::PositionOnly,
            (true, false) => Self::PositionUv,
            (false, true) => Self::PositionNormal,
            (true, true) => Self::PositionNormalUv,
        }
    }

    #[inline]
    pub fn has_uv(self) -> bool {
        matches!(self, Self::PositionUv | Self::PositionNormalUv)
    }

    #[inline]
    pub fn has_normals(self) -> bool {
        matches!(self, Self::PositionNormal | Self::PositionNormalUv)
    }

    #[inline]
    pub fn is_supported(self) -> bool {
        self != Self::PositionNormal
    }
}

/// One face corner as zero-based indices into the accumulators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

impl Corner {
    pub fn new(position: usize, uv: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// Triangular face.
pub type Face = [Corner; 3];

/// Vertex with resolved attribute values. Absent attributes stay `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OutputVertex {
    pub position: [f32; 3],
    pub normal: Option<[f32; 3]>,
    pub uv: Option<[f32; 2]>,
}

impl OutputVertex {
    pub fn new(position: [f32; 3], normal: Option<[f32; 3]>, uv: Option<[f32; 2]>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Per-attribute float counts of one interleaved vertex record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VertexLayout {
    pub position: usize,
    pub normal: usize,
    pub uv: usize,
}

impl VertexLayout {
    pub fn new(has_normals: bool, has_uv: bool) -> Self {
        Self {
            position: 3,
            normal: if has_normals { 3 } else { 0 },
            uv: if has_uv { 2 } else { 0 },
        }
    }

    /// Floats per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.position + self.normal + self.uv
    }

    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.stride() * size_of::<f32>()
    }
}

/// GPU-ready result of one load: interleaved `position[, normal][, uv]` floats
/// plus an optional index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjBuffers {
    pub vertex_buffer: Vec<f32>,
    pub vertex_count: usize,
    pub index_buffer: Option<Vec<u32>>,
    pub index_count: usize,
    pub layout: VertexLayout,
    pub buffer_size_bytes: usize,
}

impl ObjBuffers {
    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    /// Floats of vertex `i`, or `None` past the end.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let stride = self.stride();
        self.vertex_buffer.get(i * stride..(i + 1) * stride)
    }

    /// Triangles described by the buffers, indexed or not.
    pub fn triangle_count(&self) -> usize {
        match &self.index_buffer {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count / 3,
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        cast_slice(&self.vertex_buffer)
    }

    /// Empty when the buffers are not indexed.
    pub fn index_bytes(&self) -> &[u8] {
        self.index_buffer.as_deref().map(cast_slice::<u32, u8>).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_detection_covers_all_flags() {
        assert_eq!(AttributeMode::detect(false, false), AttributeMode::PositionOnly);
        assert_eq!(AttributeMode::detect(true, false), AttributeMode::PositionUv);
        assert_eq!(AttributeMode::detect(false, true), AttributeMode::PositionNormal);
        assert_eq!(AttributeMode::detect(true, true), AttributeMode::PositionNormalUv);
        assert!(!AttributeMode::PositionNormal.is_supported());
        assert!(AttributeMode::PositionNormalUv.has_uv());
        assert!(!AttributeMode::PositionUv.has_normals());
    }

    #[test]
    fn layout_strides() {
        assert_eq!(VertexLayout::new(false, false).stride(), 3);
        assert_eq!(VertexLayout::new(true, false).stride(), 6);
        assert_eq!(VertexLayout::new(false, true).stride(), 5);
        assert_eq!(VertexLayout::new(true, true).stride(), 8);
        assert_eq!(VertexLayout::new(true, true).stride_bytes(), 32);
    }

    #[test]
    fn buffer_accessors() {
        let buffers = ObjBuffers {
            vertex_buffer: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            vertex_count: 3,
            index_buffer: Some(vec![0, 1, 2]),
            index_count: 3,
            layout: VertexLayout::new(false, false),
            buffer_size_bytes: 36,
        };
        assert_eq!(buffers.vertex(1), Some(&[3.0, 4.0, 5.0][..]));
        assert_eq!(buffers.vertex(3), None);
        assert_eq!(buffers.triangle_count(), 1);
        assert_eq!(buffers.vertex_bytes().len(), buffers.buffer_size_bytes);
        assert_eq!(buffers.index_bytes().len(), 12);
    }

    #[test]
    fn unindexed_buffers_have_no_index_bytes() {
        let buffers = ObjBuffers {
            vertex_buffer: vec![0.0; 9],
            vertex_count: 3,
            layout: VertexLayout::new(false, false),
            buffer_size_bytes: 36,
            ..Default::default()
        };
        assert!(buffers.index_bytes().is_empty());
        assert_eq!(buffers.triangle_count(), 1);
    }
}
