//! Load-time configuration.

/// Where output normals come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalSource {
    /// Store `vn` payloads and use them when the file has any; synthesize otherwise.
    #[default]
    FromFile,
    /// Only record that `vn` lines exist; always synthesize from geometry.
    Synthesize,
    /// Leave normals out of the vertex layout entirely.
    Omit,
}

/// How synthesized normals are built from face geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalPolicy {
    /// Sum face normals per shared position, normalize once (smooth shading).
    #[default]
    Averaged,
    /// One normal per face, copied to its three corners (faceted shading).
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub normal_source: NormalSource,
    pub normal_policy: NormalPolicy,
    /// Deduplicate vertices and emit an index buffer. When `false` every
    /// face corner becomes its own vertex and no index buffer is produced.
    pub emit_indexed: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normal_source: NormalSource::default(),
            normal_policy: NormalPolicy::default(),
            emit_indexed: true,
        }
    }
}

impl LoadOptions {
    pub fn with_normal_source(mut self, source: NormalSource) -> Self {
        self.normal_source = source;
        self
    }

    pub fn with_normal_policy(mut self, policy: NormalPolicy) -> Self {
        self.normal_policy = policy;
        self
    }

    pub fn with_indexed(mut self, emit_indexed: bool) -> Self {
        self.emit_indexed = emit_indexed;
        self
    }

    /// `vn` payloads are kept only when they can end up in the output.
    #[inline]
    pub fn stores_file_normals(&self) -> bool {
        self.normal_source == NormalSource::FromFile
    }
}
