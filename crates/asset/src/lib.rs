//! OBJ loading into GPU-ready buffers.
//! Parse -> normals -> dedup/index -> interleave, one pass per call.

pub mod buffer;
pub mod dedup;
pub mod face;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod options;

pub use mesh::{AttributeMode, ObjBuffers, VertexLayout};
pub use obj::{
    ParseStats, ParsedObj, load_object, load_object_from_reader, load_object_from_str,
    load_object_with, parse_obj,
};
pub use options::{LoadOptions, NormalPolicy, NormalSource};

pub use corelib::{LoadError, LoadResult};
