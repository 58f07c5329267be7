//! Failure taxonomy for a single load call.
//!
//! Only conditions that abort the whole load live here. Bad lines and
//! out-of-range faces are recovered locally by the parser and counted
//! instead of being reported.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open OBJ file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read OBJ line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("OBJ produced no geometry ({faces} faces, {vertices} vertices)")]
    Empty { faces: usize, vertices: usize },

    #[error("too many output vertices for a u32 index buffer ({count})")]
    TooManyVertices { count: usize },
}

pub type LoadResult<T> = Result<T, LoadError>;
