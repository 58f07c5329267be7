//! Core types: math re-exports, face geometry, load errors.

pub use glam::{Vec2, Vec3};

pub mod error;
pub mod geometry;

pub use error::{LoadError, LoadResult};
