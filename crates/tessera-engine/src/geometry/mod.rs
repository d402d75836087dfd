//! Geometry uploader.
//!
//! CPU side:
//! - [`VertexLayout`] describes interleaved float attributes (slot, component count, byte offset)
//!   over one byte stride
//! - [`MeshData`] holds vertex floats and optional `u32` indices, validated against a layout
//! - [`DrawCall`] is the single draw the frame loop issues
//!
//! GPU side:
//! - [`VertexArray::begin`] opens a vertex array; buffers and attributes attach through the
//!   returned builder only, so configuration cannot land on another array
//! - [`upload`] performs the one-shot static upload of a mesh

mod error;
mod layout;
mod mesh;
mod upload;

pub use error::GeometryError;
pub use layout::{VertexAttribute, VertexLayout, FLOAT_SIZE};
pub use mesh::{DrawCall, MeshData};
pub use upload::{upload, BufferUsage, IndexBuffer, VertexArray, VertexArrayBuilder, VertexBuffer};
