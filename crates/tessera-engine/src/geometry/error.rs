use std::fmt;

use super::DrawCall;

/// Malformed vertex layout, mesh data or draw range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    InvalidStride { stride: u64 },
    UnsupportedComponents { slot: u32, components: u32 },
    AttributeOutOfStride { slot: u32, end: u64, stride: u64 },
    EmptyVertexData,
    RaggedVertexData { floats: usize, floats_per_vertex: u64 },
    IndexOutOfRange { index: u32, vertex_count: u32 },
    MissingIndexData,
    MissingVertexData,
    DrawOutOfRange { draw: DrawCall, available: u32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidStride { stride } => {
                write!(f, "vertex stride {stride} is not a positive multiple of 4 bytes")
            }
            GeometryError::UnsupportedComponents { slot, components } => {
                write!(f, "attribute slot {slot} has {components} components (expected 1..=4)")
            }
            GeometryError::AttributeOutOfStride { slot, end, stride } => {
                write!(f, "attribute slot {slot} ends at byte {end}, past the {stride}-byte stride")
            }
            GeometryError::EmptyVertexData => f.write_str("vertex data is empty"),
            GeometryError::RaggedVertexData {
                floats,
                floats_per_vertex,
            } => write!(
                f,
                "{floats} floats is not a whole number of {floats_per_vertex}-float vertices"
            ),
            GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(f, "index {index} out of range for {vertex_count} vertices"),
            GeometryError::MissingIndexData => f.write_str("indexed draw without index data"),
            GeometryError::MissingVertexData => f.write_str("vertex array has no vertex buffer"),
            GeometryError::DrawOutOfRange { draw, available } => {
                write!(f, "{draw:?} exceeds the {available} available elements")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
