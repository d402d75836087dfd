use super::{GeometryError, VertexLayout, FLOAT_SIZE};

/// The one draw issued per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawCall {
    /// Draws `count` vertices in buffer order starting at `first`.
    Arrays { first: u32, count: u32 },
    /// Draws the first `count` indices of the index buffer.
    Indexed { count: u32 },
}

impl DrawCall {
    /// Validates the draw range against the mesh it will read.
    pub fn validate(&self, mesh: &MeshData) -> Result<(), GeometryError> {
        let (end, available) = match *self {
            DrawCall::Arrays { first, count } => {
                (u64::from(first) + u64::from(count), mesh.vertex_count())
            }
            DrawCall::Indexed { count } => {
                let indices = mesh.indices().ok_or(GeometryError::MissingIndexData)?;
                (u64::from(count), indices.len() as u32)
            }
        };
        if end > u64::from(available) {
            return Err(GeometryError::DrawOutOfRange {
                draw: *self,
                available,
            });
        }
        Ok(())
    }
}

/// Vertex floats (interleaved per a [`VertexLayout`]) and optional indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
    floats_per_vertex: u64,
}

impl MeshData {
    /// Validates that `vertices` is a whole number of vertices of `layout`.
    pub fn new(vertices: Vec<f32>, layout: &VertexLayout) -> Result<Self, GeometryError> {
        layout.validate()?;
        if vertices.is_empty() {
            return Err(GeometryError::EmptyVertexData);
        }
        let floats_per_vertex = layout.floats_per_vertex();
        if vertices.len() as u64 % floats_per_vertex != 0 {
            return Err(GeometryError::RaggedVertexData {
                floats: vertices.len(),
                floats_per_vertex,
            });
        }
        Ok(Self {
            vertices,
            indices: None,
            floats_per_vertex,
        })
    }

    /// Attaches triangle indices; each must address an existing vertex.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Result<Self, GeometryError> {
        let vertex_count = self.vertex_count();
        if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        self.indices = Some(indices);
        Ok(self)
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> u32 {
        (self.vertices.len() as u64 / self.floats_per_vertex) as u32
    }

    pub fn floats_per_vertex(&self) -> u64 {
        self.floats_per_vertex
    }

    /// Size of the vertex buffer this mesh uploads to.
    pub fn vertex_bytes(&self) -> u64 {
        self.vertices.len() as u64 * FLOAT_SIZE
    }
}
