use wgpu::util::DeviceExt;

use crate::resource::{ResourceKind, ResourceLedger, Scoped};

use super::{GeometryError, MeshData, VertexAttribute, VertexLayout, FLOAT_SIZE};

/// Update policy of an uploaded buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    /// Written once at creation, never updated or resized.
    Static,
}

/// GPU storage of interleaved vertex floats.
pub struct VertexBuffer {
    buffer: Scoped<wgpu::Buffer>,
    size: u64,
    usage: BufferUsage,
}

impl VertexBuffer {
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }
}

/// GPU storage of `u32` triangle indices.
pub struct IndexBuffer {
    buffer: Scoped<wgpu::Buffer>,
    count: u32,
}

impl IndexBuffer {
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A vertex layout bound to its vertex buffer and optional index buffer.
pub struct VertexArray {
    label: &'static str,
    layout: Scoped<VertexLayout>,
    vertex: VertexBuffer,
    index: Option<IndexBuffer>,
}

impl VertexArray {
    /// Opens a new vertex array. Everything attached through the returned
    /// builder applies to this array only.
    pub fn begin<'d>(
        device: &'d wgpu::Device,
        label: &'static str,
        ledger: &ResourceLedger,
    ) -> VertexArrayBuilder<'d> {
        VertexArrayBuilder {
            device,
            label,
            ledger: ledger.clone(),
            layout: Scoped::new(VertexLayout::default(), ResourceKind::VertexArray, ledger),
            vertex: None,
            index: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index.as_ref()
    }

    pub fn vertex_count(&self) -> u32 {
        (self.vertex.size / self.layout.stride()) as u32
    }

    /// Layout descriptor for pipeline creation.
    pub(crate) fn with_buffer_layout<R>(
        &self,
        f: impl FnOnce(wgpu::VertexBufferLayout<'_>) -> R,
    ) -> R {
        let attributes = self.layout.wgpu_attributes();
        f(wgpu::VertexBufferLayout {
            array_stride: self.layout.stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        })
    }
}

/// Configuration scope of one [`VertexArray`].
pub struct VertexArrayBuilder<'d> {
    device: &'d wgpu::Device,
    label: &'static str,
    ledger: ResourceLedger,
    layout: Scoped<VertexLayout>,
    vertex: Option<VertexBuffer>,
    index: Option<IndexBuffer>,
}

impl<'d> VertexArrayBuilder<'d> {
    /// Uploads vertex floats into a static vertex buffer.
    pub fn vertex_data(mut self, floats: &[f32]) -> Self {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(self.label),
                contents: bytemuck::cast_slice(floats),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.vertex = Some(VertexBuffer {
            buffer: Scoped::new(buffer, ResourceKind::VertexBuffer, &self.ledger),
            size: floats.len() as u64 * FLOAT_SIZE,
            usage: BufferUsage::Static,
        });
        self
    }

    /// Uploads triangle indices into a static index buffer.
    pub fn index_data(mut self, indices: &[u32]) -> Self {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(self.label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.index = Some(IndexBuffer {
            buffer: Scoped::new(buffer, ResourceKind::IndexBuffer, &self.ledger),
            count: indices.len() as u32,
        });
        self
    }

    pub fn stride(mut self, bytes: u64) -> Self {
        self.layout.set_stride(bytes);
        self
    }

    pub fn attribute(mut self, attribute: VertexAttribute) -> Self {
        if !self.layout.configure(attribute) {
            log::trace!("slot {} already configured identically", attribute.slot);
        }
        self
    }

    pub fn finish(self) -> Result<VertexArray, GeometryError> {
        self.layout.validate()?;
        let vertex = self.vertex.ok_or(GeometryError::MissingVertexData)?;
        if vertex.size == 0 {
            return Err(GeometryError::EmptyVertexData);
        }
        if vertex.size % self.layout.stride() != 0 {
            return Err(GeometryError::RaggedVertexData {
                floats: (vertex.size / FLOAT_SIZE) as usize,
                floats_per_vertex: self.layout.floats_per_vertex(),
            });
        }

        Ok(VertexArray {
            label: self.label,
            layout: self.layout,
            vertex,
            index: self.index,
        })
    }
}

/// Uploads `mesh` with `layout` as one static vertex array.
pub fn upload(
    device: &wgpu::Device,
    label: &'static str,
    mesh: &MeshData,
    layout: &VertexLayout,
    ledger: &ResourceLedger,
) -> Result<VertexArray, GeometryError> {
    let mut builder = VertexArray::begin(device, label, ledger)
        .stride(layout.stride())
        .vertex_data(mesh.vertices());

    if let Some(indices) = mesh.indices() {
        builder = builder.index_data(indices);
    }
    for attribute in layout.attributes() {
        builder = builder.attribute(*attribute);
    }

    let vao = builder.finish()?;
    log::debug!(
        "uploaded `{label}`: {} vertices ({} bytes), {} indices",
        vao.vertex_count(),
        vao.vertex.size,
        vao.index.as_ref().map_or(0, |i| i.count),
    );
    Ok(vao)
}
