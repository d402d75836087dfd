use crate::resource::Release;
use crate::shader::InterfaceSlot;

use super::GeometryError;

/// Size of one vertex component in bytes (`f32`).
pub const FLOAT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// One float attribute slot inside an interleaved vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
    pub slot: u32,
    pub components: u32,
    /// Byte offset from the start of the vertex.
    pub offset: u64,
}

impl VertexAttribute {
    pub const fn new(slot: u32, components: u32, offset: u64) -> Self {
        Self {
            slot,
            components,
            offset,
        }
    }

    /// First byte past this attribute.
    pub fn end(self) -> u64 {
        self.offset + u64::from(self.components) * FLOAT_SIZE
    }

    pub fn format(self) -> Option<wgpu::VertexFormat> {
        match self.components {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}

/// Interleaved float vertex layout over a single buffer.
///
/// Stride and offsets must match how the vertex data was interleaved. A
/// mismatch that stays within the stride is not detectable here and shows up
/// as garbled geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    stride: u64,
    attributes: Vec<VertexAttribute>,
}

impl Release for VertexLayout {}

impl VertexLayout {
    /// An empty layout with the given byte stride.
    pub fn new(stride: u64) -> Self {
        Self {
            stride,
            attributes: Vec::new(),
        }
    }

    /// Packs attributes of the given component counts back to back.
    ///
    /// Slots are numbered from 0 in order; `[3]` is position-only (stride 12),
    /// `[3, 3]` is position + color (stride 24, offsets 0 and 12).
    pub fn interleaved(components: &[u32]) -> Self {
        let mut offset = 0;
        let mut attributes = Vec::with_capacity(components.len());
        for (slot, &count) in (0u32..).zip(components) {
            attributes.push(VertexAttribute::new(slot, count, offset));
            offset += u64::from(count) * FLOAT_SIZE;
        }
        Self {
            stride: offset,
            attributes,
        }
    }

    /// Sets the byte distance between consecutive vertices.
    pub fn set_stride(&mut self, stride: u64) {
        self.stride = stride;
    }

    /// Declares (or redeclares) one attribute slot.
    ///
    /// Returns `false` when the slot already had exactly this configuration,
    /// in which case nothing changes.
    pub fn configure(&mut self, attribute: VertexAttribute) -> bool {
        match self.attributes.iter_mut().find(|a| a.slot == attribute.slot) {
            Some(existing) if *existing == attribute => false,
            Some(existing) => {
                *existing = attribute;
                true
            }
            None => {
                let at = self
                    .attributes
                    .partition_point(|a| a.slot < attribute.slot);
                self.attributes.insert(at, attribute);
                true
            }
        }
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn floats_per_vertex(&self) -> u64 {
        self.stride / FLOAT_SIZE
    }

    /// Attributes ordered by slot.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, slot: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.slot == slot)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.stride == 0 || self.stride % FLOAT_SIZE != 0 {
            return Err(GeometryError::InvalidStride {
                stride: self.stride,
            });
        }
        for a in &self.attributes {
            if a.format().is_none() {
                return Err(GeometryError::UnsupportedComponents {
                    slot: a.slot,
                    components: a.components,
                });
            }
            if a.end() > self.stride {
                return Err(GeometryError::AttributeOutOfStride {
                    slot: a.slot,
                    end: a.end(),
                    stride: self.stride,
                });
            }
        }
        Ok(())
    }

    /// Checks that every vertex-stage input has a float attribute with at
    /// least as many components.
    pub fn check_inputs(&self, inputs: &[InterfaceSlot]) -> Result<(), String> {
        for input in inputs {
            let Some(attr) = self.attribute(input.location) else {
                return Err(format!(
                    "vertex input @location({}) {} has no attribute slot",
                    input.location, input.ty
                ));
            };
            if !input.ty.is_float() || attr.components < u32::from(input.ty.components) {
                return Err(format!(
                    "attribute slot {} ({} floats) cannot feed {}",
                    attr.slot, attr.components, input.ty
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .filter_map(|a| {
                Some(wgpu::VertexAttribute {
                    format: a.format()?,
                    offset: a.offset,
                    shader_location: a.slot,
                })
            })
            .collect()
    }
}
