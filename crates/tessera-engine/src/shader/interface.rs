use std::fmt;

use naga::{Binding, BuiltIn, Handle, Interpolation, Module, Sampling, ScalarKind, Type, TypeInner};

/// Scalar or vector type carried through a `@location` slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SlotType {
    pub scalar: naga::Scalar,
    pub components: u8,
}

impl SlotType {
    pub const fn float(components: u8) -> Self {
        Self {
            scalar: naga::Scalar::F32,
            components,
        }
    }

    fn from_inner(inner: &TypeInner) -> Option<Self> {
        match *inner {
            TypeInner::Scalar(scalar) => Some(Self {
                scalar,
                components: 1,
            }),
            TypeInner::Vector { size, scalar } => Some(Self {
                scalar,
                components: size as u8,
            }),
            _ => None,
        }
    }

    pub fn is_float(self) -> bool {
        self.scalar.kind == ScalarKind::Float
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.scalar.kind {
            ScalarKind::Float => "f",
            ScalarKind::Sint => "i",
            ScalarKind::Uint => "u",
            other => return write!(f, "{other:?}"),
        };
        let bits = u32::from(self.scalar.width) * 8;
        if self.components == 1 {
            write!(f, "{prefix}{bits}")
        } else {
            write!(f, "vec{}<{prefix}{bits}>", self.components)
        }
    }
}

/// One user-defined `@location` input or output of an entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InterfaceSlot {
    pub location: u32,
    pub ty: SlotType,
    pub interpolation: Option<Interpolation>,
    pub sampling: Option<Sampling>,
}

impl InterfaceSlot {
    /// A slot with the qualifiers WGSL assigns when none are written:
    /// perspective/center for floats, flat for integers.
    pub fn new(location: u32, ty: SlotType) -> Self {
        let (interpolation, sampling) = match ty.scalar.kind {
            ScalarKind::Float => (Some(Interpolation::Perspective), Some(Sampling::Center)),
            ScalarKind::Sint | ScalarKind::Uint => (Some(Interpolation::Flat), None),
            _ => (None, None),
        };
        Self {
            location,
            ty,
            interpolation,
            sampling,
        }
    }

    /// Both ends of a varying agree on how it is interpolated.
    pub fn same_qualifiers(&self, other: &InterfaceSlot) -> bool {
        self.interpolation == other.interpolation && self.sampling == other.sampling
    }
}

/// The inputs and outputs of a single entry point, sorted by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageInterface {
    pub inputs: Vec<InterfaceSlot>,
    pub outputs: Vec<InterfaceSlot>,
    /// The stage writes `@builtin(position)`.
    pub writes_position: bool,
}

impl StageInterface {
    pub fn output(&self, location: u32) -> Option<&InterfaceSlot> {
        self.outputs.iter().find(|s| s.location == location)
    }
}

pub(crate) fn reflect(module: &Module, entry_point: &naga::EntryPoint) -> StageInterface {
    let function = &entry_point.function;
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut ignored = false;
    let mut writes_position = false;

    for arg in &function.arguments {
        collect(module, arg.ty, arg.binding.as_ref(), &mut inputs, &mut ignored);
    }
    if let Some(result) = &function.result {
        collect(
            module,
            result.ty,
            result.binding.as_ref(),
            &mut outputs,
            &mut writes_position,
        );
    }

    inputs.sort_by_key(|s| s.location);
    outputs.sort_by_key(|s| s.location);

    StageInterface {
        inputs,
        outputs,
        writes_position,
    }
}

fn collect(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    slots: &mut Vec<InterfaceSlot>,
    position: &mut bool,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(Binding::Location {
            location,
            interpolation,
            sampling,
            ..
        }) => {
            if let Some(ty) = SlotType::from_inner(inner) {
                slots.push(InterfaceSlot {
                    location: *location,
                    ty,
                    interpolation: *interpolation,
                    sampling: *sampling,
                });
            }
        }
        Some(Binding::BuiltIn(builtin)) => {
            if matches!(builtin, BuiltIn::Position { .. }) {
                *position = true;
            }
        }
        None => {
            // Entry-point structs carry the bindings on their members.
            if let TypeInner::Struct { members, .. } = inner {
                for member in members {
                    collect(module, member.ty, member.binding.as_ref(), slots, position);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflect_src(src: &str, stage: naga::ShaderStage) -> StageInterface {
        let module = naga::front::wgsl::parse_str(src).expect("test source parses");
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage)
            .expect("entry point present");
        reflect(&module, ep)
    }

    #[test]
    fn direct_arguments_and_builtin_result() {
        let iface = reflect_src(
            "@vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p, 1.0);
            }",
            naga::ShaderStage::Vertex,
        );
        assert_eq!(iface.inputs, vec![InterfaceSlot::new(0, SlotType::float(3))]);
        assert!(iface.outputs.is_empty());
        assert!(iface.writes_position);
    }

    #[test]
    fn struct_members_are_flattened_and_sorted() {
        let iface = reflect_src(
            "struct Out {
                @location(1) uv: vec2<f32>,
                @builtin(position) pos: vec4<f32>,
                @location(0) color: vec3<f32>,
            };
            @vertex fn vs_main(@location(0) p: vec3<f32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(p, 1.0);
                o.color = p;
                o.uv = p.xy;
                return o;
            }",
            naga::ShaderStage::Vertex,
        );
        let locations: Vec<u32> = iface.outputs.iter().map(|s| s.location).collect();
        assert_eq!(locations, vec![0, 1]);
        assert_eq!(iface.output(1).map(|s| s.ty), Some(SlotType::float(2)));
        assert!(iface.writes_position);
    }

    #[test]
    fn interpolation_qualifiers_are_reflected() {
        let iface = reflect_src(
            "struct Out {
                @builtin(position) pos: vec4<f32>,
                @location(0) @interpolate(flat) color: vec3<f32>,
                @location(1) uv: vec2<f32>,
            };
            @vertex fn vs_main(@location(0) p: vec3<f32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(p, 1.0);
                o.color = p;
                o.uv = p.xy;
                return o;
            }",
            naga::ShaderStage::Vertex,
        );
        let flat = iface.output(0).copied().expect("location 0");
        let smooth = iface.output(1).copied().expect("location 1");
        assert_eq!(flat.interpolation, Some(Interpolation::Flat));
        assert_eq!(smooth, InterfaceSlot::new(1, SlotType::float(2)));
        assert!(!flat.same_qualifiers(&InterfaceSlot::new(0, SlotType::float(3))));
    }

    #[test]
    fn slot_types_render_like_wgsl() {
        assert_eq!(SlotType::float(4).to_string(), "vec4<f32>");
        assert_eq!(SlotType::float(1).to_string(), "f32");
        let ivec = SlotType {
            scalar: naga::Scalar::I32,
            components: 2,
        };
        assert_eq!(ivec.to_string(), "vec2<i32>");
    }
}
