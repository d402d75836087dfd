use crate::error::PipelineError;

use super::compile::ShaderObject;
use super::info_log;
use super::interface::InterfaceSlot;
use super::source::ShaderStage;

/// Source and entry point of one linked stage, kept for GPU module creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StageModule {
    pub label: &'static str,
    pub entry_point: &'static str,
    pub text: &'static str,
}

impl StageModule {
    fn from_object(obj: &ShaderObject) -> Self {
        let source = obj.source();
        Self {
            label: source.label,
            entry_point: source.entry_point,
            text: source.text,
        }
    }
}

/// A vertex + fragment pairing produced by [`link_program`].
///
/// An unlinked program is still a valid value: it can be bound by the frame
/// loop, where it yields no geometry on screen.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    label: String,
    linked: bool,
    log: String,
    vertex: StageModule,
    fragment: StageModule,
    vertex_inputs: Vec<InterfaceSlot>,
}

impl ShaderProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link status flag.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Diagnostic log of the link attempt; empty on success.
    pub fn info_log(&self) -> &str {
        &self.log
    }

    pub fn vertex(&self) -> &StageModule {
        &self.vertex
    }

    pub fn fragment(&self) -> &StageModule {
        &self.fragment
    }

    /// Attribute slots the vertex stage reads.
    pub fn vertex_inputs(&self) -> &[InterfaceSlot] {
        &self.vertex_inputs
    }

    /// Returns the link failure as a reportable error.
    pub fn error(&self) -> Option<PipelineError> {
        (!self.linked).then(|| PipelineError::ProgramLinkFailed {
            log: self.log.clone(),
        })
    }
}

/// Links a vertex and a fragment stage into one program.
///
/// Both objects are taken by value and released when this returns, whatever
/// the outcome. Their compile status is not a precondition: linking a failed
/// stage produces an unlinked program with a diagnostic log.
pub fn link_program(vertex: ShaderObject, fragment: ShaderObject) -> ShaderProgram {
    let problems = link_problems(&vertex, &fragment);
    let linked = problems.is_empty();

    let program = ShaderProgram {
        label: format!("{} + {}", vertex.label(), fragment.label()),
        linked,
        log: info_log::bounded(problems.join("\n")),
        vertex: StageModule::from_object(&vertex),
        fragment: StageModule::from_object(&fragment),
        vertex_inputs: vertex.interface().inputs.clone(),
    };

    log::debug!(
        "linked program `{}`: {}",
        program.label,
        if linked { "ok" } else { "failed" }
    );

    drop(vertex);
    drop(fragment);
    log::trace!("released stage objects of `{}`", program.label);

    program
}

fn link_problems(vertex: &ShaderObject, fragment: &ShaderObject) -> Vec<String> {
    let mut problems = Vec::new();

    for (obj, expected) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
        if obj.stage() != expected {
            problems.push(format!(
                "`{}` is a {} shader attached as the {expected} stage",
                obj.label(),
                obj.stage()
            ));
        }
        if !obj.is_compiled() {
            problems.push(format!("{} shader `{}` is not compiled", obj.stage(), obj.label()));
        }
    }
    if !problems.is_empty() {
        return problems;
    }

    let vs = vertex.interface();
    let fs = fragment.interface();

    if !vs.writes_position {
        problems.push("vertex stage does not write @builtin(position)".to_string());
    }

    for input in &fs.inputs {
        match vs.output(input.location) {
            None => problems.push(format!(
                "fragment input @location({}) {} is not written by the vertex stage",
                input.location, input.ty
            )),
            Some(out) if out.ty != input.ty => problems.push(format!(
                "type mismatch at @location({}): vertex writes {}, fragment reads {}",
                input.location, out.ty, input.ty
            )),
            Some(out) if !out.same_qualifiers(input) => problems.push(format!(
                "interpolation mismatch at @location({}): vertex uses {:?}/{:?}, fragment uses {:?}/{:?}",
                input.location, out.interpolation, out.sampling, input.interpolation, input.sampling
            )),
            Some(_) => {}
        }
    }

    if fs.outputs.is_empty() {
        problems.push("fragment stage writes no color output".to_string());
    }
    // Surface formats are normalized, so color targets take floats only.
    for output in fs.outputs.iter().filter(|o| !o.ty.is_float()) {
        problems.push(format!(
            "fragment output @location({}) is {}; color targets require floats",
            output.location, output.ty
        ));
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{compile_shader, ShaderSource, INFO_LOG_CAPACITY};

    const VS_POSITION: &str = "
        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 1.0);
        }
    ";

    const VS_COLOR: &str = "
        struct VertexOut {
            @builtin(position) clip: vec4<f32>,
            @location(0) color: vec3<f32>,
        };

        @vertex
        fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOut {
            var out: VertexOut;
            out.clip = vec4<f32>(position, 1.0);
            out.color = color;
            return out;
        }
    ";

    const FS_RED: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    ";

    const FS_COLOR: &str = "
        @fragment
        fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
            return vec4<f32>(color, 1.0);
        }
    ";

    fn link(vs: &'static str, fs: &'static str) -> ShaderProgram {
        link_program(
            compile_shader(&ShaderSource::vertex("vs", vs)),
            compile_shader(&ShaderSource::fragment("fs", fs)),
        )
    }

    #[test]
    fn position_and_constant_color_link() {
        let program = link(VS_POSITION, FS_RED);
        assert!(program.is_linked(), "{}", program.info_log());
        assert!(program.info_log().is_empty());
        assert_eq!(program.vertex_inputs().len(), 1);
        assert_eq!(program.label(), "vs + fs");
    }

    #[test]
    fn interpolated_color_links() {
        let program = link(VS_COLOR, FS_COLOR);
        assert!(program.is_linked(), "{}", program.info_log());
        let locations: Vec<u32> = program.vertex_inputs().iter().map(|s| s.location).collect();
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn missing_varying_fails_link() {
        let program = link(VS_POSITION, FS_COLOR);
        assert!(!program.is_linked());
        assert!(program.info_log().contains("@location(0)"));
        assert!(matches!(program.error(), Some(PipelineError::ProgramLinkFailed { .. })));
    }

    #[test]
    fn mismatched_varying_type_fails_link() {
        let fs = "
            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color;
            }
        ";
        let program = link(VS_COLOR, fs);
        assert!(!program.is_linked());
        assert!(program.info_log().contains("type mismatch"));
    }

    #[test]
    fn mismatched_interpolation_fails_link() {
        let vs = "
            struct VertexOut {
                @builtin(position) clip: vec4<f32>,
                @location(0) @interpolate(flat) color: vec3<f32>,
            };

            @vertex
            fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOut {
                var out: VertexOut;
                out.clip = vec4<f32>(position, 1.0);
                out.color = color;
                return out;
            }
        ";
        let program = link(vs, FS_COLOR);
        assert!(!program.is_linked());
        assert!(program.info_log().contains("interpolation mismatch at @location(0)"));
    }

    #[test]
    fn integer_color_output_fails_link() {
        let fs = "
            @fragment
            fn fs_main() -> @location(0) vec4<u32> {
                return vec4<u32>(255u, 0u, 0u, 255u);
            }
        ";
        let program = link(VS_POSITION, fs);
        assert!(!program.is_linked());
        assert!(program.info_log().contains("vec4<u32>"));
    }

    #[test]
    fn link_log_is_cut_at_capacity() {
        // Sixteen unmatched inputs report well over INFO_LOG_CAPACITY characters.
        let params: Vec<String> = (0..16)
            .map(|n| format!("@location({n}) v{n}: vec4<f32>"))
            .collect();
        let fs: &'static str = Box::leak(
            format!(
                "@fragment fn fs_main({}) -> @location(0) vec4<f32> {{ return v0; }}",
                params.join(", ")
            )
            .into_boxed_str(),
        );
        let program = link(VS_POSITION, fs);
        assert!(!program.is_linked());
        assert_eq!(program.info_log().chars().count(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn failed_stage_still_yields_a_program() {
        let program = link("@vertex fn vs_main( {", FS_RED);
        assert!(!program.is_linked());
        assert!(program.info_log().contains("not compiled"));
        assert_eq!(program.fragment().entry_point, "fs_main");
    }

    #[test]
    fn swapped_stages_fail_link() {
        let program = link_program(
            compile_shader(&ShaderSource::fragment("fs", FS_RED)),
            compile_shader(&ShaderSource::vertex("vs", VS_POSITION)),
        );
        assert!(!program.is_linked());
        assert!(program.info_log().contains("attached as the vertex stage"));
    }

    #[test]
    fn compile_and_link_status_are_independent() {
        let vs = compile_shader(&ShaderSource::vertex("vs", VS_POSITION));
        let fs = compile_shader(&ShaderSource::fragment("fs", FS_COLOR));
        assert!(vs.is_compiled());
        assert!(fs.is_compiled());

        let program = link_program(vs, fs);
        assert!(!program.is_linked());
    }
}
