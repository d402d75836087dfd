//! Scene presets.

use tessera_engine::coords::ColorRgba;
use tessera_engine::geometry::{DrawCall, GeometryError, MeshData, VertexLayout};
use tessera_engine::shader::ShaderSource;
use tessera_engine::{PolygonMode, SceneDesc};

const POSITION_VS: ShaderSource =
    ShaderSource::vertex("position.vert", include_str!("shaders/position.vert.wgsl"));
const SOLID_RED_FS: ShaderSource =
    ShaderSource::fragment("solid_red.frag", include_str!("shaders/solid_red.frag.wgsl"));
const COLOR_VS: ShaderSource =
    ShaderSource::vertex("color.vert", include_str!("shaders/color.vert.wgsl"));
const COLOR_FS: ShaderSource =
    ShaderSource::fragment("color.frag", include_str!("shaders/color.frag.wgsl"));

const BLUE: ColorRgba = ColorRgba::new(0.0, 0.0, 1.0, 0.0);
const BLACK: ColorRgba = ColorRgba::new(0.0, 0.0, 0.0, 0.0);

#[rustfmt::skip]
const SQUARE: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

const SQUARE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Red triangle over the first three square corners, on blue.
pub fn hello_triangle() -> Result<SceneDesc, GeometryError> {
    let layout = VertexLayout::interleaved(&[3]);
    let mesh = MeshData::new(SQUARE[..9].to_vec(), &layout)?;

    Ok(SceneDesc {
        label: "hello_triangle",
        vertex_shader: POSITION_VS,
        fragment_shader: SOLID_RED_FS,
        layout,
        mesh,
        draw: DrawCall::Arrays { first: 0, count: 3 },
        clear_color: BLUE,
        polygon_mode: PolygonMode::Fill,
    })
}

/// Red square drawn as two indexed triangles, on blue.
pub fn indexed_quad() -> Result<SceneDesc, GeometryError> {
    let layout = VertexLayout::interleaved(&[3]);
    let mesh = MeshData::new(SQUARE.to_vec(), &layout)?.with_indices(SQUARE_INDICES.to_vec())?;

    Ok(SceneDesc {
        label: "indexed_quad",
        vertex_shader: POSITION_VS,
        fragment_shader: SOLID_RED_FS,
        layout,
        mesh,
        draw: DrawCall::Indexed {
            count: SQUARE_INDICES.len() as u32,
        },
        clear_color: BLUE,
        polygon_mode: PolygonMode::Fill,
    })
}

/// The indexed square with only its triangle edges drawn.
pub fn wireframe_quad() -> Result<SceneDesc, GeometryError> {
    let mut scene = indexed_quad()?.with_polygon_mode(PolygonMode::Line);
    scene.label = "wireframe_quad";
    Ok(scene)
}

/// Triangle with red, green and blue corners interpolated across its face.
pub fn color_triangle() -> Result<SceneDesc, GeometryError> {
    let layout = VertexLayout::interleaved(&[3, 3]);

    #[rustfmt::skip]
    let vertices = vec![
        // position         // color
         0.5, -0.5, 0.0,    1.0, 0.0, 0.0, // bottom right
        -0.5, -0.5, 0.0,    0.0, 1.0, 0.0, // bottom left
         0.0,  0.5, 0.0,    0.0, 0.0, 1.0, // top
    ];
    let mesh = MeshData::new(vertices, &layout)?;

    Ok(SceneDesc {
        label: "color_triangle",
        vertex_shader: COLOR_VS,
        fragment_shader: COLOR_FS,
        layout,
        mesh,
        draw: DrawCall::Arrays { first: 0, count: 3 },
        clear_color: BLACK,
        polygon_mode: PolygonMode::Fill,
    })
}
