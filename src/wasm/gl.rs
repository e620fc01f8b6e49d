//! WebGL2 plumbing: context, program, mesh buffers, textures.

use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::geometry::PlaneMesh;
use crate::shaders::{POSITION_LOCATION, UV_LOCATION};

pub fn js_err(message: &str) -> JsValue {
    JsValue::from_str(message)
}

/// Acquire a WebGL2 context and set the fixed pipeline state the effect
/// needs: depth-tested, double-sided, transparent clear.
pub fn context(canvas: &HtmlCanvasElement) -> Result<GL, JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;
    gl.enable(GL::DEPTH_TEST);
    gl.disable(GL::CULL_FACE);
    gl.clear_color(0.0, 0.0, 0.0, 0.0);
    Ok(gl)
}

/// Linked program plus its cached uniform locations.
pub struct Program {
    pub program: WebGlProgram,
    pub matrix: Option<WebGlUniformLocation>,
    pub time: Option<WebGlUniformLocation>,
    pub hover: Option<WebGlUniformLocation>,
}

impl Program {
    pub fn new(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<Self, JsValue> {
        let program = link_program(gl, vertex_src, fragment_src)?;
        let matrix = gl.get_uniform_location(&program, "uMatrix");
        let time = gl.get_uniform_location(&program, "time");
        let hover = gl.get_uniform_location(&program, "hover");

        // Sampler bindings never change: uImage on unit 0, oceanTexture on 1.
        gl.use_program(Some(&program));
        if let Some(image) = gl.get_uniform_location(&program, "uImage") {
            gl.uniform1i(Some(&image), 0);
        }
        if let Some(ocean) = gl.get_uniform_location(&program, "oceanTexture") {
            gl.uniform1i(Some(&ocean), 1);
        }

        Ok(Self {
            program,
            matrix,
            time,
            hover,
        })
    }
}

/// GPU-side copy of a [`PlaneMesh`]. The buffer handles are retained so the
/// objects outlive the VAO that references them.
pub struct MeshBuffers {
    pub vao: WebGlVertexArrayObject,
    pub index_count: i32,
    _positions: web_sys::WebGlBuffer,
    _uvs: web_sys::WebGlBuffer,
    _indices: web_sys::WebGlBuffer,
}

pub fn upload_mesh(gl: &GL, mesh: &PlaneMesh) -> Result<MeshBuffers, JsValue> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| js_err("failed to create VAO"))?;
    gl.bind_vertex_array(Some(&vao));

    let positions = gl
        .create_buffer()
        .ok_or_else(|| js_err("failed to create position buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&positions));
    unsafe {
        let view = Float32Array::view(&mesh.positions);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.vertex_attrib_pointer_with_i32(POSITION_LOCATION, 3, GL::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(POSITION_LOCATION);

    let uvs = gl
        .create_buffer()
        .ok_or_else(|| js_err("failed to create uv buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&uvs));
    unsafe {
        let view = Float32Array::view(&mesh.uvs);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.vertex_attrib_pointer_with_i32(UV_LOCATION, 2, GL::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(UV_LOCATION);

    let indices = gl
        .create_buffer()
        .ok_or_else(|| js_err("failed to create index buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    unsafe {
        let view = Uint16Array::view(&mesh.indices);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }

    gl.bind_vertex_array(None);

    Ok(MeshBuffers {
        vao,
        index_count: mesh.index_count() as i32,
        _positions: positions,
        _uvs: uvs,
        _indices: indices,
    })
}

/// Upload a page image as a texture. Page images are arbitrary sizes, so no
/// mipmaps: linear filtering with clamp-to-edge. Flipped on upload so texture
/// V matches the mesh convention (v grows upward).
pub fn texture_from_image(gl: &GL, image: &HtmlImageElement) -> Result<WebGlTexture, JsValue> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| js_err("failed to create texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    Ok(texture)
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, JsValue> {
    let vertex_shader = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment_shader = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or_else(|| js_err("failed to create program"))?;
    gl.attach_shader(&program, &vertex_shader);
    gl.attach_shader(&program, &fragment_shader);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        gl.detach_shader(&program, &vertex_shader);
        gl.detach_shader(&program, &fragment_shader);
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        Err(js_err(&format!("failed to link program: {}", info)))
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| js_err("failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        Err(js_err(&format!("failed to compile shader: {}", info)))
    }
}
