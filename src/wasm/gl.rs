use js_sys::{Float32Array, Uint32Array};
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::ViewError;
use crate::geometry::PlaneGeometry;
use crate::scene::LayerUniforms;
use crate::shaders;

pub fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, ViewError> {
    let stage = if shader_type == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl
        .create_shader(shader_type)
        .ok_or(ViewError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        gl.delete_shader(Some(&shader));
        Err(ViewError::ShaderCompile { stage, log })
    }
}

pub fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, ViewError> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = match compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(Some(&vertex));
            return Err(e);
        }
    };
    let Some(program) = gl.create_program() else {
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));
        return Err(ViewError::Resource("program"));
    };
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.bind_attrib_location(&program, shaders::POSITION_LOCATION, "a_position");
    gl.bind_attrib_location(&program, shaders::UV_LOCATION, "a_uv");
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        gl.delete_program(Some(&program));
        Err(ViewError::ProgramLink(info))
    }
}

/// A linked program with its uniform locations looked up once. Deleted on drop.
pub struct Program {
    gl: GL,
    program: WebGlProgram,
    projection: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    displacement: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
}

impl Program {
    pub fn new(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<Self, ViewError> {
        let program = link_program(gl, vertex_src, fragment_src)?;
        Ok(Self {
            projection: gl.get_uniform_location(&program, shaders::U_PROJECTION),
            view: gl.get_uniform_location(&program, shaders::U_VIEW),
            model: gl.get_uniform_location(&program, shaders::U_MODEL),
            displacement: gl.get_uniform_location(&program, shaders::U_DISPLACEMENT),
            texture: gl.get_uniform_location(&program, shaders::U_TEXTURE),
            gl: gl.clone(),
            program,
        })
    }

    /// Make the program current and upload this frame's uniforms.
    pub fn bind(&self, gl: &GL, uniforms: &LayerUniforms) {
        gl.use_program(Some(&self.program));
        if let Some(loc) = &self.projection {
            gl.uniform_matrix4fv_with_f32_array(Some(loc), false, &uniforms.projection.to_cols_array());
        }
        if let Some(loc) = &self.view {
            gl.uniform_matrix4fv_with_f32_array(Some(loc), false, &uniforms.view.to_cols_array());
        }
        if let Some(loc) = &self.model {
            gl.uniform_matrix4fv_with_f32_array(Some(loc), false, &uniforms.model.to_cols_array());
        }
        if let Some(loc) = &self.displacement {
            let p = uniforms.displacement;
            gl.uniform3f(Some(loc), p.x, p.y, p.z);
        }
        if let Some(loc) = &self.texture {
            gl.uniform1i(Some(loc), 0);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        self.gl.delete_program(Some(&self.program));
    }
}

/// GPU copy of a [`PlaneGeometry`]. Deleted on drop.
pub struct Mesh {
    gl: GL,
    vao: WebGlVertexArrayObject,
    buffers: [WebGlBuffer; 3],
    index_count: i32,
}

impl Mesh {
    pub fn upload(gl: &GL, geometry: &PlaneGeometry) -> Result<Self, ViewError> {
        let vao = gl
            .create_vertex_array()
            .ok_or(ViewError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let buffers = [gl.create_buffer(), gl.create_buffer(), gl.create_buffer()];
        let [Some(positions), Some(uvs), Some(indices)] = buffers.clone() else {
            gl.bind_vertex_array(None);
            gl.delete_vertex_array(Some(&vao));
            for buffer in buffers.iter().flatten() {
                gl.delete_buffer(Some(buffer));
            }
            return Err(ViewError::Resource("vertex buffer"));
        };

        float_buffer(gl, &positions, &geometry.positions, shaders::POSITION_LOCATION, 3);
        float_buffer(gl, &uvs, &geometry.uvs, shaders::UV_LOCATION, 2);

        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        // SAFETY: the view is consumed by buffer_data before any allocation.
        unsafe {
            let view = Uint32Array::view(&geometry.indices);
            gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
        }
        gl.bind_vertex_array(None);

        Ok(Self {
            gl: gl.clone(),
            vao,
            buffers: [positions, uvs, indices],
            index_count: geometry.indices.len() as i32,
        })
    }

    pub fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(Some(&self.vao));
        for buffer in &self.buffers {
            self.gl.delete_buffer(Some(buffer));
        }
    }
}

fn float_buffer(gl: &GL, buffer: &WebGlBuffer, data: &[f32], location: u32, size: i32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    // SAFETY: the view is consumed by buffer_data before any allocation.
    unsafe {
        let view = Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(location);
}
