use glow::HasContext;
use tracing::info;

use crate::engine::error::AppError;
use crate::engine::utils::math::Mat4x4;

/// A linked GL program plus the uniform setters the renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct ShaderProgram {
    pub program: glow::Program,
}

impl ShaderProgram {
    pub fn new(
        gl: &glow::Context,
        vertex_shader_source: &str,
        fragment_shader_source: &str,
        program_name: &str
    ) -> Result<Self, AppError> {
        unsafe {
            let vs = compile_shader(gl, glow::VERTEX_SHADER, "vertex", vertex_shader_source)?;
            let fs = match compile_shader(gl, glow::FRAGMENT_SHADER, "fragment", fragment_shader_source) {
                Ok(fs) => fs,
                Err(e) => {
                    gl.delete_shader(vs);
                    return Err(e);
                }
            };

            let program = gl.create_program().map_err(AppError::Gl)?;
            gl.attach_shader(program, vs);
            gl.attach_shader(program, fs);
            gl.link_program(program);

            gl.delete_shader(vs);
            gl.delete_shader(fs);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(AppError::ShaderLink { program: program_name.to_string(), log });
            }

            info!("Created {} shader program", program_name);
            Ok(Self { program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    /// Row-major matrices go up with `transpose = true`.
    pub fn set_mat4(&self, gl: &glow::Context, name: &str, value: &Mat4x4) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(self.program, name) {
                gl.uniform_matrix_4_f32_slice(Some(&loc), true, value);
            }
        }
    }

    pub fn set_vec3(&self, gl: &glow::Context, name: &str, value: [f32; 3]) {
        unsafe {
            if let Some(loc) = gl.get_uniform_location(self.program, name) {
                gl.uniform_3_f32(Some(&loc), value[0], value[1], value[2]);
            }
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
        }
    }
}

fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    stage: &'static str,
    source: &str
) -> Result<glow::Shader, AppError> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(AppError::Gl)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(AppError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}
