use glow::HasContext;

use crate::engine::error::AppError;

/// Floats per vertex: position xyz, normal xyz.
pub const CUBE_VERTEX_STRIDE: usize = 6;

// Unit cube centred on the origin, four vertices per face so each face
// gets its own normal.
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 24 * CUBE_VERTEX_STRIDE] = [
    // front (-z)
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    // back (+z)
    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    // left (-x)
    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5, -1.0,  0.0,  0.0,
    // right (+x)
     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,  1.0,  0.0,  0.0,
    // bottom (-y)
    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    // top (+y)
    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,  2,  3,  0,
     4,  5,  6,  6,  7,  4,
     8,  9, 10, 10, 11,  8,
    12, 13, 14, 14, 15, 12,
    16, 17, 18, 18, 19, 16,
    20, 21, 22, 22, 23, 20,
];

/// Indexed triangle mesh living in one VAO.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    pub index_count: usize,
    pub vertex_count: usize,
}

impl Mesh {
    /// Upload the unit cube. Attribute 0 is position, 1 is normal.
    pub fn cube(gl: &glow::Context) -> Result<Self, AppError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(AppError::Gl)?;
            let vbo = gl.create_buffer().map_err(AppError::Gl)?;
            let ebo = gl.create_buffer().map_err(AppError::Gl)?;

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(&CUBE_VERTICES), glow::STATIC_DRAW);

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(&CUBE_INDICES), glow::STATIC_DRAW);

            let stride = (CUBE_VERTEX_STRIDE * std::mem::size_of::<f32>()) as i32;
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * std::mem::size_of::<f32>() as i32);
            gl.enable_vertex_attrib_array(1);

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vbo,
                ebo,
                index_count: CUBE_INDICES.len(),
                vertex_count: CUBE_VERTICES.len() / CUBE_VERTEX_STRIDE,
            })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count as i32, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_within_vertex_range() {
        let vertex_count = (CUBE_VERTICES.len() / CUBE_VERTEX_STRIDE) as u32;
        assert_eq!(vertex_count, 24);
        assert!(CUBE_INDICES.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn normals_are_unit_axes_pointing_outwards() {
        for vertex in CUBE_VERTICES.chunks(CUBE_VERTEX_STRIDE) {
            let (position, normal) = vertex.split_at(3);
            let length: f32 = normal.iter().map(|n| n * n).sum();
            assert_eq!(length, 1.0);
            // The face normal points the same way as the position on its axis.
            let dot: f32 = position.iter().zip(normal).map(|(p, n)| p * n).sum();
            assert_eq!(dot, 0.5);
        }
    }
}
