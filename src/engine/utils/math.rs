//! Row-major 4x4 matrix and 3-vector helpers.
//!
//! Matrices are stored as `[f32; 16]` indexed `row * 4 + col` and act on
//! column vectors (`p' = M * p`). They are uploaded to GL with
//! `transpose = true`.
//!
//! The `*_by` builders post-multiply, so a chain of calls applies to the
//! object first and the parent last, the same way `glm::translate`,
//! `glm::rotate` and `glm::scale` compose.

pub type Mat4x4 = [f32; 16];
pub type Vec3 = [f32; 3];

pub fn mat4x4_identity() -> Mat4x4 {
    [
      1.0, 0.0, 0.0, 0.0,
      0.0, 1.0, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_translate(x: f32, y: f32, z: f32) -> Mat4x4 {
    [
      1.0, 0.0, 0.0,  x,
      0.0, 1.0, 0.0,  y,
      0.0, 0.0, 1.0,  z,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_rot_x(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
      1.0, 0.0, 0.0, 0.0,
      0.0,  c,  -s,  0.0,
      0.0,  s,   c,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

// Right-handed: +angle turns +Z towards +X.
pub fn mat4x4_rot_y(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
       c,  0.0,  s,  0.0,
      0.0, 1.0, 0.0, 0.0,
      -s,  0.0,  c,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_scale(x: f32, y: f32, z: f32) -> Mat4x4 {
    [
       x,  0.0, 0.0, 0.0,
      0.0,  y,  0.0, 0.0,
      0.0, 0.0,  z,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn vec4_dot(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

pub fn mat4x4_row(mat: &Mat4x4, row: usize) -> [f32; 4] {
    let start_idx = row * 4;
    [mat[start_idx], mat[start_idx + 1], mat[start_idx + 2], mat[start_idx + 3]]
}

pub fn mat4x4_col(mat: &Mat4x4, col: usize) -> [f32; 4] {
    [mat[col], mat[4 + col], mat[8 + col], mat[12 + col]]
}

pub fn mat4x4_mul(a: Mat4x4, b: Mat4x4) -> Mat4x4 {
    let mut ret = [0.0; 16];
    for (i, cell) in ret.iter_mut().enumerate() {
        let row = i / 4;
        let col = i % 4;
        *cell = vec4_dot(mat4x4_row(&a, row), mat4x4_col(&b, col));
    }
    ret
}

/// `m * T(v)`
pub fn mat4x4_translate_by(m: Mat4x4, v: Vec3) -> Mat4x4 {
    mat4x4_mul(m, mat4x4_translate(v[0], v[1], v[2]))
}

/// `m * Rx(angle)`, angle in radians.
pub fn mat4x4_rotate_x_by(m: Mat4x4, angle: f32) -> Mat4x4 {
    mat4x4_mul(m, mat4x4_rot_x(angle))
}

/// `m * Ry(angle)`, angle in radians.
pub fn mat4x4_rotate_y_by(m: Mat4x4, angle: f32) -> Mat4x4 {
    mat4x4_mul(m, mat4x4_rot_y(angle))
}

/// `m * S(v)`
pub fn mat4x4_scale_by(m: Mat4x4, v: Vec3) -> Mat4x4 {
    mat4x4_mul(m, mat4x4_scale(v[0], v[1], v[2]))
}

pub fn mat4x4_transform_point(m: &Mat4x4, p: Vec3) -> Vec3 {
    let v = [p[0], p[1], p[2], 1.0];
    [
        vec4_dot(mat4x4_row(m, 0), v),
        vec4_dot(mat4x4_row(m, 1), v),
        vec4_dot(mat4x4_row(m, 2), v),
    ]
}

pub fn mat4x4_extract_translation(matrix: &Mat4x4) -> Vec3 {
    [matrix[3], matrix[7], matrix[11]]
}

pub fn mat4x4_perspective(fov_y_radians: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4x4 {
    let f = 1.0 / (fov_y_radians * 0.5).tan();
    let range_inv = 1.0 / (near - far);

    [
        f / aspect_ratio, 0.0, 0.0,                          0.0,
        0.0,              f,   0.0,                          0.0,
        0.0,              0.0, (near + far) * range_inv,     (2.0 * near * far) * range_inv,
        0.0,              0.0, -1.0,                         0.0,
    ]
}

/// Right-handed look-at view matrix.
pub fn mat4x4_look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4x4 {
    let f = vec3_normalize(vec3_sub(target, eye));
    let s = vec3_normalize(vec3_cross(f, up));
    let u = vec3_cross(s, f);

    [
         s[0],  s[1],  s[2], -vec3_dot(s, eye),
         u[0],  u[1],  u[2], -vec3_dot(u, eye),
        -f[0], -f[1], -f[2],  vec3_dot(f, eye),
         0.0,   0.0,   0.0,   1.0,
    ]
}

pub fn vec3_add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn vec3_sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn vec3_scale(v: Vec3, s: f32) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn vec3_dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn vec3_cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn vec3_normalize(v: Vec3) -> Vec3 {
    let len = vec3_dot(v, v).sqrt();
    if len == 0.0 {
        return v;
    }
    vec3_scale(v, 1.0 / len)
}
