use glow::HasContext;

use crate::engine::components::material::ShaderProgram;
use crate::engine::components::mesh::Mesh;
use crate::engine::components::skeleton::PartMesh;
use crate::engine::error::AppError;
use crate::engine::systems::pose_composer::{ draw_character, PartRenderer };
use crate::engine::utils::math::Mat4x4;
use crate::game::scene::Scene;

/// One cube upload per part mesh, plus the ground slab.
#[derive(Debug)]
pub struct PartMeshes {
    torso: Mesh,
    head: Mesh,
    arm: Mesh,
    leg: Mesh,
}

impl PartMeshes {
    pub fn new(gl: &glow::Context) -> Result<Self, AppError> {
        Ok(Self {
            torso: Mesh::cube(gl)?,
            head: Mesh::cube(gl)?,
            arm: Mesh::cube(gl)?,
            leg: Mesh::cube(gl)?,
        })
    }

    pub fn get(&self, mesh: PartMesh) -> &Mesh {
        match mesh {
            PartMesh::Torso => &self.torso,
            PartMesh::Head => &self.head,
            PartMesh::Arm => &self.arm,
            PartMesh::Leg => &self.leg,
        }
    }

    fn cleanup(&self, gl: &glow::Context) {
        for mesh in PartMesh::ALL {
            self.get(mesh).cleanup(gl);
        }
    }
}

/// Draws composed body parts with the Phong shader. The shader must already
/// be bound with view, projection and light uniforms set.
pub struct GlPartRenderer<'a> {
    gl: &'a glow::Context,
    shader: &'a ShaderProgram,
    meshes: &'a PartMeshes,
}

impl PartRenderer for GlPartRenderer<'_> {
    fn draw_part(&mut self, transform: &Mat4x4, color: [f32; 3], mesh: PartMesh) {
        self.shader.set_mat4(self.gl, "model", transform);
        self.shader.set_vec3(self.gl, "objectColor", color);
        self.meshes.get(mesh).draw(self.gl);
    }
}

#[derive(Debug)]
pub struct RenderSystem {
    shader: ShaderProgram,
    meshes: PartMeshes,
    ground_mesh: Mesh,
}

impl RenderSystem {
    pub fn new(gl: &glow::Context) -> Result<Self, AppError> {
        let shader = ShaderProgram::new(
            gl,
            include_str!("../../assets/shaders/vertex_phong.glsl"),
            include_str!("../../assets/shaders/fragment_phong.glsl"),
            "phong"
        )?;
        let meshes = PartMeshes::new(gl)?;
        let ground_mesh = Mesh::cube(gl)?;

        Ok(Self { shader, meshes, ground_mesh })
    }

    pub fn render(&self, gl: &glow::Context, scene: &Scene, width: u32, height: u32) {
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            let [r, g, b, a] = scene.clear_color;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.enable(glow::DEPTH_TEST);
        }

        self.shader.bind(gl);
        self.shader.set_mat4(gl, "view", &scene.camera.view_matrix());
        self.shader.set_mat4(gl, "projection", &scene.camera.projection_matrix(width, height));
        self.shader.set_vec3(gl, "lightPos", scene.light.position);
        self.shader.set_vec3(gl, "viewPos", scene.light.view_position);
        self.shader.set_vec3(gl, "lightColor", scene.light.color);

        self.shader.set_mat4(gl, "model", &scene.ground.model_matrix());
        self.shader.set_vec3(gl, "objectColor", scene.ground.color());
        self.ground_mesh.draw(gl);

        let mut renderer = GlPartRenderer {
            gl,
            shader: &self.shader,
            meshes: &self.meshes,
        };
        for character in scene.characters() {
            draw_character(character, &mut renderer);
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        self.meshes.cleanup(gl);
        self.ground_mesh.cleanup(gl);
        self.shader.cleanup(gl);
    }
}
