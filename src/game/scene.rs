use crate::engine::components::camera::Camera;
use crate::engine::components::character::Character;
use crate::engine::config::{ GroundSettings, LightSettings, SceneSettings };
use crate::engine::utils::math::{ mat4x4_identity, mat4x4_scale_by, mat4x4_translate_by, Mat4x4 };

/// Flat slab the figures walk on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub settings: GroundSettings,
}

impl Ground {
    pub fn model_matrix(&self) -> Mat4x4 {
        let model = mat4x4_translate_by(mat4x4_identity(), self.settings.position);
        mat4x4_scale_by(model, self.settings.scale)
    }

    pub fn color(&self) -> [f32; 3] {
        self.settings.color
    }
}

/// Everything drawn in a frame. Owns the figures; at most one of them is
/// driven by the keyboard.
#[derive(Debug, Clone)]
pub struct Scene {
    characters: Vec<Character>,
    controlled: Option<usize>,
    pub ground: Ground,
    pub camera: Camera,
    pub light: LightSettings,
    pub clear_color: [f32; 4],
}

impl Scene {
    pub fn from_settings(settings: &SceneSettings, swing_speed: f32) -> Self {
        let characters = settings.figures
            .iter()
            .map(|figure| {
                let mut character = Character::with_transform(figure.transform);
                character.animator_mut().set_swing_speed(swing_speed);
                character
            })
            .collect();
        let controlled = settings.figures.iter().position(|figure| figure.controlled);

        Self {
            characters,
            controlled,
            ground: Ground { settings: settings.ground },
            camera: settings.camera,
            light: settings.light,
            clear_color: settings.clear_color,
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.characters.get_mut(index)
    }

    pub fn controlled(&self) -> Option<&Character> {
        self.controlled.and_then(|index| self.characters.get(index))
    }

    pub fn controlled_mut(&mut self) -> Option<&mut Character> {
        self.controlled.and_then(|index| self.characters.get_mut(index))
    }
}
