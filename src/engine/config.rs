//! Runtime settings, read from an optional JSON file.
//!
//! Every section has `#[serde(default)]`, so a file only needs the keys it
//! changes. With no file at all the defaults reproduce the stock scene: a
//! 950x950 window, two figures, and `output.gif` next to the binary.

use std::path::{ Path, PathBuf };
use serde::{ Serialize, Deserialize };
use tracing::info;

use crate::engine::components::animator::DEFAULT_SWING_SPEED;
use crate::engine::components::camera::Camera;
use crate::engine::components::transform::Transform;
use crate::engine::error::AppError;
use crate::engine::utils::math::Vec3;

pub const CONFIG_ENV_VAR: &str = "FIGURE_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowSettings,
    pub capture: CaptureSettings,
    pub movement: MovementSettings,
    pub animation: AnimationSettings,
    pub scene: SceneSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "3D Animation and Shading".to_string(),
            width: 950,
            height: 950,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub enabled: bool,
    pub output_path: PathBuf,
    /// Display time of each GIF frame. Zero lets viewers pick their own.
    pub frame_delay_ms: u32,
    /// Keep one rendered frame out of every `n`.
    pub every_nth_frame: u32,
    /// NeuQuant speed, 1 (best) to 30 (fastest).
    pub encoder_speed: i32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_path: PathBuf::from("output.gif"),
            frame_delay_ms: 0,
            every_nth_frame: 1,
            encoder_speed: 10,
        }
    }
}

/// Per-frame steps for keyboard driving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub speed: f32,
    /// Radians of yaw per frame.
    pub rotation_speed: f32,
    /// Half-extent of the walkable square on x and z.
    pub bounds: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            speed: 0.009,
            rotation_speed: 0.05,
            bounds: 9.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub swing_speed: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { swing_speed: DEFAULT_SWING_SPEED }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    pub transform: Transform,
    /// Driven by the keyboard. Only the first controlled figure is used.
    pub controlled: bool,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            controlled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSettings {
    pub position: Vec3,
    pub scale: Vec3,
    pub color: [f32; 3],
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            position: [0.0, -2.0, 0.0],
            scale: [20.0, 0.1, 20.0],
            color: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub position: Vec3,
    pub color: [f32; 3],
    /// Eye position fed to the specular term.
    pub view_position: Vec3,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            position: [5.0, 8.0, 12.0],
            color: [1.0, 1.0, 1.0],
            view_position: [0.0, 0.0, 6.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub figures: Vec<FigureSettings>,
    pub ground: GroundSettings,
    pub camera: Camera,
    pub light: LightSettings,
    pub clear_color: [f32; 4],
}

impl Default for SceneSettings {
    fn default() -> Self {
        let mut scaled = Transform::new(5.0, 1.0, 0.0);
        scaled.set_rotation([45.0, 45.0, 45.0]);
        scaled.set_scale([1.5, 1.5, 1.5]);

        Self {
            figures: vec![
                FigureSettings {
                    transform: Transform::new(0.0, 1.0, 0.0),
                    controlled: true,
                },
                FigureSettings {
                    transform: scaled,
                    controlled: false,
                }
            ],
            ground: GroundSettings::default(),
            camera: Camera::default(),
            light: LightSettings::default(),
            clear_color: [0.5, 0.7, 1.0, 1.0],
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|source| AppError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }

    /// Pick the config file from the first CLI argument, then from
    /// `FIGURE_CONFIG`; fall back to the built-in defaults.
    pub fn resolve(cli_path: Option<PathBuf>, env_path: Option<PathBuf>) -> Result<Self, AppError> {
        match cli_path.or(env_path) {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_environment() -> Result<Self, AppError> {
        let cli_path = std::env::args_os().nth(1).map(PathBuf::from);
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::resolve(cli_path, env_path)
    }
}
