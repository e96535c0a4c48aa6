pub mod scene;
pub mod systems;

pub use scene::Scene;
pub use systems::RenderSystem;
