pub mod render_system;

pub use render_system::RenderSystem;
