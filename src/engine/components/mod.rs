pub mod animator;
pub mod camera;
pub mod character;
pub mod material;
pub mod mesh;
pub mod skeleton;
pub mod transform;

pub use animator::SwingAnimator;
pub use camera::Camera;
pub use character::Character;
pub use skeleton::{ BodyPart, JointOffsets, PartMesh, HUMANOID_JOINTS };
pub use transform::Transform;
