pub mod frame_capture;
pub mod keyboard_input_system;
pub mod pose_composer;

pub use frame_capture::FrameCapture;
pub use keyboard_input_system::KeyboardInputSystem;
pub use pose_composer::{ compose_pose, draw_character, ComposedPose, PartRenderer };
