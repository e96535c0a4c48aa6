//! Keyboard-driven blocky humanoid renderer that records its frames to an
//! animated GIF.
//!
//! `engine` holds the figure model, the forward-kinematics composer and the
//! GL plumbing; `game` assembles them into a scene; [`index::Program`] runs
//! one frame at a time for the window loop in `main.rs`.

pub mod engine;
pub mod game;
pub mod index;

pub use index::Program;
