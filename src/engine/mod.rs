pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod systems;
pub mod utils;

pub use clock::{ Clock, FixedClock, SystemClock };
pub use config::AppConfig;
pub use error::AppError;
