pub mod camera;
pub mod constants;
pub mod error;
pub mod formation;
pub mod gesture;
pub mod particle;
pub mod position;
pub mod progress;
pub mod scene;
pub mod tree;

pub use camera::*;
pub use constants::*;
pub use error::ConfigError;
pub use formation::*;
pub use particle::*;
pub use position::*;
pub use progress::*;
pub use scene::*;
pub use tree::*;
