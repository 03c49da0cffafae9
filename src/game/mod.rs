pub mod ball;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod paddle;
pub mod state;

pub use engine::{Flow, GameEngine};
pub use geometry::{Bounds, COURT_HEIGHT, COURT_WIDTH};
pub use input::KeyboardState;
pub use state::{MatchLength, Screen};
