pub mod braille;
pub mod renderer;
pub mod screens;
pub mod terminal;

pub use renderer::Renderer;
pub use screens::{draw, Palette};
pub use terminal::TerminalRenderer;
