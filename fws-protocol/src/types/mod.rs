pub mod cell;
pub mod color;
pub mod grid;
pub mod window;

pub use cell::*;
pub use color::*;
pub use grid::*;
pub use window::*;
