pub mod gesture;
pub mod handler;

pub use gesture::SwipeTracker;
pub use handler::{InputHandler, KeyAction};
