pub mod animation;
pub mod input;
pub mod time;

pub use animation::FrameCycle;
pub use input::{InputState, Key, KeyEdge, KeyTransition};
pub use time::FrameClock;
