pub mod display;
pub mod finger;
pub mod key_input;
pub mod keystroke;
pub mod matcher;
pub mod model;

pub use key_input::{Key, KeyInput};
pub use keystroke::{CharMapping, Keystroke, KeystrokeMap};
pub use matcher::{
    EmulatedLayoutMatcher, KeyMatcher, KeyMatching, LayoutCharMatcher, PhysicalKeyMatcher,
};
