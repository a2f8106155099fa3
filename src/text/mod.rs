pub mod normalize;
pub mod script;
pub mod segment;

pub use normalize::normalize;
pub use segment::{grapheme_count, segment};
