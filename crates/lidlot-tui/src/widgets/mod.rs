//! Line builders shared by the screens.

pub mod code_boxes;
pub mod key_hints;
pub mod reels;
