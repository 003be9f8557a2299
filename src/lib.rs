//! A text decrypt animation engine.
//!
//! Text starts out scrambled with filler glyphs and is progressively revealed, then held
//! for a while before the animation flips over to an alternate text and starts again.
//! [DecryptDriver] owns the whole state machine and runs on a virtual clock so hosts decide
//! how time moves; [render::TerminalPlayer] is a host that plays it on a terminal.

pub mod config;
pub mod decrypt;
pub mod logging;
pub mod render;

pub use decrypt::{DecryptDriver, DecryptFrame, DecryptOptions, Phase};
