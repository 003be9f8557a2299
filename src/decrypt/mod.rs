mod direction;
mod driver;
mod frame;
mod glyphs;
mod shuffle;
mod trigger;

pub use direction::RevealDirection;
pub use driver::{DecryptDriver, DecryptOptions, Phase};
pub use frame::{DecryptFrame, Glyph, GlyphState};
pub use glyphs::{Charset, GlyphAlphabet, DEFAULT_CHARACTERS};
pub use shuffle::shuffle_text;
pub use trigger::{AnimateOn, TriggerAction, TriggerEvent, VisibilityTrigger, DEFAULT_VIEW_THRESHOLD};
