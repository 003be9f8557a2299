mod pollable;
mod style;
mod terminal;

pub use pollable::{DecryptAnimation, Pollable, PollableState};
pub use style::{hsl_to_rgb, Color, ColorError, GlyphTheme};
pub use terminal::{frame_width, TerminalPlayer, TextLayout};
