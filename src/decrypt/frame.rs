/// Whether a glyph in a frame shows its true character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphState {
    Revealed,
    Encrypted,
}

/// A single displayed character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub state: GlyphState,
}

/// What the text looks like at a given point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecryptFrame {
    glyphs: Vec<Glyph>,
}

impl DecryptFrame {
    pub(crate) fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    /// A frame showing `text` with every glyph revealed.
    pub fn revealed(text: &[char]) -> Self {
        let glyphs = text.iter().map(|ch| Glyph { ch: *ch, state: GlyphState::Revealed }).collect();
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The plain text being displayed, suitable for screen readers or logs.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|glyph| glyph.ch).collect()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.glyphs.iter().all(|glyph| glyph.state == GlyphState::Revealed)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_frame() {
        let frame = DecryptFrame::revealed(&['h', 'i']);
        assert_eq!(frame.text(), "hi");
        assert_eq!(frame.len(), 2);
        assert!(frame.is_fully_revealed());
    }

    #[test]
    fn mixed_frame() {
        let frame = DecryptFrame::new(vec![
            Glyph { ch: 'h', state: GlyphState::Revealed },
            Glyph { ch: '#', state: GlyphState::Encrypted },
        ]);
        assert_eq!(frame.text(), "h#");
        assert!(!frame.is_fully_revealed());
    }
}
