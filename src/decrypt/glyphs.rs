use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

/// The filler alphabet used unless told otherwise.
pub const DEFAULT_CHARACTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// Matrix digital rain characters: katakana, numbers, and symbols
const MATRIX_CHARACTERS: &str = concat!(
    // Half-width katakana
    "ｦｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝ",
    // Numbers
    "0123456789",
    // Symbols
    ":.=*+-<>¦|¬",
);

const BINARY_CHARACTERS: &str = "01";

const HEX_CHARACTERS: &str = "0123456789abcdef";

/// Built in filler alphabets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Charset {
    #[default]
    Default,
    Matrix,
    Binary,
    Hex,
}

impl Charset {
    pub fn characters(self) -> &'static str {
        match self {
            Self::Default => DEFAULT_CHARACTERS,
            Self::Matrix => MATRIX_CHARACTERS,
            Self::Binary => BINARY_CHARACTERS,
            Self::Hex => HEX_CHARACTERS,
        }
    }
}

/// The set of glyphs unrevealed positions are filled with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphAlphabet {
    /// Sample with replacement from a fixed set of characters.
    Fixed(Vec<char>),

    /// Use an anagram of the characters that are still hidden.
    OriginalOnly,
}

impl GlyphAlphabet {
    pub fn fixed(characters: &str) -> Self {
        Self::Fixed(characters.chars().collect())
    }
}

impl Default for GlyphAlphabet {
    fn default() -> Self {
        Self::fixed(DEFAULT_CHARACTERS)
    }
}

impl From<Charset> for GlyphAlphabet {
    fn from(charset: Charset) -> Self {
        Self::fixed(charset.characters())
    }
}
