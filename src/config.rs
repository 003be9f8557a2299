use crate::decrypt::{
    AnimateOn, Charset, DecryptOptions, GlyphAlphabet, RevealDirection, DEFAULT_VIEW_THRESHOLD,
};
use crate::render::GlyphTheme;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub animation: AnimationConfig,
    pub theme: GlyphTheme,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the config at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigLoadError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the config from the default location, if there's one there.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "decrypted")?;
        Some(dirs.config_dir().join("config.yaml"))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config file '{0}': {1}")]
    Io(PathBuf, io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// The text shown before the first cycle.
    pub text: String,

    /// The text toggled to on every other cycle.
    pub alternate_text: String,

    /// The tick interval in milliseconds.
    pub speed: u64,

    /// The number of ticks a non sequential cycle lasts.
    pub max_iterations: u32,

    /// Whether to lock one character per tick.
    pub sequential: bool,

    /// The order characters get revealed in when sequential.
    pub reveal_direction: RevealDirection,

    /// Only scramble using the text's own characters.
    pub use_original_chars_only: bool,

    /// A built in filler alphabet.
    pub charset: Charset,

    /// An explicit filler alphabet, overrides `charset`.
    pub characters: Option<String>,

    pub animate_on: AnimateOn,

    /// How long the fully revealed text is held, in milliseconds.
    pub freeze_duration: u64,

    /// Fraction of the text that needs to be visible in view mode.
    pub view_threshold: f64,

    /// Seed for the filler glyph generator.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let defaults = DecryptOptions::new("Hello, World");
        Self {
            text: defaults.text,
            alternate_text: defaults.alternate_text,
            speed: defaults.speed.as_millis() as u64,
            max_iterations: defaults.max_iterations,
            sequential: defaults.sequential,
            reveal_direction: defaults.reveal_direction,
            use_original_chars_only: false,
            charset: Charset::default(),
            characters: None,
            animate_on: defaults.animate_on,
            freeze_duration: defaults.freeze_duration.as_millis() as u64,
            view_threshold: DEFAULT_VIEW_THRESHOLD,
            seed: None,
        }
    }
}

impl AnimationConfig {
    pub fn alphabet(&self) -> GlyphAlphabet {
        if self.use_original_chars_only {
            return GlyphAlphabet::OriginalOnly;
        }
        match &self.characters {
            Some(characters) => GlyphAlphabet::fixed(characters),
            None => self.charset.into(),
        }
    }

    pub fn options(&self) -> DecryptOptions {
        DecryptOptions {
            text: self.text.clone(),
            alternate_text: self.alternate_text.clone(),
            speed: Duration::from_millis(self.speed),
            max_iterations: self.max_iterations,
            sequential: self.sequential,
            reveal_direction: self.reveal_direction,
            alphabet: self.alphabet(),
            animate_on: self.animate_on,
            freeze_duration: Duration::from_millis(self.freeze_duration),
            view_threshold: self.view_threshold,
            seed: self.seed,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// The file logs are appended to. Logging is off if unset.
    pub path: Option<PathBuf>,

    /// The maximum level to log at.
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").expect("parse failed");
        let options = config.animation.options();
        assert_eq!(options.speed, Duration::from_millis(50));
        assert_eq!(options.max_iterations, 10);
        assert_eq!(options.freeze_duration, Duration::from_millis(3000));
        assert_eq!(options.animate_on, AnimateOn::Hover);
        assert_eq!(options.alphabet, GlyphAlphabet::default());
        assert_eq!(options.alternate_text, "An Aspiring Web Developer");
    }

    #[test]
    fn parse_full_config() {
        let input = r##"
animation:
  text: hi
  alternate_text: there
  speed: 20
  sequential: true
  reveal_direction: center
  animate_on: view
  freeze_duration: 500
  seed: 9
theme:
  encrypted: "#00ff00"
logging:
  path: /tmp/decrypted.log
  level: debug
"##;
        let config = Config::parse(input).expect("parse failed");
        let options = config.animation.options();
        assert_eq!(options.text, "hi");
        assert_eq!(options.alternate_text, "there");
        assert_eq!(options.speed, Duration::from_millis(20));
        assert!(options.sequential);
        assert_eq!(options.reveal_direction, RevealDirection::Center);
        assert_eq!(options.animate_on, AnimateOn::View);
        assert_eq!(options.seed, Some(9));
        assert_eq!(config.theme.encrypted, Color::new(0, 255, 0));
        assert_eq!(config.theme.revealed, GlyphTheme::default().revealed);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_direction_falls_back_to_start() {
        let config = Config::parse("animation:\n  reveal_direction: sideways\n").expect("parse failed");
        assert_eq!(config.animation.reveal_direction, RevealDirection::Start);
    }

    #[test]
    fn alphabet_precedence() {
        let mut config = AnimationConfig { charset: Charset::Binary, ..Default::default() };
        assert_eq!(config.alphabet(), GlyphAlphabet::fixed("01"));

        config.characters = Some("xy".into());
        assert_eq!(config.alphabet(), GlyphAlphabet::fixed("xy"));

        config.use_original_chars_only = true;
        assert_eq!(config.alphabet(), GlyphAlphabet::OriginalOnly);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(Config::parse("animation:\n  speeed: 3\n"), Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn invalid_color_is_rejected() {
        assert!(Config::parse("theme:\n  revealed: '#12'\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "animation:\n  max_iterations: 3").expect("write failed");
        let config = Config::load(file.path()).expect("load failed");
        assert_eq!(config.animation.max_iterations, 3);
    }

    #[test]
    fn missing_file() {
        let result = Config::load(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::Io(..))));
    }
}
