use anyhow::Context;
use clap::Parser;
use decrypted::config::Config;
use decrypted::decrypt::{AnimateOn, Charset, DecryptDriver, RevealDirection};
use decrypted::logging::{parse_level, FileLogger};
use decrypted::render::{DecryptAnimation, TerminalPlayer};
use std::path::PathBuf;

/// Play a text decrypt animation on the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The text shown before the first cycle.
    text: Option<String>,

    /// The text toggled to on every other cycle.
    #[arg(short, long)]
    alternate: Option<String>,

    /// The tick interval in milliseconds.
    #[arg(short, long)]
    speed: Option<u64>,

    /// The number of ticks a non sequential cycle lasts.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Lock one character per tick.
    #[arg(long)]
    sequential: bool,

    /// The order characters get revealed in.
    #[arg(short, long, value_parser = |s: &str| Ok::<_, String>(RevealDirection::parse_lenient(s)))]
    direction: Option<RevealDirection>,

    /// Only scramble using the text's own characters.
    #[arg(long)]
    original_chars: bool,

    /// The filler alphabet.
    #[arg(long)]
    characters: Option<String>,

    /// A built in filler alphabet.
    #[arg(long)]
    charset: Option<Charset>,

    /// What starts the animation.
    #[arg(long)]
    animate_on: Option<AnimateOn>,

    /// How long the revealed text is held, in milliseconds.
    #[arg(long)]
    freeze: Option<u64>,

    /// The fraction of the text that needs to be visible in view mode.
    #[arg(long)]
    threshold: Option<f64>,

    /// Rows of blank space above the text.
    #[arg(long, default_value_t = 0)]
    offset: u16,

    /// Seed for the filler glyph generator.
    #[arg(long)]
    seed: Option<u64>,

    /// The path to the configuration file.
    #[arg(short, long, env = "DECRYPTED_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        let animation = &mut config.animation;
        if let Some(text) = self.text {
            animation.text = text;
        }
        if let Some(alternate) = self.alternate {
            animation.alternate_text = alternate;
        }
        if let Some(speed) = self.speed {
            animation.speed = speed;
        }
        if let Some(max_iterations) = self.max_iterations {
            animation.max_iterations = max_iterations;
        }
        animation.sequential |= self.sequential;
        if let Some(direction) = self.direction {
            animation.reveal_direction = direction;
        }
        animation.use_original_chars_only |= self.original_chars;
        if let Some(characters) = self.characters {
            animation.characters = Some(characters);
        }
        if let Some(charset) = self.charset {
            animation.charset = charset;
        }
        if let Some(animate_on) = self.animate_on {
            animation.animate_on = animate_on;
        }
        if let Some(freeze) = self.freeze {
            animation.freeze_duration = freeze;
        }
        if let Some(threshold) = self.threshold {
            animation.view_threshold = threshold;
        }
        if let Some(seed) = self.seed {
            animation.seed = Some(seed);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Config::load_default()?),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_ref())?;
    let offset = cli.offset;
    cli.apply(&mut config);

    if let Some(path) = &config.logging.path {
        let level = parse_level(config.logging.level.as_deref());
        FileLogger::open(path, level)
            .with_context(|| format!("opening log file {}", path.display()))?
            .install()
            .context("installing logger")?;
    }

    let driver = DecryptDriver::new(config.animation.options());
    let player = TerminalPlayer::new(DecryptAnimation::new(driver), config.theme, offset);
    player.run().context("running player")
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
