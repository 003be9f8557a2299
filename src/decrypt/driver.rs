use super::direction::RevealDirection;
use super::frame::{DecryptFrame, Glyph, GlyphState};
use super::glyphs::GlyphAlphabet;
use super::shuffle::shuffle_text;
use super::trigger::{AnimateOn, TriggerAction, TriggerEvent, VisibilityTrigger, DEFAULT_VIEW_THRESHOLD};
use fastrand::Rng;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::time::Duration;

/// Everything needed to build a [DecryptDriver].
#[derive(Clone, Debug)]
pub struct DecryptOptions {
    /// The text shown before the first cycle.
    pub text: String,
    /// The text toggled to on every other cycle.
    pub alternate_text: String,
    /// The interval between ticks.
    pub speed: Duration,
    /// How many ticks a non sequential cycle lasts.
    pub max_iterations: u32,
    /// Lock one character per tick rather than rescrambling everything.
    pub sequential: bool,
    pub reveal_direction: RevealDirection,
    pub alphabet: GlyphAlphabet,
    pub animate_on: AnimateOn,
    /// How long the fully revealed text is held before the next cycle.
    pub freeze_duration: Duration,
    pub view_threshold: f64,
    /// Seed for the filler glyph generator.
    pub seed: Option<u64>,
}

impl DecryptOptions {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            alternate_text: "An Aspiring Web Developer".into(),
            speed: Duration::from_millis(50),
            max_iterations: 10,
            sequential: false,
            reveal_direction: RevealDirection::default(),
            alphabet: GlyphAlphabet::default(),
            animate_on: AnimateOn::default(),
            freeze_duration: Duration::from_millis(3000),
            view_threshold: DEFAULT_VIEW_THRESHOLD,
            seed: None,
        }
    }
}

/// The phase the animation is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a trigger.
    Idle,

    /// Ticking towards a full reveal.
    Scrambling,

    /// Holding the fully revealed text until the next cycle.
    Frozen,
}

/// Drives the decrypt animation over a virtual millisecond clock.
///
/// Time only moves when [DecryptDriver::advance] is called, which fires every timer that
/// became due in deadline order. There are at most two timers alive at any time: the tick
/// interval while scrambling and the freeze timeout while frozen.
pub struct DecryptDriver {
    options: DecryptOptions,
    texts: [Vec<char>; 2],
    current: usize,
    phase: Phase,
    revealed: BTreeSet<usize>,
    display: Vec<char>,
    iterations: u32,
    trigger: VisibilityTrigger,
    rng: Rng,
    now: u64,
    next_tick: Option<u64>,
    freeze_deadline: Option<u64>,
    mounted: bool,
}

impl DecryptDriver {
    pub fn new(options: DecryptOptions) -> Self {
        let texts = [options.text.chars().collect(), options.alternate_text.chars().collect::<Vec<_>>()];
        let display = texts[0].clone();
        let trigger = VisibilityTrigger::new(options.animate_on, options.view_threshold);
        let rng = match options.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            options,
            texts,
            current: 0,
            phase: Phase::Idle,
            revealed: BTreeSet::new(),
            display,
            iterations: 0,
            trigger,
            rng,
            now: 0,
            next_tick: None,
            freeze_deadline: None,
            mounted: true,
        }
    }

    pub fn options(&self) -> &DecryptOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The text the current cycle is revealing.
    pub fn current_text(&self) -> String {
        self.texts[self.current].iter().collect()
    }

    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Milliseconds elapsed on the virtual clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether any timer is still pending.
    pub fn has_pending_timers(&self) -> bool {
        self.next_tick.is_some() || self.freeze_deadline.is_some()
    }

    /// The frame to display right now.
    pub fn frame(&self) -> DecryptFrame {
        let glyphs = self
            .display
            .iter()
            .enumerate()
            .map(|(index, ch)| {
                let revealed = self.phase != Phase::Scrambling || self.revealed.contains(&index);
                let state = if revealed { GlyphState::Revealed } else { GlyphState::Encrypted };
                Glyph { ch: *ch, state }
            })
            .collect();
        DecryptFrame::new(glyphs)
    }

    /// Feed a host event. Returns true if the frame changed.
    pub fn handle(&mut self, event: TriggerEvent) -> bool {
        if !self.mounted {
            return false;
        }
        match self.trigger.handle(event) {
            TriggerAction::Start if self.phase == Phase::Idle => {
                self.start();
                true
            }
            TriggerAction::Stop if self.phase == Phase::Scrambling => {
                self.stop();
                true
            }
            _ => false,
        }
    }

    /// Cancel the running cycle and re-arm the trigger so the next hover or intersection
    /// starts a new one.
    pub fn reset_trigger(&mut self) {
        if !self.mounted {
            return;
        }
        debug!("resetting trigger in phase {:?}", self.phase);
        self.trigger.reset();
        self.next_tick = None;
        self.freeze_deadline = None;
        self.revealed.clear();
        self.display = self.text().to_vec();
        self.phase = Phase::Idle;
    }

    /// Move the clock forward, firing every timer that falls due. Returns true if the frame changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        let elapsed = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let target = self.now.saturating_add(elapsed);
        let mut modified = false;
        while let Some(deadline) = self.next_deadline().filter(|deadline| *deadline <= target) {
            self.now = deadline;
            if self.freeze_deadline == Some(deadline) {
                self.freeze_deadline = None;
                self.thaw();
            } else {
                self.tick();
            }
            modified = true;
        }
        self.now = target;
        modified
    }

    /// Cancel every pending timer. Nothing changes after this.
    pub fn unmount(&mut self) {
        debug!("unmounting decrypt driver in phase {:?}", self.phase);
        self.next_tick = None;
        self.freeze_deadline = None;
        self.mounted = false;
    }

    fn next_deadline(&self) -> Option<u64> {
        match (self.next_tick, self.freeze_deadline) {
            (Some(tick), Some(freeze)) => Some(tick.min(freeze)),
            (tick, freeze) => tick.or(freeze),
        }
    }

    /// The deadline `delay` milliseconds from now. A deadline past the end of the clock never fires.
    fn deadline_after(&self, delay: u128) -> Option<u64> {
        u64::try_from(delay).ok().and_then(|delay| self.now.checked_add(delay))
    }

    fn next_tick_deadline(&self) -> Option<u64> {
        self.deadline_after(self.options.speed.as_millis().max(1))
    }

    fn text(&self) -> &[char] {
        &self.texts[self.current]
    }

    fn start(&mut self) {
        self.next_tick = None;
        self.freeze_deadline = None;
        self.current = 1 - self.current;
        self.revealed.clear();
        self.iterations = 0;
        self.phase = Phase::Scrambling;
        debug!("starting cycle on text {:?}", self.current_text());

        if self.text().is_empty() {
            self.freeze();
            return;
        }
        self.display = shuffle_text(&self.texts[self.current], &self.revealed, &self.options.alphabet, &mut self.rng);
        self.next_tick = self.next_tick_deadline();
    }

    fn stop(&mut self) {
        debug!("stopping cycle after {} ticks", self.iterations);
        self.next_tick = None;
        self.revealed.clear();
        self.display = self.text().to_vec();
        self.phase = Phase::Idle;
    }

    fn tick(&mut self) {
        self.iterations += 1;
        let length = self.text().len();
        let text = &self.texts[self.current];
        let finished = if self.options.sequential {
            if let Some(index) = self.options.reveal_direction.next_index(&self.revealed, length) {
                self.revealed.insert(index);
            }
            self.display = shuffle_text(text, &self.revealed, &self.options.alphabet, &mut self.rng);
            self.revealed.len() >= length
        } else {
            self.display = shuffle_text(text, &self.revealed, &self.options.alphabet, &mut self.rng);
            self.iterations >= self.options.max_iterations
        };
        trace!("tick {} revealed {}/{}", self.iterations, self.revealed.len(), length);

        if finished {
            self.freeze();
        } else {
            self.next_tick = self.next_tick_deadline();
        }
    }

    fn freeze(&mut self) {
        debug!("freezing after {} ticks", self.iterations);
        self.next_tick = None;
        self.phase = Phase::Frozen;
        self.display = self.text().to_vec();
        self.revealed = (0..self.display.len()).collect();
        self.freeze_deadline = self.deadline_after(self.options.freeze_duration.as_millis());
    }

    fn thaw(&mut self) {
        // Two empty texts have nothing left to animate, stay frozen for good.
        if self.texts.iter().all(|text| text.is_empty()) {
            debug!("both texts are empty, staying frozen");
            return;
        }
        self.start();
    }
}
