use crate::decrypt::{DecryptDriver, DecryptFrame, Phase, TriggerEvent};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// The state of a [Pollable] after it's been polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    /// Nothing changed since the last poll.
    Unmodified,

    /// The frame changed and needs to be redrawn.
    Modified,

    /// The animation is gone and won't change anymore.
    Done,
}

/// Something that needs to be polled periodically to move forward.
pub trait Pollable: Send {
    fn poll(&mut self) -> PollableState;
}

/// A decrypt animation shared between the host's event handling and its render loop.
#[derive(Clone)]
pub struct DecryptAnimation {
    driver: Arc<Mutex<DecryptDriver>>,
}

impl DecryptAnimation {
    pub fn new(driver: DecryptDriver) -> Self {
        Self { driver: Arc::new(Mutex::new(driver)) }
    }

    pub fn frame(&self) -> DecryptFrame {
        self.lock().frame()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Forward a host event. Returns true if the frame changed.
    pub fn handle(&self, event: TriggerEvent) -> bool {
        self.lock().handle(event)
    }

    /// Cancel the running cycle and re-arm the trigger.
    pub fn reset_trigger(&self) {
        self.lock().reset_trigger();
    }

    pub fn unmount(&self) {
        self.lock().unmount();
    }

    /// A pollable that moves the animation forward using wall clock time.
    pub fn pollable(&self) -> Box<dyn Pollable> {
        Box::new(DecryptPollable { driver: self.driver.clone(), last_poll: None })
    }

    fn lock(&self) -> MutexGuard<'_, DecryptDriver> {
        self.driver.lock().unwrap_or_else(|e| e.into_inner())
    }
}

struct DecryptPollable {
    driver: Arc<Mutex<DecryptDriver>>,
    last_poll: Option<Instant>,
}

impl DecryptPollable {
    fn poll_elapsed(&mut self, elapsed: Duration) -> PollableState {
        let mut driver = self.driver.lock().unwrap_or_else(|e| e.into_inner());
        if !driver.is_mounted() {
            return PollableState::Done;
        }
        if driver.advance(elapsed) { PollableState::Modified } else { PollableState::Unmodified }
    }
}

impl Pollable for DecryptPollable {
    fn poll(&mut self) -> PollableState {
        let now = Instant::now();
        // The first poll only starts the clock.
        let elapsed = self.last_poll.map(|last| now.duration_since(last)).unwrap_or_default();
        self.last_poll = Some(now);
        self.poll_elapsed(elapsed)
    }
}
