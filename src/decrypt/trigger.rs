use serde::Deserialize;
use strum::{Display, EnumString};

/// The default fraction of the text that has to be visible for it to count as in view.
pub const DEFAULT_VIEW_THRESHOLD: f64 = 0.1;

/// What starts the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AnimateOn {
    /// Scramble while the pointer is over the text.
    #[default]
    Hover,

    /// Scramble once the text first scrolls into view.
    View,
}

/// An input coming from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEvent {
    PointerEnter,
    PointerLeave,

    /// The fraction of the text's area currently inside the viewport.
    Intersection(f64),
}

/// What the driver should do in response to a [TriggerEvent].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    Start,
    Stop,
    Ignore,
}

/// Turns host events into start/stop requests.
#[derive(Clone, Debug)]
pub struct VisibilityTrigger {
    mode: AnimateOn,
    threshold: f64,
    hovering: bool,
    latched: bool,
}

impl VisibilityTrigger {
    pub fn new(mode: AnimateOn, threshold: f64) -> Self {
        let threshold = if threshold.is_finite() { threshold.clamp(0.0, 1.0) } else { DEFAULT_VIEW_THRESHOLD };
        Self { mode, threshold, hovering: false, latched: false }
    }

    pub fn handle(&mut self, event: TriggerEvent) -> TriggerAction {
        match (self.mode, event) {
            (AnimateOn::Hover, TriggerEvent::PointerEnter) if !self.hovering => {
                self.hovering = true;
                TriggerAction::Start
            }
            (AnimateOn::Hover, TriggerEvent::PointerLeave) if self.hovering => {
                self.hovering = false;
                TriggerAction::Stop
            }
            (AnimateOn::View, TriggerEvent::Intersection(ratio)) if !self.latched && self.is_intersecting(ratio) => {
                self.latched = true;
                TriggerAction::Start
            }
            _ => TriggerAction::Ignore,
        }
    }

    /// Re-arm the single shot view latch and forget the pointer.
    pub fn reset(&mut self) {
        self.latched = false;
        self.hovering = false;
    }

    fn is_intersecting(&self, ratio: f64) -> bool {
        // A zero threshold still requires some part of the text to be visible.
        ratio > 0.0 && ratio >= self.threshold
    }
}
