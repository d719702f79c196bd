//! Heading resolution for the two input modalities
//!
//! Human drivers send absolute compass directions, agents send turns relative
//! to the current heading. Both plug into the same [`GameEngine`] through
//! [`DirectionPolicy`].
//!
//! [`GameEngine`]: super::engine::GameEngine

use super::action::{Heading, RelativeTurn};

/// Turns a driver input into the heading used for the next step
pub trait DirectionPolicy {
    /// Input consumed once per step
    type Input;

    /// Heading to apply given the last applied heading and this step's input
    fn resolve(&self, current: Heading, input: Self::Input) -> Heading;

    /// Whether episodes are cut off after running too long without eating
    fn stagnation_guard(&self) -> bool {
        false
    }
}

/// Compass-direction input with a 180-degree reversal ban
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsolutePolicy;

impl DirectionPolicy for AbsolutePolicy {
    type Input = Option<Heading>;

    fn resolve(&self, current: Heading, input: Option<Heading>) -> Heading {
        match input {
            Some(proposed) if !proposed.is_opposite(current) => proposed,
            _ => current,
        }
    }
}

/// Straight / right / left input against the clockwise heading order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativePolicy;

impl DirectionPolicy for RelativePolicy {
    type Input = RelativeTurn;

    fn resolve(&self, current: Heading, input: RelativeTurn) -> Heading {
        input.apply(current)
    }

    fn stagnation_guard(&self) -> bool {
        true
    }
}

/// Single-slot buffer for direction keys pressed between two steps
///
/// Each press is checked against the last applied heading; a valid press
/// overwrites whatever is in the slot, an invalid one is dropped. The step
/// then takes the most recent valid press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionBuffer {
    slot: Option<Heading>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a key press; returns whether it was kept
    pub fn push(&mut self, proposed: Heading, last_applied: Heading) -> bool {
        if proposed.is_opposite(last_applied) {
            return false;
        }
        self.slot = Some(proposed);
        true
    }

    pub fn peek(&self) -> Option<Heading> {
        self.slot
    }

    /// Drain the slot for the next step
    pub fn take(&mut self) -> Option<Heading> {
        self.slot.take()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
