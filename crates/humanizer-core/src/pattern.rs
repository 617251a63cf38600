//! Note events and the fixed 16-step pattern

use serde::{Deserialize, Serialize};

/// Number of events in every pattern
pub const PATTERN_LEN: usize = 16;

/// Lowest velocity a randomized note may have (keeps notes audible)
pub const MIN_VELOCITY: f64 = 0.1;
pub const MAX_VELOCITY: f64 = 1.0;

/// Timing offsets are bounded to half a percent of the timeline either way
pub const MAX_TIMING_OFFSET: f64 = 0.5;

/// Identity of a rendered note: the pattern slot plus whether the last
/// recompute touched it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteKey {
    pub id: usize,
    pub randomized: bool,
}

/// A single note in a pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Pattern slot index
    pub id: usize,
    /// Velocity from the base pattern (0.0-1.0)
    pub base_velocity: f64,
    /// Placement on the timeline in percent (0.0-100.0)
    pub position: f64,
    /// Velocity after the last recompute, `None` on base events
    pub randomized_velocity: Option<f64>,
    /// Timing offset in timeline percent (-0.5 to 0.5)
    pub randomized_timing_offset: f64,
    pub was_randomized: bool,
}

impl NoteEvent {
    pub fn new(id: usize, base_velocity: f64, position: f64) -> Self {
        Self {
            id,
            base_velocity,
            position,
            randomized_velocity: None,
            randomized_timing_offset: 0.0,
            was_randomized: false,
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey { id: self.id, randomized: self.was_randomized }
    }

    /// Velocity to play: the randomized value if one was derived, else the base
    pub fn velocity(&self) -> f64 {
        self.randomized_velocity.unwrap_or(self.base_velocity)
    }

    /// Position including the timing offset
    pub fn timeline_position(&self) -> f64 {
        self.position + self.randomized_timing_offset
    }
}

/// Ordered, fixed-length sequence of note events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    events: [NoteEvent; PATTERN_LEN],
}

impl Pattern {
    pub fn from_events(events: [NoteEvent; PATTERN_LEN]) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter()
    }

    pub fn get(&self, index: usize) -> Option<&NoteEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events the last recompute touched
    pub fn randomized_count(&self) -> usize {
        self.events.iter().filter(|e| e.was_randomized).count()
    }

    /// Apply `f` to each event, keeping slot order
    pub(crate) fn map(&self, mut f: impl FnMut(&NoteEvent) -> NoteEvent) -> Self {
        Self { events: std::array::from_fn(|i| f(&self.events[i])) }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a NoteEvent;
    type IntoIter = std::slice::Iter<'a, NoteEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Build the fixed base pattern.
///
/// Notes are evenly spaced across the timeline and their velocities follow a
/// slow sine so the pattern has an audible accent shape (roughly 0.5-0.9).
pub fn generate_base_pattern() -> Pattern {
    Pattern {
        events: std::array::from_fn(|i| {
            let base_velocity = 0.7 + (i as f64 * 0.5).sin() * 0.2;
            let position = i as f64 * (100.0 / PATTERN_LEN as f64);
            NoteEvent::new(i, base_velocity, position)
        }),
    }
}
