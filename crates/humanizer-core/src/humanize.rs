//! Velocity/timing perturbation of a base pattern

use crate::params::HumanizeParams;
use crate::pattern::{MAX_TIMING_OFFSET, MAX_VELOCITY, MIN_VELOCITY, NoteEvent, Pattern};
use crate::random::RandomSource;

/// Derive a randomized pattern from `base`.
///
/// Each note is selected with probability `params.randomize / 100`. A selected
/// note draws two more values, one for velocity and one for timing; an
/// unselected note consumes only its selection draw and comes back with its
/// base velocity and no timing offset. `base` is never modified.
pub fn recompute<R: RandomSource + ?Sized>(base: &Pattern, params: &HumanizeParams, rng: &mut R) -> Pattern {
    let chance = params.randomize_chance();
    let velocity_range = params.velocity_range();
    let timing_range = params.timing_range();

    base.map(|note| {
        if rng.next_f64() >= chance {
            return unchanged(note);
        }

        let velocity_delta = (rng.next_f64() * 2.0 - 1.0) * velocity_range;
        let timing_delta = (rng.next_f64() * 2.0 - 1.0) * timing_range;

        NoteEvent {
            randomized_velocity: Some((note.base_velocity + velocity_delta).clamp(MIN_VELOCITY, MAX_VELOCITY)),
            randomized_timing_offset: timing_delta.clamp(-MAX_TIMING_OFFSET, MAX_TIMING_OFFSET),
            was_randomized: true,
            ..*note
        }
    })
}

fn unchanged(note: &NoteEvent) -> NoteEvent {
    NoteEvent {
        randomized_velocity: Some(note.base_velocity),
        randomized_timing_offset: 0.0,
        was_randomized: false,
        ..*note
    }
}
