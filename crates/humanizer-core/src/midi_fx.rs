//! MIDI effect that randomizes note-on velocity and timing in an event block

use serde::{Deserialize, Serialize};

/// A MIDI event for FX processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub pitch: u8,
    pub velocity: u8,
    pub channel: u8,
    pub sample_offset: u32,
    pub is_note_on: bool,
}

impl MidiEvent {
    pub fn note_on(channel: u8, pitch: u8, velocity: u8, sample_offset: u32) -> Self {
        Self { pitch, velocity, channel, sample_offset, is_note_on: true }
    }

    pub fn note_off(channel: u8, pitch: u8, sample_offset: u32) -> Self {
        Self { pitch, velocity: 0, channel, sample_offset, is_note_on: false }
    }
}

/// Parameter for MIDI effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiFxParam {
    pub name: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl MidiFxParam {
    pub fn new(name: &str, value: f32, min: f32, max: f32) -> Self {
        Self { name: name.to_string(), value, min, max }
    }
}

/// Trait for MIDI effects
pub trait MidiFx: Send {
    fn name(&self) -> &str;
    fn process(&mut self, events: Vec<MidiEvent>, sample_rate: f32, bpm: f64) -> Vec<MidiEvent>;
    fn get_params(&self) -> &[MidiFxParam];
    fn set_param(&mut self, name: &str, value: f32);
    fn is_bypassed(&self) -> bool;
    fn set_bypass(&mut self, bypass: bool);
}

// MIDI velocity units per percent of the velocity amount
const VELOCITY_SCALE: f32 = 0.63;
// Seconds of timing shift per percent of the timing amount
const TIMING_SCALE: f32 = 0.05;

/// Randomizes a share of incoming note-ons; everything else passes through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomizerFx {
    params: Vec<MidiFxParam>,
    bypass: bool,
    #[serde(skip, default = "fastrand::Rng::new")]
    rng: fastrand::Rng,
}

impl Default for RandomizerFx {
    fn default() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }
}

impl RandomizerFx {
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            params: vec![
                MidiFxParam::new("velocity", 20.0, 0.0, 100.0),
                MidiFxParam::new("timing", 15.0, 0.0, 100.0),
                MidiFxParam::new("amount", 50.0, 0.0, 100.0),
            ],
            bypass: false,
            rng,
        }
    }

    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.f32() * (max - min)
    }

    fn process_impl(&mut self, events: Vec<MidiEvent>, sample_rate: f32, _bpm: f64) -> Vec<MidiEvent> {
        let velocity_amount = self.params[0].value;
        let timing_amount = self.params[1].value;
        let amount = self.params[2].value;

        events
            .into_iter()
            .map(|mut e| {
                if !e.is_note_on || self.uniform(0.0, 100.0) >= amount {
                    return e;
                }
                if velocity_amount > 0.0 {
                    let vel_offset = (self.uniform(-velocity_amount, velocity_amount) * VELOCITY_SCALE) as i16;
                    e.velocity = (e.velocity as i16 + vel_offset).clamp(1, 127) as u8;
                }
                if timing_amount > 0.0 {
                    let secs = self.uniform(-timing_amount, timing_amount) * TIMING_SCALE;
                    let frames = (secs * sample_rate) as i64;
                    e.sample_offset = (e.sample_offset as i64 + frames).clamp(0, u32::MAX as i64) as u32;
                }
                e
            })
            .collect()
    }
}

impl MidiFx for RandomizerFx {
    fn name(&self) -> &str {
        "Randomizer"
    }

    fn get_params(&self) -> &[MidiFxParam] {
        &self.params
    }

    fn set_param(&mut self, name: &str, value: f32) {
        if let Some(p) = self.params.iter_mut().find(|p| p.name == name) {
            p.value = value.clamp(p.min, p.max);
        }
    }

    fn is_bypassed(&self) -> bool {
        self.bypass
    }

    fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    fn process(&mut self, events: Vec<MidiEvent>, sample_rate: f32, bpm: f64) -> Vec<MidiEvent> {
        if self.bypass {
            return events;
        }
        self.process_impl(events, sample_rate, bpm)
    }
}
