//! Sources of uniform randomness for the humanizer

/// Yields uniform values in [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are returned as given, so scripted sources may include 1.0.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl SequenceSource {
    /// An empty list behaves like a constant 0.0
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), cursor: 0, draws: 0 }
    }

    /// Total values handed out so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        let Some(&value) = self.values.get(self.cursor) else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
