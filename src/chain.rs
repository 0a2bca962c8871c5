//! The fixed five stage signal chain: high-pass, three bells (the outer two switchable to
//! shelves), low-pass.

use nih_plug::prelude::*;

use crate::biquad::Biquad;
use crate::coefficients::{self, BiquadCoefficients, StageKind};

pub const STAGE_COUNT: usize = 5;

/// Q used by the high-pass and low-pass stages. Not user adjustable.
pub const PASS_Q: f64 = 0.707;

pub const MIN_FREQ_HZ: f32 = 20.0;
pub const MAX_FREQ_HZ: f32 = 20_000.0;
pub const MIN_Q: f32 = 0.1;
pub const MAX_Q: f32 = 10.0;
pub const MAX_GAIN_DB: f32 = 24.0;

/// Smallest value allowed under the square root of the shelf alpha. Keeps the shelf poles
/// strictly inside the unit circle.
const SHELF_RADICAND_FLOOR: f64 = 0.01;

/// Keeps every stage's center frequency clear of Nyquist.
const NYQUIST_MARGIN: f32 = 0.99;

/// Position of a stage inside the chain, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    HighPass = 0,
    Bell1 = 1,
    Bell2 = 2,
    Bell3 = 3,
    LowPass = 4,
}

impl Slot {
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BellBand {
    pub freq: f32,
    pub gain_db: f32,
    pub q: f32,
}

impl BellBand {
    pub const fn new(freq: f32, gain_db: f32, q: f32) -> Self {
        Self { freq, gain_db, q }
    }
}

/// A snapshot of the control-rate inputs. The audio path only ever reads these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualizerParameters {
    pub hp_freq: f32,
    pub lp_freq: f32,
    pub bell1: BellBand,
    pub bell2: BellBand,
    pub bell3: BellBand,
    /// Bell 1 runs as a low shelf.
    pub low_shelf_mode: bool,
    /// Bell 3 runs as a high shelf.
    pub high_shelf_mode: bool,
}

impl Default for EqualizerParameters {
    fn default() -> Self {
        Self {
            hp_freq: 30.0,
            lp_freq: 18_000.0,
            bell1: BellBand::new(200.0, 0.0, 0.707),
            bell2: BellBand::new(1_000.0, 3.0, 0.707),
            bell3: BellBand::new(5_000.0, -2.0, 0.707),
            low_shelf_mode: false,
            high_shelf_mode: false,
        }
    }
}

impl EqualizerParameters {
    pub fn bell1_kind(&self) -> StageKind {
        if self.low_shelf_mode {
            StageKind::LowShelf
        } else {
            StageKind::Peaking
        }
    }

    pub fn bell3_kind(&self) -> StageKind {
        if self.high_shelf_mode {
            StageKind::HighShelf
        } else {
            StageKind::Peaking
        }
    }
}

/// Coefficients for all five stages, designed once per parameter update and shared by every
/// channel's [`FilterChain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainCoefficients {
    pub stages: [BiquadCoefficients; STAGE_COUNT],
}

impl Default for ChainCoefficients {
    fn default() -> Self {
        Self {
            stages: [BiquadCoefficients::IDENTITY; STAGE_COUNT],
        }
    }
}

impl ChainCoefficients {
    /// Clamp `params` into the ranges the cookbook formulas are well behaved in, then design
    /// every stage.
    pub fn design(params: &EqualizerParameters, sample_rate: f32) -> Self {
        let sr = sample_rate as f64;
        let upper = MAX_FREQ_HZ.min(sample_rate * 0.5 * NYQUIST_MARGIN);
        let freq = |f: f32| f.max(MIN_FREQ_HZ).min(upper) as f64;
        let gain = |g: f32| g.max(-MAX_GAIN_DB).min(MAX_GAIN_DB) as f64;
        let bell = |kind: StageKind, band: &BellBand| {
            let gain_db = gain(band.gain_db);
            let mut q = band.q.max(MIN_Q).min(MAX_Q) as f64;
            if kind.is_shelf() {
                q = q.min(max_shelf_slope(gain_db));
            }
            kind.design(sr, freq(band.freq), q, gain_db)
        };

        let designed = Self {
            stages: [
                coefficients::high_pass(sr, freq(params.hp_freq), PASS_Q),
                bell(params.bell1_kind(), &params.bell1),
                bell(StageKind::Peaking, &params.bell2),
                bell(params.bell3_kind(), &params.bell3),
                coefficients::low_pass(sr, freq(params.lp_freq), PASS_Q),
            ],
        };
        nih_debug_assert!(designed
            .stages
            .iter()
            .all(|c| coefficients::pole_radius(c) < 1.0));

        designed
    }

    pub fn stage(&self, slot: Slot) -> &BiquadCoefficients {
        &self.stages[slot.index()]
    }
}

/// Steepest shelf slope `S` the cookbook shelf can take at `gain_db`.
///
/// The shelf alpha is `sin(w0) / 2 * sqrt((A + 1/A) * (1/S - 1) + 2)`. The radicand only
/// goes negative for `S > 1`, and only when the gain is large enough; at 0 dB every slope is
/// fine. Slopes below the returned value design exactly as requested.
pub fn max_shelf_slope(gain_db: f64) -> f64 {
    let a = 10.0f64.powf(gain_db / 40.0);
    let k = a + 1.0 / a;
    // Solves (A + 1/A) * (1/S - 1) + 2 = SHELF_RADICAND_FLOOR for S. k >= 2, so this is positive.
    k / (k + SHELF_RADICAND_FLOOR - 2.0)
}

/// Five cascaded biquads with their own delay state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterChain {
    stages: [Biquad; STAGE_COUNT],
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redesign every stage from `params`. Filter state is carried over.
    pub fn update_from_parameters(&mut self, params: &EqualizerParameters, sample_rate: f32) {
        self.apply(&ChainCoefficients::design(params, sample_rate));
    }

    pub fn apply(&mut self, coefficients: &ChainCoefficients) {
        for (stage, c) in self.stages.iter_mut().zip(coefficients.stages.iter()) {
            stage.set_coefficients(*c);
        }
    }

    pub fn reset_all(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
    }

    pub fn stage(&self, slot: Slot) -> &Biquad {
        &self.stages[slot.index()]
    }

    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(x, |sample, stage| stage.process_sample(sample))
    }

    /// Filter `input` into `output`. Only the overlapping length is processed.
    pub fn process_buffer(&mut self, input: &[f32], output: &mut [f32]) {
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.process_sample(*x);
        }
    }

    pub fn process_in_place(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}
