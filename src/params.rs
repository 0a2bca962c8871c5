use nih_plug::prelude::*;

use crate::chain::{
    BellBand, EqualizerParameters, MAX_FREQ_HZ, MAX_GAIN_DB, MAX_Q, MIN_FREQ_HZ, MIN_Q,
};

#[derive(Params)]
pub struct ParametricEqualizerParams {
    // Pass filters
    #[id = "hp_freq"]
    pub hp_freq: FloatParam,
    #[id = "lp_freq"]
    pub lp_freq: FloatParam,

    // Bell 1 (low shelf when `low_shelf_mode` is on)
    #[id = "bell1_freq"]
    pub bell1_freq: FloatParam,
    #[id = "bell1_gain"]
    pub bell1_gain: FloatParam,
    #[id = "bell1_q"]
    pub bell1_q: FloatParam,

    // Bell 2
    #[id = "bell2_freq"]
    pub bell2_freq: FloatParam,
    #[id = "bell2_gain"]
    pub bell2_gain: FloatParam,
    #[id = "bell2_q"]
    pub bell2_q: FloatParam,

    // Bell 3 (high shelf when `high_shelf_mode` is on)
    #[id = "bell3_freq"]
    pub bell3_freq: FloatParam,
    #[id = "bell3_gain"]
    pub bell3_gain: FloatParam,
    #[id = "bell3_q"]
    pub bell3_q: FloatParam,

    #[id = "low_shelf_mode"]
    pub low_shelf_mode: BoolParam,
    #[id = "high_shelf_mode"]
    pub high_shelf_mode: BoolParam,
}

fn freq_param(name: &str, default: f32) -> FloatParam {
    FloatParam::new(
        name,
        default,
        FloatRange::Skewed {
            min: MIN_FREQ_HZ,
            max: MAX_FREQ_HZ,
            factor: FloatRange::skew_factor(-1.0),
        },
    )
    .with_step_size(0.01)
    .with_value_to_string(formatters::v2s_f32_hz_then_khz(2))
    .with_string_to_value(formatters::s2v_f32_hz_then_khz())
}

fn gain_param(name: &str, default: f32) -> FloatParam {
    FloatParam::new(
        name,
        default,
        FloatRange::Linear {
            min: -MAX_GAIN_DB,
            max: MAX_GAIN_DB,
        },
    )
    .with_step_size(0.1)
    .with_unit(" dB")
    .with_value_to_string(formatters::v2s_f32_rounded(1))
}

fn q_param(name: &str, default: f32) -> FloatParam {
    FloatParam::new(
        name,
        default,
        FloatRange::Linear {
            min: MIN_Q,
            max: MAX_Q,
        },
    )
    .with_step_size(0.01)
    .with_value_to_string(formatters::v2s_f32_rounded(2))
}

impl Default for ParametricEqualizerParams {
    fn default() -> Self {
        let defaults = EqualizerParameters::default();

        Self {
            hp_freq: freq_param("High Pass Frequency", defaults.hp_freq),
            lp_freq: freq_param("Low Pass Frequency", defaults.lp_freq),

            bell1_freq: freq_param("Bell1 Frequency", defaults.bell1.freq),
            bell1_gain: gain_param("Bell1 Gain", defaults.bell1.gain_db),
            bell1_q: q_param("Bell1 Q", defaults.bell1.q),

            bell2_freq: freq_param("Bell2 Frequency", defaults.bell2.freq),
            bell2_gain: gain_param("Bell2 Gain", defaults.bell2.gain_db),
            bell2_q: q_param("Bell2 Q", defaults.bell2.q),

            bell3_freq: freq_param("Bell3 Frequency", defaults.bell3.freq),
            bell3_gain: gain_param("Bell3 Gain", defaults.bell3.gain_db),
            bell3_q: q_param("Bell3 Q", defaults.bell3.q),

            low_shelf_mode: BoolParam::new("Low Shelf Mode", defaults.low_shelf_mode),
            high_shelf_mode: BoolParam::new("High Shelf Mode", defaults.high_shelf_mode),
        }
    }
}

impl ParametricEqualizerParams {
    /// Read every parameter's current value. Called once per block on the audio thread.
    pub fn snapshot(&self) -> EqualizerParameters {
        EqualizerParameters {
            hp_freq: self.hp_freq.value(),
            lp_freq: self.lp_freq.value(),
            bell1: BellBand::new(
                self.bell1_freq.value(),
                self.bell1_gain.value(),
                self.bell1_q.value(),
            ),
            bell2: BellBand::new(
                self.bell2_freq.value(),
                self.bell2_gain.value(),
                self.bell2_q.value(),
            ),
            bell3: BellBand::new(
                self.bell3_freq.value(),
                self.bell3_gain.value(),
                self.bell3_q.value(),
            ),
            low_shelf_mode: self.low_shelf_mode.value(),
            high_shelf_mode: self.high_shelf_mode.value(),
        }
    }
}
