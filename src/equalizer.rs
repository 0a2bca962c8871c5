use nih_plug::prelude::*;

use crate::chain::{ChainCoefficients, EqualizerParameters, FilterChain};

/// Mono or stereo.
pub const MAX_CHANNELS: usize = 2;

/// Rate the stages are designed for until a host calls [`Equalizer::initialize`].
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// The filter engine as seen from a host: one [`FilterChain`] per channel, all driven by the same
/// coefficients. Nothing here allocates, so every method is safe to call from the audio thread.
#[derive(Debug, Clone)]
pub struct Equalizer {
    sample_rate: f32,
    num_channels: usize,
    channels: [FilterChain; MAX_CHANNELS],

    params: EqualizerParameters,
    coefficients: ChainCoefficients,
}

impl Equalizer {
    pub fn new(num_channels: usize) -> Self {
        nih_debug_assert!((1..=MAX_CHANNELS).contains(&num_channels));

        let mut equalizer = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            num_channels: num_channels.clamp(1, MAX_CHANNELS),
            channels: [FilterChain::new(); MAX_CHANNELS],
            params: EqualizerParameters::default(),
            coefficients: ChainCoefficients::default(),
        };
        // The stored snapshot and the running stages agree from the start
        equalizer.redesign();
        equalizer
    }

    /// Start a new stream at `sample_rate`. Clears all filter state and redesigns every stage
    /// from the last parameters seen.
    pub fn initialize(&mut self, sample_rate: f32) {
        nih_debug_assert!(sample_rate > 0.0);

        self.sample_rate = sample_rate;
        self.redesign();
        self.reset();
    }

    pub fn reset(&mut self) {
        for chain in self.channels.iter_mut() {
            chain.reset_all();
        }
    }

    /// Apply a new parameter snapshot. Returns whether anything had to be recomputed; unchanged
    /// snapshots are skipped so this can be called once per block.
    pub fn update_parameters(&mut self, params: &EqualizerParameters) -> bool {
        if *params == self.params {
            return false;
        }

        self.params = *params;
        self.redesign();
        true
    }

    fn redesign(&mut self) {
        self.coefficients = ChainCoefficients::design(&self.params, self.sample_rate);
        for chain in self.channels.iter_mut() {
            chain.apply(&self.coefficients);
        }
    }

    /// Filter one sample of `channel`. Channels that weren't prepared pass through untouched.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, x: f32) -> f32 {
        match self.channels[..self.num_channels].get_mut(channel) {
            Some(chain) => chain.process_sample(x),
            None => x,
        }
    }

    pub fn process_channel_buffer(&mut self, channel: usize, input: &[f32], output: &mut [f32]) {
        nih_debug_assert_eq!(input.len(), output.len());

        match self.channels[..self.num_channels].get_mut(channel) {
            Some(chain) => chain.process_buffer(input, output),
            None => {
                let len = input.len().min(output.len());
                output[..len].copy_from_slice(&input[..len]);
            }
        }
    }

    pub fn process_channel_in_place(&mut self, channel: usize, samples: &mut [f32]) {
        if let Some(chain) = self.channels[..self.num_channels].get_mut(channel) {
            chain.process_in_place(samples);
        }
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn coefficients(&self) -> &ChainCoefficients {
        &self.coefficients
    }
}

impl Default for Equalizer {
    fn default() -> Self {
        Self::new(MAX_CHANNELS)
    }
}
