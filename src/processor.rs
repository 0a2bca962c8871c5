use nih_plug::prelude::*;
use std::sync::Arc;

use crate::equalizer::{Equalizer, MAX_CHANNELS};
use crate::params::ParametricEqualizerParams;

pub struct ParametricEqualizer {
    // Shared with the host
    params: Arc<ParametricEqualizerParams>,

    equalizer: Equalizer,
}

impl ParametricEqualizer {
    pub fn params_handle(&self) -> Arc<ParametricEqualizerParams> {
        self.params.clone()
    }

    pub fn equalizer(&self) -> &Equalizer {
        &self.equalizer
    }
}

impl Default for ParametricEqualizer {
    fn default() -> Self {
        // The channel count is only known once the host picks a layout in `initialize`
        Self {
            params: Arc::new(ParametricEqualizerParams::default()),
            equalizer: Equalizer::default(),
        }
    }
}

impl Plugin for ParametricEqualizer {
    const NAME: &'static str = "Parametric Equalizer";
    const VENDOR: &'static str = "Kakeru3";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";

    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            ..AudioIOLayout::const_default()
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            ..AudioIOLayout::const_default()
        },
    ];

    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let num_channels = audio_io_layout
            .main_output_channels
            .map(NonZeroU32::get)
            .unwrap_or(0) as usize;

        if !(1..=MAX_CHANNELS).contains(&num_channels) || buffer_config.sample_rate <= 0.0 {
            nih_log!(
                "unsupported configuration: {} channel(s) at {} Hz",
                num_channels,
                buffer_config.sample_rate
            );
            return false;
        }

        nih_log!(
            "initializing at {} Hz, {} channel(s), up to {} samples per block",
            buffer_config.sample_rate,
            num_channels,
            buffer_config.max_buffer_size
        );

        // 新しいストリームなのでフィルターの状態をクリアしてから係数を計算し直す
        self.equalizer = Equalizer::new(num_channels);
        self.equalizer.initialize(buffer_config.sample_rate);
        self.equalizer.update_parameters(&self.params.snapshot());

        true
    }

    fn reset(&mut self) {
        self.equalizer.reset();
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        // パラメーターはブロックごとに読み、変化があったときだけ係数を更新する
        self.equalizer.update_parameters(&self.params.snapshot());

        for channel_samples in buffer.iter_samples() {
            for (channel, sample) in channel_samples.into_iter().enumerate() {
                *sample = self.equalizer.process_sample(channel, *sample);
            }
        }

        ProcessStatus::Normal
    }
}
