use nih_plug::prelude::*;

pub mod biquad;
pub mod chain;
pub mod coefficients;
pub mod equalizer;
pub mod params;
pub mod processor;
pub mod shared;

pub use chain::{BellBand, ChainCoefficients, EqualizerParameters, FilterChain, Slot};
pub use coefficients::{BiquadCoefficients, StageKind};
pub use equalizer::Equalizer;
pub use processor::ParametricEqualizer;
pub use shared::SharedParameters;

impl ClapPlugin for ParametricEqualizer {
    const CLAP_ID: &'static str = "com.kakeru3.parametric-equalizer";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("High-pass, three bells with switchable shelves, and low-pass");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Equalizer,
        ClapFeature::Stereo,
        ClapFeature::Mono,
    ];
}

impl Vst3Plugin for ParametricEqualizer {
    const VST3_CLASS_ID: [u8; 16] = *b"ParamEqKakeru3Aa";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Eq];
}

nih_export_clap!(ParametricEqualizer);
nih_export_vst3!(ParametricEqualizer);
