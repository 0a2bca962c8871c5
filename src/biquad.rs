use crate::coefficients::BiquadCoefficients;

/// One second-order section with double precision state.
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    coefficients: BiquadCoefficients,

    // Normalized by a0 once per coefficient change. Dividing here instead of per sample gives
    // the same result since the quotient is computed from the same operands.
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    z1: f64,
    z2: f64,
}

impl Biquad {
    pub fn new() -> Self {
        Self {
            coefficients: BiquadCoefficients::IDENTITY,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Replace the coefficients. The delay line is left alone so that parameter tweaks during
    /// playback don't produce a state discontinuity.
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        let BiquadCoefficients { b0, b1, b2, a0, a1, a2 } = coefficients;
        self.coefficients = coefficients;
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }

    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        // Direct Form II: feedback into w first, then the feed-forward taps
        let w = x as f64 - self.a1 * self.z1 - self.a2 * self.z2;
        let y = self.b0 * w + self.b1 * self.z1 + self.b2 * self.z2;
        self.z2 = self.z1;
        self.z1 = w;
        y as f32
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
