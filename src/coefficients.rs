//! Audio-EQ cookbook coefficient design.
//!
//! Every function here is pure: it maps `(sample_rate, freq, q[, gain_db])` to an
//! unnormalized set of biquad coefficients. Nothing is validated; callers are expected to hand
//! in values that are already inside the parameter ranges (see [`crate::chain`]).

use std::f64::consts::PI;

/// Coefficients of `H(z) = (b0 + b1 z^-1 + b2 z^-2) / (a0 + a1 z^-1 + a2 z^-2)`.
///
/// These are kept unnormalized, exactly as the cookbook formulas produce them. `a0` is never
/// zero for in-range input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Passes the signal through unchanged.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
impl BiquadCoefficients {
    pub(crate) fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a0, self.a1, self.a2]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Linear magnitude of the transfer function at `freq` Hz.
    pub(crate) fn magnitude_at(&self, freq: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * freq / sample_rate;
        let (s1, c1) = w.sin_cos();
        let (s2, c2) = (2.0 * w).sin_cos();

        // e^{-jw} = cos w - j sin w
        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = self.a0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);

        num_re.hypot(num_im) / den_re.hypot(den_im)
    }

    /// Magnitude response in decibels at `freq` Hz.
    pub(crate) fn magnitude_db_at(&self, freq: f64, sample_rate: f64) -> f64 {
        20.0 * self.magnitude_at(freq, sample_rate).log10()
    }
}

/// Which formula services one of the two switchable bell slots.
///
/// Resolved once per parameter update, never per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Peaking,
    LowShelf,
    HighShelf,
}

impl StageKind {
    pub fn design(self, sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
        match self {
            StageKind::Peaking => peaking(sample_rate, freq, q, gain_db),
            StageKind::LowShelf => low_shelf(sample_rate, freq, q, gain_db),
            StageKind::HighShelf => high_shelf(sample_rate, freq, q, gain_db),
        }
    }

    pub fn is_shelf(self) -> bool {
        !matches!(self, StageKind::Peaking)
    }
}

#[inline]
fn omega(sample_rate: f64, freq: f64) -> f64 {
    2.0 * PI * (freq / sample_rate)
}

/// `A = 10^(gain/40)`, the square root of the linear peak gain.
#[inline]
fn shelf_amplitude(gain_db: f64) -> f64 {
    10f64.powf(gain_db / 40.0)
}

/// Shelf alpha with `q` taken as the cookbook shelf slope.
#[inline]
fn shelf_alpha(sin_w0: f64, a: f64, q: f64) -> f64 {
    sin_w0 / 2.0 * ((a + 1.0 / a) * (1.0 / q - 1.0) + 2.0).sqrt()
}

pub fn low_pass(sample_rate: f64, freq: f64, q: f64) -> BiquadCoefficients {
    let (sin_w0, cos_w0) = omega(sample_rate, freq).sin_cos();
    let alpha = sin_w0 / (2.0 * q);

    BiquadCoefficients {
        b0: (1.0 - cos_w0) * 0.5,
        b1: 1.0 - cos_w0,
        b2: (1.0 - cos_w0) * 0.5,
        a0: 1.0 + alpha,
        a1: -2.0 * cos_w0,
        a2: 1.0 - alpha,
    }
}

pub fn high_pass(sample_rate: f64, freq: f64, q: f64) -> BiquadCoefficients {
    let (sin_w0, cos_w0) = omega(sample_rate, freq).sin_cos();
    let alpha = sin_w0 / (2.0 * q);

    BiquadCoefficients {
        b0: (1.0 + cos_w0) * 0.5,
        b1: -(1.0 + cos_w0),
        b2: (1.0 + cos_w0) * 0.5,
        a0: 1.0 + alpha,
        a1: -2.0 * cos_w0,
        a2: 1.0 - alpha,
    }
}

/// Bell filter. With `gain_db == 0` numerator and denominator are identical.
pub fn peaking(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = shelf_amplitude(gain_db);
    let (sin_w0, cos_w0) = omega(sample_rate, freq).sin_cos();
    let alpha = sin_w0 / (2.0 * q);

    BiquadCoefficients {
        b0: 1.0 + alpha * a,
        b1: -2.0 * cos_w0,
        b2: 1.0 - alpha * a,
        a0: 1.0 + alpha / a,
        a1: -2.0 * cos_w0,
        a2: 1.0 - alpha / a,
    }
}

pub fn low_shelf(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = shelf_amplitude(gain_db);
    let (sin_w0, cos_w0) = omega(sample_rate, freq).sin_cos();
    let alpha = shelf_alpha(sin_w0, a, q);
    let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;

    BiquadCoefficients {
        b0: a * ((a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
        b1: 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
        b2: a * ((a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
        a0: (a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
        a1: -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
        a2: (a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
    }
}

pub fn high_shelf(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = shelf_amplitude(gain_db);
    let (sin_w0, cos_w0) = omega(sample_rate, freq).sin_cos();
    let alpha = shelf_alpha(sin_w0, a, q);
    let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;

    BiquadCoefficients {
        b0: a * ((a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
        b1: -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
        b2: a * ((a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
        a0: (a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
        a1: 2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
        a2: (a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
    }
}

/// Largest pole magnitude of `a0 z^2 + a1 z + a2`. Below 1.0 means the filter is stable.
pub fn pole_radius(c: &BiquadCoefficients) -> f64 {
    let p = c.a1 / c.a0;
    let r = c.a2 / c.a0;
    let disc = p * p - 4.0 * r;

    if disc < 0.0 {
        // complex conjugate pair, |z|^2 = product of roots
        r.sqrt()
    } else {
        let sq = disc.sqrt();
        ((-p + sq) * 0.5).abs().max(((-p - sq) * 0.5).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 48000.0;
    const BUTTERWORTH_Q: f64 = 0.707;

    fn sum_b(c: &BiquadCoefficients) -> f64 {
        c.b0 + c.b1 + c.b2
    }

    fn sum_a(c: &BiquadCoefficients) -> f64 {
        c.a0 + c.a1 + c.a2
    }

    /// H(-1) numerator and denominator
    fn alt_b(c: &BiquadCoefficients) -> f64 {
        c.b0 - c.b1 + c.b2
    }

    fn alt_a(c: &BiquadCoefficients) -> f64 {
        c.a0 - c.a1 + c.a2
    }

    #[test]
    fn low_pass_unity_at_dc_and_zero_at_nyquist() {
        for sr in [44100.0, 48000.0, 96000.0] {
            let c = low_pass(sr, sr / 4.0, BUTTERWORTH_Q);
            assert!(
                (sum_b(&c) / sum_a(&c) - 1.0).abs() < 1e-12,
                "DC gain must be unity at {sr}"
            );
            assert!(alt_b(&c).abs() < 1e-12, "Nyquist gain must vanish at {sr}");
        }
    }

    #[test]
    fn high_pass_unity_at_nyquist_and_zero_at_dc() {
        for sr in [44100.0, 48000.0, 96000.0] {
            let c = high_pass(sr, sr / 4.0, BUTTERWORTH_Q);
            assert!(
                (alt_b(&c) / alt_a(&c) - 1.0).abs() < 1e-12,
                "Nyquist gain must be unity at {sr}"
            );
            assert!(sum_b(&c).abs() < 1e-12, "DC gain must vanish at {sr}");
        }
    }

    #[test]
    fn low_pass_known_values_at_quarter_rate() {
        // w0 = pi/2, so cos = 0 and alpha = 1/(2Q)
        let c = low_pass(SR, SR / 4.0, BUTTERWORTH_Q);
        let alpha = 1.0 / (2.0 * BUTTERWORTH_Q);
        let tol = 1e-12;

        assert!((c.b0 - 0.5).abs() < tol);
        assert!((c.b1 - 1.0).abs() < tol);
        assert!((c.b2 - 0.5).abs() < tol);
        assert!((c.a0 - (1.0 + alpha)).abs() < tol);
        assert!(c.a1.abs() < tol);
        assert!((c.a2 - (1.0 - alpha)).abs() < tol);
    }

    #[test]
    fn zero_gain_peaking_is_a_no_op() {
        for &(freq, q) in &[(20.0, 0.1), (1000.0, 0.707), (12000.0, 10.0)] {
            let c = peaking(SR, freq, q, 0.0);
            assert!((c.b0 - c.a0).abs() < 1e-9);
            assert!((c.b1 - c.a1).abs() < 1e-9);
            assert!((c.b2 - c.a2).abs() < 1e-9);
        }
    }

    #[test]
    fn peaking_hits_requested_gain_at_center() {
        for gain in [-24.0, -6.0, 3.0, 12.0] {
            let c = peaking(SR, 1000.0, 1.0, gain);
            let db = c.magnitude_db_at(1000.0, SR);
            assert!((db - gain).abs() < 1e-9, "expected {gain} dB, got {db}");
        }
    }

    #[test]
    fn peaking_boost_and_cut_cancel() {
        let boost = peaking(SR, 2500.0, 2.0, 9.0);
        let cut = peaking(SR, 2500.0, 2.0, -9.0);
        for f in [50.0, 700.0, 2500.0, 9000.0] {
            let total = boost.magnitude_db_at(f, SR) + cut.magnitude_db_at(f, SR);
            assert!(total.abs() < 1e-9, "boost/cut residual {total} dB at {f} Hz");
        }
    }

    #[test]
    fn low_shelf_reaches_gain_at_dc() {
        let c = low_shelf(SR, 200.0, BUTTERWORTH_Q, 6.0);
        let dc_db = 20.0 * (sum_b(&c) / sum_a(&c)).log10();
        let nyq_db = 20.0 * (alt_b(&c) / alt_a(&c)).abs().log10();

        assert!((dc_db - 6.0).abs() < 1e-9, "DC gain was {dc_db}");
        assert!(nyq_db.abs() < 1e-9, "Nyquist gain was {nyq_db}");
    }

    #[test]
    fn high_shelf_reaches_gain_at_nyquist() {
        let c = high_shelf(SR, 5000.0, BUTTERWORTH_Q, -4.0);
        let dc_db = 20.0 * (sum_b(&c) / sum_a(&c)).log10();
        let nyq_db = 20.0 * (alt_b(&c) / alt_a(&c)).abs().log10();

        assert!(dc_db.abs() < 1e-9, "DC gain was {dc_db}");
        assert!((nyq_db + 4.0).abs() < 1e-9, "Nyquist gain was {nyq_db}");
    }

    #[test]
    fn shelves_are_half_gain_at_corner() {
        let ls = low_shelf(SR, 300.0, 1.0, 12.0);
        let hs = high_shelf(SR, 3000.0, 1.0, 12.0);
        assert!((ls.magnitude_db_at(300.0, SR) - 6.0).abs() < 1e-6);
        assert!((hs.magnitude_db_at(3000.0, SR) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn stage_kind_dispatches_to_matching_formula() {
        let args = (SR, 400.0, 0.9, 5.0);
        assert_eq!(
            StageKind::Peaking.design(args.0, args.1, args.2, args.3),
            peaking(args.0, args.1, args.2, args.3)
        );
        assert_eq!(
            StageKind::LowShelf.design(args.0, args.1, args.2, args.3),
            low_shelf(args.0, args.1, args.2, args.3)
        );
        assert_eq!(
            StageKind::HighShelf.design(args.0, args.1, args.2, args.3),
            high_shelf(args.0, args.1, args.2, args.3)
        );
        assert!(!StageKind::Peaking.is_shelf());
        assert!(StageKind::LowShelf.is_shelf());
    }

    #[test]
    fn designs_are_stable_across_parameter_ranges() {
        let freqs = [20.0, 31.5, 100.0, 440.0, 1000.0, 4000.0, 10000.0, 16000.0, 20000.0];
        let qs = [0.1, 0.3, 0.707, 1.0, 2.5, 5.0, 10.0];
        let gains = [-24.0, -12.0, -3.0, 0.0, 3.0, 12.0, 24.0];

        for sr in [44100.0, 48000.0, 96000.0, 192000.0] {
            for &f in &freqs {
                for &q in &qs {
                    for c in [low_pass(sr, f, q), high_pass(sr, f, q)] {
                        let r = pole_radius(&c);
                        assert!(r < 1.0, "pass filter unstable: sr={sr} f={f} q={q} r={r}");
                    }
                    for &g in &gains {
                        let r = pole_radius(&peaking(sr, f, q, g));
                        assert!(r < 1.0, "bell unstable: sr={sr} f={f} q={q} g={g} r={r}");

                        // Steeper slopes have no real shelf alpha at this gain
                        let a = 10.0f64.powf(g / 40.0);
                        if (a + 1.0 / a) * (1.0 / q - 1.0) + 2.0 > 0.0 {
                            for c in [low_shelf(sr, f, q, g), high_shelf(sr, f, q, g)] {
                                let r = pole_radius(&c);
                                assert!(
                                    r < 1.0,
                                    "shelf unstable: sr={sr} f={f} q={q} g={g} r={r}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn steep_shelf_slope_at_high_gain_is_not_finite() {
        // The chain limits shelf slope before designing because of this
        let c = low_shelf(SR, 200.0, 10.0, 24.0);
        assert!(!c.b0.is_finite());
    }

    #[test]
    fn identity_has_flat_response() {
        let c = BiquadCoefficients::default();
        assert_eq!(c, BiquadCoefficients::IDENTITY);
        assert!(c.is_finite());
        assert!((c.magnitude_at(1234.0, SR) - 1.0).abs() < 1e-15);
    }
}
