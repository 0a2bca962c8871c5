//! Lock-free parameter hand-off for embedders that drive [`crate::Equalizer`] directly instead of
//! through the plugin wrapper.

use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chain::{BellBand, EqualizerParameters};

/// One atomic per scalar. The control side calls [`publish`](Self::publish), the audio side
/// calls [`snapshot`](Self::snapshot) once per block. Neither side ever blocks.
///
/// A snapshot taken while a publish is in flight may mix old and new values for one block.
#[derive(Debug)]
pub struct SharedParameters {
    hp_freq: AtomicF32,
    lp_freq: AtomicF32,
    bells: [SharedBand; 3],
    low_shelf_mode: AtomicBool,
    high_shelf_mode: AtomicBool,
}

#[derive(Debug)]
struct SharedBand {
    freq: AtomicF32,
    gain_db: AtomicF32,
    q: AtomicF32,
}

impl SharedBand {
    fn new(band: &BellBand) -> Self {
        Self {
            freq: AtomicF32::new(band.freq),
            gain_db: AtomicF32::new(band.gain_db),
            q: AtomicF32::new(band.q),
        }
    }

    fn store(&self, band: &BellBand) {
        self.freq.store(band.freq, Ordering::Relaxed);
        self.gain_db.store(band.gain_db, Ordering::Relaxed);
        self.q.store(band.q, Ordering::Relaxed);
    }

    fn load(&self) -> BellBand {
        BellBand {
            freq: self.freq.load(Ordering::Relaxed),
            gain_db: self.gain_db.load(Ordering::Relaxed),
            q: self.q.load(Ordering::Relaxed),
        }
    }
}

impl SharedParameters {
    pub fn new(params: &EqualizerParameters) -> Self {
        Self {
            hp_freq: AtomicF32::new(params.hp_freq),
            lp_freq: AtomicF32::new(params.lp_freq),
            bells: [
                SharedBand::new(&params.bell1),
                SharedBand::new(&params.bell2),
                SharedBand::new(&params.bell3),
            ],
            low_shelf_mode: AtomicBool::new(params.low_shelf_mode),
            high_shelf_mode: AtomicBool::new(params.high_shelf_mode),
        }
    }

    pub fn publish(&self, params: &EqualizerParameters) {
        self.hp_freq.store(params.hp_freq, Ordering::Relaxed);
        self.lp_freq.store(params.lp_freq, Ordering::Relaxed);
        self.bells[0].store(&params.bell1);
        self.bells[1].store(&params.bell2);
        self.bells[2].store(&params.bell3);
        self.low_shelf_mode
            .store(params.low_shelf_mode, Ordering::Relaxed);
        self.high_shelf_mode
            .store(params.high_shelf_mode, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EqualizerParameters {
        EqualizerParameters {
            hp_freq: self.hp_freq.load(Ordering::Relaxed),
            lp_freq: self.lp_freq.load(Ordering::Relaxed),
            bell1: self.bells[0].load(),
            bell2: self.bells[1].load(),
            bell3: self.bells[2].load(),
            low_shelf_mode: self.low_shelf_mode.load(Ordering::Relaxed),
            high_shelf_mode: self.high_shelf_mode.load(Ordering::Relaxed),
        }
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(&EqualizerParameters::default())
    }
}
