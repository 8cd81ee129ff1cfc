//! Progress reporting for long RRF scans.
//!
//! MRCONSO alone runs to several gigabytes, so every scan reports its
//! position through a [`Progress`] implementation supplied by the caller.

use crate::types::ProgressUnit;

/// Receives progress updates from file scans.
///
/// One scan calls `start` once, `advance` any number of times with a
/// monotonically increasing position, then `finish` once.
pub trait Progress {
    /// A scan named `phase` begins; `total` is measured in `unit`.
    fn start(&mut self, phase: &str, total: u64, unit: ProgressUnit);

    /// The scan has reached `position` (same unit as `total`).
    fn advance(&mut self, position: u64);

    /// The scan is complete.
    fn finish(&mut self);
}

/// A progress sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _phase: &str, _total: u64, _unit: ProgressUnit) {}

    fn advance(&mut self, _position: u64) {}

    fn finish(&mut self) {}
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn start(&mut self, phase: &str, total: u64, unit: ProgressUnit) {
        (**self).start(phase, total, unit)
    }

    fn advance(&mut self, position: u64) {
        (**self).advance(position)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}
