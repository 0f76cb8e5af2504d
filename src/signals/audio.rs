//! Audio signal trait for sample-rate-aware signals.

use crate::Signal;

/// A signal that is generated at a fixed sample rate.
///
/// The sample rate determines the time step each call to `next_sample()`
/// represents (`1.0 / sample_rate` seconds).
///
/// # Examples
///
/// ```
/// use bleedgate::{AudioSignal, SkipGateOscillator};
///
/// let osc = SkipGateOscillator::new(2.0, 0.5, 0.0, 0.0, 48000.0);
/// assert_eq!(osc.sample_rate(), 48000.0);
/// assert_eq!(osc.sample_time(), 1.0 / 48000.0);
/// ```
pub trait AudioSignal: Signal {
    /// Gets the sample rate at which this signal is being generated.
    ///
    /// # Returns
    ///
    /// Sample rate in Hz (e.g., 48000.0)
    fn sample_rate(&self) -> f64;

    /// Seconds elapsed between two consecutive samples.
    fn sample_time(&self) -> f64 {
        1.0 / self.sample_rate()
    }
}
